use crate::expr::Expr;
use crate::stmt::Stmt;

/// Returns a string representation of the expression in parenthesis.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$self.print_expr($x);
            )*
            string += ")";

            string
        }
    };
}

/// Renders the syntax tree in a parenthesized prefix form. Debugging aid;
/// string literals keep their quotes to stay distinguishable from
/// identifiers.
pub struct ASTPrinter;

impl ASTPrinter {
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal.repr(),

            Expr::Grouping(data) => parenthesize!(self, "group", &data.expr),

            Expr::Unary(data) => parenthesize!(self, &data.operator.lexeme, &data.expr),

            Expr::Binary(data) => parenthesize!(self, &data.operator.lexeme, &data.left, &data.right),

            Expr::Ternary(data) => parenthesize!(self, "?:", &data.condition, &data.on_true, &data.on_false),

            Expr::Logical(data) => parenthesize!(self, &data.operator.lexeme, &data.left, &data.right),

            Expr::Variable(data) => data.name.lexeme.clone(),

            Expr::Assign(data) => {
                parenthesize!(self, format!("= {}", &data.name.lexeme).as_str(), &data.value)
            },

            Expr::Call(data) => {
                let mut string = String::new();
                string += &self.print_expr(&data.callee);
                string += "(";
                string += &data.arguments.iter()
                    .map(|argument| self.print_expr(argument))
                    .collect::<Vec<String>>()
                    .join(" ");
                string += ")";
                string
            },

            Expr::Get(data) => {
                format!("(. {} {})", self.print_expr(&data.object), data.name.lexeme)
            },

            Expr::Set(data) => {
                format!(
                    "(= (. {} {}) {})",
                    self.print_expr(&data.object),
                    data.name.lexeme,
                    self.print_expr(&data.value),
                )
            },

            Expr::This(data) => data.keyword.lexeme.clone(),

            Expr::Super(data) => data.keyword.lexeme.clone(),
        }
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(data) => parenthesize!(self, "expr", &data.expr),

            Stmt::Print(data) => parenthesize!(self, "print", &data.expr),

            Stmt::Var(data) => {
                let mut string = String::new();
                string += "(var ";
                string += &data.name.lexeme;
                if let Some(initializer) = &data.initializer {
                    string += " = ";
                    string += &self.print_expr(initializer);
                }
                string += ")";

                string
            },

            Stmt::Block(data) => {
                let mut string = String::new();
                string += "{";
                for stmt in &data.statements {
                    string += " ";
                    string += &self.print_stmt(stmt);
                }
                string += " }";

                string
            },

            Stmt::If(data) => {
                let mut string = String::new();
                string += "(if ";
                string += &self.print_expr(&data.condition);
                string += " ";
                string += &self.print_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    string += " else ";
                    string += &self.print_stmt(else_branch);
                }
                string += ")";

                string
            },

            Stmt::While(data) => {
                format!(
                    "(while {} {})",
                    self.print_expr(&data.condition),
                    self.print_stmt(&data.body),
                )
            },

            Stmt::Function(data) => {
                let mut string = String::new();
                string += "(fun ";
                string += &data.name.lexeme;
                string += "(";
                string += &data.params.iter()
                    .map(|param| param.lexeme.clone())
                    .collect::<Vec<String>>()
                    .join(" ");
                string += ") { ";
                string += &data.body.iter()
                    .map(|stmt| self.print_stmt(stmt))
                    .collect::<Vec<String>>()
                    .join(" ");
                string += " })";

                string
            },

            Stmt::Return(data) => {
                match &data.value {
                    Some(value) => parenthesize!(self, "return", value),
                    None => String::from("(return)"),
                }
            },

            Stmt::Break(_) => String::from("(break)"),

            Stmt::Class(data) => {
                let mut string = String::new();
                string += "(class ";
                string += &data.name.lexeme;
                if let Some(superclass) = &data.superclass {
                    string += " < ";
                    string += &superclass.name.lexeme;
                }
                string += " { ";
                string += &data.methods.iter()
                    .map(|method| self.print_stmt(&Stmt::Function(method.clone())))
                    .collect::<Vec<String>>()
                    .join(" ");
                string += " })";

                string
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Reporter;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn print(source: &str) -> String {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        let statements = Parser::new(tokens, &mut reporter).parse();
        assert!(!reporter.had_error);

        statements.iter()
            .map(|stmt| ASTPrinter.print_stmt(stmt))
            .collect::<Vec<String>>()
            .join(" ")
    }

    #[test]
    fn print_binary() {
        assert_eq!(print("1 + 2 * 3;"), "(expr (+ 1 (* 2 3)))");
    }

    #[test]
    fn print_string_literal_keeps_quotes() {
        assert_eq!(print("print \"hi\";"), "(print \"hi\")");
    }

    #[test]
    fn print_ternary() {
        assert_eq!(print("1 ? 2 : 3;"), "(expr (?: 1 2 3))");
    }

    #[test]
    fn print_var_and_assign() {
        assert_eq!(print("var a = 1; a = 2;"), "(var a = 1) (expr (= a 2))");
    }

    #[test]
    fn print_call_and_get() {
        assert_eq!(print("foo.bar(1, 2);"), "(expr (. foo bar)(1 2))");
    }

    #[test]
    fn print_function() {
        assert_eq!(
            print("fun add(a, b) { return a + b; }"),
            "(fun add(a b) { (return (+ a b)) })",
        );
    }

    #[test]
    fn print_class() {
        assert_eq!(
            print("class B < A { hi() { super.hi(); } }"),
            "(class B < A { (fun hi() { (expr (. super hi)()) }) })",
        );
    }
}
