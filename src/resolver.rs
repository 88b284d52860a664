use std::mem;
use std::collections::HashMap;

use crate::error::{Error, Reporter, ResolveError};
use crate::expr::{Expr, VariableData};
use crate::stmt::{FunctionData, Stmt};
use crate::interpreter::Interpreter;
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
    Subclass,
}

enum LoopType {
    None,
    While,
}

/// Statically walks the syntax tree, checking scope rules and recording the
/// distance between every local variable reference and its defining frame.
///
/// Each scope maps a name to whether its initializer has finished; reading
/// a name that is declared but not yet defined is an error. Distances are
/// handed to the interpreter; names that fall through every scope are left
/// for the global frame at runtime.
pub struct Resolver<'a, 'out> {
    interpreter: &'a mut Interpreter<'out>,
    reporter: &'a mut Reporter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    current_loop: LoopType,
}

impl<'a, 'out> Resolver<'a, 'out> {
    pub fn new(interpreter: &'a mut Interpreter<'out>, reporter: &'a mut Reporter) -> Self {
        Resolver {
            interpreter,
            reporter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            current_loop: LoopType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: format!("A variable is already defined with name '{}' in this scope", name.lexeme),
            }.throw(self.reporter);
        }

        scope.insert(name.lexeme.to_owned(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        scope.insert(name.lexeme.to_owned(), true);
    }

    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
    }

    /// A variable use. Also guards against `var a = a;` in a local scope.
    fn resolve_variable(&mut self, variable: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if scope.get(&variable.name.lexeme) == Some(&false) {
                ResolveError {
                    token: variable.name.to_owned(),
                    message: "Cannot read local variable in its own initializer".to_string(),
                }.throw(self.reporter);
            }
        }

        self.resolve_local(variable.id, &variable.name);
    }

    /// Function and method bodies reset the loop context; a `break` cannot
    /// jump across a call boundary.
    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);
        let enclosing_loop = mem::replace(&mut self.current_loop, LoopType::None);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_loop = enclosing_loop;
        self.current_function = enclosing_function;
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),

            Stmt::Print(data) => self.resolve_expr(&data.expr),

            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },

            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },

            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },

            Stmt::While(data) => {
                self.resolve_expr(&data.condition);

                let enclosing_loop = mem::replace(&mut self.current_loop, LoopType::While);
                self.resolve_stmt(&data.body);
                self.current_loop = enclosing_loop;
            },

            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);

                self.resolve_function(data, FunctionType::Function);
            },

            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot return from top-level code".to_string(),
                    }.throw(self.reporter);
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: "Cannot return a value from an initializer".to_string(),
                        }.throw(self.reporter);
                        return;
                    }

                    self.resolve_expr(value);
                }
            },

            Stmt::Break(data) => {
                if let LoopType::None = self.current_loop {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot break outside of a loop".to_string(),
                    }.throw(self.reporter);
                }
            },

            Stmt::Class(data) => {
                let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(&data.name);
                self.define(&data.name);

                if let Some(superclass) = &data.superclass {
                    if data.name.lexeme == superclass.name.lexeme {
                        ResolveError {
                            token: superclass.name.clone(),
                            message: "A class cannot inherit from itself".to_string(),
                        }.throw(self.reporter);
                    }

                    self.current_class = ClassType::Subclass;

                    self.resolve_variable(superclass);

                    self.begin_scope();
                    self.scopes
                        .last_mut()
                        .expect("stack to be not empty")
                        .insert("super".to_string(), true);
                }

                self.begin_scope();
                self.scopes
                    .last_mut()
                    .expect("stack to be not empty")
                    .insert("this".to_string(), true);

                for method in &data.methods {
                    let declaration = if method.name.lexeme.eq("init") {
                        FunctionType::Initializer
                    } else {
                        FunctionType::Method
                    };
                    self.resolve_function(method, declaration);
                }

                self.end_scope();

                if data.superclass.is_some() {
                    self.end_scope();
                }

                self.current_class = enclosing_class;
            },
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => (),

            Expr::Grouping(data) => self.resolve_expr(&data.expr),

            Expr::Unary(data) => self.resolve_expr(&data.expr),

            Expr::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },

            Expr::Ternary(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_expr(&data.on_true);
                self.resolve_expr(&data.on_false);
            },

            Expr::Variable(data) => self.resolve_variable(data),

            Expr::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(data.id, &data.name);
            },

            Expr::Call(data) => {
                self.resolve_expr(&data.callee);

                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            },

            Expr::Get(data) => self.resolve_expr(&data.object),

            Expr::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            },

            Expr::This(data) => {
                if let ClassType::None = self.current_class {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'this' outside of a class".to_string(),
                    }.throw(self.reporter);

                    return;
                }

                self.resolve_local(data.id, &data.keyword);
            },

            Expr::Super(data) => {
                match self.current_class {
                    ClassType::Subclass => (),
                    ClassType::None => ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' outside of a class".to_string(),
                    }.throw(self.reporter),
                    ClassType::Class => ResolveError {
                        token: data.keyword.clone(),
                        message: "Cannot use 'super' in a class with no superclass".to_string(),
                    }.throw(self.reporter),
                }

                self.resolve_local(data.id, &data.keyword);
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn resolve_source(source: &str, interpreter: &mut Interpreter<'_>) -> Reporter {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        let statements = Parser::new(tokens, &mut reporter).parse();
        assert!(!reporter.had_error);

        Resolver::new(interpreter, &mut reporter).resolve(&statements);
        reporter
    }

    #[test]
    fn closure_distances() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        // 'i' is two frames away from the inner body: count's scope, then
        // makeCounter's.
        let reporter = resolve_source(
            "fun makeCounter() { var i = 0; fun count() { i = i + 1; print i; } return count; }",
            &mut interpreter,
        );

        assert!(!reporter.had_error);
        assert!(interpreter.locals.values().any(|distance| *distance == 1));
    }

    #[test]
    fn globals_are_not_annotated() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source("var a = 1; print a;", &mut interpreter);

        assert!(!reporter.had_error);
        assert!(interpreter.locals.is_empty());
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let source = "{ var a = 1; { fun f() { print a; } f(); } }";
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        let statements = Parser::new(tokens, &mut reporter).parse();

        Resolver::new(&mut interpreter, &mut reporter).resolve(&statements);
        let first = interpreter.locals.clone();
        Resolver::new(&mut interpreter, &mut reporter).resolve(&statements);

        assert!(!reporter.had_error);
        assert_eq!(first, interpreter.locals);
    }

    #[test]
    fn read_in_own_initializer() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source("{ var a = 1; { var a = a; } }", &mut interpreter);
        assert!(reporter.had_error);
    }

    #[test]
    fn redeclaration_in_scope() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source("{ var a = 1; var a = 2; }", &mut interpreter);
        assert!(reporter.had_error);
    }

    #[test]
    fn return_at_top_level() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source("return 1;", &mut interpreter);
        assert!(reporter.had_error);
    }

    #[test]
    fn break_outside_a_loop() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source("break;", &mut interpreter);
        assert!(reporter.had_error);
    }

    #[test]
    fn break_inside_a_function_inside_a_loop() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        // The loop context does not leak into the function body.
        let reporter = resolve_source(
            "while (true) { fun f() { break; } f(); }",
            &mut interpreter,
        );
        assert!(reporter.had_error);
    }

    #[test]
    fn this_outside_a_class() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source("print this;", &mut interpreter);
        assert!(reporter.had_error);
    }

    #[test]
    fn super_without_a_superclass() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let reporter = resolve_source(
            "class A { hi() { super.hi(); } }",
            &mut interpreter,
        );
        assert!(reporter.had_error);
    }
}
