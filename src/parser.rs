use crate::error::{Error, ParseError, Reporter};
use crate::token::{Token, Type};
use crate::literal::Literal;
use crate::expr::*;
use crate::stmt::*;

type ParseResult<T> = Result<T, ParseError>;

/// Operators that can never start an expression. `+` and `-` are missing
/// because they double as unary prefixes.
const BINARY_OPERATORS: [Type; 9] = [
    Type::Star, Type::Slash, Type::Pow,
    Type::EqualEqual, Type::BangEqual,
    Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual,
];

/// Returns if the next token is any of the given types.
macro_rules! matches {
    ( $self:ident, $( $type:expr ),+ ) => {
        {
            if $( $self.check($type) ) ||* {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Parses the tokens and returns the resulting statements.
///
/// - Program     -> Declaration* EOF ;
/// - Block       -> "{" Declaration* "}" ;
/// - Declaration -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl   -> "class" IDENTIFIER ( "<" IDENTIFIER )? "{" Function* "}" ;
/// - FunDecl     -> "fun" Function ;
/// - VarDecl     -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Function    -> IDENTIFIER "(" Parameters? ")" Block ;
/// - Parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement   -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt
///                | BreakStmt | WhileStmt | Block ;
/// - ExprStmt    -> Expression? ";" ;
/// - ForStmt     -> "for" "(" ( VarDecl | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt      -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt   -> "print" Expression ";" ;
/// - ReturnStmt  -> "return" Expression? ";" ;
/// - BreakStmt   -> "break" ";" ;
/// - WhileStmt   -> "while" "(" Expression ")" Statement ;
/// - Expression  -> Assignment ;
/// - Assignment  -> ( Call "." )? IDENTIFIER "=" Assignment | LogicOr ;
/// - LogicOr     -> LogicAnd ( "or" LogicAnd )* ;
/// - LogicAnd    -> Ternary ( "and" Ternary )* ;
/// - Ternary     -> Equality ( "?" Equality ":" Equality )? ;
/// - Equality    -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison  -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term        -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor      -> Pow ( ( "*" | "/" ) Pow )* ;
/// - Pow         -> Unary ( "**" Unary )* ;
/// - Unary       -> ( "!" | "-" | "+" ) Unary | Call ;
/// - Arguments   -> Expression ( "," Expression )* ;
/// - Call        -> Primary ( "(" Arguments? ")" | "." IDENTIFIER )* ;
/// - Primary     -> NUMBER | STRING | "false" | "true" | "nil" | "this"
///                | "super" | "(" Expression ")" | IDENTIFIER ;
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    reporter: &'a mut Reporter,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, reporter: &'a mut Reporter) -> Self {
        Parser {
            tokens,
            current: 0,
            reporter,
        }
    }

    /// Parses the tokens and returns the resulting statements.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        statements
    }

    /// Returns the next token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the previous token without consuming it.
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Returns if the parser has reached the end of the file.
    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    /// Returns if the next token is of the given type.
    fn check(&self, r#type: Type) -> bool {
        if self.is_at_end() {
            return false
        }

        self.peek().r#type == r#type
    }

    /// Consumes the next token and returns it.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    /// Consumes the next token if it is of the given type.
    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<&Token> {
        if self.check(r#type) {
            return Ok(self.advance());
        }

        Err(ParseError {
            token: self.peek().clone(),
            message: message.to_string(),
            missing: false,
        })
    }

    /// Parses a declaration.
    fn declaration(&mut self) -> Option<Stmt> {
        let statement = if matches!(self, Type::Class) {
            self.class_declaration()
        } else if matches!(self, Type::Fun) {
            self.function("function").map(Stmt::Function)
        } else if matches!(self, Type::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match statement {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                error.throw(self.reporter);
                self.synchronize();
                None
            }
        }
    }

    /// Parses a class declaration
    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name")?.clone();

        let superclass = if matches!(self, Type::Less) {
            self.consume(Type::Identifier, "Expect superclass name")?;
            Some(VariableData::new(self.previous().clone()))
        } else {
            None
        };

        self.consume(Type::LeftBrace, "Expect '{' before class body")?;

        let mut methods = vec![];
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expect '}' after class body")?;

        Ok(Stmt::Class(ClassData { name, superclass, methods }))
    }

    /// Parses a variable declaration.
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name")?.clone();

        let mut initializer: Option<Expr> = None;
        if matches!(self, Type::Equal) {
            initializer = Some(self.expression()?);
        }

        self.consume(Type::Semicolon, "Expect ';' after variable declaration")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    /// Parses a while statement.
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition")?;
        let body = self.statement()?;

        Ok(Stmt::While(WhileData {
            condition,
            body: Box::new(body),
        }))
    }

    /// Parses an expression. A binary operator cannot start an expression;
    /// seeing one here means its left operand is missing.
    fn expression(&mut self) -> ParseResult<Expr> {
        if BINARY_OPERATORS.contains(&self.peek().r#type) {
            let token = self.peek().clone();
            return Err(ParseError {
                message: format!("Left operand for binary operation ({}) missing", token.lexeme),
                token,
                missing: false,
            });
        }

        self.assignment()
    }

    /// Parses a statement.
    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::For) {
            return self.for_statement();
        }

        if matches!(self, Type::If) {
            return self.if_statement();
        }

        if matches!(self, Type::Print) {
            return self.print_statement();
        }

        if matches!(self, Type::Return) {
            return self.return_statement();
        }

        if matches!(self, Type::Break) {
            return self.break_statement();
        }

        if matches!(self, Type::While) {
            return self.while_statement();
        }

        if matches!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    /// Parses a for statement by desugaring it into a while loop.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'")?;

        let initializer: Option<Stmt>;
        if matches!(self, Type::Semicolon) {
            initializer = None;
        } else if matches!(self, Type::Var) {
            initializer = Some(self.var_declaration()?);
        } else {
            initializer = Some(self.expression_statement()?);
        }

        let condition = match !self.check(Type::Semicolon) {
            true => Some(self.expression()?),
            false => None,
        };
        self.consume(Type::Semicolon, "Expect ';' after loop condition")?;

        let increment = match !self.check(Type::RightParen) {
            true => Some(self.expression()?),
            false => None,
        };
        self.consume(Type::RightParen, "Expect ')' after loop clauses")?;

        let mut body = self.statement()?;

        // Execute the increment after the body. A block body absorbs it;
        // anything else gets wrapped into one.
        if let Some(increment) = increment {
            let increment = Stmt::Expression(ExpressionData { expr: increment });

            body = match body {
                Stmt::Block(mut block) => {
                    block.statements.push(increment);
                    Stmt::Block(block)
                },
                body => Stmt::Block(BlockData {
                    statements: vec![body, increment],
                }),
            };
        }

        // Wrap the body into a while loop.
        // If there is no condition, use true.
        body = Stmt::While(WhileData {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        });

        // Add the initializer before the loop if there is one.
        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData {
                statements: vec![
                    initializer,
                    body,
                ],
            });
        }

        Ok(body)
    }

    /// Parses an if statement.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let mut else_branch: Option<Box<Stmt>> = None;
        if matches!(self, Type::Else) {
            else_branch = Some(Box::new(self.statement()?));
        }

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    /// Parses a print statement.
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;

        self.consume(Type::Semicolon, "Expect ';' after value")?;

        Ok(Stmt::Print(PrintData { expr }))
    }

    /// Parses a return statement.
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().to_owned();

        let value = match self.check(Type::Semicolon) {
            true => None,
            false => Some(self.expression()?),
        };

        self.consume(Type::Semicolon, "Expect ';' after return value")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    /// Parses a break statement.
    fn break_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().to_owned();

        self.consume(Type::Semicolon, "Expect ';' after 'break'")?;
        Ok(Stmt::Break(BreakData { keyword }))
    }

    /// Parses an expression statement. A lone ';' is a nil expression.
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::Semicolon) {
            return Ok(Stmt::Expression(ExpressionData { expr: Expr::Literal(Literal::Nil) }));
        }

        let expr = self.expression()?;

        self.consume(Type::Semicolon, "Expect ';' after expression")?;

        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    /// Parses a function declaration.
    fn function(&mut self, kind: &str) -> ParseResult<FunctionData> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name"))?.to_owned();

        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name"))?;

        let mut params: Vec<Token> = vec![];

        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    return Err(ParseError {
                        token: self.peek().to_owned(),
                        message: "Cannot have more than 255 parameters".to_string(),
                        missing: false,
                    });
                }

                let param = self.consume(Type::Identifier, "Expect parameter name")?.to_owned();

                if params.iter().any(|other| other.lexeme == param.lexeme) {
                    ParseError {
                        token: param.clone(),
                        message: format!("Duplicate parameter name '{}'", param.lexeme),
                        missing: false,
                    }.throw(self.reporter);
                }

                params.push(param);

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        self.consume(Type::RightParen, "Expect ')' after parameters")?;

        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body"))?;

        let body = self.block()?;

        Ok(FunctionData { name, params, body })
    }

    /// Parses a block statement.
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block")?;

        Ok(statements)
    }

    /// Parses an assignment expression.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if matches!(self, Type::Equal) {
            let equals = self.previous().to_owned();
            let value = self.assignment()?;

            if let Expr::Variable(data) = expr {
                return Ok(Expr::Assign(AssignData::new(data.name, value)));
            } else if let Expr::Get(data) = expr {
                return Ok(Expr::Set(SetData {
                    object: data.object,
                    name: data.name,
                    value: Box::new(value),
                }));
            }

            ParseError {
                token: equals,
                message: "Expected an assignable target.".to_string(),
                missing: false,
            }.throw(self.reporter);
        }

        Ok(expr)
    }

    /// Parses an or expression.
    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while matches!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses an and expression.
    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.ternary()?;

        while matches!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.ternary()?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses a ternary expression. Both branches sit at equality precedence.
    fn ternary(&mut self) -> ParseResult<Expr> {
        let expr = self.equality()?;

        if matches!(self, Type::Question) {
            let on_true = self.equality()?;
            self.consume(Type::Colon, "Expect ':' to complete the ternary")?;
            let on_false = self.equality()?;

            return Ok(Expr::Ternary(TernaryData {
                condition: Box::new(expr),
                on_true: Box::new(on_true),
                on_false: Box::new(on_false),
            }));
        }

        Ok(expr)
    }

    /// Parses the right operand of a binary operator. A missing expression
    /// is re-raised against the operator instead of the stray token.
    fn binary_operand(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Expr>,
        operator: &Token,
    ) -> ParseResult<Expr> {
        operand(self).map_err(|error| {
            if error.missing {
                ParseError {
                    token: operator.clone(),
                    message: format!("Right operand for binary operation ({}) missing", operator.lexeme),
                    missing: false,
                }
            } else {
                error
            }
        })
    }

    /// Parses an equality expression.
    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while matches!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.binary_operand(Self::comparison, &operator)?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a comparison expression.
    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while matches!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.binary_operand(Self::term, &operator)?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a term expression.
    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while matches!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.binary_operand(Self::factor, &operator)?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a factor expression.
    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.pow()?;

        while matches!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.binary_operand(Self::pow, &operator)?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a power expression.
    fn pow(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while matches!(self, Type::Pow) {
            let operator = self.previous().clone();
            let right = self.binary_operand(Self::unary, &operator)?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a unary expression.
    fn unary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::Bang, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.unary().map_err(|error| {
                if error.missing {
                    ParseError {
                        token: operator.clone(),
                        message: format!("Right operand for unary operator ({}) missing", operator.lexeme),
                        missing: false,
                    }
                } else {
                    error
                }
            })?;

            return Ok(Expr::Unary(UnaryData {
                operator,
                expr: Box::new(right)
            }));
        }

        self.call()
    }

    /// Parses a call's arguments.
    fn finish_call(&mut self, callee: Expr, open_paren: Token) -> ParseResult<Expr> {
        let mut arguments = vec![];

        if !self.check(Type::RightParen) {
            while {
                if arguments.len() >= 255 {
                    ParseError {
                        token: self.peek().to_owned(),
                        message: "Cannot have more than 255 arguments".to_string(),
                        missing: false,
                    }.throw(self.reporter);
                }

                arguments.push(self.expression()?);
                matches!(self, Type::Comma)
            } {}
        }

        let close_paren = self.consume(Type::RightParen, "Expect ')' after arguments")?.to_owned();

        Ok(Expr::Call(CallData {
            callee: Box::new(callee),
            open_paren,
            arguments,
            close_paren,
        }))
    }

    /// Parses a call expression.
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches!(self, Type::LeftParen) {
                let open_paren = self.previous().clone();
                expr = self.finish_call(expr, open_paren)?;
            } else if matches!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'")?;
                expr = Expr::Get(GetData { object: Box::new(expr), name: name.clone() });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses a primary expression.
    fn primary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }

        if matches!(self, Type::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }

        if matches!(self, Type::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }

        if matches!(self, Type::Number, Type::String) {
            return Ok(Expr::Literal(self.previous().clone().literal
                .expect("number or string to have a literal value")));
        }

        if matches!(self, Type::Super) {
            return Ok(Expr::Super(SuperData::new(self.previous().clone())));
        }

        if matches!(self, Type::This) {
            return Ok(Expr::This(ThisData::new(self.previous().clone())));
        }

        if matches!(self, Type::Identifier) {
            return Ok(Expr::Variable(VariableData::new(self.previous().clone())));
        }

        if matches!(self, Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression")?;

            return Ok(Expr::Grouping(GroupingData { expr: Box::new(expr) }));
        }

        Err(ParseError {
            token: self.peek().clone(),
            message: "Expected expression".to_string(),
            missing: true,
        })
    }

    /// Tries to recover from a parse error by skipping to the next
    /// statement boundary.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class => return,
                Type::Fun => return,
                Type::Var => return,
                Type::For => return,
                Type::If => return,
                Type::While => return,
                Type::Print => return,
                Type::Return => return,
                _ => self.advance()
            };
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> (Vec<Stmt>, Reporter) {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        let statements = Parser::new(tokens, &mut reporter).parse();
        (statements, reporter)
    }

    #[test]
    fn print_statement() {
        let (statements, reporter) = parse("print 1 + 2;");

        assert!(!reporter.had_error);
        assert_eq!(statements.len(), 1);
        let Stmt::Print(data) = &statements[0] else { panic!("expected a print statement") };
        let Expr::Binary(binary) = &data.expr else { panic!("expected a binary expression") };
        assert_eq!(binary.operator.r#type, Type::Plus);
    }

    #[test]
    fn empty_statement_is_nil_expression() {
        let (statements, reporter) = parse(";");

        assert!(!reporter.had_error);
        assert_eq!(statements, vec![
            Stmt::Expression(ExpressionData { expr: Expr::Literal(Literal::Nil) }),
        ]);
    }

    #[test]
    fn ternary_expression() {
        let (statements, reporter) = parse("print 1 == 2 ? \"a\" : \"b\";");

        assert!(!reporter.had_error);
        let Stmt::Print(data) = &statements[0] else { panic!("expected a print statement") };
        assert!(std::matches!(data.expr, Expr::Ternary(_)));
    }

    #[test]
    fn pow_binds_tighter_than_factor() {
        let (statements, reporter) = parse("2 * 3 ** 4;");

        assert!(!reporter.had_error);
        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        let Expr::Binary(outer) = &data.expr else { panic!("expected a binary expression") };
        assert_eq!(outer.operator.r#type, Type::Star);
        let Expr::Binary(right) = outer.right.as_ref() else { panic!("expected a nested binary") };
        assert_eq!(right.operator.r#type, Type::Pow);
    }

    #[test]
    fn for_loop_desugars_to_while() {
        let (statements, reporter) = parse("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(!reporter.had_error);
        // Outer block holds the initializer and the while loop.
        let Stmt::Block(block) = &statements[0] else { panic!("expected a block") };
        assert!(std::matches!(block.statements[0], Stmt::Var(_)));
        let Stmt::While(data) = &block.statements[1] else { panic!("expected a while loop") };
        // The body was wrapped into a block ending with the increment.
        let Stmt::Block(body) = data.body.as_ref() else { panic!("expected a block body") };
        assert!(std::matches!(body.statements.last(), Some(Stmt::Expression(_))));
    }

    #[test]
    fn for_loop_without_initializer_has_no_outer_block() {
        let (statements, reporter) = parse("for (;;) break;");

        assert!(!reporter.had_error);
        let Stmt::While(data) = &statements[0] else { panic!("expected a while loop") };
        assert_eq!(data.condition, Expr::Literal(Literal::Bool(true)));
    }

    #[test]
    fn super_is_a_primary_and_dot_is_a_get() {
        let (statements, reporter) = parse("super.hi();");

        // 'super' outside a class is a resolve error, not a parse error.
        assert!(!reporter.had_error);
        let Stmt::Expression(data) = &statements[0] else { panic!("expected an expression statement") };
        let Expr::Call(call) = &data.expr else { panic!("expected a call") };
        let Expr::Get(get) = call.callee.as_ref() else { panic!("expected a get") };
        assert!(std::matches!(get.object.as_ref(), Expr::Super(_)));
    }

    #[test]
    fn invalid_assignment_target() {
        let (_, reporter) = parse("1 = 2;");
        assert!(reporter.had_error);
    }

    #[test]
    fn leading_binary_operator() {
        let (statements, reporter) = parse("* 2;");
        assert!(reporter.had_error);
        assert!(statements.is_empty());
    }

    #[test]
    fn duplicate_parameters() {
        let (_, reporter) = parse("fun f(a, a) { return a; }");
        assert!(reporter.had_error);
    }

    #[test]
    fn synchronize_recovers_at_statement_boundary() {
        let (statements, reporter) = parse("print ); print 2;");

        assert!(reporter.had_error);
        // The second statement survives the first one's panic.
        assert_eq!(statements.len(), 1);
        assert!(std::matches!(statements[0], Stmt::Print(_)));
    }
}
