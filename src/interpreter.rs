use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Interrupt, Reporter, RuntimeError};
use crate::expr::{BinaryData, Expr, LogicalData, UnaryData};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{ClassData, Stmt};
use crate::token::{Token, Type};

/// Walks the resolved syntax tree and evaluates it.
///
/// Program output goes through the injected writer so callers can capture
/// it. Runtime failures unwind as `Interrupt` values; only the outermost
/// `interpret` talks to the reporter.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    pub(crate) locals: HashMap<usize, usize>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Executes the statements in order, reporting the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut Reporter) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Interrupt::Error(error)) => {
                    reporter.runtime_error(&error);
                    return;
                },
                Err(_) => unreachable!("return and break are rejected outside their contexts"),
            }
        }
    }

    /// Records the scope distance for a resolved expression.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Writes a line of program output.
    pub fn print(&mut self, text: &str) {
        writeln!(self.out, "{text}").ok();
    }

    /// Executes statements inside the given environment, restoring the
    /// previous one on every exit path, including unwinds.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Interrupt> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Interrupt> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(())
            },

            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                self.print(&value.to_string());
                Ok(())
            },

            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::from(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            },

            Stmt::Block(data) => {
                let environment = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
            },

            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },

            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    match self.execute(&data.body) {
                        Err(Interrupt::Break) => break,
                        result => result?,
                    }
                }
                Ok(())
            },

            Stmt::Function(data) => {
                let function = Function::new(data, Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
                Ok(())
            },

            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(value) => self.evaluate(value)?,
                    None => Object::from(Literal::Nil),
                };

                Err(Interrupt::Return(value))
            },

            Stmt::Break(_) => Err(Interrupt::Break),

            Stmt::Class(data) => self.class_declaration(data),
        }
    }

    fn class_declaration(&mut self, data: &ClassData) -> Result<(), Interrupt> {
        let superclass = match &data.superclass {
            Some(variable) => match self.look_up_variable(&variable.name, variable.id)? {
                Object::Class(class) => Some(class),
                value => {
                    return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: format!("Superclass must be a class, got {} type", value.type_str()),
                    }.into());
                },
            },
            None => None,
        };

        // The name is bound before the methods are created so they can
        // refer to the class.
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        // Methods close over an extra frame binding 'super'.
        let method_closure = match &superclass {
            Some(class) => {
                let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
                environment.define("super", Object::Class(Rc::clone(class)));
                Rc::new(RefCell::new(environment))
            },
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(method, Rc::clone(&method_closure), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods)));
        self.environment.borrow_mut().assign(&data.name, Object::Class(class))?;

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Object::from(literal.clone())),

            Expr::Grouping(data) => self.evaluate(&data.expr),

            Expr::Unary(data) => self.unary(data),

            Expr::Binary(data) => self.binary(data),

            Expr::Ternary(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.evaluate(&data.on_true)
                } else {
                    self.evaluate(&data.on_false)
                }
            },

            Expr::Logical(data) => self.logical(data),

            Expr::Variable(data) => self.look_up_variable(&data.name, data.id),

            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;

                match self.locals.get(&data.id) {
                    Some(distance) => {
                        self.environment.borrow_mut().assign_at(*distance, &data.name, value.clone())?;
                    },
                    None => {
                        self.globals.borrow_mut().assign(&data.name, value.clone())?;
                    },
                }

                // Assignment is an expression; it yields the assigned value.
                Ok(value)
            },

            Expr::Call(data) => {
                let callee = self.evaluate(&data.callee)?;

                let mut arguments = Vec::with_capacity(data.arguments.len());
                for argument in &data.arguments {
                    arguments.push(self.evaluate(argument)?);
                }

                let callable: &dyn Callable = match &callee {
                    Object::Function(function) => function,
                    Object::NativeFunction(native) => native,
                    Object::Class(class) => class,
                    _ => {
                        return Err(RuntimeError {
                            token: data.close_paren.clone(),
                            message: format!("Can only call functions and classes, got {} type", callee.type_str()),
                        });
                    },
                };

                let arity = callable.arity();
                if arity >= 0 && arity as usize != arguments.len() {
                    return Err(RuntimeError {
                        token: data.close_paren.clone(),
                        message: format!("Expected {} arguments but got {}", arity, arguments.len()),
                    });
                }

                callable.call(self, arguments)
            },

            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;

                match &object {
                    Object::Instance(instance) => {
                        instance.borrow().get(&data.name, &object)
                    },
                    // Reading a method off a class value happens on the
                    // 'super' path; bind it to the innermost visible 'this'.
                    Object::Class(class) => {
                        let method = class.borrow().find_method(&data.name.lexeme)
                            .ok_or_else(|| RuntimeError {
                                token: data.name.clone(),
                                message: format!("Undefined property '{}'", data.name.lexeme),
                            })?;
                        let this = self.environment.borrow().get(&Token::from("this"))?;

                        Ok(Object::from(method.bind(this)))
                    },
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: format!("Only instances have properties, got {} type", object.type_str()),
                    }),
                }
            },

            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;

                match object {
                    Object::Instance(instance) => {
                        let value = self.evaluate(&data.value)?;
                        instance.borrow_mut().set(&data.name, value.clone());
                        Ok(value)
                    },
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: format!("Only instances have fields, got {} type", object.type_str()),
                    }),
                }
            },

            Expr::This(data) => self.look_up_variable(&data.keyword, data.id),

            Expr::Super(data) => self.look_up_variable(&data.keyword, data.id),
        }
    }

    fn unary(&mut self, data: &UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => (-right.clone()).ok_or_else(|| Interpreter::unary_error(&data.operator, &right)),
            Type::Plus => match right {
                Object::Literal(Literal::Number(_)) => Ok(right),
                _ => Err(Interpreter::unary_error(&data.operator, &right)),
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn binary(&mut self, data: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let operator = &data.operator;

        match operator.r#type {
            Type::Plus => (left.clone() + right.clone())
                .ok_or_else(|| Interpreter::binary_error(operator, &left, &right)),
            Type::Minus => (left.clone() - right.clone())
                .ok_or_else(|| Interpreter::binary_error(operator, &left, &right)),
            Type::Star => (left.clone() * right.clone())
                .ok_or_else(|| Interpreter::binary_error(operator, &left, &right)),
            Type::Pow => left.clone().pow(right.clone())
                .ok_or_else(|| Interpreter::binary_error(operator, &left, &right)),

            Type::Slash => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => {
                    if *r == 0.0 {
                        Err(RuntimeError {
                            token: operator.clone(),
                            message: format!("Division by zero at {l} / {r}"),
                        })
                    } else {
                        Ok(Object::from(l / r))
                    }
                },
                _ => Err(Interpreter::binary_error(operator, &left, &right)),
            },

            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                match (&left, &right) {
                    (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => {
                        Ok(Object::from(match operator.r#type {
                            Type::Greater => l > r,
                            Type::GreaterEqual => l >= r,
                            Type::Less => l < r,
                            Type::LessEqual => l <= r,
                            _ => unreachable!(),
                        }))
                    },
                    _ => Err(Interpreter::binary_error(operator, &left, &right)),
                }
            },

            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),

            _ => unreachable!(),
        }
    }

    /// Short-circuit logic. The result is the deciding operand itself, not
    /// a coerced boolean.
    fn logical(&mut self, data: &LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;

        match data.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    /// Reads a variable through its resolved distance, or from the globals
    /// when the resolver left it unannotated.
    fn look_up_variable(&self, name: &Token, id: usize) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn unary_error(operator: &Token, right: &Object) -> RuntimeError {
        RuntimeError {
            token: operator.clone(),
            message: format!(
                "Unary operation '{}' is not supported for {} type",
                operator.lexeme,
                right.type_str(),
            ),
        }
    }

    fn binary_error(operator: &Token, left: &Object, right: &Object) -> RuntimeError {
        RuntimeError {
            token: operator.clone(),
            message: format!(
                "Binary operation '{}' is not supported between {} type and {} type",
                operator.lexeme,
                left.type_str(),
                right.type_str(),
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::TernaryData;

    fn number(n: f64) -> Expr {
        Expr::Literal(Literal::Number(n))
    }

    fn operator(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, String::from(lexeme), None, 1)
    }

    fn binary(left: Expr, op: Token, right: Expr) -> Expr {
        Expr::Binary(BinaryData {
            left: Box::new(left),
            operator: op,
            right: Box::new(right),
        })
    }

    #[test]
    fn evaluate_literal() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);
        let expr = number(12.0);
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Unary(UnaryData {
            operator: operator(Type::Minus, "-"),
            expr: Box::new(number(12.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));

        let expr = Expr::Unary(UnaryData {
            operator: operator(Type::Plus, "+"),
            expr: Box::new(number(12.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));

        let expr = Expr::Unary(UnaryData {
            operator: operator(Type::Bang, "!"),
            expr: Box::new(Expr::Literal(Literal::Nil)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_unary_type_error() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Unary(UnaryData {
            operator: operator(Type::Minus, "-"),
            expr: Box::new(Expr::Literal(Literal::from("a"))),
        });

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Unary operation '-' is not supported for string type");
    }

    #[test]
    fn evaluate_arithmetic() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(number(6.0), operator(Type::Minus, "-"), number(2.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(4.0));

        let expr = binary(number(2.0), operator(Type::Pow, "**"), number(10.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(1024.0));

        let expr = binary(number(1.0), operator(Type::Slash, "/"), number(2.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(0.5));
    }

    #[test]
    fn evaluate_string_concat() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(
            Expr::Literal(Literal::from("Hello")),
            operator(Type::Plus, "+"),
            Expr::Literal(Literal::from("World")),
        );
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn evaluate_mixed_add_is_an_error() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(
            number(1.0),
            operator(Type::Plus, "+"),
            Expr::Literal(Literal::from("b")),
        );

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Binary operation '+' is not supported between number type and string type");
    }

    #[test]
    fn evaluate_division_by_zero() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(number(1.0), operator(Type::Slash, "/"), number(0.0));

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Division by zero at 1 / 0");
    }

    #[test]
    fn evaluate_comparison() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(number(1.0), operator(Type::Less, "<"), number(2.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = binary(number(1.0), operator(Type::GreaterEqual, ">="), number(2.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_equality_across_types() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = binary(
            Expr::Literal(Literal::Nil),
            operator(Type::EqualEqual, "=="),
            Expr::Literal(Literal::Nil),
        );
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = binary(
            number(0.0),
            operator(Type::EqualEqual, "=="),
            Expr::Literal(Literal::from("")),
        );
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_ternary_takes_one_branch() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Ternary(TernaryData {
            condition: Box::new(Expr::Literal(Literal::Nil)),
            on_true: Box::new(number(1.0)),
            on_false: Box::new(number(2.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(2.0));
    }

    #[test]
    fn evaluate_logical_returns_operands() {
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let expr = Expr::Logical(LogicalData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: operator(Type::Or, "or"),
            right: Box::new(Expr::Literal(Literal::from("fallback"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("fallback"));

        let expr = Expr::Logical(LogicalData {
            left: Box::new(number(1.0)),
            operator: operator(Type::And, "and"),
            right: Box::new(number(2.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(2.0));
    }
}
