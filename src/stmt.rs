use crate::expr::{Expr, VariableData};
use crate::token::Token;

/// Represents an expression statement's data in the language
#[derive(Debug, PartialEq, Clone)]
pub struct ExpressionData {
    pub expr: Expr,
}

/// Represents a print statement's data in the language
#[derive(Debug, PartialEq, Clone)]
pub struct PrintData {
    pub expr: Expr,
}

/// Represents a variable declaration's data in the language
#[derive(Debug, PartialEq, Clone)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

/// A function declaration. Methods share this shape, minus the `fun` keyword
/// in the source.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnData {
    pub keyword: Token,
    pub value: Option<Expr>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BreakData {
    pub keyword: Token,
}

/// A class declaration. The superclass is kept as a variable reference so
/// the resolver and the evaluator treat it like any other name.
#[derive(Debug, PartialEq, Clone)]
pub struct ClassData {
    pub name: Token,
    pub superclass: Option<VariableData>,
    pub methods: Vec<FunctionData>,
}

/// Represents a statement in the language
#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Expression(ExpressionData),
    Print(PrintData),
    Var(VarData),
    Block(BlockData),
    If(IfData),
    While(WhileData),
    Function(FunctionData),
    Return(ReturnData),
    Break(BreakData),
    Class(ClassData),
}
