use crate::object::Object;
use crate::token::{Token, Type};

/// Collects diagnostics for a single driver invocation.
///
/// Every stage of the pipeline borrows the same reporter; the driver checks
/// the flags between stages and decides whether to continue. The prompt
/// resets the flags between submissions.
#[derive(Debug, Default)]
pub struct Reporter {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    /// Reports a static error without an offending lexeme.
    pub fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }

    /// Reports a static error. `location` is either empty, " at end" or
    /// " at '<lexeme>'".
    pub fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {line}] Error{location}: {message}");
        self.had_error = true;
    }

    /// Reports an error that occurred during evaluation.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!(
            "[line {line}] Error at '{lexeme}': {message}",
            line = error.token.line,
            lexeme = error.token.lexeme,
            message = error.message
        );
        self.had_runtime_error = true;
    }

    /// Clears both flags so the prompt can keep going after an error.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

/// Every static error type reports itself through the shared reporter.
pub trait Error {
    /// Prints the error message and sets the error flag.
    fn throw(&self, reporter: &mut Reporter);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self, reporter: &mut Reporter) {
        reporter.error(self.line, &self.message);
    }
}

/// Represents an error that occurs during parsing.
///
/// `missing` marks a missing expression so that the binary and unary rules
/// can swap in an operand-specific message before re-raising.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
    pub missing: bool,
}

impl Error for ParseError {
    fn throw(&self, reporter: &mut Reporter) {
        if self.token.r#type == Type::EOF {
            reporter.report(self.token.line, " at end", &self.message);
        } else {
            let location = format!(" at '{}'", self.token.lexeme);
            reporter.report(self.token.line, &location, &self.message);
        }
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self, reporter: &mut Reporter) {
        let location = format!(" at '{}'", self.token.lexeme);
        reporter.report(self.token.line, &location, &self.message);
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

/// Control flow that unwinds through the evaluator.
///
/// `Return` and `Break` are not user-facing errors; function calls and loops
/// catch them. The resolver rejects both outside their valid contexts, so
/// neither can reach the top of the interpreter.
#[derive(Debug)]
pub enum Interrupt {
    Error(RuntimeError),
    Return(Object),
    Break,
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Error(error)
    }
}
