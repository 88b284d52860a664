#![allow(clippy::needless_return)]

//! Slate is a small, dynamically typed scripting language written in Rust.
//! It has lexical scoping, first-class functions and classes with single
//! inheritance, and runs as a tree-walk interpreter over a hand-written
//! recursive descent parser.
//!
//! ## Scanning
//! The first step is scanning: turning the source text into a flat list of
//! tokens. The scanner in the [`scanner`](scanner) module makes a single
//! pass over the characters, slicing each lexeme out of the source and
//! tracking line numbers for diagnostics. Scan errors such as an
//! unterminated string or an unexpected character are reported immediately
//! and scanning continues, so a single run surfaces every lexical problem
//! at once and the token stream always ends with an EOF sentinel.
//!
//! ## Parsing
//! The [`parser`](parser) module turns the tokens into a syntax tree of
//! [`expressions`](expr::Expr) and [`statements`](stmt::Stmt). Expressions
//! produce an [`Object`](object::Object); statements have effects. The
//! parser is a recursive descent parser with one token of lookahead. When
//! it trips over a syntax error it reports it and synchronizes: tokens are
//! discarded until a statement boundary, and parsing resumes there so later
//! errors are still found.
//!
//! ## Resolving
//! The [`resolver`](resolver) module is a static pass between the parser
//! and the interpreter. It walks the tree once, checks the scope rules
//! (no reading a local in its own initializer, no redeclarations in the
//! same scope, `return`, `break`, `this` and `super` only where they are
//! valid) and computes, for every local variable reference, how many frames
//! outward its definition lives. Those distances are what make closures
//! capture the right variables at run time.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) module walks the resolved tree and
//! evaluates it. Scopes are a chain of [`Environment`](environment)
//! frames; function values capture the frame that was active where they
//! were defined. Runtime errors carry the offending token and unwind
//! through the evaluator, as do `return` and `break`, which the
//! interpreter catches at call and loop boundaries.

use std::io::{self, Write};
use std::{fs, mem, process};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub mod error;
pub mod token;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod ast;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod function;
pub mod resolver;
pub mod class;

use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use scanner::Scanner;
use resolver::Resolver;

#[allow(non_camel_case_types)]
pub struct slate<'a> {
    interpreter: Interpreter<'a>,
    reporter: Reporter,
}

impl<'a> slate<'a> {
    /// Creates a driver writing program output to `out`.
    pub fn new(out: &'a mut dyn Write) -> Self {
        slate {
            interpreter: Interpreter::new(out),
            reporter: Reporter::new(),
        }
    }

    /// Runs a script file. Exits with 65 on a static error and 70 on a
    /// runtime error.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);

        if self.reporter.had_error {
            process::exit(65);
        }
        if self.reporter.had_runtime_error {
            process::exit(70);
        }
    }

    /// Runs the interactive prompt. A line ending in ':' starts a
    /// multi-line buffer; any other line submits it. `.exit` and `.quit`
    /// leave, `.clear` wipes the screen, Ctrl-C exits with code 1.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("a terminal capable of line editing");

        let history = home::home_dir().map(|dir| dir.join(".slate_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        let mut buffer = String::new();
        let mut line: usize = 1;

        loop {
            let prompt = match buffer.is_empty() {
                true => format!("{line:>4} # "),
                false => String::from("       "),
            };

            match editor.readline(&prompt) {
                Ok(input) => {
                    match input.as_str() {
                        ".exit" | ".quit" => break,
                        ".clear" => {
                            print!("\x1b[H\x1b[2J\x1b[3J");
                            io::stdout().flush().ok();
                            continue;
                        },
                        _ => (),
                    }

                    if !input.is_empty() {
                        let _ = editor.add_history_entry(&input);
                    }

                    // A trailing ':' keeps the submission open.
                    if let Some(stripped) = input.strip_suffix(':') {
                        buffer += stripped;
                        buffer.push('\n');
                        continue;
                    }

                    buffer += &input;
                    let source = mem::take(&mut buffer);

                    self.run(&source);
                    self.reporter.reset();

                    line += 1;
                },
                Err(ReadlineError::Interrupted) => {
                    if let Some(path) = &history {
                        let _ = editor.save_history(path);
                    }
                    process::exit(1);
                },
                Err(_) => break,
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Feeds a source string through the pipeline. Every stage shares the
    /// reporter; a stage with errors aborts the rest.
    fn run(&mut self, source: &str) {
        let tokens = {
            let mut scanner = Scanner::new(source, &mut self.reporter);
            scanner.scan_tokens()
        };

        if self.reporter.had_error {
            return;
        }

        let statements = {
            let mut parser = Parser::new(tokens, &mut self.reporter);
            parser.parse()
        };

        if self.reporter.had_error {
            return;
        }

        {
            let mut resolver = Resolver::new(&mut self.interpreter, &mut self.reporter);
            resolver.resolve(&statements);
        }

        if self.reporter.had_error {
            return;
        }

        self.interpreter.interpret(&statements, &mut self.reporter);
    }
}
