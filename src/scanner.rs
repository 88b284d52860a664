use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::token::{Token, Type};
use crate::literal::Literal;
use crate::error::{Error, Reporter, ScanError};

/// Single-pass, maximal-munch scanner over the source characters.
///
/// `start` and `current` are char offsets into `src`; the lexeme of every
/// token is the `start..current` slice at the time it is emitted. Errors are
/// reported and scanning continues, so the token stream always ends in EOF.
pub struct Scanner<'a> {
    src: &'a str,
    source: PeekMoreIterator<Chars<'a>>,
    reporter: &'a mut Reporter,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(src: &'a str, reporter: &'a mut Reporter) -> Scanner<'a> {
        Scanner {
            src,
            source: src.chars().peekmore(),
            reporter,
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::from(""), None, self.line));

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> Option<char> {
        let next = self.source.next();
        if next.is_some() {
            self.current += 1;
        }
        next
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    /// Returns the next next character without consuming it.
    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_nth(1).copied()
    }

    /// Returns if the character after the next one is the expected character.
    /// Used while the current character is still unconsumed.
    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == Some(expected)
    }

    /// Adds a new token to the list of tokens. The lexeme is the current
    /// `start..current` source slice.
    fn add_token(&mut self, r#type: Type, literal: Option<Literal>) {
        let lexeme = self.src.substring(self.start, self.current).to_string();
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        self.advance();
        self.add_token(r#type, None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        self.advance();
        self.advance();
        self.add_token(r#type, None);
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    /// Handles a string literal. Strings may span lines; an unterminated
    /// string is reported but the partial token is still produced.
    fn string(&mut self) {
        self.advance(); // Move past the starting double quotes.

        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        let terminated = !self.is_at_end();
        if terminated {
            self.advance(); // Move past the closing double quotes.
        } else {
            ScanError {
                line: self.line,
                message: String::from("Unterminated string"),
            }.throw(self.reporter);
        }

        // Literal does not include the double quotes unlike the lexeme.
        let end = if terminated { self.current - 1 } else { self.current };
        let value = self.src.substring(self.start + 1, end).to_string();

        self.add_token(Type::String, Some(Literal::String(value)));
    }

    /// Handles a number literal. A letter directly after the digits is a
    /// lexical error; the numeric token is produced either way.
    fn number(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            self.advance(); // Consume the dot.

            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }

        if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '_') {
            ScanError {
                line: self.line,
                message: String::from("Invalid identifier or characters in number literal"),
            }.throw(self.reporter);
        }

        let lexeme = self.src.substring(self.start, self.current);
        let value: f64 = lexeme.parse().expect("a numeric lexeme to parse");

        self.add_token(Type::Number, Some(Literal::Number(value)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let lexeme = self.src.substring(self.start, self.current);
        let token_type = match lexeme {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "break"    => Type::Break,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, None);
    }

    /// Skips a `/* ... */` comment. Block comments do not nest; reaching the
    /// end of the file reports an error keyed at the opening line.
    fn block_comment(&mut self) {
        let opening = self.line;
        self.advance(); // '/'
        self.advance(); // '*'

        loop {
            match self.peek() {
                None => {
                    ScanError {
                        line: opening,
                        message: String::from("Unterminated block comment"),
                    }.throw(self.reporter);
                    break;
                },
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                },
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                },
                Some(_) => {
                    self.advance();
                },
            }
        }
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let Some(c) = self.peek() else { return };
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '?' => self.add_single_char_token(Type::Question),
            ':' => self.add_single_char_token(Type::Colon),

            // Two character tokens
            '*' => {
                if self.match_next('*') {
                    self.add_double_char_token(Type::Pow);
                } else {
                    self.add_single_char_token(Type::Star)
                };
            },
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    while !self.is_at_end() && self.peek() != Some('\n') {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' | '\x0b' | '\x0c' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();
                self.line += 1;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{c}'"),
                }.throw(self.reporter);
            },
        }
    }
}
