//! Strict parser for the tuple-list literal the generative model is asked to
//! emit, e.g. `[("Sit", [("Happy", 0.5)]), ("Walk", [("Curious", 0.3)])]`.
//!
//! The model is untrusted, so this is a small closed grammar — lists, tuples,
//! quoted strings, and numbers — rather than a general literal evaluator.
//! Anything outside the grammar is a syntax error.

use thiserror::Error;

/// A value in the goal-list grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Num(f64),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
}

#[derive(Debug, Error, PartialEq)]
#[error("syntax error at offset {offset}: {message}")]
pub struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

/// Parse a complete literal. Trailing content after the value is an error.
pub fn parse_literal(input: &str) -> Result<Literal, SyntaxError> {
    let chars: Vec<char> = input.chars().collect();
    let mut parser = Parser { chars, pos: 0 };
    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(parser.error("unexpected trailing content"));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn error(&self, message: &str) -> SyntaxError {
        SyntaxError {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Result<Literal, SyntaxError> {
        match self.peek() {
            Some('[') => self.parse_sequence(']').map(Literal::List),
            Some('(') => self.parse_sequence(')').map(Literal::Tuple),
            Some('"') | Some('\'') => self.parse_string().map(Literal::Str),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number().map(Literal::Num)
            }
            Some(_) => Err(self.error("expected list, tuple, string, or number")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Shared body for lists and tuples: `open` was peeked, read items until
    /// `close`. Trailing commas are allowed (the grammar the model is shown
    /// uses them).
    fn parse_sequence(&mut self, close: char) -> Result<Vec<Literal>, SyntaxError> {
        self.bump(); // consume open bracket
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(c) if c == close => {
                    self.bump();
                    return Ok(items);
                }
                None => return Err(self.error("unterminated list or tuple")),
                Some(_) => {}
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                _ => return Err(self.error("expected ',' or closing bracket")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, SyntaxError> {
        let quote = self.bump().expect("caller peeked a quote");
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some(c) => {
                        // Unknown escape: keep both chars, the validator will
                        // reject the name anyway if it matters.
                        out.push('\\');
                        out.push(c);
                    }
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Result<f64, SyntaxError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.bump();
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>().map_err(|_| SyntaxError {
            offset: start,
            message: format!("invalid number '{}'", text),
        })
    }
}
