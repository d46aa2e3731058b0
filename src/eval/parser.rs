//! Textual tree syntax.
//!
//! Generated trees are commonly printed as nested calls:
//!
//! ```text
//! make_name_obj(ARG0, extract_given_str(tokenize(ARG0)), EMPTY_STR, ...)
//! ```
//!
//! This module reads that form into an [`Expr`]. `ARG0` and `raw_input` name
//! the input; other bare identifiers are terminals (see
//! [`Terminal::from_name`]); quoted strings and numbers are literals.

use crate::error::{EngineError, Result};
use crate::ir::{Expr, Op, Terminal};

/// Deepest call nesting [`parse_expr`] accepts. Anything deeper is reported
/// as a parse error instead of exhausting the stack.
pub const MAX_PARSE_DEPTH: usize = 512;

/// Lexemes of the call syntax, each with its byte offset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Identifier(String),
    Str(String),
    Int(i64),
    Float(f64),
    LeftParen,
    RightParen,
    Comma,
}

fn error(offset: usize, message: impl Into<String>) -> EngineError {
    EngineError::ExpressionParse {
        offset,
        message: message.into(),
    }
}

/// Split `text` into lexemes.
pub(crate) fn tokenize_expr(text: &str) -> Result<Vec<(usize, Lexeme)>> {
    let mut lexemes = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                lexemes.push((offset, Lexeme::LeftParen));
                chars.next();
            }
            ')' => {
                lexemes.push((offset, Lexeme::RightParen));
                chars.next();
            }
            ',' => {
                lexemes.push((offset, Lexeme::Comma));
                chars.next();
            }
            '"' | '\'' => {
                let quote = ch;
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, c)) if c == quote => break,
                        Some((at, '\\')) => match chars.next() {
                            Some((_, 'n')) => value.push('\n'),
                            Some((_, 't')) => value.push('\t'),
                            Some((_, c @ ('\\' | '"' | '\''))) => value.push(c),
                            Some((_, c)) => {
                                return Err(error(at, format!("unknown escape '\\{c}'")))
                            }
                            None => return Err(error(at, "unterminated string")),
                        },
                        Some((_, c)) => value.push(c),
                        None => return Err(error(offset, "unterminated string")),
                    }
                }
                lexemes.push((offset, Lexeme::Str(value)));
            }
            '-' | '0'..='9' => {
                let mut number = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                        number.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let lexeme = if number.contains(['.', 'e', 'E']) {
                    number.parse().map(Lexeme::Float).ok()
                } else {
                    number.parse().map(Lexeme::Int).ok()
                };
                match lexeme {
                    Some(lexeme) => lexemes.push((offset, lexeme)),
                    None => return Err(error(offset, format!("invalid number '{number}'"))),
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut identifier = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        identifier.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                lexemes.push((offset, Lexeme::Identifier(identifier)));
            }
            _ => return Err(error(offset, format!("unexpected character '{ch}'"))),
        }
    }

    Ok(lexemes)
}

/// Recursive descent parser over call-syntax lexemes.
pub(crate) struct ExprParser<'a> {
    lexemes: &'a [(usize, Lexeme)],
    position: usize,
    end: usize,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    pub(crate) fn new(lexemes: &'a [(usize, Lexeme)], end: usize) -> Self {
        Self {
            lexemes,
            position: 0,
            end,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.position).map(|(_, lexeme)| lexeme)
    }

    fn offset(&self) -> usize {
        self.lexemes
            .get(self.position)
            .map_or(self.end, |(offset, _)| *offset)
    }

    fn advance(&mut self) -> Option<&'a Lexeme> {
        let lexeme = self.current();
        self.position += 1;
        lexeme
    }

    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        let offset = self.offset();
        match self.advance() {
            Some(Lexeme::Str(value)) => Ok(Expr::str(value.clone())),
            Some(Lexeme::Int(value)) => Ok(Expr::constant(Terminal::Int(*value))),
            Some(Lexeme::Float(value)) => Ok(Expr::constant(Terminal::Float(*value))),
            Some(Lexeme::Identifier(name)) => {
                if let Some(Lexeme::LeftParen) = self.current() {
                    self.advance();
                    let op: Op = name
                        .parse()
                        .map_err(|_| error(offset, format!("unknown operator '{name}'")))?;
                    if self.depth >= MAX_PARSE_DEPTH {
                        return Err(error(
                            offset,
                            format!("calls nested deeper than {MAX_PARSE_DEPTH}"),
                        ));
                    }
                    self.depth += 1;
                    let args = self.parse_arguments();
                    self.depth -= 1;
                    return Ok(Expr::call(op, args?));
                }

                match name.as_str() {
                    "ARG0" | "raw_input" => Ok(Expr::Arg),
                    _ => Terminal::from_name(name)
                        .map(Expr::constant)
                        .ok_or_else(|| error(offset, format!("unknown terminal '{name}'"))),
                }
            }
            Some(other) => Err(error(offset, format!("unexpected {other:?}"))),
            None => Err(error(offset, "unexpected end of expression")),
        }
    }

    /// Arguments after the opening parenthesis, through the closing one.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if let Some(Lexeme::RightParen) = self.current() {
            self.advance();
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            let offset = self.offset();
            match self.advance() {
                Some(Lexeme::Comma) => continue,
                Some(Lexeme::RightParen) => return Ok(args),
                _ => return Err(error(offset, "expected ',' or ')'")),
            }
        }
    }

    fn finish(&self) -> Result<()> {
        if self.position < self.lexemes.len() {
            return Err(error(self.offset(), "trailing input after expression"));
        }
        Ok(())
    }
}

/// Parse a complete expression in call syntax.
pub fn parse_expr(text: &str) -> Result<Expr> {
    let lexemes = tokenize_expr(text)?;
    if lexemes.is_empty() {
        return Err(error(0, "empty expression"));
    }

    let mut parser = ExprParser::new(&lexemes, text.len());
    let expr = parser.parse_expression()?;
    parser.finish()?;
    Ok(expr)
}
