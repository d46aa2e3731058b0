//! Priority lexer.
//!
//! Scans a raw name left to right. At each non-whitespace position the token
//! kinds are tried in [`TokenKind::PRIORITY`] order and the first pattern that
//! matches exactly at the cursor wins. Characters no pattern accepts are
//! skipped without producing a token.
//!
//! # Examples
//!
//! ```rust
//! use evoname::{DefinitionsDocument, Lexer, PatternSet, TokenKind};
//!
//! let doc = DefinitionsDocument::new()
//!     .with_pattern(TokenKind::Title, "de", r"Dr\.", "")
//!     .with_pattern(TokenKind::Word, "default", r"\w+", "");
//! let (patterns, _) = PatternSet::compile("de", &doc, false).unwrap();
//!
//! let tokens = Lexer::new(&patterns).tokenize("Dr. Hans Müller");
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![TokenKind::Title, TokenKind::Word, TokenKind::Word]);
//! ```

use crate::registry::PatternSet;
use crate::token::{Span, Token, TokenKind};

/// Result of a lexing run, including the bytes that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexOutcome {
    pub tokens: Vec<Token>,
    /// Bytes consumed as whitespace.
    pub whitespace: usize,
    /// Bytes of characters no pattern matched.
    pub skipped: usize,
}

impl LexOutcome {
    /// Bytes covered by emitted tokens.
    pub fn matched(&self) -> usize {
        self.tokens.iter().map(|t| t.span.len()).sum()
    }
}

/// Lexer bound to one compiled pattern set.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'p> {
    patterns: &'p PatternSet,
}

impl<'p> Lexer<'p> {
    pub fn new(patterns: &'p PatternSet) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &'p PatternSet {
        self.patterns
    }

    pub fn tokenize(&self, raw: &str) -> Vec<Token> {
        self.scan(raw).tokens
    }

    pub fn scan(&self, raw: &str) -> LexOutcome {
        let mut outcome = LexOutcome::default();
        let mut pos = 0;

        while let Some(ch) = raw[pos..].chars().next() {
            if ch.is_whitespace() {
                pos += ch.len_utf8();
                outcome.whitespace += ch.len_utf8();
                continue;
            }

            match self.match_at(raw, pos) {
                Some((kind, len)) => {
                    let end = pos + len;
                    let index = outcome.tokens.len();
                    outcome.tokens.push(Token::new(
                        &raw[pos..end],
                        kind,
                        Span::new(pos, end),
                        Some(index),
                    ));
                    pos = end;
                }
                None => {
                    pos += ch.len_utf8();
                    outcome.skipped += ch.len_utf8();
                }
            }
        }

        outcome
    }

    fn match_at(&self, raw: &str, pos: usize) -> Option<(TokenKind, usize)> {
        TokenKind::PRIORITY.iter().find_map(|&kind| {
            self.patterns
                .get(kind)
                .and_then(|pattern| pattern.match_len_at(raw, pos))
                .map(|len| (kind, len))
        })
    }
}

/// Tokenize `raw` with `patterns`.
pub fn tokenize(raw: &str, patterns: &PatternSet) -> Vec<Token> {
    Lexer::new(patterns).tokenize(raw)
}
