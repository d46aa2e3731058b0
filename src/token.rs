//! Token types produced by the lexer.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of token kinds recognised by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    #[serde(alias = "TOKEN_SALUTATION")]
    Salutation,
    #[serde(alias = "TOKEN_TITLE")]
    Title,
    #[serde(alias = "TOKEN_DEGREE")]
    Degree,
    #[serde(alias = "TOKEN_INITIAL")]
    Initial,
    #[serde(alias = "TOKEN_PARTICLE")]
    Particle,
    #[serde(alias = "TOKEN_SUFFIX")]
    Suffix,
    #[serde(alias = "TOKEN_WORD")]
    Word,
    #[serde(alias = "TOKEN_PUNCT")]
    Punct,
}

impl TokenKind {
    /// Lexer priority. The first kind whose pattern matches at the cursor wins.
    pub const PRIORITY: [TokenKind; 8] = [
        TokenKind::Salutation,
        TokenKind::Title,
        TokenKind::Degree,
        TokenKind::Suffix,
        TokenKind::Particle,
        TokenKind::Initial,
        TokenKind::Word,
        TokenKind::Punct,
    ];

    /// Short upper-case name, e.g. `WORD`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Salutation => "SALUTATION",
            TokenKind::Title => "TITLE",
            TokenKind::Degree => "DEGREE",
            TokenKind::Initial => "INITIAL",
            TokenKind::Particle => "PARTICLE",
            TokenKind::Suffix => "SUFFIX",
            TokenKind::Word => "WORD",
            TokenKind::Punct => "PUNCT",
        }
    }

    /// Key used for this kind in a regex definitions document, e.g. `TOKEN_WORD`.
    pub fn definition_key(self) -> &'static str {
        match self {
            TokenKind::Salutation => "TOKEN_SALUTATION",
            TokenKind::Title => "TOKEN_TITLE",
            TokenKind::Degree => "TOKEN_DEGREE",
            TokenKind::Initial => "TOKEN_INITIAL",
            TokenKind::Particle => "TOKEN_PARTICLE",
            TokenKind::Suffix => "TOKEN_SUFFIX",
            TokenKind::Word => "TOKEN_WORD",
            TokenKind::Punct => "TOKEN_PUNCT",
        }
    }

    /// Look up a kind by its definitions-document key.
    pub fn from_definition_key(key: &str) -> Option<Self> {
        Self::PRIORITY
            .iter()
            .copied()
            .find(|kind| kind.definition_key() == key)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("TOKEN_").unwrap_or(&upper);
        Self::PRIORITY
            .iter()
            .copied()
            .find(|kind| kind.name() == bare)
            .ok_or_else(|| EngineError::UnknownTokenKind(s.to_string()))
    }
}

/// Half-open byte range `[start, end)` into the lexed input.
///
/// Within one lexing run spans never overlap, so a span is the structural
/// identity of a token: two tokens with the same text are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An immutable lexed token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The matched substring.
    pub value: String,
    pub kind: TokenKind,
    pub span: Span,
    /// Ordinal position in the emitted sequence; `None` when not produced by the lexer.
    pub index: Option<usize>,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind, span: Span, index: Option<usize>) -> Self {
        Self {
            value: value.into(),
            kind,
            span,
            index,
        }
    }

    /// The neutral token: empty `PUNCT` at `[0, 0)` with no index.
    pub fn placeholder() -> Self {
        Self::new("", TokenKind::Punct, Span::new(0, 0), None)
    }

    /// Length of the value in characters.
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, {}, [{}, {}))",
            self.value, self.kind, self.span.start, self.span.end
        )
    }
}
