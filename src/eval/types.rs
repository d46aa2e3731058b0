//! Runtime values produced while evaluating a tree.

use crate::ir::{Terminal, ValueType};
use crate::name::{Gender, NameRecord};
use crate::token::{Token, TokenKind};

/// A value of one of the [`ValueType`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
    /// `None` is the absent token.
    Token(Option<Token>),
    TokenList(Vec<Token>),
    Kind(TokenKind),
    Gender(Gender),
    Name(Box<NameRecord>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::StrList(_) => ValueType::StrList,
            Value::Token(_) => ValueType::Token,
            Value::TokenList(_) => ValueType::TokenList,
            Value::Kind(_) => ValueType::TokenKind,
            Value::Gender(_) => ValueType::Gender,
            Value::Name(_) => ValueType::Name,
        }
    }

    /// The value a mismatched argument is replaced with in permissive mode.
    ///
    /// Empty string/list, absent token, `PUNCT`, unknown gender, zero, `false`
    /// and an empty name record.
    pub fn neutral(ty: ValueType) -> Self {
        match ty {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Str => Value::Str(String::new()),
            ValueType::StrList => Value::StrList(Vec::new()),
            ValueType::Token => Value::Token(None),
            ValueType::TokenList => Value::TokenList(Vec::new()),
            ValueType::TokenKind => Value::Kind(TokenKind::Punct),
            ValueType::Gender => Value::Gender(Gender::Unknown),
            ValueType::Name => Value::Name(Box::new(NameRecord::empty(""))),
        }
    }

    pub fn from_terminal(terminal: &Terminal) -> Self {
        match terminal {
            Terminal::Bool(b) => Value::Bool(*b),
            Terminal::Int(i) => Value::Int(*i),
            Terminal::Float(x) => Value::Float(*x),
            Terminal::Str(s) => Value::Str(s.clone()),
            Terminal::Kind(kind) => Value::Kind(*kind),
            Terminal::Gender(gender) => Value::Gender(*gender),
            Terminal::EmptyStr => Value::Str(String::new()),
            Terminal::EmptyStrList => Value::StrList(Vec::new()),
            Terminal::EmptyTokList => Value::TokenList(Vec::new()),
            Terminal::EmptyNameObj => Value::Name(Box::new(NameRecord::empty(""))),
            Terminal::EmptyToken => Value::Token(Some(Token::placeholder())),
        }
    }

    /// Convert to `ty`. Numbers convert between integer and float (floats
    /// truncate toward zero, saturating); any other mismatch yields `None`.
    pub fn convert(self, ty: ValueType) -> Option<Self> {
        match (self, ty) {
            (value, ty) if value.value_type() == ty => Some(value),
            (Value::Int(i), ValueType::Float) => Some(Value::Float(i as f64)),
            (Value::Float(x), ValueType::Int) => Some(Value::Int(x as i64)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            Value::Float(x) => *x as i64,
            _ => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match self {
            Value::Float(x) => *x,
            Value::Int(i) => *i as f64,
            _ => 0.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Value::Str(s) => s,
            _ => "",
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => token.as_ref(),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> &[Token] {
        match self {
            Value::TokenList(tokens) => tokens,
            _ => &[],
        }
    }

    pub fn as_kind(&self) -> TokenKind {
        match self {
            Value::Kind(kind) => *kind,
            _ => TokenKind::Punct,
        }
    }

    pub fn as_gender(&self) -> Gender {
        match self {
            Value::Gender(gender) => *gender,
            _ => Gender::Unknown,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Value::Str(s) => s,
            _ => String::new(),
        }
    }

    pub fn into_strings(self) -> Vec<String> {
        match self {
            Value::StrList(list) => list,
            _ => Vec::new(),
        }
    }

    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            Value::TokenList(tokens) => tokens,
            _ => Vec::new(),
        }
    }

    pub fn into_name(self) -> Option<NameRecord> {
        match self {
            Value::Name(record) => Some(*record),
            _ => None,
        }
    }
}
