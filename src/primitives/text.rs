//! String, control-flow and arithmetic primitives.

use crate::token::{Token, TokenKind};

pub fn if_bool_string(cond: bool, a: String, b: String) -> String {
    if cond {
        a
    } else {
        b
    }
}

pub fn if_bool_tokenlist(cond: bool, a: Vec<Token>, b: Vec<Token>) -> Vec<Token> {
    if cond {
        a
    } else {
        b
    }
}

pub fn trim(s: &str) -> String {
    s.trim().to_string()
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn has_comma(s: &str) -> bool {
    s.contains(',')
}

/// Split on commas, trim every part and drop the empty ones.
pub fn split_on_comma(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn get_first_string(list: &[String]) -> String {
    list.first().cloned().unwrap_or_default()
}

pub fn get_last_string(list: &[String]) -> String {
    list.last().cloned().unwrap_or_default()
}

pub fn identity_token_type(kind: TokenKind) -> TokenKind {
    kind
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn sub(a: f64, b: f64) -> f64 {
    a - b
}

pub fn mul(a: f64, b: f64) -> f64 {
    a * b
}
