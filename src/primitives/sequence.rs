//! Token-sequence algebra.
//!
//! Every operation is total: empty input gives empty output and indices are
//! clamped rather than rejected. Results are fresh vectors; inputs are only
//! borrowed.

use crate::token::{Span, Token, TokenKind};
use std::collections::HashSet;

pub fn get_first_token(tokens: &[Token]) -> Option<&Token> {
    tokens.first()
}

pub fn get_last_token(tokens: &[Token]) -> Option<&Token> {
    tokens.last()
}

pub fn len_tokens(tokens: &[Token]) -> usize {
    tokens.len()
}

pub fn drop_first(tokens: &[Token]) -> Vec<Token> {
    tokens.get(1..).unwrap_or_default().to_vec()
}

pub fn drop_last(tokens: &[Token]) -> Vec<Token> {
    match tokens.split_last() {
        Some((_, rest)) => rest.to_vec(),
        None => Vec::new(),
    }
}

/// `tokens[start..end]` with `start` clamped to 0 and `end` to the length.
/// Empty when `start > end` after clamping.
pub fn slice_tokens(tokens: &[Token], start: i64, end: i64) -> Vec<Token> {
    let len = tokens.len();
    let start = clamp_index(start, len);
    let end = clamp_index(end, len);
    if start > end {
        return Vec::new();
    }
    tokens[start..end].to_vec()
}

fn clamp_index(index: i64, len: usize) -> usize {
    usize::try_from(index.max(0)).map_or(len, |i| i.min(len))
}

pub fn remove_type(tokens: &[Token], kind: TokenKind) -> Vec<Token> {
    tokens.iter().filter(|t| t.kind != kind).cloned().collect()
}

pub fn filter_by_type(tokens: &[Token], kind: TokenKind) -> Vec<Token> {
    tokens.iter().filter(|t| t.kind == kind).cloned().collect()
}

pub fn count_type(tokens: &[Token], kind: TokenKind) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

/// Position of the first token of `kind`, or -1.
pub fn index_of_type(tokens: &[Token], kind: TokenKind) -> i64 {
    tokens
        .iter()
        .position(|t| t.kind == kind)
        .map_or(-1, |i| i as i64)
}

/// Tokens of `original` whose span does not occur in `used`.
///
/// Identity is the span, so equal text at different positions is kept apart.
pub fn get_remainder_tokens(original: &[Token], used: &[Token]) -> Vec<Token> {
    let used: HashSet<Span> = used.iter().map(|t| t.span).collect();
    original
        .iter()
        .filter(|t| !used.contains(&t.span))
        .cloned()
        .collect()
}

fn comma_position(tokens: &[Token]) -> Option<usize> {
    tokens
        .iter()
        .position(|t| t.kind == TokenKind::Punct && t.value.contains(','))
}

/// Tokens before the first comma token; the whole sequence when there is none.
pub fn get_tokens_before_comma(tokens: &[Token]) -> Vec<Token> {
    match comma_position(tokens) {
        Some(i) => tokens[..i].to_vec(),
        None => tokens.to_vec(),
    }
}

/// Tokens after the first comma token; empty when there is none.
pub fn get_tokens_after_comma(tokens: &[Token]) -> Vec<Token> {
    match comma_position(tokens) {
        Some(i) => tokens[i + 1..].to_vec(),
        None => Vec::new(),
    }
}
