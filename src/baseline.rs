//! Fixed rule-based parser.
//!
//! [`BaselineParser`] uses the same lexer and primitives as generated trees but
//! applies a hand-written policy. It gives a reference record to compare tree
//! output against.

use crate::lexer::Lexer;
use crate::name::{Gender, NameRecord};
use crate::primitives as p;
use crate::registry::PatternSet;
use crate::token::TokenKind;

/// Rule-based parse over one compiled pattern set.
///
/// - salutation: first `SALUTATION` token
/// - titles, suffixes, particles: all tokens of the kind, in order
/// - `Family, Given ...` when the input contains a comma: the first word is
///   the family name and the remaining words form the given name
/// - a single word is the family name
/// - otherwise first word given, last word family, the rest middle names
/// - gender from the salutation, then from the given name
#[derive(Debug, Clone, Copy)]
pub struct BaselineParser<'p> {
    lexer: Lexer<'p>,
}

impl<'p> BaselineParser<'p> {
    pub fn new(patterns: &'p PatternSet) -> Self {
        Self {
            lexer: Lexer::new(patterns),
        }
    }

    pub fn parse(&self, raw: &str) -> NameRecord {
        let tokens = self.lexer.tokenize(raw);
        let words: Vec<String> = p::filter_by_type(&tokens, TokenKind::Word)
            .into_iter()
            .map(|t| t.value)
            .collect();

        let (given, family, middle) = if p::has_comma(raw) {
            match words.split_first() {
                Some((family, rest)) => (rest.join(" "), family.clone(), Vec::new()),
                None => (String::new(), String::new(), Vec::new()),
            }
        } else {
            match words.as_slice() {
                [] => (String::new(), String::new(), Vec::new()),
                [only] => (String::new(), only.clone(), Vec::new()),
                _ => (
                    p::extract_given_str(&tokens),
                    p::extract_family_str(&tokens),
                    p::extract_middle_str(&tokens),
                ),
            }
        };

        let salutation = tokens.iter().find(|t| t.kind == TokenKind::Salutation);
        let mut gender = p::get_gender_from_salutation(salutation);
        if gender == Gender::Unknown && !given.is_empty() {
            gender = p::get_gender_from_name(&given);
        }

        p::make_name_obj(
            raw.to_string(),
            p::trim(&given),
            p::trim(&family),
            middle,
            p::extract_title_list(&tokens),
            p::extract_salutation_str(&tokens),
            gender,
            p::extract_suffix_list(&tokens),
            p::extract_particles_list(&tokens),
        )
    }
}
