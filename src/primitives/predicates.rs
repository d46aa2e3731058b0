//! Single-token feature predicates.
//!
//! Each predicate takes `Option<&Token>`; an absent token always yields
//! `false` (or [`Gender::Unknown`] / 0 for the non-boolean ones).

use super::lexicon;
use crate::name::Gender;
use crate::token::{Token, TokenKind};
use regex::Regex;
use std::sync::OnceLock;

const MALE_SALUTATIONS: &[&str] = &[
    "herr", "herrn", "hr", "mr", "mister", "monsieur", "m", "sir", "lord",
];

const FEMALE_SALUTATIONS: &[&str] = &[
    "frau", "fr", "mrs", "ms", "miss", "madame", "mme", "mlle", "dame", "lady",
];

fn has_kind(token: Option<&Token>, kind: TokenKind) -> bool {
    token.is_some_and(|t| t.kind == kind)
}

pub fn is_title(token: Option<&Token>) -> bool {
    has_kind(token, TokenKind::Title)
}

pub fn is_salutation(token: Option<&Token>) -> bool {
    has_kind(token, TokenKind::Salutation)
}

pub fn is_particle(token: Option<&Token>) -> bool {
    has_kind(token, TokenKind::Particle)
}

pub fn is_suffix(token: Option<&Token>) -> bool {
    has_kind(token, TokenKind::Suffix)
}

/// Upper-case throughout and longer than one character.
pub fn is_all_caps(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.value == t.value.to_uppercase() && t.char_len() > 1)
}

/// First character is its own upper-case form. A present token with an empty
/// value counts as capitalized; an absent one does not.
pub fn is_capitalized(token: Option<&Token>) -> bool {
    token.is_some_and(|t| {
        t.value
            .chars()
            .take(1)
            .all(|c| c.to_uppercase().eq(std::iter::once(c)))
    })
}

pub fn is_short(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.char_len() <= 3)
}

/// Characters in the value; 0 when absent.
pub fn token_length(token: Option<&Token>) -> usize {
    token.map_or(0, Token::char_len)
}

/// An `INITIAL` token, or any value shaped like a letter followed by a period.
pub fn is_initial(token: Option<&Token>) -> bool {
    token.is_some_and(|t| {
        if t.kind == TokenKind::Initial {
            return true;
        }
        let mut chars = t.value.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(letter), Some('.'), None) if letter.is_alphabetic()
        )
    })
}

pub fn has_hyphen(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.value.contains('-'))
}

pub fn has_period(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.value.contains('.'))
}

fn roman_numeral_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^m{0,4}(cm|cd|d?c{0,3})(xc|xl|l?x{0,3})(ix|iv|v?i{0,3})$").ok()
    })
    .as_ref()
}

/// Classical Roman numeral, ignoring case and one trailing period.
pub fn is_roman_numeral(token: Option<&Token>) -> bool {
    token.is_some_and(|t| {
        let value = t.value.strip_suffix('.').unwrap_or(&t.value).to_lowercase();
        !value.is_empty() && roman_numeral_regex().is_some_and(|re| re.is_match(&value))
    })
}

pub fn is_common_given_name(token: Option<&Token>) -> bool {
    token.is_some_and(|t| lexicon::is_given_name(&t.value))
}

pub fn is_common_family_name(token: Option<&Token>) -> bool {
    token.is_some_and(|t| lexicon::is_family_name(&t.value))
}

/// Gender implied by a `SALUTATION` token (case-insensitive, one period removed).
pub fn get_gender_from_salutation(token: Option<&Token>) -> Gender {
    let Some(token) = token.filter(|t| t.kind == TokenKind::Salutation) else {
        return Gender::Unknown;
    };

    let value = token.value.to_lowercase().replacen('.', "", 1);
    if MALE_SALUTATIONS.contains(&value.as_str()) {
        Gender::Male
    } else if FEMALE_SALUTATIONS.contains(&value.as_str()) {
        Gender::Female
    } else {
        Gender::Unknown
    }
}

/// Gender of the first whitespace-separated word of `name`, from the
/// given-name lexicon.
pub fn get_gender_from_name(name: &str) -> Gender {
    name.split_whitespace()
        .next()
        .map_or(Gender::Unknown, lexicon::given_name_gender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn tok(value: &str, kind: TokenKind) -> Token {
        Token::new(value, kind, Span::new(0, value.len()), Some(0))
    }

    fn word(value: &str) -> Token {
        tok(value, TokenKind::Word)
    }

    #[test]
    fn test_absent_token_is_always_false() {
        fn has_length(token: Option<&Token>) -> bool {
            token_length(token) > 0
        }

        let predicates: [fn(Option<&Token>) -> bool; 14] = [
            is_title,
            is_salutation,
            is_particle,
            is_suffix,
            is_all_caps,
            is_capitalized,
            is_short,
            is_initial,
            has_hyphen,
            has_period,
            is_roman_numeral,
            is_common_given_name,
            is_common_family_name,
            has_length,
        ];
        for predicate in predicates {
            assert!(!predicate(None));
        }
        assert_eq!(get_gender_from_salutation(None), Gender::Unknown);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(is_title(Some(&tok("Dr.", TokenKind::Title))));
        assert!(!is_title(Some(&word("Dr"))));
        assert!(is_salutation(Some(&tok("Herr", TokenKind::Salutation))));
        assert!(is_particle(Some(&tok("von", TokenKind::Particle))));
        assert!(is_suffix(Some(&tok("Jr.", TokenKind::Suffix))));
    }

    #[test]
    fn test_casing() {
        assert!(is_all_caps(Some(&word("MÜLLER"))));
        assert!(!is_all_caps(Some(&word("A"))));
        assert!(!is_all_caps(Some(&word("Müller"))));

        assert!(is_capitalized(Some(&word("Ürsula"))));
        assert!(!is_capitalized(Some(&word("von"))));
        assert!(is_capitalized(Some(&word(""))));
    }

    #[test]
    fn test_lengths() {
        assert!(is_short(Some(&word("Lee"))));
        assert!(is_short(Some(&word("Müh"))));
        assert!(!is_short(Some(&word("Hans"))));
        assert_eq!(token_length(Some(&word("Müller"))), 6);
    }

    #[test]
    fn test_initials() {
        assert!(is_initial(Some(&tok("J.", TokenKind::Initial))));
        assert!(is_initial(Some(&word("j."))));
        assert!(is_initial(Some(&word("Ö."))));
        assert!(!is_initial(Some(&word("Jr."))));
        assert!(!is_initial(Some(&word("1."))));
    }

    #[test]
    fn test_punctuation_checks() {
        assert!(has_hyphen(Some(&word("Schäfer-Weiß"))));
        assert!(!has_hyphen(Some(&word("Weiß"))));
        assert!(has_period(Some(&tok("Dr.", TokenKind::Title))));
    }

    #[test]
    fn test_roman_numerals() {
        for value in ["III", "iv", "XIV.", "MCMXCIV"] {
            assert!(is_roman_numeral(Some(&word(value))), "{value}");
        }
        for value in ["", ".", "IIII", "Hans", "IC"] {
            assert!(!is_roman_numeral(Some(&word(value))), "{value}");
        }
    }

    #[test]
    fn test_lexicon_predicates() {
        for value in ["JAMES", "James", "james"] {
            assert!(is_common_given_name(Some(&word(value))));
        }
        assert!(is_common_family_name(Some(&word("Schmidt"))));
        assert!(!is_common_family_name(Some(&word("Hans"))));
        // Membership is the fixed list only.
        assert!(is_common_given_name(Some(&word("Petra"))));
        assert!(!is_common_given_name(Some(&word("Anna"))));
    }

    #[test]
    fn test_gender_from_salutation() {
        let salutation = |v: &str| tok(v, TokenKind::Salutation);
        assert_eq!(get_gender_from_salutation(Some(&salutation("Herr"))), Gender::Male);
        assert_eq!(get_gender_from_salutation(Some(&salutation("Hr."))), Gender::Male);
        assert_eq!(get_gender_from_salutation(Some(&salutation("MRS."))), Gender::Female);
        assert_eq!(get_gender_from_salutation(Some(&salutation("Fr."))), Gender::Female);
        assert_eq!(get_gender_from_salutation(Some(&salutation("Hey"))), Gender::Unknown);
        // Right text, wrong kind.
        assert_eq!(get_gender_from_salutation(Some(&word("Herr"))), Gender::Unknown);
    }

    #[test]
    fn test_gender_from_name() {
        assert_eq!(get_gender_from_name("Hans Müller"), Gender::Male);
        assert_eq!(get_gender_from_name("  sabine"), Gender::Female);
        assert_eq!(get_gender_from_name("Müller Hans"), Gender::Unknown);
        assert_eq!(get_gender_from_name(""), Gender::Unknown);
    }
}
