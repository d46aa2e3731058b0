//! Extraction macros: read-only scans producing name-field values.

use crate::token::{Token, TokenKind};

fn values_of(tokens: &[Token], kind: TokenKind) -> impl Iterator<Item = &str> {
    tokens
        .iter()
        .filter(move |t| t.kind == kind)
        .map(|t| t.value.as_str())
}

/// First `SALUTATION` value.
pub fn extract_salutation_str(tokens: &[Token]) -> String {
    values_of(tokens, TokenKind::Salutation)
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn extract_title_list(tokens: &[Token]) -> Vec<String> {
    values_of(tokens, TokenKind::Title).map(str::to_string).collect()
}

/// First `WORD` value.
pub fn extract_given_str(tokens: &[Token]) -> String {
    values_of(tokens, TokenKind::Word)
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Last `WORD` value. With a single word this equals [`extract_given_str`].
pub fn extract_family_str(tokens: &[Token]) -> String {
    values_of(tokens, TokenKind::Word)
        .last()
        .unwrap_or_default()
        .to_string()
}

/// `WORD` values between the first and the last one.
pub fn extract_middle_str(tokens: &[Token]) -> Vec<String> {
    let words: Vec<&str> = values_of(tokens, TokenKind::Word).collect();
    if words.len() <= 2 {
        return Vec::new();
    }
    words[1..words.len() - 1]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

pub fn extract_suffix_list(tokens: &[Token]) -> Vec<String> {
    values_of(tokens, TokenKind::Suffix).map(str::to_string).collect()
}

pub fn extract_particles_list(tokens: &[Token]) -> Vec<String> {
    values_of(tokens, TokenKind::Particle)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn sequence(items: &[(&str, TokenKind)]) -> Vec<Token> {
        let mut pos = 0;
        items
            .iter()
            .enumerate()
            .map(|(i, (value, kind))| {
                let token = Token::new(*value, *kind, Span::new(pos, pos + value.len()), Some(i));
                pos += value.len() + 1;
                token
            })
            .collect()
    }

    #[test]
    fn test_full_german_name() {
        let tokens = sequence(&[
            ("Herr", TokenKind::Salutation),
            ("Prof.", TokenKind::Title),
            ("Dr.", TokenKind::Title),
            ("Hans", TokenKind::Word),
            ("Peter", TokenKind::Word),
            ("Karl", TokenKind::Word),
            ("von", TokenKind::Particle),
            ("Müller", TokenKind::Word),
        ]);

        assert_eq!(extract_salutation_str(&tokens), "Herr");
        assert_eq!(extract_title_list(&tokens), vec!["Prof.", "Dr."]);
        assert_eq!(extract_given_str(&tokens), "Hans");
        assert_eq!(extract_family_str(&tokens), "Müller");
        assert_eq!(extract_middle_str(&tokens), vec!["Peter", "Karl"]);
        assert_eq!(extract_particles_list(&tokens), vec!["von"]);
        assert!(extract_suffix_list(&tokens).is_empty());
    }

    #[test]
    fn test_first_salutation_wins() {
        let tokens = sequence(&[
            ("Mr.", TokenKind::Salutation),
            ("Mrs.", TokenKind::Salutation),
            ("Smith", TokenKind::Word),
        ]);
        assert_eq!(extract_salutation_str(&tokens), "Mr.");
    }

    #[test]
    fn test_single_word_is_given_and_family() {
        let tokens = sequence(&[("Dr.", TokenKind::Title), ("Müller", TokenKind::Word)]);
        assert_eq!(extract_given_str(&tokens), "Müller");
        assert_eq!(extract_family_str(&tokens), extract_given_str(&tokens));
        assert!(extract_middle_str(&tokens).is_empty());
    }

    #[test]
    fn test_two_words_have_no_middle() {
        let tokens = sequence(&[("John", TokenKind::Word), ("Smith", TokenKind::Word)]);
        assert!(extract_middle_str(&tokens).is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(extract_salutation_str(&[]), "");
        assert_eq!(extract_given_str(&[]), "");
        assert_eq!(extract_family_str(&[]), "");
        assert!(extract_title_list(&[]).is_empty());
        assert!(extract_middle_str(&[]).is_empty());
    }

    #[test]
    fn test_suffixes_in_order() {
        let tokens = sequence(&[
            ("John", TokenKind::Word),
            ("Smith", TokenKind::Word),
            ("Jr.", TokenKind::Suffix),
            ("III", TokenKind::Suffix),
        ]);
        assert_eq!(extract_suffix_list(&tokens), vec!["Jr.", "III"]);
    }
}
