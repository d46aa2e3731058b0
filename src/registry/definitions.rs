//! Regex definitions document.
//!
//! The document maps a token key (`TOKEN_WORD`, ...) to a map from locale code
//! to a pattern. A pattern is either a bare regex string or an object with
//! `pattern` and optional `flags`. Document order is preserved, which makes the
//! last-resort "first available entry" fallback deterministic.

use crate::error::Result;
use crate::token::TokenKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_DEFINITIONS: &str = include_str!("../../data/regex_definitions.json");

/// Locale tried after the requested one.
pub const FALLBACK_LOCALE: &str = "en";

/// Locale tried after [`FALLBACK_LOCALE`].
pub const DEFAULT_LOCALE_KEY: &str = "default";

/// One pattern entry for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternEntry {
    Plain(String),
    Detailed {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags: Option<String>,
    },
}

impl PatternEntry {
    pub fn new(pattern: impl Into<String>, flags: &str) -> Self {
        PatternEntry::Detailed {
            pattern: pattern.into(),
            flags: if flags.is_empty() {
                None
            } else {
                Some(flags.to_string())
            },
        }
    }

    pub fn pattern(&self) -> &str {
        match self {
            PatternEntry::Plain(pattern) => pattern,
            PatternEntry::Detailed { pattern, .. } => pattern,
        }
    }

    pub fn flags(&self) -> &str {
        match self {
            PatternEntry::Plain(_) => "",
            PatternEntry::Detailed { flags, .. } => flags.as_deref().unwrap_or(""),
        }
    }

    /// Only the `i` flag is honoured.
    pub fn is_case_insensitive(&self) -> bool {
        self.flags().contains('i')
    }
}

/// A pattern chosen for a token kind together with the locale key it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedPattern<'a> {
    pub locale: &'a str,
    pub entry: &'a PatternEntry,
}

/// Parsed regex definitions document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionsDocument {
    entries: IndexMap<String, IndexMap<String, PatternEntry>>,
}

impl DefinitionsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// The document shipped with the crate (German and English patterns).
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DEFINITIONS)
    }

    /// Add or replace the entry for `kind` in `locale`.
    pub fn insert(&mut self, kind: TokenKind, locale: &str, entry: PatternEntry) {
        self.entries
            .entry(kind.definition_key().to_string())
            .or_default()
            .insert(locale.to_string(), entry);
    }

    /// Chained form of [`insert`](Self::insert).
    pub fn with_pattern(mut self, kind: TokenKind, locale: &str, pattern: &str, flags: &str) -> Self {
        self.insert(kind, locale, PatternEntry::new(pattern, flags));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token keys present in the document, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Pick the entry for `kind`: `locale`, then `en`, then `default`, then the
    /// first entry in document order. `None` when the kind is absent.
    pub fn select(&self, kind: TokenKind, locale: &str) -> Option<SelectedPattern<'_>> {
        let locales = self.entries.get(kind.definition_key())?;

        [locale, FALLBACK_LOCALE, DEFAULT_LOCALE_KEY]
            .iter()
            .find_map(|key| locales.get_key_value(*key))
            .or_else(|| locales.first())
            .map(|(locale, entry)| SelectedPattern {
                locale: locale.as_str(),
                entry,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_detailed_entries() {
        let doc = DefinitionsDocument::from_json_str(
            r#"{
                "TOKEN_WORD": { "default": "\\w+" },
                "TOKEN_SALUTATION": { "de": { "pattern": "Herr", "flags": "i" } }
            }"#,
        )
        .unwrap();

        let word = doc.select(TokenKind::Word, "de").unwrap();
        assert_eq!(word.locale, "default");
        assert_eq!(word.entry.pattern(), "\\w+");
        assert!(!word.entry.is_case_insensitive());

        let salutation = doc.select(TokenKind::Salutation, "de").unwrap();
        assert_eq!(salutation.entry.pattern(), "Herr");
        assert!(salutation.entry.is_case_insensitive());
    }

    #[test]
    fn test_locale_fallback_prefers_en() {
        let doc = DefinitionsDocument::new()
            .with_pattern(TokenKind::Title, "default", "Dr", "")
            .with_pattern(TokenKind::Title, "en", "Dr\\.", "");

        let selected = doc.select(TokenKind::Title, "fr").unwrap();
        assert_eq!(selected.locale, "en");
        assert_eq!(selected.entry.pattern(), "Dr\\.");
    }

    #[test]
    fn test_locale_fallback_to_default_then_first() {
        let doc = DefinitionsDocument::new()
            .with_pattern(TokenKind::Title, "default", "Dr", "")
            .with_pattern(TokenKind::Suffix, "it", "Jr", "")
            .with_pattern(TokenKind::Suffix, "es", "Sr", "");

        assert_eq!(doc.select(TokenKind::Title, "fr").unwrap().locale, "default");
        assert_eq!(doc.select(TokenKind::Suffix, "fr").unwrap().locale, "it");
        assert_eq!(doc.select(TokenKind::Suffix, "es").unwrap().locale, "es");
        assert!(doc.select(TokenKind::Word, "fr").is_none());
    }

    #[test]
    fn test_flags_other_than_i_are_ignored() {
        let entry = PatternEntry::new("x", "gmsu");
        assert!(!entry.is_case_insensitive());
        assert!(PatternEntry::new("x", "gi").is_case_insensitive());
    }

    #[test]
    fn test_bundled_document_covers_all_kinds() {
        let doc = DefinitionsDocument::bundled().unwrap();
        for kind in TokenKind::PRIORITY {
            assert!(doc.select(kind, "de").is_some(), "missing {kind}");
        }
    }

    #[test]
    fn test_document_order_is_preserved() {
        let doc = DefinitionsDocument::from_json_str(
            r#"{ "TOKEN_PUNCT": {"x": ","}, "TOKEN_WORD": {"y": "\\w+"} }"#,
        )
        .unwrap();
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["TOKEN_PUNCT", "TOKEN_WORD"]);
    }
}
