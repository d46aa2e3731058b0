//! Deterministic repair of parsed records.

use crate::name::NameRecord;

/// Repair a record whose raw input is a plain two-word name.
///
/// When the raw input splits into exactly two whitespace-separated words and
/// the record carries no title, the result takes the first word as the given
/// name and the second as the family name, and clears middle names, suffixes
/// and particles. Salutation, gender and confidence are carried over. Any
/// other record is returned unchanged. The input is never modified.
pub fn repair(record: &NameRecord) -> NameRecord {
    let mut words = record.raw.split_whitespace();
    let (Some(given), Some(family), None) = (words.next(), words.next(), words.next()) else {
        return record.clone();
    };
    if !record.title.is_empty() {
        return record.clone();
    }

    NameRecord {
        given: given.to_string(),
        family: family.to_string(),
        middle: Vec::new(),
        suffix: Vec::new(),
        particles: Vec::new(),
        ..record.clone()
    }
}
