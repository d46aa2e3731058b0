//! Name-record construction.

use crate::name::{Gender, NameRecord};

/// Assemble a record from already extracted fields. No consistency checks are
/// made; contradictory inputs are stored as given.
#[allow(clippy::too_many_arguments)]
pub fn make_name_obj(
    raw: String,
    given: String,
    family: String,
    middle: Vec<String>,
    title: Vec<String>,
    salutation: String,
    gender: Gender,
    suffix: Vec<String>,
    particles: Vec<String>,
) -> NameRecord {
    NameRecord {
        raw,
        given,
        family,
        middle,
        title,
        salutation,
        gender,
        suffix,
        particles,
        confidence: 1.0,
    }
}

/// Replace the confidence in place and hand the same record back.
pub fn set_confidence(record: &mut NameRecord, confidence: f64) -> &mut NameRecord {
    record.confidence = confidence;
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NameRecord {
        make_name_obj(
            "Herr Dr. Hans Müller".to_string(),
            "Hans".to_string(),
            "Müller".to_string(),
            Vec::new(),
            vec!["Dr.".to_string()],
            "Herr".to_string(),
            Gender::Male,
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_make_name_obj_defaults_confidence() {
        let record = sample();
        assert_eq!(record.given, "Hans");
        assert_eq!(record.title, vec!["Dr."]);
        assert_eq!(record.confidence, 1.0);
    }

    #[test]
    fn test_contradictions_are_kept() {
        let record = make_name_obj(
            "Mrs. John".to_string(),
            "John".to_string(),
            "John".to_string(),
            vec!["John".to_string()],
            Vec::new(),
            "Mrs.".to_string(),
            Gender::Male,
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.middle, vec!["John"]);
    }

    #[test]
    fn test_set_confidence_changes_only_confidence() {
        let before = sample();
        let mut record = before.clone();

        let returned = set_confidence(&mut record, 0.57);
        assert_eq!(returned.confidence, 0.57);

        assert_eq!(record, NameRecord { confidence: 0.57, ..before });
    }
}
