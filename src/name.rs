//! The structured name record returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Gender classification carried by a name record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m", alias = "MALE")]
    Male,
    #[serde(rename = "f", alias = "FEMALE")]
    Female,
    #[serde(rename = "d", alias = "DIVERSE")]
    Diverse,
    #[default]
    #[serde(rename = "null", alias = "UNKNOWN")]
    Unknown,
}

impl Gender {
    /// Wire code: `m`, `f`, `d` or `null`.
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
            Gender::Diverse => "d",
            Gender::Unknown => "null",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parsed personal name.
///
/// Empty strings and empty lists mean "absent". Records are built once by
/// [`make_name_obj`](crate::primitives::make_name_obj); the only in-place
/// change afterwards is [`set_confidence`](crate::primitives::set_confidence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    pub raw: String,
    pub given: String,
    pub family: String,
    pub middle: Vec<String>,
    pub title: Vec<String>,
    pub salutation: String,
    pub gender: Gender,
    pub suffix: Vec<String>,
    pub particles: Vec<String>,
    pub confidence: f64,
}

impl NameRecord {
    /// A record with every field absent and confidence 1.0.
    pub fn empty(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            given: String::new(),
            family: String::new(),
            middle: Vec::new(),
            title: Vec::new(),
            salutation: String::new(),
            gender: Gender::Unknown,
            suffix: Vec::new(),
            particles: Vec::new(),
            confidence: 1.0,
        }
    }

    /// Nested `{raw, solution, confidence}` shape used by labelled datasets.
    pub fn to_solution_json(&self) -> serde_json::Value {
        json!({
            "raw": self.raw,
            "solution": {
                "title": self.title,
                "given": self.given,
                "middle": self.middle,
                "family": self.family,
                "suffix": self.suffix,
                "particles": self.particles,
                "salutation": self.salutation,
                "gender": self.gender.code(),
            },
            "confidence": self.confidence,
        })
    }
}

impl Default for NameRecord {
    fn default() -> Self {
        Self::empty("")
    }
}
