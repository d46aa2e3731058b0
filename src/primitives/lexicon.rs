//! Fixed name lexicons (German and English).
//!
//! Lookups are case-insensitive; callers pass any casing and the value is
//! lowercased before the membership test.

use crate::name::Gender;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

const FAMILY_NAMES: &[&str] = &[
    "müller", "schmidt", "schneider", "fischer", "weber", "meyer", "wagner", "becker", "schulz",
    "hoffmann", "schäfer", "koch", "bauer", "richter", "klein", "wolf", "schröder", "neumann",
    "schwarz", "zimmermann", "smith", "johnson", "williams", "brown", "jones", "garcia", "miller",
    "davis", "rodriguez", "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson",
    "thomas", "taylor", "moore", "jackson", "martin", "lee", "perez", "thompson", "white",
    "harris", "sanchez", "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen",
    "king", "wright", "scott", "torres", "nguyen", "hill", "flores", "green", "adams", "nelson",
    "baker", "hall", "rivera", "campbell", "mitchell", "carter", "roberts",
];

const MALE_GIVEN_NAMES: &[&str] = &[
    "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
    "charles", "klaus", "hans", "jürgen", "stefan", "wolfgang", "andreas", "werner", "gerhard",
    "dieter",
];

const FEMALE_GIVEN_NAMES: &[&str] = &[
    "mary", "patricia", "linda", "barbara", "elizabeth", "jennifer", "maria", "susan", "margaret",
    "dorothy", "sabine", "renate", "ursula", "monika", "helga", "elisabeth", "ingrid", "gisela",
    "birgit", "petra",
];

fn family_names() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| FAMILY_NAMES.iter().copied().collect())
}

fn given_names() -> &'static HashMap<&'static str, Gender> {
    static MAP: OnceLock<HashMap<&'static str, Gender>> = OnceLock::new();
    MAP.get_or_init(|| {
        MALE_GIVEN_NAMES
            .iter()
            .map(|name| (*name, Gender::Male))
            .chain(FEMALE_GIVEN_NAMES.iter().map(|name| (*name, Gender::Female)))
            .collect()
    })
}

pub fn is_family_name(value: &str) -> bool {
    family_names().contains(value.to_lowercase().as_str())
}

pub fn is_given_name(value: &str) -> bool {
    given_names().contains_key(value.to_lowercase().as_str())
}

/// Gender recorded for a given name, `Unknown` when not listed.
pub fn given_name_gender(value: &str) -> Gender {
    given_names()
        .get(value.to_lowercase().as_str())
        .copied()
        .unwrap_or(Gender::Unknown)
}
