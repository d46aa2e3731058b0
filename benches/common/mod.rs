//! Shared fixtures for the name engine benchmarks.

#![allow(dead_code)]

use evoname::{DefinitionsDocument, EngineConfig, Expr, NameEngine, PatternSet};

const SAMPLE_NAMES: &[&str] = &[
    "Dr. Hans Müller",
    "Herr Prof. Dr. Klaus-Peter von Weber",
    "Frau Sabine Schmidt",
    "Schneider, Anna Maria",
    "Mr. John Q. Public Jr.",
    "Mrs. Mary Ann Smith",
    "Jürgen Fischer",
    "Petra Hoffmann-Becker",
    "Frau Dr. med. Ursula Schäfer",
    "van der Berg, Jan",
];

/// `count` names cycling through a fixed sample.
pub fn generate_names(count: usize) -> Vec<String> {
    SAMPLE_NAMES
        .iter()
        .cycle()
        .take(count)
        .map(|name| name.to_string())
        .collect()
}

/// Compiled bundled patterns for `locale`.
pub fn bundled_patterns(locale: &str) -> anyhow::Result<PatternSet> {
    let doc = DefinitionsDocument::bundled()?;
    let (patterns, _) = PatternSet::compile(locale, &doc, true)?;
    Ok(patterns)
}

/// Engine on the bundled definitions, never reading from disk.
pub fn bundled_engine(config: EngineConfig) -> NameEngine {
    NameEngine::with_config(
        config
            .with_definitions_path("/nonexistent/evoname/regex_definitions.json")
            .with_bundled_fallback(true),
    )
}

/// A typical generated tree using every extraction macro.
pub fn full_tree() -> anyhow::Result<Expr> {
    Ok(Expr::parse(
        "set_confidence(make_name_obj(ARG0, \
            if_bool_string(has_comma(ARG0), \
                extract_given_str(get_tokens_after_comma(tokenize(ARG0))), \
                extract_given_str(tokenize(ARG0))), \
            if_bool_string(has_comma(ARG0), \
                extract_given_str(get_tokens_before_comma(tokenize(ARG0))), \
                extract_family_str(tokenize(ARG0))), \
            extract_middle_str(tokenize(ARG0)), \
            extract_title_list(tokenize(ARG0)), \
            extract_salutation_str(tokenize(ARG0)), \
            get_gender_from_salutation(get_first_token(tokenize(ARG0))), \
            extract_suffix_list(tokenize(ARG0)), \
            extract_particles_list(tokenize(ARG0))), \
        mul(0.9, 1))",
    )?)
}

/// A left-nested chain of `trim` calls of the given depth.
pub fn trim_chain(depth: usize) -> Expr {
    (0..depth).fold(Expr::Arg, |inner, _| {
        Expr::call(evoname::Op::Trim, vec![inner])
    })
}
