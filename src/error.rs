//! Error types for the evoname crate.
//!
//! Primitives never fail. Errors only come from loading definitions or
//! configuration, from strict pattern compilation, from reading an expression
//! tree, and from evaluating a tree that is structurally unusable (too deep,
//! ill-typed under strict checking, or not producing a name record).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("YAML parsing error: {0}")]
    Yaml(String),

    #[error("Invalid pattern for {token} (locale {locale}): {message}")]
    InvalidPattern {
        token: String,
        locale: String,
        message: String,
    },

    #[error("No regex definitions available")]
    DefinitionsUnavailable,

    #[error("Unknown token kind: {0}")]
    UnknownTokenKind(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Expression parse error at offset {offset}: {message}")]
    ExpressionParse { offset: usize, message: String },

    #[error("Arity mismatch for {op}: expected {expected} arguments, found {found}")]
    ArityMismatch {
        op: String,
        expected: usize,
        found: usize,
    },

    #[error("Type mismatch for {op} argument {position}: expected {expected}, found {found}")]
    TypeMismatch {
        op: String,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Expression tree exceeds maximum depth of {limit}")]
    TreeTooDeep { limit: usize },

    #[error("Tree did not produce a name record (got {0})")]
    NotANameRecord(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for EngineError {
    fn from(err: serde_yaml::Error) -> Self {
        EngineError::Yaml(err.to_string())
    }
}
