//! Expression tree evaluation.

pub mod evaluator;
pub mod parser;
pub mod types;

pub use evaluator::{EvaluatorConfig, TreeEvaluationResult, TreeEvaluator, TypeChecking};
pub use parser::{parse_expr, MAX_PARSE_DEPTH};
pub use types::Value;
