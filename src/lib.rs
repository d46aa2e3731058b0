//! # evoname
//!
//! An execution engine for evolved personal-name parsers.
//!
//! A parser is an expression tree over a fixed palette of primitives: a
//! locale-aware regex lexer, token-sequence operations, token predicates,
//! extraction macros and a name-record builder. The engine evaluates such a
//! tree against a raw name string and returns a structured [`NameRecord`].
//!
//! ## Quick Start
//!
//! ### Tokenizing
//!
//! ```rust
//! use evoname::{EngineConfig, NameEngine, TokenKind};
//!
//! let engine = NameEngine::with_config(EngineConfig::new().with_bundled_fallback(true));
//! let tokens = engine.tokenize("Herr Dr. Hans Müller")?;
//!
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Salutation, TokenKind::Title, TokenKind::Word, TokenKind::Word]
//! );
//! # Ok::<(), evoname::EngineError>(())
//! ```
//!
//! ### Evaluating a tree
//!
//! Trees can be written in call syntax, JSON or YAML, or built in code.
//!
//! ```rust
//! use evoname::{EngineConfig, Expr, NameEngine};
//!
//! let engine = NameEngine::with_config(EngineConfig::new().with_bundled_fallback(true));
//! let tree = Expr::parse(
//!     "set_confidence(make_name_obj(ARG0, \
//!         extract_given_str(tokenize(ARG0)), \
//!         extract_family_str(tokenize(ARG0)), \
//!         extract_middle_str(tokenize(ARG0)), \
//!         extract_title_list(tokenize(ARG0)), \
//!         extract_salutation_str(tokenize(ARG0)), \
//!         get_gender_from_salutation(get_first_token(tokenize(ARG0))), \
//!         EMPTY_STR_LIST, EMPTY_STR_LIST), 0.8)",
//! )?;
//!
//! let record = engine.parse("Frau Prof. Anna Maria Weber", &tree)?;
//! assert_eq!(record.given, "Anna");
//! assert_eq!(record.middle, vec!["Maria"]);
//! assert_eq!(record.family, "Weber");
//! assert_eq!(record.gender.code(), "f");
//! assert_eq!(record.confidence, 0.8);
//! # Ok::<(), evoname::EngineError>(())
//! ```
//!
//! ### Batches
//!
//! ```rust
//! use evoname::{EngineConfig, Expr, NameEngine, Op};
//!
//! let engine = NameEngine::with_config(EngineConfig::high_throughput());
//! let tree = Expr::call(
//!     Op::MakeNameObj,
//!     vec![
//!         Expr::Arg,
//!         Expr::parse("extract_given_str(tokenize(ARG0))")?,
//!         Expr::parse("extract_family_str(tokenize(ARG0))")?,
//!         Expr::parse("EMPTY_STR_LIST")?,
//!         Expr::parse("EMPTY_STR_LIST")?,
//!         Expr::parse("EMPTY_STR")?,
//!         Expr::parse("UNKNOWN")?,
//!         Expr::parse("EMPTY_STR_LIST")?,
//!         Expr::parse("EMPTY_STR_LIST")?,
//!     ],
//! );
//!
//! let records = engine.parse_batch(&["Hans Müller", "Petra Schmidt"], &tree)?;
//! assert_eq!(records[1].family, "Schmidt");
//! # Ok::<(), evoname::EngineError>(())
//! ```

pub mod baseline;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod ir;
pub mod lexer;
pub mod name;
pub mod postprocess;
pub mod primitives;
pub mod registry;
pub mod token;

// Primary engine interface
pub use engine::NameEngine;

pub use config::{EngineConfig, DEFAULT_DEFINITIONS_PATH, DEFAULT_LOCALE};
pub use error::{EngineError, Result};

// Tree representation and evaluation
pub use eval::{
    parse_expr, EvaluatorConfig, TreeEvaluationResult, TreeEvaluator, TypeChecking, Value,
};
pub use ir::{Expr, Op, Signature, Terminal, ValueType};

// Lexing and pattern registry
pub use lexer::{tokenize, LexOutcome, Lexer};
pub use registry::{
    global_registry, init_global_registry, CompiledPattern, DefinitionsDocument, PatternEntry,
    PatternRegistry, PatternSet, RegistryConfig, RegistryStats,
};
pub use token::{Span, Token, TokenKind};

// Records
pub use baseline::BaselineParser;
pub use name::{Gender, NameRecord};
pub use postprocess::repair;
