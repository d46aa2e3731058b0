//! Engine configuration.
//!
//! [`EngineConfig`] gathers everything a [`NameEngine`](crate::NameEngine)
//! needs: which locale to lex with, where the regex definitions live, how the
//! pattern registry and the tree evaluator behave, and when batches go
//! parallel. Configurations are built from [`Default`], one of the named
//! presets, chained `with_*` calls, or a YAML document.
//!
//! # Examples
//!
//! ```rust
//! use evoname::{EngineConfig, TypeChecking};
//!
//! let config = EngineConfig::new()
//!     .with_default_locale("en")
//!     .with_type_checking(TypeChecking::Strict)
//!     .with_repair(true);
//!
//! assert_eq!(config.default_locale, "en");
//! assert!(config.apply_repair);
//! ```
//!
//! ```rust
//! use evoname::EngineConfig;
//!
//! let config = EngineConfig::from_yaml_str(
//!     "default_locale: en\nevaluator:\n  max_depth: 32\n",
//! )
//! .unwrap();
//! assert_eq!(config.evaluator.max_depth, 32);
//! assert_eq!(config.definitions_path.to_str(), Some("regex_definitions.json"));
//! ```

use crate::error::Result;
use crate::eval::{EvaluatorConfig, TypeChecking};
use crate::registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Relative path the definitions document is read from by default.
pub const DEFAULT_DEFINITIONS_PATH: &str = "regex_definitions.json";

/// Locale used when the caller does not name one.
pub const DEFAULT_LOCALE: &str = "de";

/// Name engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Locale for [`tokenize`](crate::NameEngine::tokenize) and
    /// [`parse`](crate::NameEngine::parse).
    ///
    /// **Default**: `"de"`
    pub default_locale: String,

    /// Location of the regex definitions document on disk.
    ///
    /// A missing file is not an error; the registry warns and the lexer
    /// recognises nothing (unless [`RegistryConfig::fallback_to_bundled`] is
    /// set).
    ///
    /// **Default**: `regex_definitions.json`
    pub definitions_path: PathBuf,

    /// Pattern registry behaviour
    pub registry: RegistryConfig,

    /// Tree evaluator behaviour
    pub evaluator: EvaluatorConfig,

    /// Run [`repair`](crate::postprocess::repair) on every parsed record.
    ///
    /// **Default**: false
    pub apply_repair: bool,

    /// Evaluate batches on the rayon thread pool.
    ///
    /// **Default**: true
    pub enable_parallel_batch: bool,

    /// Smallest batch that is split across threads.
    ///
    /// **Default**: 64
    pub min_batch_size_for_parallelism: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            definitions_path: PathBuf::from(DEFAULT_DEFINITIONS_PATH),
            registry: RegistryConfig::default(),
            evaluator: EvaluatorConfig::default(),
            apply_repair: false,
            enable_parallel_batch: true,
            min_batch_size_for_parallelism: 64,
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for developing and debugging trees: strict typing,
    /// strict patterns, bundled definitions as a fallback and no threading.
    pub fn development() -> Self {
        Self {
            registry: RegistryConfig {
                strict_patterns: true,
                fallback_to_bundled: true,
            },
            evaluator: EvaluatorConfig {
                type_checking: TypeChecking::Strict,
                ..Default::default()
            },
            enable_parallel_batch: false,
            ..Default::default()
        }
    }

    /// Configuration for scoring large datasets.
    pub fn high_throughput() -> Self {
        Self {
            registry: RegistryConfig {
                fallback_to_bundled: true,
                ..Default::default()
            },
            enable_parallel_batch: true,
            min_batch_size_for_parallelism: 16,
            ..Default::default()
        }
    }

    /// Load a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn with_definitions_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.definitions_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_strict_patterns(mut self, enable: bool) -> Self {
        self.registry.strict_patterns = enable;
        self
    }

    pub fn with_bundled_fallback(mut self, enable: bool) -> Self {
        self.registry.fallback_to_bundled = enable;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.evaluator.max_depth = depth;
        self
    }

    pub fn with_type_checking(mut self, mode: TypeChecking) -> Self {
        self.evaluator.type_checking = mode;
        self
    }

    pub fn with_repair(mut self, enable: bool) -> Self {
        self.apply_repair = enable;
        self
    }

    pub fn with_parallel_batch(mut self, enable: bool) -> Self {
        self.enable_parallel_batch = enable;
        self
    }

    pub fn with_min_batch_size_for_parallelism(mut self, min_size: usize) -> Self {
        self.min_batch_size_for_parallelism = min_size;
        self
    }
}
