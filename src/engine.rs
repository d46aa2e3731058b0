//! Primary name-parsing interface.
//!
//! [`NameEngine`] ties a configuration to a pattern registry and runs
//! expression trees against raw names, one at a time or in batches.

use crate::baseline::BaselineParser;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::eval::{TreeEvaluationResult, TreeEvaluator, TypeChecking};
use crate::ir::Expr;
use crate::lexer::Lexer;
use crate::name::NameRecord;
use crate::postprocess::repair;
use crate::registry::{DefinitionsDocument, PatternRegistry, PatternSet};
use crate::token::Token;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Name-parsing engine.
///
/// The engine owns (or shares) a [`PatternRegistry`], so compiled patterns are
/// reused across calls and threads. Every method takes `&self`; one engine can
/// serve any number of threads.
///
/// # Examples
///
/// ```rust
/// use evoname::{DefinitionsDocument, EngineConfig, Expr, NameEngine};
///
/// let engine = NameEngine::with_config(EngineConfig::new().with_bundled_fallback(true));
/// let tree = Expr::parse(
///     "make_name_obj(raw_input, extract_given_str(tokenize(raw_input)), \
///      extract_family_str(tokenize(raw_input)), EMPTY_STR_LIST, \
///      extract_title_list(tokenize(raw_input)), EMPTY_STR, UNKNOWN, \
///      EMPTY_STR_LIST, EMPTY_STR_LIST)",
/// )
/// .unwrap();
///
/// let record = engine.parse("Dr. Hans Müller", &tree).unwrap();
/// assert_eq!(record.given, "Hans");
/// assert_eq!(record.family, "Müller");
/// assert_eq!(record.title, vec!["Dr."]);
/// ```
#[derive(Debug)]
pub struct NameEngine {
    config: EngineConfig,
    registry: Arc<PatternRegistry>,
}

impl NameEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with its own registry built from `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        let registry = PatternRegistry::with_config(
            config.registry.clone(),
            &config.definitions_path,
        );
        Self {
            config,
            registry: Arc::new(registry),
        }
    }

    /// Create an engine that shares an existing registry. The registry's own
    /// settings apply; `config.registry` and `config.definitions_path` are
    /// not consulted.
    pub fn with_registry(config: EngineConfig, registry: Arc<PatternRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Compiled patterns for `locale`.
    pub fn patterns(&self, locale: &str) -> Result<Arc<PatternSet>> {
        self.registry.resolve(locale, None)
    }

    /// Compile `doc` for `locale` and use it for every later call with that
    /// locale.
    pub fn inject_definitions(
        &self,
        locale: &str,
        doc: &DefinitionsDocument,
    ) -> Result<Arc<PatternSet>> {
        self.registry.resolve(locale, Some(doc))
    }

    /// Tokenize with the default locale.
    pub fn tokenize(&self, raw: &str) -> Result<Vec<Token>> {
        self.tokenize_with_locale(raw, &self.config.default_locale)
    }

    pub fn tokenize_with_locale(&self, raw: &str, locale: &str) -> Result<Vec<Token>> {
        let patterns = self.patterns(locale)?;
        Ok(Lexer::new(&patterns).tokenize(raw))
    }

    /// Evaluate `tree` on `raw` and return whatever value its root produces.
    pub fn evaluate(&self, raw: &str, tree: &Expr) -> Result<TreeEvaluationResult> {
        let patterns = self.patterns(&self.config.default_locale)?;
        TreeEvaluator::with_config(&patterns, self.config.evaluator.clone()).evaluate(tree, raw)
    }

    /// Parse `raw` with the default locale.
    pub fn parse(&self, raw: &str, tree: &Expr) -> Result<NameRecord> {
        self.parse_with_locale(raw, tree, &self.config.default_locale)
    }

    /// Parse `raw` with `tree`. The root must yield a name record.
    pub fn parse_with_locale(&self, raw: &str, tree: &Expr, locale: &str) -> Result<NameRecord> {
        let patterns = self.patterns(locale)?;
        let mut evaluator = TreeEvaluator::with_config(&patterns, self.config.evaluator.clone());
        self.finish(evaluator.evaluate_name(tree, raw)?)
    }

    /// Parse many inputs with the same tree. Results keep input order; the
    /// first failure aborts the batch.
    pub fn parse_batch<S>(&self, raws: &[S], tree: &Expr) -> Result<Vec<NameRecord>>
    where
        S: AsRef<str> + Sync,
    {
        if self.config.evaluator.type_checking == TypeChecking::Strict {
            tree.check_depth(self.config.evaluator.max_depth)?;
            tree.check()?;
        }

        let patterns = self.patterns(&self.config.default_locale)?;
        let parse_one = |raw: &S| -> Result<NameRecord> {
            let mut evaluator =
                TreeEvaluator::with_config(&patterns, self.config.evaluator.clone());
            self.finish(evaluator.evaluate_name(tree, raw.as_ref())?)
        };

        let parallel = self.config.enable_parallel_batch
            && raws.len() >= self.config.min_batch_size_for_parallelism;
        debug!(batch = raws.len(), parallel, "parsing batch");

        if parallel {
            raws.par_iter().map(parse_one).collect()
        } else {
            raws.iter().map(parse_one).collect()
        }
    }

    /// Parse `raw` with the fixed rule-based [`BaselineParser`].
    pub fn baseline(&self, raw: &str) -> Result<NameRecord> {
        let patterns = self.patterns(&self.config.default_locale)?;
        Ok(BaselineParser::new(&patterns).parse(raw))
    }

    fn finish(&self, record: NameRecord) -> Result<NameRecord> {
        if self.config.apply_repair {
            Ok(repair(&record))
        } else {
            Ok(record)
        }
    }
}

impl Default for NameEngine {
    fn default() -> Self {
        Self::new()
    }
}
