//! Per-locale compiled pattern cache.
//!
//! A [`PatternRegistry`] resolves a locale to a [`PatternSet`], compiling it
//! from the first available definitions source:
//!
//! 1. definitions passed explicitly to [`PatternRegistry::resolve`]
//! 2. a set previously compiled for the same locale
//! 3. the registry's preset document ([`PatternRegistry::set_preset`])
//! 4. the definitions file on disk
//!
//! When none of these exist the registry logs a warning and hands out an empty
//! set, so the lexer recognises nothing instead of failing.
//!
//! # Thread Safety
//! Compiled sets are shared behind an `RwLock`. Two callers racing on the same
//! uncached locale may both compile; compilation is deterministic, and the
//! first insert wins so every caller observes the same set afterwards.

use super::definitions::{DefinitionsDocument, PatternEntry};
use crate::error::{EngineError, Result};
use crate::token::TokenKind;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock};
use tracing::{debug, warn};

/// Registry configuration parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Fail resolution when a pattern does not compile, or when no
    /// definitions can be found, instead of degrading with a warning.
    pub strict_patterns: bool,

    /// Use the bundled definitions when no other source is available.
    pub fallback_to_bundled: bool,
}

/// Registry statistics snapshot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Total resolve calls
    pub lookups: usize,

    /// Resolutions served from the cache
    pub hits: usize,

    /// Resolutions that had to compile
    pub misses: usize,

    /// Resolutions that compiled explicitly injected definitions
    pub injections: usize,

    /// Pattern entries dropped because they failed to compile
    pub rejected_patterns: usize,

    /// Resolutions that found no definitions at all
    pub unavailable: usize,
}

#[derive(Debug, Default)]
struct Counters {
    lookups: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    injections: AtomicUsize,
    rejected_patterns: AtomicUsize,
    unavailable: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> RegistryStats {
        RegistryStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            injections: self.injections.load(Ordering::Relaxed),
            rejected_patterns: self.rejected_patterns.load(Ordering::Relaxed),
            unavailable: self.unavailable.load(Ordering::Relaxed),
        }
    }

    fn clear(&self) {
        for counter in [
            &self.lookups,
            &self.hits,
            &self.misses,
            &self.injections,
            &self.rejected_patterns,
            &self.unavailable,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// A compiled pattern for one token kind.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    locale: String,
    case_insensitive: bool,
    /// Unanchored form, for find-all searches.
    regex: Regex,
    /// Anchored at the start of the haystack, used by the lexer.
    anchored: Regex,
}

impl CompiledPattern {
    pub fn compile(kind: TokenKind, locale: &str, entry: &PatternEntry) -> Result<Self> {
        let source = entry.pattern();
        let case_insensitive = entry.is_case_insensitive();

        let build = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| EngineError::InvalidPattern {
                    token: kind.definition_key().to_string(),
                    locale: locale.to_string(),
                    message: e.to_string(),
                })
        };

        let regex = build(source)?;
        let anchored = build(&format!(r"\A(?:{source})"))?;

        Ok(Self {
            source: source.to_string(),
            locale: locale.to_string(),
            case_insensitive,
            regex,
            anchored,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The locale key the pattern was taken from (after fallback).
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Byte length of a non-empty match starting exactly at `pos`.
    ///
    /// Matching runs on the remainder `&input[pos..]`. Empty matches are
    /// reported as no match so the lexer always advances.
    pub fn match_len_at(&self, input: &str, pos: usize) -> Option<usize> {
        let rest = input.get(pos..)?;
        self.anchored
            .find(rest)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }

    /// Every non-overlapping match in `text`.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.locale == other.locale
            && self.case_insensitive == other.case_insensitive
    }
}

/// Compiled patterns for one locale. Kinds without a pattern never match.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSet {
    locale: String,
    patterns: HashMap<TokenKind, CompiledPattern>,
}

impl PatternSet {
    pub fn empty(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            patterns: HashMap::new(),
        }
    }

    /// Compile every token kind present in `doc` for `locale`.
    ///
    /// With `strict` unset, entries that fail to compile are dropped and
    /// returned in the second tuple element.
    pub fn compile(
        locale: &str,
        doc: &DefinitionsDocument,
        strict: bool,
    ) -> Result<(Self, Vec<EngineError>)> {
        let mut set = Self::empty(locale);
        let mut rejected = Vec::new();

        for kind in TokenKind::PRIORITY {
            let Some(selected) = doc.select(kind, locale) else {
                continue;
            };

            match CompiledPattern::compile(kind, selected.locale, selected.entry) {
                Ok(pattern) => {
                    set.patterns.insert(kind, pattern);
                }
                Err(err) if strict => return Err(err),
                Err(err) => {
                    warn!(%err, "dropping token pattern that failed to compile");
                    rejected.push(err);
                }
            }
        }

        Ok((set, rejected))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, kind: TokenKind) -> Option<&CompiledPattern> {
        self.patterns.get(&kind)
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.patterns.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Kinds with a pattern, in lexer priority order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        TokenKind::PRIORITY
            .iter()
            .copied()
            .filter(|kind| self.contains(*kind))
            .collect()
    }
}

/// Locale-keyed cache of compiled pattern sets.
#[derive(Debug)]
pub struct PatternRegistry {
    config: RegistryConfig,
    definitions_path: PathBuf,
    preset: RwLock<Option<Arc<DefinitionsDocument>>>,
    /// `None` until the file has been looked for; `Some(None)` when it was absent.
    disk: Mutex<Option<Option<Arc<DefinitionsDocument>>>>,
    sets: RwLock<HashMap<String, Arc<PatternSet>>>,
    counters: Counters,
}

impl PatternRegistry {
    /// Registry reading `regex_definitions.json` from the working directory.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default(), crate::config::DEFAULT_DEFINITIONS_PATH)
    }

    pub fn with_config<P: AsRef<Path>>(config: RegistryConfig, definitions_path: P) -> Self {
        Self {
            config,
            definitions_path: definitions_path.as_ref().to_path_buf(),
            preset: RwLock::new(None),
            disk: Mutex::new(None),
            sets: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn definitions_path(&self) -> &Path {
        &self.definitions_path
    }

    /// Install a process-wide document that takes precedence over the file on
    /// disk. Previously compiled sets are discarded.
    pub fn set_preset(&self, doc: DefinitionsDocument) {
        *self.preset.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(doc));
        self.sets.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn clear_preset(&self) {
        *self.preset.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.sets.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Resolve the compiled pattern set for `locale`.
    ///
    /// Explicit `injected` definitions are always compiled and replace the
    /// cached set for the locale. Errors only occur with
    /// [`RegistryConfig::strict_patterns`].
    pub fn resolve(
        &self,
        locale: &str,
        injected: Option<&DefinitionsDocument>,
    ) -> Result<Arc<PatternSet>> {
        Counters::bump(&self.counters.lookups);

        if let Some(doc) = injected {
            Counters::bump(&self.counters.injections);
            let set = Arc::new(self.compile_set(locale, doc)?);
            self.sets
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .insert(locale.to_string(), Arc::clone(&set));
            debug!(locale, kinds = set.len(), "compiled injected definitions");
            return Ok(set);
        }

        if let Some(set) = self
            .sets
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(locale)
        {
            Counters::bump(&self.counters.hits);
            return Ok(Arc::clone(set));
        }

        Counters::bump(&self.counters.misses);
        let compiled = match self.source_document()? {
            Some(doc) => self.compile_set(locale, &doc)?,
            None => {
                Counters::bump(&self.counters.unavailable);
                if self.config.strict_patterns {
                    return Err(EngineError::DefinitionsUnavailable);
                }
                warn!(
                    locale,
                    path = %self.definitions_path.display(),
                    "no regex definitions available; lexer will recognise no tokens"
                );
                PatternSet::empty(locale)
            }
        };
        debug!(locale, kinds = compiled.len(), "compiled pattern set");

        let mut sets = self.sets.write().unwrap_or_else(|e| e.into_inner());
        let stored = sets
            .entry(locale.to_string())
            .or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(stored))
    }

    /// Drop all compiled sets, the preset, the loaded file and the statistics.
    pub fn reset(&self) {
        *self.preset.write().unwrap_or_else(|e| e.into_inner()) = None;
        *self.disk.lock().unwrap_or_else(|e| e.into_inner()) = None;
        self.sets.write().unwrap_or_else(|e| e.into_inner()).clear();
        self.counters.clear();
    }

    pub fn stats(&self) -> RegistryStats {
        self.counters.snapshot()
    }

    /// Number of locales currently cached.
    pub fn cached_locales(&self) -> usize {
        self.sets.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_cached(&self, locale: &str) -> bool {
        self.sets
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(locale)
    }

    fn compile_set(&self, locale: &str, doc: &DefinitionsDocument) -> Result<PatternSet> {
        let (set, rejected) = PatternSet::compile(locale, doc, self.config.strict_patterns)?;
        for _ in &rejected {
            Counters::bump(&self.counters.rejected_patterns);
        }
        Ok(set)
    }

    /// Preset document, else the file on disk (read once), else the bundled
    /// document when configured.
    fn source_document(&self) -> Result<Option<Arc<DefinitionsDocument>>> {
        if let Some(doc) = self
            .preset
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            return Ok(Some(Arc::clone(doc)));
        }

        let mut disk = self.disk.lock().unwrap_or_else(|e| e.into_inner());
        if disk.is_none() {
            *disk = Some(self.load_from_disk()?);
        }
        if let Some(Some(doc)) = disk.as_ref() {
            return Ok(Some(Arc::clone(doc)));
        }

        if self.config.fallback_to_bundled {
            return Ok(Some(Arc::new(DefinitionsDocument::bundled()?)));
        }

        Ok(None)
    }

    fn load_from_disk(&self) -> Result<Option<Arc<DefinitionsDocument>>> {
        if !self.definitions_path.exists() {
            return Ok(None);
        }

        match DefinitionsDocument::from_file(&self.definitions_path) {
            Ok(doc) => {
                debug!(path = %self.definitions_path.display(), "loaded regex definitions");
                Ok(Some(Arc::new(doc)))
            }
            Err(err) if self.config.strict_patterns => Err(err),
            Err(err) => {
                warn!(
                    %err,
                    path = %self.definitions_path.display(),
                    "could not read regex definitions"
                );
                Ok(None)
            }
        }
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();

/// Process-wide registry for callers that do not manage their own.
pub fn global_registry() -> &'static PatternRegistry {
    GLOBAL_REGISTRY.get_or_init(PatternRegistry::new)
}

/// Initialise the process-wide registry. Returns `false`, leaving the
/// existing registry in place, when it was already initialised or already
/// used through [`global_registry`].
pub fn init_global_registry(config: RegistryConfig, definitions_path: &Path) -> bool {
    let installed = GLOBAL_REGISTRY
        .set(PatternRegistry::with_config(config, definitions_path))
        .is_ok();
    if !installed {
        debug!(
            path = %definitions_path.display(),
            "global pattern registry already initialised"
        );
    }
    installed
}
