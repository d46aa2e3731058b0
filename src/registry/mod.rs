//! Regex definitions and the per-locale compiled pattern cache.

pub mod cache;
pub mod definitions;

pub use cache::{
    global_registry, init_global_registry, CompiledPattern, PatternRegistry, PatternSet,
    RegistryConfig, RegistryStats,
};
pub use definitions::{
    DefinitionsDocument, PatternEntry, SelectedPattern, DEFAULT_LOCALE_KEY, FALLBACK_LOCALE,
};
