//! Symbol sources
//!
//! A symbol source reports the declarations of a document as a tree of
//! [`SymbolDescriptor`]s. The outline engine never looks at code itself; it
//! only attaches comments to whatever a source reports.

mod extract;
mod json;
mod languages;

use std::path::PathBuf;
use std::sync::Arc;

use crate::outline::SymbolDescriptor;

pub use extract::TreeSitterSymbols;
pub use json::JsonSymbols;
pub use languages::LanguageId;

/// Everything a source may need to list declarations
#[derive(Debug, Clone)]
pub struct SymbolRequest {
    pub path: Option<PathBuf>,
    pub language: LanguageId,
    pub source: Arc<str>,
}

impl SymbolRequest {
    pub fn new(path: Option<PathBuf>, language: LanguageId, source: impl Into<Arc<str>>) -> Self {
        Self {
            path,
            language,
            source: source.into(),
        }
    }
}

/// Provider of the hierarchical declaration list for a document.
///
/// Called from worker threads, so implementations must be `Send + Sync`.
/// A document with no declarations is `Ok(vec![])`, not an error.
pub trait SymbolSource: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    fn symbols(&self, request: &SymbolRequest) -> anyhow::Result<Vec<SymbolDescriptor>>;
}
