//! Symbol descriptors read from a JSON file
//!
//! Lets any external tool (a language server dump, a script) act as the
//! symbol source. The file holds an array of descriptors:
//!
//! ```json
//! [{ "name": "Util", "kind": "class", "line": 17,
//!    "children": [{ "name": "reverse", "kind": "method", "line": 23 }] }]
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use super::{SymbolRequest, SymbolSource};
use crate::outline::SymbolDescriptor;

#[derive(Debug, Clone)]
pub struct JsonSymbols {
    path: PathBuf,
}

impl JsonSymbols {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse descriptors from JSON text
    pub fn parse(text: &str) -> anyhow::Result<Vec<SymbolDescriptor>> {
        serde_json::from_str(text).context("invalid symbol descriptor JSON")
    }
}

impl SymbolSource for JsonSymbols {
    fn name(&self) -> &'static str {
        "json"
    }

    /// Re-reads the file on every call so edits to it are picked up
    fn symbols(&self, _request: &SymbolRequest) -> anyhow::Result<Vec<SymbolDescriptor>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading symbols from {}", self.path.display()))?;
        let symbols = Self::parse(&text)
            .with_context(|| format!("parsing symbols from {}", self.path.display()))?;
        tracing::debug!(
            "Loaded {} top-level symbols from {}",
            symbols.len(),
            self.path.display()
        );
        Ok(symbols)
    }
}
