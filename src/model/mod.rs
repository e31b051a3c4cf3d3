//! Model - application state for the outline
//!
//! One document, the configuration, and the single "current generation"
//! slot that every refresh replaces.

mod document;

pub use document::Document;

use std::sync::Arc;

use crate::commands::Cmd;
use crate::config::OutlineConfig;
use crate::outline::{ExpansionState, NodeId, OutlineIndex, OutlineTree};

/// Everything one refresh produced: the indexed tree and its expansion flags
#[derive(Debug, Clone)]
pub struct OutlineGeneration {
    /// Refresh request this generation answers
    pub revision: u64,
    pub index: OutlineIndex,
    pub expansion: ExpansionState,
}

impl OutlineGeneration {
    pub fn tree(&self) -> &OutlineTree {
        self.index.tree()
    }
}

/// Application model
#[derive(Debug, Clone)]
pub struct OutlineModel {
    pub document: Document,
    pub config: OutlineConfig,
    /// Latest refresh request; results for older requests are discarded
    pub requested_revision: u64,
    /// Current generation, `None` until the first result arrives
    pub current: Option<OutlineGeneration>,
    /// Node under the cursor in the current generation
    pub highlighted: Option<NodeId>,
    pub cursor_line: usize,
}

impl OutlineModel {
    pub fn new(document: Document, config: OutlineConfig) -> Self {
        Self {
            document,
            config,
            requested_revision: 0,
            current: None,
            highlighted: None,
            cursor_line: 0,
        }
    }

    pub fn index(&self) -> Option<&OutlineIndex> {
        self.current.as_ref().map(|g| &g.index)
    }

    pub fn tree(&self) -> Option<&OutlineTree> {
        self.current.as_ref().map(|g| g.tree())
    }

    /// Start a new refresh request and return the fetch command for it
    pub fn request_refresh(&mut self) -> Cmd {
        self.requested_revision += 1;
        tracing::debug!(
            "Refresh requested: revision {} for {} (doc rev {})",
            self.requested_revision,
            self.document.display_name(),
            self.document.revision
        );
        Cmd::FetchSymbols {
            revision: self.requested_revision,
            path: self.document.file_path.clone(),
            source: Arc::from(self.document.text()),
            language: self.document.language,
        }
    }
}
