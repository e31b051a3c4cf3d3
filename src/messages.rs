//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::outline::SymbolDescriptor;

/// Outline refresh and navigation messages
#[derive(Debug, Clone)]
pub enum OutlineMsg {
    /// Rebuild the outline from the current document text
    Refresh,
    /// The document text changed (edit, or file changed on disk)
    DocumentChanged { text: String },
    /// A different document became active
    DocumentSwitched { path: Option<PathBuf>, text: String },
    /// A symbol source finished; `result` is for the given revision
    SymbolsLoaded {
        revision: u64,
        result: Result<Vec<SymbolDescriptor>, String>,
    },
    /// The cursor moved; highlight the node under it
    CursorMoved { line: usize },
    /// Reveal one node, closing everything off its path
    FocusNode { line: usize, label: String },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Outline(OutlineMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn refresh() -> Self {
        Msg::Outline(OutlineMsg::Refresh)
    }

    pub fn document_changed(text: impl Into<String>) -> Self {
        Msg::Outline(OutlineMsg::DocumentChanged { text: text.into() })
    }

    pub fn cursor_moved(line: usize) -> Self {
        Msg::Outline(OutlineMsg::CursorMoved { line })
    }

    pub fn focus_node(line: usize, label: impl Into<String>) -> Self {
        Msg::Outline(OutlineMsg::FocusNode {
            line,
            label: label.into(),
        })
    }
}
