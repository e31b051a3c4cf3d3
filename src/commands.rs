//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;
use std::sync::Arc;

use crate::outline::ExpandInstruction;
use crate::symbols::LanguageId;

/// Commands returned by update functions
#[derive(Debug, Clone)]
pub enum Cmd {
    /// Run the symbol source in a background worker.
    /// Sends Msg::Outline(SymbolsLoaded) when done
    FetchSymbols {
        revision: u64,
        path: Option<PathBuf>,
        source: Arc<str>,
        language: LanguageId,
    },
    /// A new generation was applied; the outline should be shown again
    OutlineChanged,
    /// Open/close transitions for the renderer to apply, in order
    ApplyExpansion(Vec<ExpandInstruction>),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command changes what the outline view shows
    pub fn needs_redraw(&self) -> bool {
        match self {
            // Results arrive later as a message
            Cmd::FetchSymbols { .. } => false,
            Cmd::OutlineChanged => true,
            Cmd::ApplyExpansion(instructions) => !instructions.is_empty(),
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
