//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod outline;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::OutlineModel;

#[cfg(debug_assertions)]
use crate::messages::OutlineMsg;
#[cfg(debug_assertions)]
use crate::tracing::OutlineSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use outline::update_outline;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Outline(m) => outline::update_outline(model, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    // Cursor movement arrives on every keystroke in an editor host
    let is_noisy = matches!(&msg, Msg::Outline(OutlineMsg::CursorMoved { .. }));

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = OutlineSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = OutlineSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "outline", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Payloads that can be large (document text, symbol lists) are summarized.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Outline(OutlineMsg::DocumentChanged { text }) => {
            format!("Outline::DocumentChanged({} bytes)", text.len())
        }
        Msg::Outline(OutlineMsg::DocumentSwitched { path, text }) => format!(
            "Outline::DocumentSwitched({:?}, {} bytes)",
            path,
            text.len()
        ),
        Msg::Outline(OutlineMsg::SymbolsLoaded { revision, result }) => match result {
            Ok(symbols) => format!(
                "Outline::SymbolsLoaded(rev {}, {} symbols)",
                revision,
                symbols.len()
            ),
            Err(e) => format!("Outline::SymbolsLoaded(rev {}, error: {})", revision, e),
        },
        Msg::Outline(m) => format!("Outline::{:?}", m),
    }
}
