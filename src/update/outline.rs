//! Outline refresh and navigation handlers
//!
//! Every refresh request bumps `requested_revision`; a symbol result is only
//! applied if it answers the latest request. The applied result replaces the
//! current generation wholesale.

use crate::commands::Cmd;
use crate::messages::OutlineMsg;
use crate::model::{Document, OutlineGeneration, OutlineModel};
use crate::outline::{build, ExpansionState, OutlineIndex, SymbolDescriptor};

/// Handle outline messages
pub fn update_outline(model: &mut OutlineModel, msg: OutlineMsg) -> Option<Cmd> {
    match msg {
        OutlineMsg::Refresh => Some(model.request_refresh()),

        OutlineMsg::DocumentChanged { text } => {
            if !model.document.set_text(&text) {
                tracing::debug!(
                    "DocumentChanged with identical text for {}, skipping refresh",
                    model.document.display_name()
                );
                return None;
            }
            Some(model.request_refresh())
        }

        OutlineMsg::DocumentSwitched { path, text } => {
            model.document = match path {
                Some(path) => Document::with_path(path, &text),
                None => Document::with_text(&text),
            };
            // Expansion flags belong to the previous document
            model.current = None;
            model.highlighted = None;
            model.cursor_line = 0;
            tracing::info!(
                "Switched to {} ({})",
                model.document.display_name(),
                model.document.language.display_name()
            );
            // The old outline is gone before the new one arrives
            Some(Cmd::batch(vec![Cmd::OutlineChanged, model.request_refresh()]))
        }

        OutlineMsg::SymbolsLoaded { revision, result } => {
            if revision != model.requested_revision {
                tracing::debug!(
                    "Discarding stale symbols: result revision {} != requested revision {}",
                    revision,
                    model.requested_revision
                );
                return None;
            }

            match result {
                Ok(symbols) => {
                    apply_symbols(model, revision, &symbols);
                    Some(Cmd::OutlineChanged)
                }
                Err(e) => {
                    tracing::warn!(
                        "Symbol source failed for {} (revision {}): {}; keeping previous outline",
                        model.document.display_name(),
                        revision,
                        e
                    );
                    None
                }
            }
        }

        OutlineMsg::CursorMoved { line } => {
            model.cursor_line = line;
            let index = model.index()?;
            let highlighted = index.node_at_or_before(line);
            if highlighted == model.highlighted {
                return None;
            }
            model.highlighted = highlighted;
            Some(Cmd::OutlineChanged)
        }

        OutlineMsg::FocusNode { line, label } => {
            let Some(generation) = model.current.as_mut() else {
                tracing::debug!("FocusNode before first outline, ignoring");
                return None;
            };
            let Some(target) = generation.index.lookup(line, &label) else {
                tracing::debug!("FocusNode: no node {:?} at line {}", label, line);
                return None;
            };

            let instructions = generation.expansion.focus(&generation.index, target);
            model.highlighted = Some(target);
            Some(Cmd::ApplyExpansion(instructions))
        }
    }
}

/// Build, index and install a new generation from `symbols`
fn apply_symbols(model: &mut OutlineModel, revision: u64, symbols: &[SymbolDescriptor]) {
    let text = model.document.text();
    let lines: Vec<&str> = text.lines().collect();

    let tree = build(symbols, &lines, model.config.build_options());
    let index = OutlineIndex::new(tree);

    let depth = model.config.expand_depth;
    let expansion = match model.current.take() {
        Some(previous) => {
            ExpansionState::carry_over(&previous.index, &previous.expansion, &index, depth)
        }
        None => ExpansionState::initial(&index, depth),
    };

    model.highlighted = index.node_at_or_before(model.cursor_line);
    tracing::debug!(
        "Applied outline generation {}: {} nodes for {}",
        revision,
        index.len(),
        model.document.display_name()
    );
    model.current = Some(OutlineGeneration {
        revision,
        index,
        expansion,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlineConfig;
    use crate::outline::{ExpandAction, OutlineKind};

    const SOURCE: &str = "\
/**
 * Utility helpers
 */
class Util {
    /** Reverses a string. */
    reverse(str) {}
}

/** Factorial. */
function factorial(n) {}
";

    fn symbols() -> Vec<SymbolDescriptor> {
        vec![
            SymbolDescriptor::new("Util", OutlineKind::Class, 3).with_children(vec![
                SymbolDescriptor::new("reverse", OutlineKind::Method, 5),
            ]),
            SymbolDescriptor::new("factorial", OutlineKind::Function, 9),
        ]
    }

    fn model() -> OutlineModel {
        OutlineModel::new(Document::with_text(SOURCE), OutlineConfig::default())
    }

    fn fetch_revision(cmd: Option<Cmd>) -> u64 {
        match cmd {
            Some(Cmd::FetchSymbols { revision, .. }) => revision,
            other => panic!("Expected FetchSymbols, got {:?}", other),
        }
    }

    fn loaded(revision: u64, symbols: Vec<SymbolDescriptor>) -> OutlineMsg {
        OutlineMsg::SymbolsLoaded {
            revision,
            result: Ok(symbols),
        }
    }

    #[test]
    fn test_refresh_requests_fetch_with_snapshot() {
        let mut model = model();
        let cmd = update_outline(&mut model, OutlineMsg::Refresh);
        match cmd {
            Some(Cmd::FetchSymbols {
                revision, source, ..
            }) => {
                assert_eq!(revision, 1);
                assert_eq!(&*source, SOURCE);
            }
            other => panic!("Expected FetchSymbols, got {:?}", other),
        }
    }

    #[test]
    fn test_symbols_loaded_installs_generation() {
        let mut model = model();
        let rev = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));

        let cmd = update_outline(&mut model, loaded(rev, symbols()));
        assert!(matches!(cmd, Some(Cmd::OutlineChanged)));

        let index = model.index().unwrap();
        assert_eq!(index.len(), 3);
        let util = index.lookup(3, "Utility helpers").unwrap();
        assert_eq!(index.node(util).description, "class Util");
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut model = model();
        let first = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));
        let second = fetch_revision(update_outline(
            &mut model,
            OutlineMsg::DocumentChanged {
                text: format!("{}\n", SOURCE),
            },
        ));
        assert!(second > first);

        // The older request finishes last
        assert!(update_outline(&mut model, loaded(second, symbols())).is_some());
        assert!(update_outline(&mut model, loaded(first, vec![])).is_none());

        let generation = model.current.as_ref().unwrap();
        assert_eq!(generation.revision, second);
        assert_eq!(generation.index.len(), 3);
    }

    #[test]
    fn test_source_error_keeps_previous_generation() {
        let mut model = model();
        let rev = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));
        update_outline(&mut model, loaded(rev, symbols()));

        let rev = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));
        let cmd = update_outline(
            &mut model,
            OutlineMsg::SymbolsLoaded {
                revision: rev,
                result: Err("provider crashed".to_string()),
            },
        );
        assert!(cmd.is_none());
        assert_eq!(model.index().unwrap().len(), 3);
    }

    #[test]
    fn test_identical_text_does_not_refresh() {
        let mut model = model();
        let cmd = update_outline(
            &mut model,
            OutlineMsg::DocumentChanged {
                text: SOURCE.to_string(),
            },
        );
        assert!(cmd.is_none());
        assert_eq!(model.requested_revision, 0);
    }

    #[test]
    fn test_focus_node_emits_instructions() {
        let mut model = model();
        model.config.expand_depth = 0;
        let rev = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));
        update_outline(&mut model, loaded(rev, symbols()));

        let cmd = update_outline(
            &mut model,
            OutlineMsg::FocusNode {
                line: 5,
                label: "Reverses a string.".to_string(),
            },
        );
        let Some(Cmd::ApplyExpansion(instructions)) = cmd else {
            panic!("Expected ApplyExpansion");
        };
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].action, ExpandAction::Expand);

        let index = model.index().unwrap();
        assert_eq!(index.node(instructions[0].node).line, 3);
        assert_eq!(model.highlighted, index.lookup(5, "Reverses a string."));
    }

    #[test]
    fn test_focus_unknown_node_is_ignored() {
        let mut model = model();
        assert!(update_outline(&mut model, OutlineMsg::FocusNode {
            line: 0,
            label: "x".to_string()
        })
        .is_none());
    }

    #[test]
    fn test_cursor_highlights_enclosing_node() {
        let mut model = model();
        let rev = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));
        update_outline(&mut model, loaded(rev, symbols()));

        let cmd = update_outline(&mut model, OutlineMsg::CursorMoved { line: 6 });
        assert!(matches!(cmd, Some(Cmd::OutlineChanged)));
        let index = model.index().unwrap();
        assert_eq!(model.highlighted, index.lookup(5, "Reverses a string."));

        // Same node again: nothing to redraw
        assert!(update_outline(&mut model, OutlineMsg::CursorMoved { line: 7 }).is_none());
    }

    #[test]
    fn test_document_switch_clears_generation() {
        let mut model = model();
        let rev = fetch_revision(update_outline(&mut model, OutlineMsg::Refresh));
        update_outline(&mut model, loaded(rev, symbols()));

        let cmd = update_outline(
            &mut model,
            OutlineMsg::DocumentSwitched {
                path: Some("other.ts".into()),
                text: "let x = 1;".to_string(),
            },
        );
        assert!(model.current.is_none());
        let Some(Cmd::Batch(cmds)) = cmd else {
            panic!("Expected Batch, got {:?}", cmd);
        };
        assert!(matches!(cmds[0], Cmd::OutlineChanged));
        match &cmds[1] {
            Cmd::FetchSymbols { language, .. } => {
                assert_eq!(*language, crate::symbols::LanguageId::TypeScript)
            }
            other => panic!("Expected FetchSymbols, got {:?}", other),
        }
    }
}
