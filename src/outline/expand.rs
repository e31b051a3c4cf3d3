//! Which outline nodes are open, and the "focus this node" transition

use super::{NodeId, OutlineIndex};

/// Default number of levels expanded when an outline is first shown
pub const DEFAULT_EXPAND_DEPTH: usize = 2;

/// Display state of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandState {
    Collapsed,
    Expanded,
    /// No children; nothing to expand
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandAction {
    Expand,
    Collapse,
}

/// A single open/close transition for the renderer to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandInstruction {
    pub node: NodeId,
    pub action: ExpandAction,
}

/// Per-node expansion flags, parallel to the arena of one [`OutlineIndex`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: Vec<ExpandState>,
}

impl ExpansionState {
    /// Nodes with children shallower than `depth` start expanded
    pub fn initial(index: &OutlineIndex, depth: usize) -> Self {
        let flags = index
            .tree()
            .ids()
            .map(|id| initial_flag(index, id, depth))
            .collect();
        Self { flags }
    }

    /// Keep the flags of nodes whose key survived the refresh
    pub fn carry_over(
        previous_index: &OutlineIndex,
        previous: &ExpansionState,
        index: &OutlineIndex,
        depth: usize,
    ) -> Self {
        let mut kept = 0usize;
        let flags = index
            .tree()
            .ids()
            .map(|id| {
                let node = index.node(id);
                if !node.is_collapsible() {
                    return ExpandState::Leaf;
                }
                let carried = previous_index
                    .lookup_key(&node.key())
                    .map(|old| previous.state(old))
                    .filter(|state| *state != ExpandState::Leaf);
                match carried {
                    Some(state) => {
                        kept += 1;
                        state
                    }
                    None => initial_flag(index, id, depth),
                }
            })
            .collect();
        tracing::trace!("Carried over {} expansion flags", kept);
        Self { flags }
    }

    pub fn state(&self, id: NodeId) -> ExpandState {
        self.flags.get(id.0).copied().unwrap_or(ExpandState::Leaf)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.state(id) == ExpandState::Expanded
    }

    /// Expanded node handles in preorder
    pub fn expanded(&self) -> Vec<NodeId> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag == ExpandState::Expanded)
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// Open the path to `target` and close everything off that path.
    ///
    /// Expanded nodes that are neither on `target`'s ancestor chain nor
    /// inside `target`'s subtree are collapsed. Ancestors of `target` are
    /// expanded root first, then `target` itself if it has children.
    /// Returns only the transitions that changed a flag: collapses in
    /// preorder, then expansions.
    pub fn focus(&mut self, index: &OutlineIndex, target: NodeId) -> Vec<ExpandInstruction> {
        let mut instructions = Vec::new();

        for id in index.tree().ids() {
            if self.state(id) == ExpandState::Expanded
                && !index.ancestor_or_self(id, target)
                && !index.descendant_or_self(target, id)
            {
                self.set(id, ExpandState::Collapsed);
                instructions.push(ExpandInstruction {
                    node: id,
                    action: ExpandAction::Collapse,
                });
            }
        }

        let mut path: Vec<NodeId> = index.ancestors(target).collect();
        path.reverse();
        if index.node(target).is_collapsible() {
            path.push(target);
        }

        for id in path {
            if self.state(id) != ExpandState::Expanded {
                self.set(id, ExpandState::Expanded);
                instructions.push(ExpandInstruction {
                    node: id,
                    action: ExpandAction::Expand,
                });
            }
        }

        tracing::debug!(
            "Focus {:?} at line {}: {} transitions",
            target,
            index.node(target).line,
            instructions.len()
        );
        instructions
    }

    fn set(&mut self, id: NodeId, state: ExpandState) {
        if let Some(flag) = self.flags.get_mut(id.0) {
            *flag = state;
        }
    }
}

fn initial_flag(index: &OutlineIndex, id: NodeId, depth: usize) -> ExpandState {
    if !index.node(id).is_collapsible() {
        ExpandState::Leaf
    } else if index.tree().depth(id) < depth {
        ExpandState::Expanded
    } else {
        ExpandState::Collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{build, BuildOptions, OutlineKind, SymbolDescriptor};

    /// A (0) { B (1) { C (2) { D (3) { m (4) } } } }, E (10) { f (11) }
    fn nested() -> OutlineIndex {
        let symbols = vec![
            SymbolDescriptor::new("A", OutlineKind::Class, 0).with_children(vec![
                SymbolDescriptor::new("B", OutlineKind::Class, 1).with_children(vec![
                    SymbolDescriptor::new("C", OutlineKind::Class, 2).with_children(vec![
                        SymbolDescriptor::new("D", OutlineKind::Class, 3).with_children(vec![
                            SymbolDescriptor::new("m", OutlineKind::Method, 4),
                        ]),
                    ]),
                ]),
            ]),
            SymbolDescriptor::new("E", OutlineKind::Class, 10)
                .with_children(vec![SymbolDescriptor::new("f", OutlineKind::Method, 11)]),
        ];
        OutlineIndex::new(build(&symbols, &[], BuildOptions::default()))
    }

    fn id(index: &OutlineIndex, line: usize, label: &str) -> NodeId {
        index.lookup(line, label).unwrap()
    }

    #[test]
    fn test_initial_depth() {
        let index = nested();
        let state = ExpansionState::initial(&index, 2);
        assert_eq!(state.state(id(&index, 0, "A")), ExpandState::Expanded);
        assert_eq!(state.state(id(&index, 1, "B")), ExpandState::Expanded);
        assert_eq!(state.state(id(&index, 2, "C")), ExpandState::Collapsed);
        assert_eq!(state.state(id(&index, 4, "m")), ExpandState::Leaf);
        assert_eq!(state.state(id(&index, 10, "E")), ExpandState::Expanded);

        let closed = ExpansionState::initial(&index, 0);
        assert!(closed.expanded().is_empty());
    }

    #[test]
    fn test_focus_deep_method_collapses_sibling_class() {
        let index = nested();
        let mut state = ExpansionState::initial(&index, 2);
        let m = id(&index, 4, "m");

        let instructions = state.focus(&index, m);

        let e = id(&index, 10, "E");
        let c = id(&index, 2, "C");
        let d = id(&index, 3, "D");
        assert_eq!(
            instructions,
            vec![
                ExpandInstruction { node: e, action: ExpandAction::Collapse },
                ExpandInstruction { node: c, action: ExpandAction::Expand },
                ExpandInstruction { node: d, action: ExpandAction::Expand },
            ]
        );
        assert_eq!(state.state(e), ExpandState::Collapsed);
        assert_eq!(state.state(m), ExpandState::Leaf);
    }

    #[test]
    fn test_focus_leaves_exactly_the_path_open() {
        let index = nested();
        let mut state = ExpansionState::initial(&index, 10);
        let c = id(&index, 2, "C");

        state.focus(&index, c);

        // ancestors, the node itself and its previously expanded descendants
        let expected: Vec<NodeId> = ["A", "B", "C", "D"]
            .iter()
            .zip(0..)
            .map(|(label, line)| id(&index, line, label))
            .collect();
        assert_eq!(state.expanded(), expected);
    }

    #[test]
    fn test_focus_twice_is_a_no_op() {
        let index = nested();
        let mut state = ExpansionState::initial(&index, 2);
        let f = id(&index, 11, "f");
        assert!(!state.focus(&index, f).is_empty());
        assert!(state.focus(&index, f).is_empty());
    }

    #[test]
    fn test_focus_collapsed_subtree_root_expands_it() {
        let index = nested();
        let mut state = ExpansionState::initial(&index, 0);
        let e = id(&index, 10, "E");
        let instructions = state.focus(&index, e);
        assert_eq!(
            instructions,
            vec![ExpandInstruction { node: e, action: ExpandAction::Expand }]
        );
    }

    #[test]
    fn test_carry_over_keeps_flags_by_key() {
        let index = nested();
        let mut state = ExpansionState::initial(&index, 2);
        state.focus(&index, id(&index, 4, "m"));

        // E moved down; A chain unchanged
        let symbols = vec![
            SymbolDescriptor::new("A", OutlineKind::Class, 0).with_children(vec![
                SymbolDescriptor::new("B", OutlineKind::Class, 1).with_children(vec![
                    SymbolDescriptor::new("C", OutlineKind::Class, 2).with_children(vec![
                        SymbolDescriptor::new("D", OutlineKind::Class, 3).with_children(vec![
                            SymbolDescriptor::new("m", OutlineKind::Method, 4),
                        ]),
                    ]),
                ]),
            ]),
            SymbolDescriptor::new("E", OutlineKind::Class, 12)
                .with_children(vec![SymbolDescriptor::new("f", OutlineKind::Method, 13)]),
        ];
        let next = OutlineIndex::new(build(&symbols, &[], BuildOptions::default()));
        let carried = ExpansionState::carry_over(&index, &state, &next, 2);

        assert!(carried.is_expanded(id(&next, 3, "D")));
        assert!(carried.is_expanded(id(&next, 2, "C")));
        // new key, initial rule applies
        assert!(carried.is_expanded(id(&next, 12, "E")));
    }
}
