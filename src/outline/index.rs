//! Flat lookup tables over a built outline

use std::collections::HashMap;

use super::{NodeId, OutlineNode, OutlineTree};

/// Identity of a node within one generation: start line plus label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub line: usize,
    pub label: String,
}

/// Outline tree together with its key and line tables.
///
/// Built once per generation and replaced wholesale on refresh.
#[derive(Debug, Clone, Default)]
pub struct OutlineIndex {
    tree: OutlineTree,
    by_key: HashMap<NodeKey, NodeId>,
    by_line: HashMap<usize, Vec<NodeId>>,
    /// Sorted distinct lines present in `by_line`
    lines: Vec<usize>,
}

impl OutlineIndex {
    pub fn new(tree: OutlineTree) -> Self {
        let mut by_key: HashMap<NodeKey, NodeId> = HashMap::with_capacity(tree.len());
        let mut by_line: HashMap<usize, Vec<NodeId>> = HashMap::new();

        for id in tree.ids() {
            let node = tree.node(id);
            let slot = by_line.entry(node.line).or_default();
            match by_key.insert(node.key(), id) {
                Some(previous) => {
                    tracing::debug!(
                        "Outline key collision at line {} ({:?}): {:?} replaces {:?}",
                        node.line,
                        node.label,
                        id,
                        previous
                    );
                    // Keep the slot in preorder so its last entry is the deepest node
                    slot.retain(|entry| *entry != previous);
                    slot.push(id);
                }
                None => slot.push(id),
            }
        }

        let mut lines: Vec<usize> = by_line.keys().copied().collect();
        lines.sort_unstable();

        Self {
            tree,
            by_key,
            by_line,
            lines,
        }
    }

    pub fn tree(&self) -> &OutlineTree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> &OutlineNode {
        self.tree.node(id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Node with the given key, if indexed
    pub fn lookup(&self, line: usize, label: &str) -> Option<NodeId> {
        self.by_key
            .get(&NodeKey {
                line,
                label: label.to_string(),
            })
            .copied()
    }

    pub fn lookup_key(&self, key: &NodeKey) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    /// All nodes starting at `line`, outermost first
    pub fn nodes_at_line(&self, line: usize) -> Vec<NodeId> {
        self.by_line.get(&line).cloned().unwrap_or_default()
    }

    /// Deepest node starting at `line`
    pub fn innermost_at_line(&self, line: usize) -> Option<NodeId> {
        self.by_line.get(&line).and_then(|ids| ids.last().copied())
    }

    /// Innermost node on the closest indexed line at or above `line`.
    ///
    /// Used to follow a cursor sitting inside a declaration body.
    pub fn node_at_or_before(&self, line: usize) -> Option<NodeId> {
        let pos = self.lines.partition_point(|&l| l <= line);
        let nearest = *self.lines.get(pos.checked_sub(1)?)?;
        self.innermost_at_line(nearest)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.tree.node(id).parent
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: &self.tree,
            next: self.tree.node(id).parent,
        }
    }

    /// True if `candidate` is `node` or lies on its parent chain
    pub fn ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        candidate == node || self.ancestors(node).any(|a| a == candidate)
    }

    /// True if `node` is `root` or reachable through `root`'s children
    pub fn descendant_or_self(&self, root: NodeId, node: NodeId) -> bool {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if current == node {
                return true;
            }
            stack.extend(self.tree.node(current).children.iter().copied());
        }
        false
    }
}

/// Iterator over a node's parent chain
pub struct Ancestors<'a> {
    tree: &'a OutlineTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
