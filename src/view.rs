//! Text and JSON rendering of an outline
//!
//! The tree text format draws nested nodes with `├─`/`└─` branches:
//!
//! ```text
//! Utility helpers class Util
//! ├─Reverses a string. method reverse
//! └─Pads a string. method pad
//! Factorial. function factorial
//! ```
//!
//! Line numbers in text output are 1-based; JSON output keeps the 0-based
//! lines of the data model.

use serde::Serialize;

use crate::outline::{
    node_title, ExpandAction, ExpandInstruction, ExpandState, ExpansionState, NodeId, OutlineIndex,
    OutlineKind, OutlineTree,
};

const BRANCH_MID: &str = "├─";
const BRANCH_LAST: &str = "└─";
const PIPE: &str = "│ ";
const GAP: &str = "  ";
const HIGHLIGHT_MARK: &str = "  ←";

/// How to draw the tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeStyle<'a> {
    /// Hide children of collapsed nodes and prefix collapsible nodes with `+`/`-`
    pub expansion: Option<&'a ExpansionState>,
    /// Print each node's tag lines under it
    pub show_tooltips: bool,
    /// Prefix each row with the short kind tag, e.g. `[fn]`
    pub show_kinds: bool,
    pub highlighted: Option<NodeId>,
}

/// Render the whole outline as branch-drawn tree text
pub fn tree_text(tree: &OutlineTree, style: &TreeStyle) -> String {
    let mut lines = Vec::new();
    for &root in tree.roots() {
        render_node(tree, root, style, None, "", &mut lines);
    }
    lines.join("\n")
}

/// `is_last` is `None` for roots, which get no branch glyph
fn render_node(
    tree: &OutlineTree,
    id: NodeId,
    style: &TreeStyle,
    is_last: Option<bool>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let node = tree.node(id);

    let branch = match is_last {
        None => String::new(),
        Some(true) => format!("{}{}", prefix, BRANCH_LAST),
        Some(false) => format!("{}{}", prefix, BRANCH_MID),
    };

    let state = style.expansion.map(|e| e.state(id));
    let marker = match state {
        Some(ExpandState::Expanded) => "- ",
        Some(ExpandState::Collapsed) => "+ ",
        Some(ExpandState::Leaf) => "  ",
        None => "",
    };

    let mut line = format!("{}{}", branch, marker);
    if style.show_kinds {
        line.push_str(&format!("[{}] ", node.kind.label()));
    }
    line.push_str(&node_title(node));
    if style.highlighted == Some(id) {
        line.push_str(HIGHLIGHT_MARK);
    }
    lines.push(line);

    let child_prefix = match is_last {
        None => String::new(),
        Some(true) => format!("{}{}", prefix, GAP),
        Some(false) => format!("{}{}", prefix, PIPE),
    };

    let show_children = state != Some(ExpandState::Collapsed) && node.is_collapsible();

    if style.show_tooltips && !node.tooltip.is_empty() {
        let connector = if show_children { PIPE } else { GAP };
        for tag in node.tooltip.lines() {
            lines.push(format!("{}{}{}", child_prefix, connector, tag));
        }
    }

    if show_children {
        let count = node.children.len();
        for (i, &child) in node.children.iter().enumerate() {
            render_node(tree, child, style, Some(i + 1 == count), &child_prefix, lines);
        }
    }
}

/// Every node starting at `line`, outermost first, innermost marked with `*`
pub fn nodes_at_line_text(index: &OutlineIndex, line: usize) -> String {
    let ids = index.nodes_at_line(line);
    let Some(&innermost) = ids.last() else {
        return format!("no outline node at line {}", line + 1);
    };

    ids.iter()
        .map(|&id| {
            let depth = index.tree().depth(id);
            let mark = if id == innermost { "*" } else { " " };
            format!(
                "{} {}{}",
                mark,
                "  ".repeat(depth),
                node_title(index.node(id))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per open/close transition
pub fn instructions_text(index: &OutlineIndex, instructions: &[ExpandInstruction]) -> String {
    if instructions.is_empty() {
        return "no changes".to_string();
    }
    instructions
        .iter()
        .map(|ins| {
            let verb = match ins.action {
                ExpandAction::Expand => "expand  ",
                ExpandAction::Collapse => "collapse",
            };
            let node = index.node(ins.node);
            format!("{} {}:{}", verb, node.line + 1, node.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonNode<'a> {
    label: &'a str,
    description: &'a str,
    tooltip: &'a str,
    /// 0-based, same as `OutlineNode::line` and descriptor input
    line: usize,
    kind: OutlineKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

fn json_node(tree: &OutlineTree, id: NodeId) -> JsonNode<'_> {
    let node = tree.node(id);
    JsonNode {
        label: &node.label,
        description: &node.description,
        tooltip: &node.tooltip,
        line: node.line,
        kind: node.kind,
        children: node.children.iter().map(|&c| json_node(tree, c)).collect(),
    }
}

/// Nested JSON array of the outline
pub fn outline_json(tree: &OutlineTree) -> anyhow::Result<String> {
    let roots: Vec<JsonNode> = tree.roots().iter().map(|&r| json_node(tree, r)).collect();
    Ok(serde_json::to_string_pretty(&roots)?)
}

#[derive(Serialize)]
struct JsonLineNode<'a> {
    label: &'a str,
    description: &'a str,
    depth: usize,
    innermost: bool,
}

/// Flat JSON array of the nodes starting at `line`, outermost first
pub fn nodes_at_line_json(index: &OutlineIndex, line: usize) -> anyhow::Result<String> {
    let ids = index.nodes_at_line(line);
    let innermost = ids.last().copied();
    let nodes: Vec<JsonLineNode> = ids
        .iter()
        .map(|&id| {
            let node = index.node(id);
            JsonLineNode {
                label: &node.label,
                description: &node.description,
                depth: index.tree().depth(id),
                innermost: Some(id) == innermost,
            }
        })
        .collect();
    Ok(serde_json::to_string_pretty(&nodes)?)
}
