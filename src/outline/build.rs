//! Build the outline tree from symbol descriptors and source text

use super::{locate, parse, NodeId, OutlineNode, OutlineTree, SymbolDescriptor};

/// Options controlling which symbols become outline nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Keep only symbols with an attached documentation comment.
    ///
    /// An undocumented symbol is dropped together with everything nested
    /// inside it.
    pub only_documented: bool,
}

/// Build an outline tree, preserving the order of `symbols` exactly.
///
/// Every symbol yields a node unless [`BuildOptions::only_documented`] is
/// set. Nodes are appended in preorder, so the arena order is document order.
pub fn build(symbols: &[SymbolDescriptor], source_lines: &[&str], options: BuildOptions) -> OutlineTree {
    let mut tree = OutlineTree::empty();
    for symbol in symbols {
        build_node(&mut tree, symbol, source_lines, None, options);
    }
    tracing::debug!(
        "Built outline: {} nodes ({} roots) from {} top-level symbols",
        tree.len(),
        tree.roots().len(),
        symbols.len()
    );
    tree
}

fn build_node(
    tree: &mut OutlineTree,
    symbol: &SymbolDescriptor,
    source_lines: &[&str],
    parent: Option<NodeId>,
    options: BuildOptions,
) {
    let comment = locate(source_lines, symbol.line).map(|raw| parse(&raw));

    if options.only_documented && comment.is_none() {
        return;
    }

    let (label, tooltip) = match comment {
        Some(doc) if doc.summary.is_empty() => (symbol.name.clone(), doc.tag_block),
        Some(doc) => (doc.summary, doc.tag_block),
        None => (symbol.name.clone(), String::new()),
    };

    let node = OutlineNode {
        label,
        description: describe(symbol),
        tooltip,
        line: symbol.line,
        kind: symbol.kind,
        children: Vec::new(),
        parent: None,
    };

    let id = tree.push(node, parent);
    for child in &symbol.children {
        build_node(tree, child, source_lines, Some(id), options);
    }
}

/// `name detail` when the source supplied a detail, else `kind name`
fn describe(symbol: &SymbolDescriptor) -> String {
    match symbol.detail.as_deref().map(str::trim) {
        Some(detail) if !detail.is_empty() => format!("{} {}", symbol.name, detail),
        _ => format!("{} {}", symbol.kind.keyword(), symbol.name),
    }
}

/// One-line title for a node: label followed by description
pub fn node_title(node: &OutlineNode) -> String {
    format!("{} {}", node.label, node.description)
        .trim()
        .to_string()
}
