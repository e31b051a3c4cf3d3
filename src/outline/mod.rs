//! Documentation comment outline
//!
//! Turns a hierarchical list of declarations into a tree of nodes annotated
//! with the documentation comment found above each declaration.
//!
//! ```text
//! SymbolDescriptor tree ──► locate ──► parse ──► build ──► OutlineTree
//!                                                             │
//!                                   OutlineIndex ◄────────────┘
//!                                        │
//!                                   ExpansionState (focus)
//! ```
//!
//! The tree is an arena: nodes live in one `Vec` in preorder, children are
//! lists of [`NodeId`] handles and the parent link is a plain handle that
//! never owns anything.

mod build;
mod expand;
mod index;
mod locate;
mod parse;

pub use build::{build, node_title, BuildOptions};
pub use expand::{
    ExpandAction, ExpandInstruction, ExpandState, ExpansionState, DEFAULT_EXPAND_DEPTH,
};
pub use index::{Ancestors, NodeKey, OutlineIndex};
pub use locate::locate;
pub use parse::{parse, DocComment};

use serde::{Deserialize, Serialize};

/// Symbol kind for display and categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineKind {
    Module,
    Namespace,
    Class,
    Struct,
    Enum,
    Interface,
    Trait,
    Impl,
    Function,
    Method,
    Constructor,
    Property,
    Field,
    Constant,
    Variable,
    EnumVariant,
    TypeAlias,
}

impl OutlineKind {
    /// Short label for rendering in the outline tree
    pub fn label(&self) -> &'static str {
        match self {
            OutlineKind::Module => "mod",
            OutlineKind::Namespace => "ns",
            OutlineKind::Class => "class",
            OutlineKind::Struct => "struct",
            OutlineKind::Enum => "enum",
            OutlineKind::Interface => "iface",
            OutlineKind::Trait => "trait",
            OutlineKind::Impl => "impl",
            OutlineKind::Function => "fn",
            OutlineKind::Method => "fn",
            OutlineKind::Constructor => "ctor",
            OutlineKind::Property => "prop",
            OutlineKind::Field => "field",
            OutlineKind::Constant => "const",
            OutlineKind::Variable => "let",
            OutlineKind::EnumVariant => "var",
            OutlineKind::TypeAlias => "type",
        }
    }

    /// Keyword used when synthesizing a `kind name` description
    pub fn keyword(&self) -> &'static str {
        match self {
            OutlineKind::Module => "module",
            OutlineKind::Namespace => "namespace",
            OutlineKind::Class => "class",
            OutlineKind::Struct => "struct",
            OutlineKind::Enum => "enum",
            OutlineKind::Interface => "interface",
            OutlineKind::Trait => "trait",
            OutlineKind::Impl => "impl",
            OutlineKind::Function => "function",
            OutlineKind::Method => "method",
            OutlineKind::Constructor => "constructor",
            OutlineKind::Property => "property",
            OutlineKind::Field => "field",
            OutlineKind::Constant => "const",
            OutlineKind::Variable => "variable",
            OutlineKind::EnumVariant => "variant",
            OutlineKind::TypeAlias => "type",
        }
    }
}

/// One declaration as reported by a symbol source.
///
/// Mirrors an editor's document symbol: children are nested declarations in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDescriptor {
    pub name: String,
    pub kind: OutlineKind,
    /// Signature-like text supplied by the source (e.g. `(a, b)`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// 0-based line where the declaration starts
    #[serde(alias = "startLine")]
    pub line: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SymbolDescriptor>,
}

impl SymbolDescriptor {
    pub fn new(name: impl Into<String>, kind: OutlineKind, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            detail: None,
            line,
            children: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SymbolDescriptor>) -> Self {
        self.children = children;
        self
    }
}

/// Handle to a node inside an [`OutlineTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single documentation-annotated declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Comment summary, or the bare symbol name when undocumented
    pub label: String,
    /// Signature-like text for the declaration
    pub description: String,
    /// Newline-joined `@` tag lines
    pub tooltip: String,
    /// 0-based line where the declaration starts
    pub line: usize,
    pub kind: OutlineKind,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl OutlineNode {
    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }

    /// Stable identity of the node within one generation
    pub fn key(&self) -> NodeKey {
        NodeKey {
            line: self.line,
            label: self.label.clone(),
        }
    }
}

/// Arena-backed outline tree, nodes stored in preorder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineTree {
    nodes: Vec<OutlineNode>,
    roots: Vec<NodeId>,
}

impl OutlineTree {
    /// Create an empty outline
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the outline has any nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &OutlineNode {
        &self.nodes[id.0]
    }

    /// All node handles in preorder (document order)
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Node children resolved to references
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &OutlineNode)> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .map(move |&child| (child, &self.nodes[child.0]))
    }

    /// Nesting depth of a node (roots are at depth 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }

    /// Append a node under `parent` (or as a root) and return its handle.
    ///
    /// Nodes must be pushed parent-first so the arena stays in preorder.
    pub(crate) fn push(&mut self, mut node: OutlineNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }
}
