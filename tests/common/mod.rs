//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use docoutline::outline::{build, BuildOptions, OutlineIndex, OutlineTree, SymbolDescriptor};
use docoutline::symbols::{LanguageId, SymbolRequest, SymbolSource, TreeSitterSymbols};

/// Build a tree from symbols over `text` with default options
pub fn build_tree(symbols: &[SymbolDescriptor], text: &str) -> OutlineTree {
    let lines: Vec<&str> = text.lines().collect();
    build(symbols, &lines, BuildOptions::default())
}

pub fn build_index(symbols: &[SymbolDescriptor], text: &str) -> OutlineIndex {
    OutlineIndex::new(build_tree(symbols, text))
}

/// Path of a file under `samples/`
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

pub fn read_sample(name: &str) -> String {
    std::fs::read_to_string(sample_path(name)).expect("Failed to read sample")
}

/// Declarations of `name` as found by the tree-sitter source
pub fn sample_symbols(name: &str) -> (String, Vec<SymbolDescriptor>) {
    let path = sample_path(name);
    let text = read_sample(name);
    let request = SymbolRequest::new(Some(path.clone()), LanguageId::from_path(&path), text.as_str());
    let symbols = TreeSitterSymbols::new()
        .symbols(&request)
        .expect("tree-sitter extraction failed");
    (text, symbols)
}

/// `(depth, label)` for every node in preorder
pub fn shape(tree: &OutlineTree) -> Vec<(usize, String)> {
    tree.ids()
        .map(|id| (tree.depth(id), tree.node(id).label.clone()))
        .collect()
}
