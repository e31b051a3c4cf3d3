//! Benchmarks for outline refresh
//!
//! Run with: cargo bench --bench outline

use docoutline::outline::{
    build, BuildOptions, ExpansionState, OutlineIndex, OutlineKind, SymbolDescriptor,
};
use docoutline::symbols::{LanguageId, SymbolRequest, SymbolSource, TreeSitterSymbols};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// `classes` documented classes with ten documented methods each
fn make_source(classes: usize) -> (String, Vec<SymbolDescriptor>) {
    let mut text = String::new();
    let mut symbols = Vec::with_capacity(classes);
    let mut line = 0;

    for c in 0..classes {
        text.push_str(&format!("/**\n * Class number {}.\n * @since 1.0\n */\n", c));
        line += 4;
        text.push_str(&format!("class C{} {{\n", c));
        let class_line = line;
        line += 1;

        let mut methods = Vec::with_capacity(10);
        for m in 0..10 {
            text.push_str(&format!(
                "    /**\n     * Method {}.\n     * @param x input\n     * @returns output\n     */\n",
                m
            ));
            line += 5;
            text.push_str(&format!("    m{}(x) {{ return x; }}\n", m));
            methods.push(SymbolDescriptor::new(format!("m{}", m), OutlineKind::Method, line));
            line += 1;
        }
        text.push_str("}\n");
        line += 1;

        symbols.push(
            SymbolDescriptor::new(format!("C{}", c), OutlineKind::Class, class_line)
                .with_children(methods),
        );
    }
    (text, symbols)
}

// ============================================================================
// Core pipeline
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn build_tree(bencher: divan::Bencher, classes: usize) {
    let (text, symbols) = make_source(classes);
    let lines: Vec<&str> = text.lines().collect();
    bencher.bench(|| build(&symbols, &lines, BuildOptions::default()));
}

#[divan::bench(args = [10, 100, 1_000])]
fn build_and_index(bencher: divan::Bencher, classes: usize) {
    let (text, symbols) = make_source(classes);
    let lines: Vec<&str> = text.lines().collect();
    bencher.bench(|| OutlineIndex::new(build(&symbols, &lines, BuildOptions::default())));
}

#[divan::bench(args = [10, 100, 1_000])]
fn focus_last_method(bencher: divan::Bencher, classes: usize) {
    let (text, symbols) = make_source(classes);
    let lines: Vec<&str> = text.lines().collect();
    let index = OutlineIndex::new(build(&symbols, &lines, BuildOptions::default()));
    let target = index.tree().ids().last().unwrap();
    bencher.bench(|| {
        let mut expansion = ExpansionState::initial(&index, 2);
        expansion.focus(&index, target)
    });
}

// ============================================================================
// Tree-sitter extraction
// ============================================================================

#[divan::bench(args = [10, 100])]
fn extract_javascript(bencher: divan::Bencher, classes: usize) {
    let (text, _) = make_source(classes);
    let request = SymbolRequest::new(None, LanguageId::JavaScript, text);
    let source = TreeSitterSymbols::new();
    bencher.bench(|| source.symbols(&request).unwrap());
}
