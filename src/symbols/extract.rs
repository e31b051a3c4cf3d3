//! Declaration extraction from tree-sitter parse trees
//!
//! Walks the syntax tree collecting named declarations as a flat list, then
//! nests them by byte-range containment. Comments are never inspected here.

use anyhow::{anyhow, Context};
use tree_sitter::{Language, Node, Parser};

use super::{LanguageId, SymbolRequest, SymbolSource};
use crate::outline::{OutlineKind, SymbolDescriptor};

/// Symbol source backed by tree-sitter grammars
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterSymbols;

impl TreeSitterSymbols {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolSource for TreeSitterSymbols {
    fn name(&self) -> &'static str {
        "tree-sitter"
    }

    fn symbols(&self, request: &SymbolRequest) -> anyhow::Result<Vec<SymbolDescriptor>> {
        let Some(grammar) = grammar(request.language) else {
            tracing::debug!(
                "No grammar for {}, outline is empty",
                request.language.display_name()
            );
            return Ok(Vec::new());
        };

        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .with_context(|| format!("loading {} grammar", request.language.display_name()))?;

        let source: &str = &request.source;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("tree-sitter produced no tree"))?;

        let flat = collect_flat(tree.root_node(), source, request.language);
        let count = flat.len();
        let roots = build_tree_by_containment(flat);
        tracing::debug!(
            "Extracted {} {} declarations ({} top-level)",
            count,
            request.language.display_name(),
            roots.len()
        );
        Ok(roots)
    }
}

fn grammar(language: LanguageId) -> Option<Language> {
    let grammar = match language {
        LanguageId::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        LanguageId::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        LanguageId::Java => tree_sitter_java::LANGUAGE.into(),
        LanguageId::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        LanguageId::C => tree_sitter_c::LANGUAGE.into(),
        LanguageId::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        LanguageId::Rust => tree_sitter_rust::LANGUAGE.into(),
        LanguageId::PlainText => return None,
    };
    Some(grammar)
}

fn collect_flat(root: Node, source: &str, language: LanguageId) -> Vec<FlatSymbol> {
    let mut symbols = Vec::new();
    match language {
        LanguageId::JavaScript | LanguageId::TypeScript | LanguageId::Tsx => {
            collect_js_ts_symbols(root, source, false, &mut symbols)
        }
        LanguageId::Java => collect_java_symbols(root, source, &mut symbols),
        LanguageId::Php => collect_php_symbols(root, source, &mut symbols),
        LanguageId::C | LanguageId::Cpp => {
            collect_c_cpp_symbols(root, source, language, &mut symbols)
        }
        LanguageId::Rust => collect_rust_symbols(root, source, &mut symbols),
        LanguageId::PlainText => {}
    }
    symbols
}

// =============================================================================
// Flat symbol for pre-nesting
// =============================================================================

struct FlatSymbol {
    kind: OutlineKind,
    name: String,
    start_byte: usize,
    end_byte: usize,
    line: usize,
}

fn flat_sym(kind: OutlineKind, name: &str, node: &Node) -> FlatSymbol {
    FlatSymbol {
        kind,
        name: name.to_string(),
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        line: node.start_position().row,
    }
}

fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    node.utf8_text(source.as_bytes()).ok()
}

fn field_text<'a>(node: &Node, field: &str, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field)
        .and_then(|child| node_text(&child, source))
}

/// Push `node` under the text of its `name` field, if it has one
fn push_named(symbols: &mut Vec<FlatSymbol>, kind: OutlineKind, node: &Node, source: &str) {
    if let Some(name) = field_text(node, "name", source) {
        symbols.push(flat_sym(kind, name, node));
    }
}

// =============================================================================
// Range-containment nesting
// =============================================================================

fn build_tree_by_containment(mut symbols: Vec<FlatSymbol>) -> Vec<SymbolDescriptor> {
    // Parents before children: start ascending, end descending
    symbols.sort_by(|a, b| {
        a.start_byte
            .cmp(&b.start_byte)
            .then(b.end_byte.cmp(&a.end_byte))
    });

    let mut roots: Vec<SymbolDescriptor> = Vec::new();
    // (end_byte, descriptor) of every open ancestor
    let mut stack: Vec<(usize, SymbolDescriptor)> = Vec::new();

    fn close(stack: &mut Vec<(usize, SymbolDescriptor)>, roots: &mut Vec<SymbolDescriptor>) {
        if let Some((_, finished)) = stack.pop() {
            match stack.last_mut() {
                Some((_, parent)) => parent.children.push(finished),
                None => roots.push(finished),
            }
        }
    }

    for sym in symbols {
        while stack
            .last()
            .is_some_and(|(top_end, _)| *top_end <= sym.start_byte)
        {
            close(&mut stack, &mut roots);
        }
        stack.push((
            sym.end_byte,
            SymbolDescriptor::new(sym.name, sym.kind, sym.line),
        ));
    }

    while !stack.is_empty() {
        close(&mut stack, &mut roots);
    }

    roots
}

// =============================================================================
// JavaScript / TypeScript
// =============================================================================

/// `in_function` suppresses plain local variables inside function bodies
fn collect_js_ts_symbols(
    node: Node,
    source: &str,
    in_function: bool,
    symbols: &mut Vec<FlatSymbol>,
) {
    let mut body_is_function = in_function;

    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            push_named(symbols, OutlineKind::Function, &node, source);
            body_is_function = true;
        }
        "class_declaration" | "abstract_class_declaration" => {
            push_named(symbols, OutlineKind::Class, &node, source);
            body_is_function = false;
        }
        "method_definition" | "method_signature" | "abstract_method_signature" => {
            let kind = match field_text(&node, "name", source) {
                Some("constructor") => OutlineKind::Constructor,
                _ => OutlineKind::Method,
            };
            push_named(symbols, kind, &node, source);
            body_is_function = true;
        }
        "interface_declaration" => push_named(symbols, OutlineKind::Interface, &node, source),
        "type_alias_declaration" => push_named(symbols, OutlineKind::TypeAlias, &node, source),
        "enum_declaration" => push_named(symbols, OutlineKind::Enum, &node, source),
        "internal_module" | "module" => push_named(symbols, OutlineKind::Namespace, &node, source),
        "public_field_definition" | "field_definition" | "property_signature" => {
            let name = field_text(&node, "name", source)
                .or_else(|| field_text(&node, "property", source));
            if let Some(name) = name {
                symbols.push(flat_sym(OutlineKind::Property, name, &node));
            }
        }
        "arrow_function" | "function_expression" | "function" => body_is_function = true,
        "lexical_declaration" | "variable_declaration" => {
            let is_const = node
                .child_by_field_name("kind")
                .is_some_and(|k| k.kind() == "const");
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() != "variable_declarator" {
                    continue;
                }
                let Some(name) = field_text(&child, "name", source) else {
                    continue;
                };
                let holds_function = child.child_by_field_name("value").is_some_and(|v| {
                    matches!(
                        v.kind(),
                        "arrow_function" | "function_expression" | "function" | "class"
                    )
                });
                let kind = if holds_function {
                    OutlineKind::Function
                } else if in_function {
                    continue;
                } else if is_const {
                    OutlineKind::Constant
                } else {
                    OutlineKind::Variable
                };
                symbols.push(flat_sym(kind, name, &child));
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_js_ts_symbols(child, source, body_is_function, symbols);
    }
}

// =============================================================================
// Java
// =============================================================================

fn collect_java_symbols(node: Node, source: &str, symbols: &mut Vec<FlatSymbol>) {
    match node.kind() {
        "class_declaration" | "record_declaration" => {
            push_named(symbols, OutlineKind::Class, &node, source)
        }
        "interface_declaration" | "annotation_type_declaration" => {
            push_named(symbols, OutlineKind::Interface, &node, source)
        }
        "enum_declaration" => push_named(symbols, OutlineKind::Enum, &node, source),
        "enum_constant" => push_named(symbols, OutlineKind::EnumVariant, &node, source),
        "method_declaration" => push_named(symbols, OutlineKind::Method, &node, source),
        "constructor_declaration" => push_named(symbols, OutlineKind::Constructor, &node, source),
        "field_declaration" | "constant_declaration" => {
            let kind = if node.kind() == "constant_declaration" {
                OutlineKind::Constant
            } else {
                OutlineKind::Field
            };
            let mut cursor = node.walk();
            let declarators = node
                .children(&mut cursor)
                .filter(|child| child.kind() == "variable_declarator");
            for (i, child) in declarators.enumerate() {
                if let Some(name) = field_text(&child, "name", source) {
                    // `int a, b;`: only the first takes the whole declaration
                    let range = if i == 0 { node } else { child };
                    symbols.push(flat_sym(kind, name, &range));
                }
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_java_symbols(child, source, symbols);
    }
}

// =============================================================================
// PHP
// =============================================================================

fn collect_php_symbols(node: Node, source: &str, symbols: &mut Vec<FlatSymbol>) {
    match node.kind() {
        "class_declaration" => push_named(symbols, OutlineKind::Class, &node, source),
        "function_definition" => push_named(symbols, OutlineKind::Function, &node, source),
        "method_declaration" => {
            let kind = match field_text(&node, "name", source) {
                Some("__construct") => OutlineKind::Constructor,
                _ => OutlineKind::Method,
            };
            push_named(symbols, kind, &node, source);
        }
        "interface_declaration" => push_named(symbols, OutlineKind::Interface, &node, source),
        "trait_declaration" => push_named(symbols, OutlineKind::Trait, &node, source),
        "enum_declaration" => push_named(symbols, OutlineKind::Enum, &node, source),
        "namespace_definition" => push_named(symbols, OutlineKind::Namespace, &node, source),
        "property_declaration" => {
            let mut cursor = node.walk();
            let first = node
                .children(&mut cursor)
                .find(|child| child.kind() == "property_element");
            if let Some(element) = first {
                let name = field_text(&element, "name", source).or_else(|| {
                    element
                        .named_child(0)
                        .and_then(|n| node_text(&n, source))
                });
                if let Some(name) = name {
                    symbols.push(flat_sym(OutlineKind::Property, name, &node));
                }
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_php_symbols(child, source, symbols);
    }
}

// =============================================================================
// C / C++
// =============================================================================

fn collect_c_cpp_symbols(
    node: Node,
    source: &str,
    language: LanguageId,
    symbols: &mut Vec<FlatSymbol>,
) {
    match node.kind() {
        "function_definition" => {
            if let Some(name) = node
                .child_by_field_name("declarator")
                .and_then(|decl| function_name(&decl, source))
            {
                let kind = if in_class_body(&node) {
                    OutlineKind::Method
                } else {
                    OutlineKind::Function
                };
                symbols.push(flat_sym(kind, &name, &node));
            }
        }
        // Prototypes: `int add(int a, int b);` in headers and class bodies
        "declaration" | "field_declaration" => {
            let prototype = node
                .child_by_field_name("declarator")
                .filter(|decl| is_function_declarator(decl))
                .and_then(|decl| function_name(&decl, source));
            if let Some(name) = prototype {
                let kind = if node.kind() == "field_declaration" {
                    OutlineKind::Method
                } else {
                    OutlineKind::Function
                };
                symbols.push(flat_sym(kind, &name, &node));
                return;
            }
            if node.kind() == "field_declaration" {
                if let Some(name) = field_text(&node, "declarator", source) {
                    symbols.push(flat_sym(OutlineKind::Field, name, &node));
                }
            }
        }
        "struct_specifier" | "union_specifier" => {
            if node.child_by_field_name("body").is_some() {
                push_named(symbols, OutlineKind::Struct, &node, source);
            }
        }
        "enum_specifier" => {
            if node.child_by_field_name("body").is_some() {
                push_named(symbols, OutlineKind::Enum, &node, source);
            }
        }
        "enumerator" => push_named(symbols, OutlineKind::EnumVariant, &node, source),
        "class_specifier" if language == LanguageId::Cpp => {
            if node.child_by_field_name("body").is_some() {
                push_named(symbols, OutlineKind::Class, &node, source);
            }
        }
        "namespace_definition" if language == LanguageId::Cpp => {
            push_named(symbols, OutlineKind::Namespace, &node, source)
        }
        "type_definition" => {
            if let Some(name) = field_text(&node, "declarator", source) {
                symbols.push(flat_sym(OutlineKind::TypeAlias, name, &node));
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_c_cpp_symbols(child, source, language, symbols);
    }
}

fn in_class_body(node: &Node) -> bool {
    node.parent()
        .is_some_and(|p| p.kind() == "field_declaration_list")
}

fn is_function_declarator(declarator: &Node) -> bool {
    match declarator.kind() {
        "function_declarator" => true,
        "pointer_declarator" | "reference_declarator" => declarator
            .child_by_field_name("declarator")
            .is_some_and(|inner| is_function_declarator(&inner)),
        _ => false,
    }
}

fn function_name(declarator: &Node, source: &str) -> Option<String> {
    match declarator.kind() {
        "function_declarator" | "pointer_declarator" | "reference_declarator" => declarator
            .child_by_field_name("declarator")
            .or_else(|| declarator.named_child(0))
            .and_then(|inner| function_name(&inner, source)),
        "identifier" | "field_identifier" | "qualified_identifier" | "destructor_name"
        | "operator_name" => node_text(declarator, source).map(str::to_string),
        _ => None,
    }
}

// =============================================================================
// Rust
// =============================================================================

fn collect_rust_symbols(node: Node, source: &str, symbols: &mut Vec<FlatSymbol>) {
    match node.kind() {
        "function_item" => {
            let in_impl = node
                .parent()
                .and_then(|list| list.parent())
                .is_some_and(|owner| matches!(owner.kind(), "impl_item" | "trait_item"));
            let kind = if in_impl {
                OutlineKind::Method
            } else {
                OutlineKind::Function
            };
            push_named(symbols, kind, &node, source);
        }
        "function_signature_item" => push_named(symbols, OutlineKind::Method, &node, source),
        "struct_item" | "union_item" => push_named(symbols, OutlineKind::Struct, &node, source),
        "enum_item" => push_named(symbols, OutlineKind::Enum, &node, source),
        "enum_variant" => push_named(symbols, OutlineKind::EnumVariant, &node, source),
        "trait_item" => push_named(symbols, OutlineKind::Trait, &node, source),
        "type_item" => push_named(symbols, OutlineKind::TypeAlias, &node, source),
        "const_item" | "static_item" => push_named(symbols, OutlineKind::Constant, &node, source),
        "mod_item" => push_named(symbols, OutlineKind::Module, &node, source),
        "field_declaration" => push_named(symbols, OutlineKind::Field, &node, source),
        "impl_item" => {
            if let Some(ty) = field_text(&node, "type", source) {
                let label = match field_text(&node, "trait", source) {
                    Some(trait_name) => format!("{} for {}", trait_name, ty),
                    None => ty.to_string(),
                };
                symbols.push(flat_sym(OutlineKind::Impl, &label, &node));
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_rust_symbols(child, source, symbols);
    }
}
