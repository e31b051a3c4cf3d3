//! Expansion policy tests
//!
//! Focus transitions over realistic nested outlines.

mod common;

use std::collections::BTreeSet;

use common::build_index;
use docoutline::outline::{
    ExpandAction, ExpansionState, NodeId, OutlineIndex, OutlineKind, SymbolDescriptor,
};

const SOURCE: &str = "\
/** Shapes. */
namespace Shapes {
    /** Circles. */
    class Circle {
        /** Geometry helpers. */
        class Math {
            /** Area of a circle. */
            area() {}
        }
    }
}

/** Logging. */
class Logger {
    /** Writes a line. */
    write() {}
}
";

fn index() -> OutlineIndex {
    let symbols = vec![
        SymbolDescriptor::new("Shapes", OutlineKind::Namespace, 1).with_children(vec![
            SymbolDescriptor::new("Circle", OutlineKind::Class, 3).with_children(vec![
                SymbolDescriptor::new("Math", OutlineKind::Class, 5)
                    .with_children(vec![SymbolDescriptor::new("area", OutlineKind::Method, 7)]),
            ]),
        ]),
        SymbolDescriptor::new("Logger", OutlineKind::Class, 13)
            .with_children(vec![SymbolDescriptor::new("write", OutlineKind::Method, 15)]),
    ];
    build_index(&symbols, SOURCE)
}

fn labels(index: &OutlineIndex, ids: impl IntoIterator<Item = NodeId>) -> Vec<String> {
    ids.into_iter()
        .map(|id| index.node(id).label.clone())
        .collect()
}

#[test]
fn test_focus_deep_method_collapses_sibling_class() {
    let index = index();
    let mut expansion = ExpansionState::initial(&index, 2);
    assert_eq!(
        labels(&index, expansion.expanded()),
        vec!["Shapes.", "Circles.", "Logging."]
    );

    let area = index.lookup(7, "Area of a circle.").unwrap();
    let instructions = expansion.focus(&index, area);

    let steps: Vec<(ExpandAction, String)> = instructions
        .iter()
        .map(|ins| (ins.action, index.node(ins.node).label.clone()))
        .collect();
    assert_eq!(
        steps,
        vec![
            (ExpandAction::Collapse, "Logging.".to_string()),
            (ExpandAction::Expand, "Geometry helpers.".to_string()),
        ]
    );
    assert_eq!(
        labels(&index, expansion.expanded()),
        vec!["Shapes.", "Circles.", "Geometry helpers."]
    );
}

#[test]
fn test_focus_keeps_expanded_descendants() {
    let index = index();
    let mut expansion = ExpansionState::initial(&index, 3);
    let shapes = index.lookup(1, "Shapes.").unwrap();

    let instructions = expansion.focus(&index, shapes);
    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].action, ExpandAction::Collapse);
    assert_eq!(
        labels(&index, expansion.expanded()),
        vec!["Shapes.", "Circles.", "Geometry helpers."]
    );
}

#[test]
fn test_focus_invariant_for_every_node() {
    let index = index();
    for target in index.tree().ids() {
        for depth in 0..4 {
            let mut expansion = ExpansionState::initial(&index, depth);
            let before: BTreeSet<NodeId> = expansion.expanded().into_iter().collect();

            expansion.focus(&index, target);
            let after: BTreeSet<NodeId> = expansion.expanded().into_iter().collect();

            let mut expected: BTreeSet<NodeId> = index.ancestors(target).collect();
            if index.node(target).is_collapsible() {
                expected.insert(target);
            }
            expected.extend(
                before
                    .iter()
                    .copied()
                    .filter(|&id| index.descendant_or_self(target, id)),
            );
            assert_eq!(after, expected, "target {:?}, depth {}", target, depth);
        }
    }
}

#[test]
fn test_carry_over_keeps_flags_across_rebuild() {
    let index = index();
    let mut expansion = ExpansionState::initial(&index, 0);
    let write = index.lookup(15, "Writes a line.").unwrap();
    expansion.focus(&index, write);

    // Same declarations, rebuilt from unchanged input
    let rebuilt = self::index();
    let carried = ExpansionState::carry_over(&index, &expansion, &rebuilt, 0);
    assert_eq!(
        labels(&rebuilt, carried.expanded()),
        vec!["Logging.".to_string()]
    );
}
