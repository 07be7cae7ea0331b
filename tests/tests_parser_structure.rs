//! Parser Tests - Structural Elements
//!
//! Packages, part/item/port definitions and usages: children ordering,
//! parent consistency, typing references, multiplicity, and port items.

use rstest::rstest;
use sysgraph::{Direction, Element, ElementData, ElementKind, Model, parse_model};

fn parse(input: &str) -> Model {
    parse_model(input).expect("source should parse")
}

fn find<'a>(model: &'a Model, name: &str) -> &'a Element {
    model
        .iter()
        .find(|element| element.name == name)
        .unwrap_or_else(|| panic!("no element named {name}"))
}

// ============================================================================
// Accepted sources
// ============================================================================

#[rstest]
#[case("package P { }")]
#[case("package P;")]
#[case("package P { part def Vehicle; }")]
#[case("package P { part def Vehicle { } }")]
#[case("package P { item def Fuel; }")]
#[case("package P { item def Fuel { } }")]
#[case("package P { port def FluidPort; }")]
#[case("package P { part def A { part def B { part def C; } } }")]
#[case("package P { part axle; }")]
#[case("package P { part axle : Axle; }")]
#[case("package P { part wheels : Wheel [4]; }")]
#[case("package P { port intake; }")]
#[case("package P { port intake : FluidPort; }")]
#[case("// leading comment\npackage P { /* inner */ }")]
fn test_parses(#[case] input: &str) {
    assert!(parse_model(input).is_ok(), "failed to parse: {input}");
}

// ============================================================================
// Package handling
// ============================================================================

#[test]
fn test_root_package() {
    let model = parse("package Demo { part def Engine; }");
    let root = model.get(model.root().unwrap()).unwrap();
    assert_eq!(root.kind(), ElementKind::Package);
    assert_eq!(root.name, "Demo");
    assert!(root.parent.is_none());
}

#[test]
fn test_no_package_keyword_yields_empty_model() {
    // Model content only opens with `package`; anything else at top
    // level is dropped.
    let model = parse("part def Vehicle; 42 ;");
    assert!(model.is_empty());
    assert!(model.root().is_none());
    assert!(model.root_elements().is_empty());
}

#[test]
fn test_empty_input_yields_empty_model() {
    let model = parse("");
    assert!(model.is_empty());
    assert!(model.root().is_none());
}

#[test]
fn test_only_first_package_becomes_root() {
    let model = parse("package First { part def A; } package Second { part def B; }");
    let root = model.get(model.root().unwrap()).unwrap();
    assert_eq!(root.name, "First");
    // The second package is not parsed; its tokens are dropped at top
    // level, so no element for it or its contents exists.
    assert!(model.iter().all(|e| e.name != "Second"));
    assert!(model.iter().all(|e| e.name != "B"));
}

// ============================================================================
// Children ordering and parent consistency
// ============================================================================

#[test]
fn test_children_in_declaration_order() {
    let model = parse(
        "package P {
            part def Vehicle {
                port p1;
                port p2;
                part a;
                part b;
            }
        }",
    );
    let vehicle = find(&model, "Vehicle");
    let names: Vec<_> = model
        .children(vehicle.id)
        .iter()
        .map(|child| child.name.as_str())
        .collect();
    assert_eq!(names, vec!["p1", "p2", "a", "b"]);
}

#[test]
fn test_part_def_port_and_part_sublists() {
    let model = parse(
        "package P {
            part def Vehicle {
                port p1;
                part a;
                port p2;
                part b;
            }
        }",
    );
    let vehicle = find(&model, "Vehicle");
    let p1 = find(&model, "p1").id;
    let p2 = find(&model, "p2").id;
    let a = find(&model, "a").id;
    let b = find(&model, "b").id;
    // Interleaved declarations: sublists keep relative order and stay
    // subsets of children.
    assert_eq!(vehicle.ports(), &[p1, p2]);
    assert_eq!(vehicle.parts(), &[a, b]);
    assert_eq!(vehicle.children, vec![p1, a, p2, b]);
}

#[test]
fn test_parent_consistency_invariant() {
    let model = parse(
        "package P {
            part def Vehicle {
                port intake : FluidPort;
                part engine : Engine;
                state def Modes {
                    state OFF;
                    transition t first OFF then OFF;
                }
            }
            requirement def R { id = \"REQ-1\"; }
            interface connect (a.b, c.d);
        }",
    );
    for element in model.iter() {
        for child_id in &element.children {
            let child = model.get(*child_id).expect("child id should resolve");
            assert_eq!(child.parent, Some(element.id));
        }
    }
    // And the converse: every non-root element appears in its parent's
    // children exactly once.
    for element in model.iter() {
        if let Some(parent_id) = element.parent {
            let parent = model.get(parent_id).unwrap();
            let occurrences = parent
                .children
                .iter()
                .filter(|id| **id == element.id)
                .count();
            assert_eq!(occurrences, 1);
        }
    }
}

// ============================================================================
// Usages: typing references and multiplicity
// ============================================================================

#[test]
fn test_part_usage_fields() {
    let model = parse("package P { part wheels : Wheel [4]; }");
    let wheels = find(&model, "wheels");
    match &wheels.data {
        ElementData::Part {
            def_ref,
            multiplicity,
        } => {
            assert_eq!(def_ref.as_deref(), Some("Wheel"));
            assert_eq!(multiplicity.as_deref(), Some("4"));
        }
        other => panic!("expected part usage, got {other:?}"),
    }
}

#[test]
fn test_untyped_part_usage() {
    let model = parse("package P { part axle; }");
    match &find(&model, "axle").data {
        ElementData::Part {
            def_ref,
            multiplicity,
        } => {
            assert!(def_ref.is_none());
            assert!(multiplicity.is_none());
        }
        other => panic!("expected part usage, got {other:?}"),
    }
}

#[test]
fn test_port_usage_def_ref() {
    let model = parse("package P { port intake : FluidPort; }");
    match &find(&model, "intake").data {
        ElementData::Port { def_ref } => assert_eq!(def_ref.as_deref(), Some("FluidPort")),
        other => panic!("expected port usage, got {other:?}"),
    }
}

// ============================================================================
// Port definition items
// ============================================================================

#[test]
fn test_port_def_items() {
    let model = parse(
        "package P {
            port def FluidPort {
                in item fluid : Fluid;
                out item pressure : Signal;
                inout item control : Command;
            }
        }",
    );
    let port_def = find(&model, "FluidPort");
    match &port_def.data {
        ElementData::PortDef { items } => {
            assert_eq!(items.len(), 3);
            assert_eq!(items[0].direction, Direction::In);
            assert_eq!(items[0].name, "fluid");
            assert_eq!(items[0].item_type, "Fluid");
            assert_eq!(items[1].direction, Direction::Out);
            assert_eq!(items[2].direction, Direction::Inout);
            assert_eq!(items[2].item_type, "Command");
        }
        other => panic!("expected port def, got {other:?}"),
    }
}

#[test]
fn test_port_def_ignores_other_body_content() {
    let model = parse(
        "package P {
            port def Mixed {
                attribute ignored;
                in item flow : Fluid;
            }
        }",
    );
    match &find(&model, "Mixed").data {
        ElementData::PortDef { items } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].name, "flow");
        }
        other => panic!("expected port def, got {other:?}"),
    }
}

// ============================================================================
// Unclaimed body tokens
// ============================================================================

#[test]
fn test_unclaimed_body_tokens_are_dropped() {
    let model = parse(
        "package P {
            attribute mass : Real;
            part def Vehicle;
            requirement looseUsage;
            42 \"stray\" ;
        }",
    );
    // Only the package and the part definition produce elements.
    assert_eq!(model.len(), 2);
    assert_eq!(model.part_defs().len(), 1);
}
