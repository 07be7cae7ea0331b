//! Parser Tests - Connections and Bindings
//!
//! `interface connect (A, B);` and `bind A = B;` store their endpoints as
//! raw qualified-name strings, never resolved to element ids.

use rstest::rstest;
use sysgraph::{ElementData, ElementKind, Model, parse_model};

fn parse(input: &str) -> Model {
    parse_model(input).expect("source should parse")
}

// ============================================================================
// Accepted sources
// ============================================================================

#[rstest]
#[case("package P { interface connect (a, b); }")]
#[case("package P { interface connect (a.b, c.d); }")]
#[case("package P { interface connect (veh.engine.out1, veh.pump.in1); }")]
#[case("package P { bind a = b; }")]
#[case("package P { bind a.b = c.d; }")]
#[case("package P { interface fluidLine : FluidInterface; }")]
fn test_parses(#[case] input: &str) {
    assert!(parse_model(input).is_ok(), "failed to parse: {input}");
}

// ============================================================================
// Connections
// ============================================================================

#[test]
fn test_connection_endpoints_preserved_verbatim() {
    let model = parse("package P { interface connect (a.b, c.d); }");
    let connections = model.connections();
    assert_eq!(connections.len(), 1);
    let connection = connections[0];
    assert_eq!(connection.kind(), ElementKind::Connection);
    assert!(connection.name.is_empty());
    match &connection.data {
        ElementData::Connection { source, target } => {
            assert_eq!(source, "a.b");
            assert_eq!(target, "c.d");
        }
        other => panic!("expected connection, got {other:?}"),
    }
}

#[test]
fn test_connection_is_child_of_enclosing_element() {
    let model = parse(
        "package P {
            part def Assembly {
                interface connect (pump.out1, tank.in1);
            }
        }",
    );
    let connection = model.connections()[0];
    let assembly = model
        .iter()
        .find(|element| element.name == "Assembly")
        .unwrap();
    assert_eq!(connection.parent, Some(assembly.id));
    assert!(assembly.children.contains(&connection.id));
}

#[test]
fn test_deep_qualified_names_stay_joined() {
    let model = parse("package P { interface connect (veh.engine.out1, veh.pump.in1); }");
    match &model.connections()[0].data {
        ElementData::Connection { source, target } => {
            assert_eq!(source, "veh.engine.out1");
            assert_eq!(target, "veh.pump.in1");
        }
        other => panic!("expected connection, got {other:?}"),
    }
}

#[test]
fn test_non_connect_interface_statement_is_discarded() {
    let model = parse(
        "package P {
            interface fluidLine : FluidInterface;
            interface connect (a, b);
        }",
    );
    // Only the connect form produced an element.
    assert_eq!(model.connections().len(), 1);
    assert_eq!(model.len(), 2); // package + connection
}

#[test]
fn test_endpoints_are_not_cross_checked_against_names() {
    // Dangling endpoint names are silently tolerated; the core performs
    // no reference resolution.
    let model = parse("package P { interface connect (no.such.part, other.ghost); }");
    assert_eq!(model.connections().len(), 1);
}

// ============================================================================
// Bindings
// ============================================================================

#[test]
fn test_bind_statement() {
    let model = parse("package P { bind veh.fuel = tank.feed; }");
    let bindings: Vec<_> = model.of_kind(ElementKind::Binding).collect();
    assert_eq!(bindings.len(), 1);
    assert!(bindings[0].name.is_empty());
    match &bindings[0].data {
        ElementData::Binding { source, target } => {
            assert_eq!(source, "veh.fuel");
            assert_eq!(target, "tank.feed");
        }
        other => panic!("expected binding, got {other:?}"),
    }
}

#[test]
fn test_bind_inside_part_def() {
    let model = parse(
        "package P {
            part def Assembly {
                part pump : Pump;
                bind pump.ctl = panel.ctl;
            }
        }",
    );
    let binding = model.of_kind(ElementKind::Binding).next().unwrap();
    let assembly = model
        .iter()
        .find(|element| element.name == "Assembly")
        .unwrap();
    assert_eq!(binding.parent, Some(assembly.id));
    // The binding is a child but not part of the ports/parts sublists.
    assert!(assembly.children.contains(&binding.id));
    assert!(!assembly.parts().contains(&binding.id));
}
