//! Shared helpers for the integration tests: wrap a snippet in the smallest
//! program that accepts it and return the interesting subtree as JSON.
#![allow(dead_code)]

use serde_json::Value;

/// Parses `source`, asserts it is free of syntax errors, and returns the
/// serialized root.
pub fn ast(source: &str) -> Value {
    let output = solast::parse(source).unwrap_or_else(|e| panic!("parse aborted: {e}"));
    assert!(
        output.errors.is_empty(),
        "unexpected syntax errors in {source:?}: {:?}",
        output.errors
    );
    let root = output.result.expect("a clean parse always has a root");
    serde_json::to_value(&root).expect("AST serializes")
}

/// The first top-level declaration.
pub fn top_level(source: &str) -> Value {
    ast(source)["Children"][0].clone()
}

/// The first member of `contract C { <body> }`.
pub fn contract_part(body: &str) -> Value {
    top_level(&format!("contract C {{ {body} }}"))["SubNodes"][0].clone()
}

/// The statements of `function f() public { <body> }`.
pub fn statements(body: &str) -> Vec<Value> {
    let function = contract_part(&format!("function f() public {{ {body} }}"));
    function["Body"]["Statements"]
        .as_array()
        .expect("function body has statements")
        .clone()
}

pub fn statement(body: &str) -> Value {
    statements(body)
        .into_iter()
        .next()
        .expect("at least one statement")
}

/// The expression of the statement `<source>;`.
pub fn expression(source: &str) -> Value {
    statement(&format!("{source};"))["Expression"].clone()
}

/// Every `"type"` value in the tree, in document order.
pub fn node_types(value: &Value) -> Vec<String> {
    let mut types = Vec::new();
    collect_types(value, &mut types);
    types
}

fn collect_types(value: &Value, types: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(kind)) = map.get("type") {
                types.push(kind.clone());
            }
            for child in map.values() {
                collect_types(child, types);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_types(item, types)),
        _ => {}
    }
}
