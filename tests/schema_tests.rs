// tests/schema_tests.rs
//
// Properties of the serialized tree as a whole rather than of single nodes.

mod common;

use common::{ast, expression, node_types, statement};
use rstest::rstest;
use serde_json::{json, Value};
use solast::ast::{NodeKind, Walk};
use solast::{parse, parse_with, ParserConfig};

const TOKEN: &str = r#"
pragma solidity ^0.8.0;

import {IERC20} from "./IERC20.sol";

/// A minimal token.
contract Token is IERC20 {
    mapping(address => uint256) private balances;
    uint256 public totalSupply;
    event Transfer(address indexed from, address indexed to, uint256 value);
    error Insufficient(uint256 available);

    modifier positive(uint256 amount) {
        require(amount > 0, "zero");
        _;
    }

    constructor(uint256 supply) {
        balances[msg.sender] = supply;
        totalSupply = supply;
    }

    function transfer(address to, uint256 amount) external positive(amount) returns (bool) {
        uint256 available = balances[msg.sender];
        if (available < amount) {
            revert Insufficient(available);
        }
        unchecked {
            balances[msg.sender] = available - amount;
        }
        balances[to] += amount;
        emit Transfer(msg.sender, to, amount);
        return true;
    }
}
"#;

#[test]
fn serialization_is_deterministic() {
    let first = parse(TOKEN).unwrap().to_json().unwrap();
    let second = parse(TOKEN).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn type_is_the_first_key_of_every_node() {
    let json = parse("contract C { uint x; }").unwrap().to_json().unwrap();
    assert!(json.starts_with(
        r#"{"result":{"type":"SourceUnit","Children":[{"type":"ContractDefinition","name":"C""#
    ));
    assert!(json.ends_with(r#","errors":[]}"#));
}

#[test]
fn every_node_carries_a_tag() {
    let root = ast(TOKEN);
    let mut untagged = Vec::new();
    find_untagged(&root, "$", &mut untagged);
    assert!(untagged.is_empty(), "nodes without a type: {untagged:?}");
}

/// Objects with a `type` key must have a string there. Tuples of aliases and
/// plain string lists are not nodes.
fn find_untagged(value: &Value, path: &str, untagged: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if !map.get("type").is_some_and(Value::is_string) {
                untagged.push(path.to_string());
            }
            for (key, child) in map {
                find_untagged(child, &format!("{path}.{key}"), untagged);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                find_untagged(item, &format!("{path}[{index}]"), untagged);
            }
        }
        _ => {}
    }
}

#[test]
fn suppressed_productions_never_appear_as_types() {
    let types = node_types(&ast(TOKEN));
    for suppressed in solast::builder::SUPPRESSED {
        assert!(
            !types.iter().any(|t| t == suppressed.name()),
            "{suppressed} leaked into the tree"
        );
    }
    assert!(types.iter().any(|t| t == "FunctionDefinition"));
}

#[test]
fn walk_agrees_with_the_serialized_tree() {
    let output = parse(TOKEN).unwrap();
    let root = output.result.as_ref().unwrap();

    let mut walked = Vec::new();
    root.walk(&mut |node| walked.push(node.kind().name().to_string()));

    let mut serialized = node_types(&serde_json::to_value(root).unwrap());
    walked.sort();
    serialized.sort();
    assert_eq!(walked, serialized);

    let mut emits = 0;
    root.walk(&mut |node| {
        if node.kind() == NodeKind::EmitStatement {
            emits += 1;
        }
    });
    assert_eq!(emits, 1);
}

#[rstest]
#[case("(a)", 1)]
#[case("(a, b)", 2)]
#[case("(, b)", 2)]
#[case("(a, , )", 3)]
#[case("(, , , d)", 4)]
fn sparse_tuples_have_one_slot_per_comma_plus_one(#[case] source: &str, #[case] slots: usize) {
    let tuple = expression(&format!("{source} = t"))["Left"].clone();
    let components = tuple["Components"].as_array().unwrap();
    assert_eq!(components.len(), slots, "{source}");
    let present = components.iter().filter(|c| !c.is_null()).count();
    let names = source.chars().filter(char::is_ascii_alphabetic).count();
    assert_eq!(present, names, "{source}");
}

#[test]
fn sparse_identifier_lists() {
    let declaration = statement("var (, , c) = t;");
    let variables = declaration["Variables"].as_array().unwrap();
    assert_eq!(variables.len(), 3);
    assert!(variables[0].is_null() && variables[1].is_null());
    assert_eq!(variables[2]["Name"], "c");
}

#[test]
fn yaml_output_carries_the_same_tree() {
    let output = parse("enum E { A }").unwrap();
    let yaml = output.to_yaml().unwrap();
    assert!(yaml.contains("type: EnumDefinition"));
    assert!(yaml.contains("name: A"));
    assert!(yaml.contains("errors: []"));
}

#[test]
fn syntax_errors_come_with_a_best_effort_tree() {
    let output = parse("contract C { function }").unwrap();
    assert_eq!(output.errors.len(), 1);
    let error = &output.errors[0];
    assert_eq!(error.line, 1);
    assert!(!error.message.is_empty());

    let root = serde_json::to_value(output.result.unwrap()).unwrap();
    assert_eq!(root, json!({"type": "SourceUnit", "Children": [null]}));
}

#[test]
fn a_broken_item_does_not_lose_its_neighbours() {
    let source = "\
pragma solidity ^0.8.0;
contract Broken { function f( { } }
contract Kept { uint x; }
pragma abicoder v1";
    let output = parse(source).unwrap();
    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.errors[0].line, 2);
    assert_eq!(output.errors[1].line, 4);

    let root = serde_json::to_value(output.result.unwrap()).unwrap();
    let children = root["Children"].as_array().unwrap();
    let types: Vec<_> = children.iter().map(|c| c["type"].clone()).collect();
    assert_eq!(types, [json!("PragmaDirective"), json!("ContractDefinition"), json!(null)]);
    assert_eq!(children[1]["name"], "Kept");
    assert_eq!(children[1]["SubNodes"][0]["Variables"][0]["Name"], "x");
}

#[test]
fn error_position_is_line_and_zero_based_column() {
    let output = parse("pragma solidity ^0.8.0;\ncontract {}").unwrap();
    let error = &output.errors[0];
    assert_eq!(error.line, 2);
    assert_eq!(error.column, 9);
}

#[test]
fn nesting_limit() {
    let deep = format!(
        "contract C {{ function f() public {{ x = {}1{}; }} }}",
        "(".repeat(40),
        ")".repeat(40)
    );

    let error = parse_with(&deep, &ParserConfig::new().with_max_depth(30)).unwrap_err();
    assert!(matches!(
        error.kind,
        solast::ErrorKind::NestingLimit { limit: 30, .. }
    ));

    let output = parse_with(&deep, &ParserConfig::new().with_max_depth(10_000)).unwrap();
    assert!(output.is_clean());
}
