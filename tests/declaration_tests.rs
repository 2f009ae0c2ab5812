// tests/declaration_tests.rs

mod common;

use common::{ast, contract_part, top_level};
use rstest::rstest;
use serde_json::json;

// ---
// Source unit
// ---

#[test]
fn source_unit_keeps_end_of_input_slot() {
    let root = ast("pragma solidity ^0.8.0;\ncontract C {}");
    assert_eq!(root["type"], "SourceUnit");
    let children = root["Children"].as_array().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0]["type"], "PragmaDirective");
    assert_eq!(children[1]["type"], "ContractDefinition");
    assert!(children[2].is_null());
}

#[test]
fn empty_source_has_only_the_end_slot() {
    let root = ast("");
    assert_eq!(root["Children"], json!([null]));
}

#[rstest]
#[case("pragma solidity ^0.8.0;", "solidity", "^0.8.0")]
#[case("pragma solidity >=0.4.22 <0.9.0;", "solidity", ">=0.4.22 <0.9.0")]
#[case("pragma experimental ABIEncoderV2;", "experimental", "ABIEncoderV2")]
fn pragma_value_is_kept_verbatim(#[case] source: &str, #[case] name: &str, #[case] value: &str) {
    let pragma = top_level(source);
    assert_eq!(
        pragma,
        json!({"type": "PragmaDirective", "Name": name, "Value": value})
    );
}

// ---
// Imports
// ---

#[test]
fn plain_import() {
    let import = top_level(r#"import "./Token.sol";"#);
    assert_eq!(import["type"], "ImportDirective");
    assert_eq!(import["Path"], "./Token.sol");
    assert_eq!(import["PathLiteral"]["type"], "StringLiteral");
    assert_eq!(import["PathLiteral"]["Value"], "./Token.sol");
    assert_eq!(import["UnitAlias"], "");
    assert!(import["UnitAliasIdentifier"].is_null());
    assert!(import["SymbolAliases"].is_null());
}

#[rstest]
#[case(r#"import "./Token.sol" as Token;"#)]
#[case(r#"import * as Token from './Token.sol';"#)]
fn unit_alias_is_the_last_name(#[case] source: &str) {
    let import = top_level(source);
    assert_eq!(import["Path"], "./Token.sol");
    assert_eq!(import["UnitAlias"], "Token");
    assert_eq!(
        import["UnitAliasIdentifier"],
        json!({"type": "Identifier", "Name": "Token"})
    );
}

#[test]
fn symbol_aliases() {
    let import = top_level(r#"import {ERC20 as Base, IERC20} from "./ERC20.sol";"#);
    assert_eq!(import["SymbolAliases"], json!([["ERC20", "Base"], ["IERC20", ""]]));
    let identifiers = &import["SymbolAliasesIdentifiers"];
    assert_eq!(identifiers[0][0]["Name"], "ERC20");
    assert_eq!(identifiers[0][1]["Name"], "Base");
    assert_eq!(identifiers[1][0]["Name"], "IERC20");
    assert!(identifiers[1][1].is_null());
    assert_eq!(import["UnitAlias"], "");
}

// ---
// Contracts
// ---

#[rstest]
#[case("contract A {}", "contract")]
#[case("abstract contract A {}", "contract")]
#[case("interface A {}", "interface")]
#[case("library A {}", "library")]
fn contract_kind_comes_from_the_keyword(#[case] source: &str, #[case] kind: &str) {
    let contract = top_level(source);
    assert_eq!(contract["type"], "ContractDefinition");
    assert_eq!(contract["name"], "A");
    assert_eq!(contract["Kind"], kind);
    assert_eq!(contract["SubNodes"], json!([]));
}

#[test]
fn inheritance_specifiers_with_arguments() {
    let contract = top_level("contract C is Ownable, ERC20(\"Token\", 18) {}");
    let bases = contract["BaseContracts"].as_array().unwrap();
    assert_eq!(bases.len(), 2);
    assert_eq!(bases[0]["type"], "InheritanceSpecifier");
    assert_eq!(
        bases[0]["BaseName"],
        json!({"type": "UserDefinedTypeName", "NamePath": "Ownable"})
    );
    assert_eq!(bases[0]["Arguments"], json!([]));
    assert_eq!(bases[1]["Arguments"][0]["type"], "StringLiteral");
    assert_eq!(bases[1]["Arguments"][1]["Number"], "18");
}

#[test]
fn state_variable_keywords() {
    let declaration = contract_part("uint256 public constant MAX = 100;");
    assert_eq!(declaration["type"], "StateVariableDeclaration");
    let variable = &declaration["Variables"][0];
    assert_eq!(variable["type"], "VariableDeclaration");
    assert_eq!(variable["Name"], "MAX");
    assert_eq!(variable["TypeName"]["Name"], "uint256");
    assert_eq!(variable["IsStateVar"], true);
    assert_eq!(variable["IsDeclaredConst"], true);
    assert_eq!(variable["IsImmutable"], false);
    assert_eq!(variable["Visibility"], "public");
    assert_eq!(variable["Expression"]["Number"], "100");
    // the initializer lives on the variable; the wrapper's slot stays empty
    assert!(declaration["InitialValue"].is_null());
}

#[test]
fn immutable_state_variable_without_visibility() {
    let variable = contract_part("address immutable owner;")["Variables"][0].clone();
    assert_eq!(variable["IsImmutable"], true);
    assert_eq!(variable["IsDeclaredConst"], false);
    assert_eq!(variable["Visibility"], "default");
    assert!(variable["Expression"].is_null());
}

#[test]
fn state_variable_override_list() {
    let variable = contract_part("uint public override(A, B) total;")["Variables"][0].clone();
    let overrides = variable["Override"].as_array().unwrap();
    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides[1]["NamePath"], "B");
}

#[test]
fn struct_members() {
    let definition = contract_part("struct Voter { uint weight; address delegate; }");
    assert_eq!(definition["type"], "StructDefinition");
    assert_eq!(definition["Name"], "Voter");
    let members = definition["Members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[1]["Name"], "delegate");
    assert_eq!(members[1]["TypeName"]["Name"], "address");
}

#[test]
fn enum_definition_lists_its_values() {
    let definition = top_level("enum Hello { A, B, C }");
    assert_eq!(
        definition,
        json!({
            "type": "EnumDefinition",
            "name": "Hello",
            "members": [
                {"type": "EnumValue", "name": "A"},
                {"type": "EnumValue", "name": "B"},
                {"type": "EnumValue", "name": "C"}
            ]
        })
    );
}

#[test]
fn using_for() {
    let using = contract_part("using SafeMath for uint256;");
    assert_eq!(using["type"], "UsingForDeclaration");
    assert_eq!(using["LibraryName"], "SafeMath");
    assert_eq!(using["TypeName"]["type"], "ElementaryTypeName");

    let wildcard = contract_part("using Strings for *;");
    assert!(wildcard["TypeName"].is_null());
}

#[test]
fn file_level_declarations() {
    let constant = top_level("uint constant LIMIT = 10;");
    assert_eq!(constant["type"], "FileLevelConstant");
    assert_eq!(constant["Name"], "LIMIT");
    assert_eq!(constant["IsDeclaredConst"], true);
    assert_eq!(constant["InitialValue"]["Number"], "10");

    let error = top_level("error Unauthorized(address caller);");
    assert_eq!(error["type"], "CustomErrorDefinition");
    assert_eq!(error["Parameters"][0]["Name"], "caller");

    let definition = top_level("type Price is uint128;");
    assert_eq!(definition["type"], "TypeDefinition");
    assert_eq!(
        definition["Definition"],
        json!({"type": "ElementaryTypeName", "Name": "uint128", "StateMutability": ""})
    );
}

// ---
// Functions, modifiers and events
// ---

#[test]
fn function_signature() {
    let function = contract_part(
        "function transfer(address to, bytes memory data) public view virtual returns (bool) {}",
    );
    assert_eq!(function["type"], "FunctionDefinition");
    assert_eq!(function["Name"], "transfer");
    assert_eq!(function["Visibility"], "public");
    assert_eq!(function["StateMutability"], "view");
    assert_eq!(function["IsVirtual"], true);
    assert_eq!(function["IsConstructor"], false);
    assert_eq!(function["IsFallback"], false);

    let parameters = function["Parameters"].as_array().unwrap();
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0]["type"], "VariableDeclaration");
    assert_eq!(parameters[1]["StorageLocation"], "memory");
    assert_eq!(parameters[1]["IsStateVar"], false);

    let returns = function["ReturnParameters"].as_array().unwrap();
    assert_eq!(returns.len(), 1);
    assert_eq!(returns[0]["Name"], "");
    assert!(returns[0]["Identifier"].is_null());
    assert_eq!(function["Body"], json!({"type": "Block", "Statements": []}));
}

#[test]
fn function_without_body_or_visibility() {
    let function = contract_part("function total() returns (uint);");
    assert!(function["Body"].is_null());
    assert_eq!(function["Visibility"], "default");
    assert_eq!(function["StateMutability"], "");
}

#[rstest]
#[case("constructor() internal {}", "IsConstructor", "internal")]
#[case("constructor() {}", "IsConstructor", "default")]
#[case("fallback() external {}", "IsFallback", "external")]
#[case("receive() external payable {}", "IsReceiveEther", "external")]
#[case("function() public {}", "IsFallback", "public")]
fn special_functions(#[case] source: &str, #[case] flag: &str, #[case] visibility: &str) {
    let function = contract_part(source);
    assert_eq!(function[flag], true, "{source}");
    assert_eq!(function["Visibility"], visibility);
    assert_eq!(function["Name"], "");
}

#[test]
fn modifier_invocations_distinguish_empty_arguments() {
    let function = contract_part("function f() public onlyOwner nonReentrant() whenAbove(1) {}");
    let modifiers = function["Modifiers"].as_array().unwrap();
    assert_eq!(modifiers.len(), 3);
    assert_eq!(modifiers[0]["type"], "ModifierInvocation");
    assert_eq!(modifiers[0]["Name"], "onlyOwner");
    assert!(modifiers[0]["Arguments"].is_null());
    assert_eq!(modifiers[1]["Arguments"], json!([]));
    assert_eq!(modifiers[2]["Arguments"][0]["Number"], "1");
}

#[test]
fn function_override_specifier() {
    let function = contract_part("function f() public override(Base) {}");
    assert_eq!(
        function["Override"],
        json!([{"type": "UserDefinedTypeName", "NamePath": "Base"}])
    );

    let bare = contract_part("function g() public override {}");
    assert_eq!(bare["Override"], json!([]));
}

#[test]
fn modifier_definition() {
    let modifier = contract_part("modifier onlyOwner(address who) virtual { _; }");
    assert_eq!(modifier["type"], "ModifierDefinition");
    assert_eq!(modifier["IsVirtual"], true);
    assert_eq!(modifier["Parameters"][0]["Name"], "who");

    let placeholder = &modifier["Body"]["Statements"][0];
    assert_eq!(placeholder["type"], "ExpressionStatement");
    assert_eq!(
        placeholder["Expression"],
        json!({"type": "Identifier", "Name": "_"})
    );

    let bare = contract_part("modifier locked { _; }");
    assert!(bare["Parameters"].is_null());
}

#[test]
fn event_definition() {
    let event =
        contract_part("event Transfer(address indexed from, address to, uint256 value) anonymous;");
    assert_eq!(event["type"], "EventDefinition");
    assert_eq!(event["IsAnonymous"], true);
    let parameters = event["Parameters"].as_array().unwrap();
    assert_eq!(parameters.len(), 3);
    assert_eq!(parameters[0]["IsIndexed"], true);
    assert_eq!(parameters[0]["Name"], "from");
    assert_eq!(parameters[1]["IsIndexed"], false);

    let plain = contract_part("event Ping();");
    assert_eq!(plain["IsAnonymous"], false);
    assert_eq!(plain["Parameters"], json!([]));
}

// ---
// Type names
// ---

#[test]
fn mapping_type() {
    let variable = contract_part("mapping(address => mapping(address => uint)) allowed;")
        ["Variables"][0]
        .clone();
    let mapping = &variable["TypeName"];
    assert_eq!(mapping["type"], "Mapping");
    assert_eq!(mapping["KeyType"]["Name"], "address");
    assert_eq!(mapping["ValueType"]["type"], "Mapping");
    assert_eq!(mapping["ValueType"]["ValueType"]["Name"], "uint");
}

#[test]
fn array_types_nest_left() {
    let variable = contract_part("uint[2][] grid;")["Variables"][0].clone();
    let outer = &variable["TypeName"];
    assert_eq!(outer["type"], "ArrayTypeName");
    assert!(outer["Length"].is_null());
    let inner = &outer["BaseTypeName"];
    assert_eq!(inner["type"], "ArrayTypeName");
    assert_eq!(inner["Length"]["Number"], "2");
    assert_eq!(inner["BaseTypeName"]["Name"], "uint");
}

#[test]
fn address_payable_type() {
    let variable = contract_part("address payable owner;")["Variables"][0].clone();
    assert_eq!(
        variable["TypeName"],
        json!({"type": "ElementaryTypeName", "Name": "address", "StateMutability": "payable"})
    );
}

#[test]
fn function_type() {
    let variable =
        contract_part("function (uint, bytes memory) external view returns (bool) hook;")
            ["Variables"][0]
            .clone();
    let function = &variable["TypeName"];
    assert_eq!(function["type"], "FunctionTypeName");
    assert_eq!(function["Visibility"], "external");
    assert_eq!(function["StateMutability"], "view");
    assert_eq!(function["ParameterTypes"].as_array().unwrap().len(), 2);
    assert_eq!(function["ParameterTypes"][1]["StorageLocation"], "memory");
    assert_eq!(function["ReturnTypes"][0]["TypeName"]["Name"], "bool");

    let bare = contract_part("function () internal callback;")["Variables"][0].clone();
    assert_eq!(bare["TypeName"]["ReturnTypes"], json!([]));
}
