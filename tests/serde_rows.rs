#![cfg(feature = "serde")]

use rulegrid::{any, is, one_of, Condition, Definitions, DefinitionsBuilder, RuleRow};

fn sample() -> Definitions {
    DefinitionsBuilder::new()
        .dimension("category", ["Men", "Women"])
        .dimension("size", ["S", "M", "L"])
        .deny([is("Men"), any(), one_of(["S", "M"])])
        .allow([any(), any()])
        .build()
        .unwrap()
}

#[test]
fn rule_row_from_json() {
    let row: RuleRow = serde_json::from_str(r#"["DENY", "Men", "*", ["S", "M"]]"#).unwrap();
    assert_eq!(row.action, "DENY");
    assert_eq!(
        row.conditions,
        vec![is("Men"), Condition::Wildcard, one_of(["S", "M"])]
    );
}

#[test]
fn rule_row_to_json() {
    let row = RuleRow::from(sample().rules()[0].clone());
    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"["DENY","Men","*",["S","M"]]"#);
}

#[test]
fn rule_row_must_start_with_action() {
    let result: Result<RuleRow, _> = serde_json::from_str(r#"[["ALLOW"], "x"]"#);
    assert!(result.is_err());

    let result: Result<RuleRow, _> = serde_json::from_str("[]");
    assert!(result.is_err());
}

#[test]
fn definitions_from_json() {
    let json = r#"{
        "dimensions": [
            { "name": "category", "values": ["Men", "Women"] },
            { "name": "size", "values": ["S", "M", "L"] }
        ],
        "rules": [
            ["DENY", "Men", "*", ["S", "M"]],
            ["allow", "*", "*"]
        ]
    }"#;
    let defs: Definitions = serde_json::from_str(json).unwrap();
    assert_eq!(defs, sample());
    assert_eq!(defs.check(&["Men", "S"]), Ok(true));
    assert_eq!(defs.closest_value(&["Women", "L"]), Ok(Some("Men".into())));
}

#[test]
fn definitions_json_round_trip() {
    let defs = sample();
    let json = serde_json::to_string(&defs).unwrap();
    let back: Definitions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, defs);
}

#[test]
fn definitions_rules_only() {
    let defs: Definitions = serde_json::from_str(r#"{ "rules": [["ALLOW", "x"]] }"#).unwrap();
    assert!(defs.dimensions().is_empty());
    assert_eq!(defs.check(&["x"]), Ok(true));
}

#[test]
fn unknown_action_is_rejected() {
    let json = r#"{ "rules": [["ALLOW", "x"], ["LET", "*"]] }"#;
    let err = serde_json::from_str::<Definitions>(json).unwrap_err();
    assert!(
        err.to_string()
            .contains("unknown action LET in rule \"*\" at index 1"),
        "{err}"
    );
}

#[test]
fn invalid_dimensions_are_rejected() {
    let json = r#"{ "dimensions": [{ "name": "size", "values": [] }], "rules": [] }"#;
    assert!(serde_json::from_str::<Definitions>(json).is_err());
}
