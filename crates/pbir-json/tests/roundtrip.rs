//! Round-trip properties of the codec.

use std::collections::BTreeMap;

use pbir_json::{Layout, decode, encode, number_value};
use proptest::prelude::*;

fn render(fields: &BTreeMap<String, String>) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let body: Vec<String> = fields
        .iter()
        .map(|(key, literal)| format!("  \"{key}\": {literal}"))
        .collect();
    format!("{{\n{}\n}}", body.join(",\n"))
}

proptest! {
    #[test]
    fn number_literals_round_trip(
        fields in prop::collection::btree_map(
            "[a-zA-Z]{1,8}",
            "-?(0|[1-9][0-9]{0,6})(\\.[0-9]{1,8})?([eE][+-]?[0-9]{1,3})?",
            0..12,
        ),
        trailing_newline in any::<bool>(),
    ) {
        let mut text = render(&fields);
        if trailing_newline {
            text.push('\n');
        }
        let decoded = decode(&text).unwrap();
        prop_assert_eq!(encode(&decoded.value, &decoded.layout).unwrap(), text);
    }
}

#[test]
fn nested_document_round_trips() {
    let text = r#"{
  "$schema": "https://example.com/schema/visualContainer/1.0.0/schema.json",
  "name": "a1b2c3",
  "position": {
    "x": 12.0,
    "y": 140.00000000000003,
    "z": 0,
    "width": 280.5,
    "height": 1E2
  },
  "visual": {
    "visualType": "card",
    "objects": {
      "labels": [
        {
          "properties": {
            "fontSize": {
              "expr": {
                "Literal": {
                  "Value": "12D"
                }
              }
            }
          }
        }
      ]
    },
    "drillFilterOtherVisuals": true
  },
  "tags": [],
  "note": null
}"#;
    let decoded = decode(text).unwrap();
    assert_eq!(encode(&decoded.value, &decoded.layout).unwrap(), text);
}

#[test]
fn replaced_number_uses_standard_formatting_while_others_stay() {
    let text = "{\n  \"width\": 1280.0,\n  \"height\": 720.0,\n  \"ratio\": 2.5E-05\n}";
    let mut decoded = decode(text).unwrap();
    decoded.value["width"] = number_value(1920.0).unwrap();
    assert_eq!(
        encode(&decoded.value, &Layout::default()).unwrap(),
        "{\n  \"width\": 1920,\n  \"height\": 720.0,\n  \"ratio\": 2.5E-05\n}"
    );
}
