//! Round trips of fixture documents, cross-checked against serde_json.

use toth_core::{DataElement, DataNumber};
use toth_json::{Style, from_str, from_value, to_string, to_value};

const PACKAGE: &str = include_str!("fixtures/package.json");
const ESCAPES: &str = include_str!("fixtures/escapes.json");
const NESTED: &str = include_str!("fixtures/nested.json");

fn serde_tree(text: &str) -> DataElement {
    from_value(serde_json::from_str(text).expect("fixture should be valid JSON"))
}

#[test]
fn test_pretty_fixture_is_stable() {
    let element = from_str(PACKAGE).unwrap();
    let text = to_string(&element, &Style::pretty("  ")).unwrap();
    assert_eq!(text, PACKAGE.trim_end());
}

#[test]
fn test_numbers_keep_source_text() {
    let element = from_str(PACKAGE).unwrap();
    let limits = element
        .as_map()
        .and_then(|map| map.get("limits"))
        .and_then(DataElement::as_map)
        .expect("limits map");

    let huge = limits.get("huge").and_then(DataElement::as_number).unwrap();
    assert!(matches!(huge, DataNumber::Lexical(text) if text == "1.7976931348623157e308"));
    assert_eq!(huge.as_f64().unwrap(), f64::MAX);
    assert_eq!(
        limits.get("depth").and_then(DataElement::as_number).unwrap().as_i32().unwrap(),
        64
    );
}

#[test]
fn test_escapes_decode() {
    let element = from_str(ESCAPES).unwrap();
    let map = element.as_map().unwrap();
    let get = |key: &str| map.get(key).and_then(DataElement::as_str).unwrap();

    assert_eq!(get("quote"), "\"");
    assert_eq!(get("backslash"), "\\");
    assert_eq!(get("slash"), "/");
    assert_eq!(get("controls"), "\u{8}\u{c}\n\r\t\u{1}");
    assert_eq!(get("unicode"), "é中");
    assert_eq!(get("emoji"), "😀");
    assert_eq!(get("raw"), "é中😀");
}

#[test]
fn test_escapes_survive_rewrite() {
    let element = from_str(ESCAPES).unwrap();
    let text = to_string(&element, &Style::compact()).unwrap();
    assert!(text.contains(r#""controls":"\b\f\n\r\t\u0001""#));
    assert!(text.contains(r#""emoji":"😀""#));
    assert_eq!(from_str(&text).unwrap(), element);
}

#[test]
fn test_compact_rendering() {
    let element = from_str(NESTED).unwrap();
    assert_eq!(
        to_string(&element, &Style::compact()).unwrap(),
        r#"[[],[[1,2],{"a":[true,false,null]}],{"deep":{"deeper":{"deepest":[0.5e-3,1E+2,-0]}}}]"#
    );
    assert_eq!(
        to_string(&element, &Style::new("", "", true)).unwrap(),
        r#"[[], [[1, 2], {"a": [true, false, null]}], {"deep": {"deeper": {"deepest": [0.5e-3, 1E+2, -0]}}}]"#
    );
}

#[test]
fn test_pretty_rendering() {
    let element = from_str(NESTED).unwrap();
    insta::assert_snapshot!(to_string(&element, &Style::pretty("  ")).unwrap(), @r#"
    [
      [],
      [
        [
          1,
          2
        ],
        {
          "a": [
            true,
            false,
            null
          ]
        }
      ],
      {
        "deep": {
          "deeper": {
            "deepest": [
              0.5e-3,
              1E+2,
              -0
            ]
          }
        }
      }
    ]
    "#);
}

#[test]
fn test_matches_serde_json() {
    for fixture in [PACKAGE, ESCAPES, NESTED] {
        assert_eq!(from_str(fixture).unwrap(), serde_tree(fixture));
    }
}

#[test]
fn test_to_value_matches_serde_json() {
    for fixture in [PACKAGE, ESCAPES, NESTED] {
        let expected: serde_json::Value = serde_json::from_str(fixture).unwrap();
        let element = from_str(fixture).unwrap();
        assert_eq!(to_value(&element).unwrap(), expected);
    }
}

#[test]
fn test_rejects_what_serde_json_rejects() {
    for input in ["", "{", "[1,]", r#"{"a" 1}"#, "01", "[1] 2", r#""\x""#, "tru", "{,}"] {
        assert!(serde_json::from_str::<serde_json::Value>(input).is_err(), "{input}");
        assert!(from_str(input).is_err(), "{input} should be rejected");
    }
}

#[test]
fn test_deep_nesting_is_an_error() {
    let depth = 300_000;
    let balanced = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(serde_json::from_str::<serde_json::Value>(&balanced).is_err());
    let err = from_str(&balanced).unwrap_err();
    assert!(
        err.to_string().contains("Maximum nesting depth of 128 exceeded"),
        "{err}"
    );

    let unclosed = "[".repeat(depth);
    assert!(from_str(&unclosed).is_err());

    let maps = "{\"k\":".repeat(depth);
    assert!(from_str(&maps).is_err());
}

#[test]
fn test_deeply_nested_lists_round_trip() {
    let text = format!("{}{}", "[".repeat(100), "]".repeat(100));
    let element = from_str(&text).unwrap();
    assert_eq!(to_string(&element, &Style::compact()).unwrap(), text);
}

#[test]
fn test_from_reader() {
    let element = toth_json::from_reader(PACKAGE.as_bytes()).unwrap();
    assert_eq!(element, from_str(PACKAGE).unwrap());
}
