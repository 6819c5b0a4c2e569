//! Integration tests combining codecs with the JSON reader and writer.

use toth_core::codec::{self, Codec};
use toth_core::{CodecError, DataElement, DataMap, DataReader, ElementType, TothError};
use toth_json::{JsonReader, JsonWriter, Style};

#[derive(Debug, Clone, PartialEq)]
struct TestClass {
    int: i32,
    strings: Vec<String>,
    null_string: Option<String>,
}

fn test_codec() -> Codec<TestClass> {
    codec::group((
        codec::int().field_of("int").bind(|t: &TestClass| &t.int),
        codec::string()
            .list_of()
            .field_of("strings")
            .bind(|t: &TestClass| &t.strings),
        codec::string()
            .nullable()
            .field_of("null_string")
            .bind(|t: &TestClass| &t.null_string),
    ))
    .build(|(int, strings, null_string)| TestClass {
        int,
        strings,
        null_string,
    })
}

fn sample() -> TestClass {
    TestClass {
        int: 10,
        strings: vec!["Hello".into(), "JSON!".into()],
        null_string: None,
    }
}

#[test]
fn test_codec_round_trip_through_pretty_json() {
    let codec = test_codec();
    let element = codec.encode(&sample()).unwrap();

    let mut writer = JsonWriter::new(Vec::new(), Style::pretty("  "));
    element.write(&mut writer).unwrap();
    writer.finish().unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();

    insta::assert_snapshot!(text, @r#"
    {
      "int": 10,
      "strings": [
        "Hello",
        "JSON!"
      ],
      "null_string": null
    }
    "#);

    let mut reader = JsonReader::new(text);
    let map = DataMap::read(&mut reader).unwrap();
    reader.finish().unwrap();

    let decoded = codec.decode(&DataElement::Map(map)).unwrap();
    assert_eq!(decoded, sample());
}

#[test]
fn test_encode_decode_helpers() {
    let codec = test_codec();
    let value = TestClass {
        null_string: Some("set".into()),
        ..sample()
    };

    let text = toth_json::encode(&codec, &value, &Style::compact()).unwrap();
    assert_eq!(
        text,
        r#"{"int":10,"strings":["Hello","JSON!"],"null_string":"set"}"#
    );
    assert_eq!(toth_json::decode(&codec, &text).unwrap(), value);
}

#[test]
fn test_read_null() {
    let mut map = DataMap::new();
    map.insert("string", codec::string().nullable().encode(&None).unwrap());

    let text = toth_json::to_string(&DataElement::Map(map), &Style::pretty("  ")).unwrap();
    assert_eq!(text, "{\n  \"string\": null\n}");

    let mut reader = JsonReader::new(text);
    let read_map = DataMap::read(&mut reader).unwrap();
    let element = read_map.get("string").expect("key should be present");
    assert_eq!(element.element_type(), ElementType::Null);
}

#[test]
fn test_decode_reports_type_mismatch() {
    let err = toth_json::decode(&test_codec(), "[]").unwrap_err();
    let TothError::Codec(codec_err) = &err else {
        panic!("expected codec error, got {err}");
    };
    assert_eq!(codec_err.to_string(), r#"Expected "map_type", got "list_type"!"#);
}

#[test]
fn test_decode_reports_field_path() {
    let err = toth_json::decode(&test_codec(), r#"{"int": 1, "strings": ["a", 2], "null_string": null}"#)
        .unwrap_err();
    let TothError::Codec(codec_err) = &err else {
        panic!("expected codec error, got {err}");
    };
    assert_eq!(codec_err.path(), "strings[1]");
    assert!(matches!(
        codec_err.root_cause(),
        CodecError::TypeMismatch {
            expected: ElementType::String,
            actual: ElementType::Number,
        }
    ));
}

#[test]
fn test_decode_reports_missing_key() {
    let err = toth_json::decode(&test_codec(), r#"{"int": 1, "null_string": null}"#).unwrap_err();
    let TothError::Codec(codec_err) = &err else {
        panic!("expected codec error, got {err}");
    };
    assert_eq!(
        codec_err.root_cause().to_string(),
        r#"DataMap does not have key "strings"!"#
    );
}

#[test]
fn test_decode_rejects_malformed_json() {
    let err = toth_json::decode(&test_codec(), r#"{"int": 1"#).unwrap_err();
    assert!(err.downcast_format::<toth_json::JsonError>().is_some());
    assert!(err.to_string().starts_with("JSON error: "));
}

#[test]
fn test_optional_field_is_omitted() {
    #[derive(Debug, PartialEq)]
    struct Named {
        name: String,
        nickname: Option<String>,
    }

    let codec = codec::group((
        codec::string().field_of("name").bind(|n: &Named| &n.name),
        codec::string()
            .optional_field_of("nickname")
            .bind(|n: &Named| &n.nickname),
    ))
    .build(|(name, nickname)| Named { name, nickname });

    let value = Named {
        name: "toth".into(),
        nickname: None,
    };
    let text = toth_json::encode(&codec, &value, &Style::compact()).unwrap();
    assert_eq!(text, r#"{"name":"toth"}"#);
    assert_eq!(toth_json::decode(&codec, &text).unwrap(), value);
}

#[test]
fn test_streaming_reader_matches_tree() {
    let text = r#"{"a": [1, 2.5, "x"], "b": {"c": null}}"#;
    let mut reader = JsonReader::new(text);
    assert_eq!(reader.next_type().unwrap(), ElementType::Map);
    let element = DataElement::read(&mut reader).unwrap();
    reader.finish().unwrap();
    assert_eq!(element, toth_json::from_str(text).unwrap());
}
