//! JSON loading, normalization, and serialization.

use bconf::{Bconf, BconfError};
use serde_json::json;

fn sample_json() -> Vec<u8> {
    std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json"))
        .expect("sample.json fixture must exist")
}

#[test]
fn load_json_builds_nodes() {
    let mut bc = Bconf::new();
    bc.load_json(&sample_json()).unwrap();

    assert_eq!(bc.get_string(&["attr", "name", "attrind"]), "4");
    assert_eq!(bc.get_string(&["counters", "attr", "HEJ"]), "hej_counter");
    assert!(bc.get_node(&["opers", "en"]).is_some());
}

#[test]
fn dotted_json_keys_stay_single_segments() {
    let mut bc = Bconf::new();
    bc.load_json(&sample_json()).unwrap();

    assert_eq!(bc.get_string(&["conf", "foo.bar"]), "17");
    assert_eq!(bc.get_string(&["conf", "foo", "bar"]), "");
}

#[test]
fn load_json_reader_matches_load_json() {
    let mut a = Bconf::new();
    let mut b = Bconf::new();
    a.load_json(&sample_json()).unwrap();
    b.load_json_reader(sample_json().as_slice()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn json_roundtrip_preserves_structure() {
    let mut bc = Bconf::new();
    bc.load_json_str(r#"{"a":{"b":"1"}}"#).unwrap();

    let out = serde_json::to_string(&bc).unwrap();
    assert_eq!(out, r#"{"a":{"b":"1"}}"#);
    assert_eq!(bc.to_json_value(), json!({"a": {"b": "1"}}));
}

#[test]
fn serialization_sorts_keys() {
    let mut bc = Bconf::new();
    bc.load_conf_str("z=1\nm.b=2\nm.a=3\na=4\n").unwrap();
    assert_eq!(
        serde_json::to_string(&bc).unwrap(),
        r#"{"a":"4","m":{"a":"3","b":"2"},"z":"1"}"#
    );
}

#[test]
fn deserialize_through_serde() {
    let bc: Bconf = serde_json::from_str(r#"{"a":{"b":"1"},"n":7}"#).unwrap();
    assert_eq!(bc.get_string(&["a", "b"]), "1");
    assert_eq!(bc.get_string(&["n"]), "7");
}

#[test]
fn top_level_keys_replace_existing_entries() {
    let mut bc = Bconf::new();
    bc.load_conf_str("a.x=1\nkeep=yes\n").unwrap();
    bc.load_json_str(r#"{"a":{"y":"2"}}"#).unwrap();

    assert_eq!(bc.get_string(&["a", "y"]), "2");
    assert_eq!(bc.get_string(&["a", "x"]), "", "node `a` is replaced, not merged");
    assert_eq!(bc.get_string(&["keep"]), "yes");
}

#[test]
fn empty_and_null_documents_are_valid() {
    let mut bc = Bconf::new();
    bc.load_json_str("{}").unwrap();
    bc.load_json_str("null").unwrap();
    assert!(bc.is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    let mut bc = Bconf::new();
    let err = bc.load_json_str(r#"{"a": "#).unwrap_err();
    assert!(matches!(err, BconfError::Json(_)));
}

#[test]
fn scalar_root_is_an_error() {
    let mut bc = Bconf::new();
    let err = bc.load_json_str("\"just a string\"").unwrap_err();
    assert!(matches!(err, BconfError::JsonRoot(ref kind) if kind == "string"));
}

#[test]
fn json_and_text_loaders_agree() {
    let mut from_text = Bconf::new();
    from_text
        .load_conf_str("attr.order.0=id\nattr.order.1=order\nstate.to_id=4711\n")
        .unwrap();

    let mut from_json = Bconf::new();
    from_json
        .load_json_str(r#"{"attr":{"order":["id","order"]},"state":{"to_id":4711}}"#)
        .unwrap();

    assert_eq!(from_text, from_json);
}
