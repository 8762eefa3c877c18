//! Deep merge: source wins, nodes merge recursively, node/leaf clashes replace.

use bconf::Bconf;

fn tree(lines: &str) -> Bconf {
    let mut bc = Bconf::new();
    bc.load_conf_str(lines).unwrap();
    bc
}

#[test]
fn merge_overrides_and_replaces_mismatched_kinds() {
    let mut dst = tree("a.a=1\na.b=2\na.c.a=3\na.d=4\n");
    let src = tree("a.a=11\na.b.c=22\na.c=33\n");

    dst.merge(&src);

    let json = serde_json::to_string(&dst).unwrap();
    assert_eq!(json, r#"{"a":{"a":"11","b":{"c":"22"},"c":"33","d":"4"}}"#);
}

#[test]
fn merge_does_not_touch_source() {
    let mut dst = tree("a.x=1\n");
    let src = tree("a.y=2\nb=3\n");
    let before = src.clone();

    dst.merge(&src);
    assert_eq!(src, before);
    assert_eq!(dst.get_string(&["a", "x"]), "1");
    assert_eq!(dst.get_string(&["a", "y"]), "2");
    assert_eq!(dst.get_string(&["b"]), "3");
}

#[test]
fn merge_with_empty_source_is_identity() {
    let original = tree("a.b=1\nc=2\n");
    let mut merged = original.clone();
    merged.merge(&Bconf::new());
    assert_eq!(merged, original);
}

#[test]
fn merge_into_empty_copies_source() {
    let src = tree("a.b=1\nc=2\nd.e.f=3\n");
    let merged = Bconf::new().merged(&src);
    assert_eq!(merged, src);
}

#[test]
fn merged_subtree_is_independent_copy() {
    let mut dst = Bconf::new();
    let src = tree("n.k=v\n");
    dst.merge(&src);

    dst.add_value(&["n", "k"], "changed").unwrap();
    assert_eq!(src.get_string(&["n", "k"]), "v");
}
