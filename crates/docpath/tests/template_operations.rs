//! Template resolution, extraction, relationship and enumeration tests.

use docpath::{keys, Key, PathError, RootContext, Template};
use serde_json::{json, Value};

fn test_object() -> Value {
    json!({
        "a": {
            "b": {"c": 5},
            "e": [{"f": "hi", "ff": 1}, {"f": "bye", "ff": 2}],
            "h": [{"i": [1, 2, 3]}],
            "k": 0
        }
    })
}

/// `a.h[?]` and `a.h[?].i[?]`
fn nested_templates(ctx: &RootContext) -> (Template, Template) {
    let outer = ctx.root().sub_path(keys!["a", "h"]).dynamic_child();
    let inner = outer.sub_path_template(keys!["i"]).dynamic_child();
    (outer, inner)
}

fn rendered(paths: &[docpath::Path]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

// ============================================================================
// get_path
// ============================================================================

#[test]
fn test_dynamic_array_value() {
    let ctx = RootContext::new();
    let doc = test_object();
    let items = ctx.root().sub_path(keys!["a", "e"]).dynamic_child();
    assert_eq!(
        items.get_path(keys![1usize]).unwrap().get_value(&doc),
        Some(&json!({"f": "bye", "ff": 2}))
    );
    let ff = items.sub_path_template(keys!["ff"]);
    assert_eq!(ff.get_path(keys![1usize]).unwrap().get_value(&doc), Some(&json!(2)));
}

#[test]
fn test_dynamic_object_value() {
    let ctx = RootContext::new();
    let doc = test_object();
    let members = ctx.root().sub_path(keys!["a"]).dynamic_child();
    assert_eq!(
        members.get_path(keys!["b"]).unwrap().get_value(&doc),
        Some(&json!({"c": 5}))
    );
}

#[test]
fn test_multiple_placeholders_consumed_in_order() {
    let ctx = RootContext::new();
    let doc = test_object();
    let (_, inner) = nested_templates(&ctx);
    let p = inner.get_path(keys![0usize, 2usize]).unwrap();
    assert_eq!(p.to_string(), "a.h[0].i[2]");
    assert_eq!(p.get_value(&doc), Some(&json!(3)));
}

#[test]
fn test_get_path_arity_errors() {
    let ctx = RootContext::new();
    let (_, inner) = nested_templates(&ctx);

    match inner.get_path(keys![0usize]) {
        Err(PathError::PlaceholderUnderflow { expected, supplied, template }) => {
            assert_eq!((expected, supplied), (2, 1));
            assert_eq!(template, "a.h[?].i[?]");
        }
        other => panic!("expected PlaceholderUnderflow, got {other:?}"),
    }
    assert!(matches!(
        inner.get_path(Vec::<Key>::new()),
        Err(PathError::PlaceholderUnderflow { supplied: 0, .. })
    ));
    assert!(matches!(
        inner.get_path(keys![0usize, 1usize, 2usize]),
        Err(PathError::PlaceholderOverflow { expected: 2, supplied: 3, .. })
    ));
}

// ============================================================================
// dynamic_parts_from_path
// ============================================================================

#[test]
fn test_dynamic_parts_round_trip() {
    let ctx = RootContext::new();
    let (_, inner) = nested_templates(&ctx);
    for input in [keys![2usize, 4usize], keys![0usize, 0usize], keys!["x", 7usize]] {
        let p = inner.get_path(input.clone()).unwrap();
        assert_eq!(inner.dynamic_parts_from_path(&p).unwrap(), input);
    }
}

#[test]
fn test_dynamic_parts_from_longer_path() {
    let ctx = RootContext::new();
    let (outer, inner) = nested_templates(&ctx);
    let p = inner.get_path(keys![2usize, 4usize]).unwrap();
    assert_eq!(outer.dynamic_parts_from_path(&p).unwrap(), keys![2usize]);
}

#[test]
fn test_dynamic_parts_template_too_long() {
    let ctx = RootContext::new();
    let (outer, inner) = nested_templates(&ctx);
    let p = outer.get_path(keys![2usize]).unwrap();
    assert_eq!(
        inner.dynamic_parts_from_path(&p).unwrap_err(),
        PathError::TemplateTooLong {
            path: "a.h[2]".into(),
            template: "a.h[?].i[?]".into(),
        }
    );
}

#[test]
fn test_dynamic_parts_mismatch() {
    let ctx = RootContext::new();
    let (outer, _) = nested_templates(&ctx);
    let p = ctx.root().sub_path(keys!["a", "e", 0usize]);
    assert_eq!(
        outer.dynamic_parts_from_path(&p).unwrap_err(),
        PathError::TemplateMismatch {
            path: "a.e[0]".into(),
            template: "a.h[?]".into(),
        }
    );
}

#[test]
fn test_dynamic_parts_across_contexts() {
    let (outer, _) = nested_templates(&RootContext::new());
    let foreign = RootContext::new().root().sub_path(keys!["a", "h", 5usize]);
    assert_eq!(outer.dynamic_parts_from_path(&foreign).unwrap(), keys![5usize]);
}

// ============================================================================
// related_path
// ============================================================================

#[test]
fn test_related_path_same_template_same_instance() {
    let ctx = RootContext::new();
    let (_, inner) = nested_templates(&ctx);
    let p = inner.get_path(keys![2usize, 4usize]).unwrap();
    assert!(p.related_path(&inner).unwrap().ptr_eq(&p));
}

#[test]
fn test_related_path_higher_template() {
    let ctx = RootContext::new();
    let (outer, inner) = nested_templates(&ctx);
    let p = inner.get_path(keys![2usize, 4usize]).unwrap();
    let related = p.related_path(&outer).unwrap();
    assert_eq!(related.to_string(), "a.h[2]");
    assert!(related.ptr_eq(&ctx.root().sub_path(keys!["a", "h", 2usize])));
}

#[test]
fn test_related_path_sibling_template() {
    let ctx = RootContext::new();
    let doc = test_object();
    let items = ctx.root().sub_path(keys!["a", "e"]).dynamic_child();
    let f = items.sub_path_template(keys!["f"]);
    let ff = items.sub_path_template(keys!["ff"]);

    let second_f = f.get_path(keys![1usize]).unwrap();
    let second_ff = second_f.parent().unwrap().related_path(&ff).unwrap();
    assert_eq!(second_ff.get_value(&doc), Some(&json!(2)));
}

#[test]
fn test_related_path_lower_template_fails() {
    let ctx = RootContext::new();
    let (outer, inner) = nested_templates(&ctx);
    let p = outer.get_path(keys![2usize]).unwrap();
    assert!(matches!(
        p.related_path(&inner),
        Err(PathError::TemplateTooLong { .. })
    ));
}

// ============================================================================
// enumerate_all_paths
// ============================================================================

#[test]
fn test_enumerate_missing_array() {
    let ctx = RootContext::new();
    let doc = test_object();
    let t = ctx.root().sub_path(keys!["a", "g"]).dynamic_child();
    assert!(t.enumerate_all_paths(&doc).is_empty());
}

#[test]
fn test_enumerate_array_elements() {
    let ctx = RootContext::new();
    let doc = test_object();
    let t = ctx.root().sub_path(keys!["a", "e"]).dynamic_child();
    assert_eq!(rendered(&t.enumerate_all_paths(&doc)), ["a.e[0]", "a.e[1]"]);
}

#[test]
fn test_enumerate_array_subpaths() {
    let ctx = RootContext::new();
    let doc = test_object();
    let t = ctx
        .root()
        .sub_path(keys!["a", "e"])
        .dynamic_child()
        .sub_path_template(keys!["f"]);
    assert_eq!(rendered(&t.enumerate_all_paths(&doc)), ["a.e[0].f", "a.e[1].f"]);
}

#[test]
fn test_enumerate_nested_placeholders() {
    let ctx = RootContext::new();
    let doc = json!({"rows": [[1, 2], [], [3]]});
    let t = ctx.root().sub_path(keys!["rows"]).dynamic_child().dynamic_child();
    assert_eq!(
        rendered(&t.enumerate_all_paths(&doc)),
        ["rows[0][0]", "rows[0][1]", "rows[2][0]"]
    );
}

#[test]
fn test_enumerate_mixed_map_and_list() {
    let ctx = RootContext::new();
    let doc = json!({"users": {"bob": {"tags": ["x"]}, "amy": {"tags": ["y", "z"]}, "cat": {}}});
    let t = ctx
        .root()
        .sub_path(keys!["users"])
        .dynamic_child()
        .sub_path_template(keys!["tags"])
        .dynamic_child();
    assert_eq!(
        rendered(&t.enumerate_all_paths(&doc)),
        ["users.bob.tags[0]", "users.amy.tags[0]", "users.amy.tags[1]"]
    );
}

#[test]
fn test_enumerated_paths_are_canonical_and_resolve() {
    let ctx = RootContext::new();
    let doc = test_object();
    let t = ctx.root().sub_path(keys!["a", "e"]).dynamic_child();
    let found = t.enumerate_all_paths(&doc);
    for (i, p) in found.iter().enumerate() {
        assert!(p.ptr_eq(&t.get_path(keys![i]).unwrap()));
        assert!(p.get_value(&doc).is_some());
    }
}

#[test]
fn test_enumerate_reflects_removal() {
    let ctx = RootContext::new();
    let mut doc = test_object();
    let t = ctx.root().sub_path(keys!["a", "e"]).dynamic_child();
    t.get_path(keys![0usize]).unwrap().remove_value(&mut doc).unwrap();
    assert_eq!(rendered(&t.enumerate_all_paths(&doc)), ["a.e[0]"]);
}

#[test]
fn test_parsed_template_matches_built_one() {
    let ctx = RootContext::new();
    let parsed = ctx.parse_template("a.e[?].f").unwrap();
    let built = ctx
        .root()
        .sub_path(keys!["a", "e"])
        .dynamic_child()
        .sub_path_template(keys!["f"]);
    assert!(parsed.ptr_eq(&built));
    assert!(ctx.parse_template("a.[?]").is_err());
}
