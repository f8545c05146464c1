//! Integration tests for the built-in `switch`, `flow` and `tags` views.

use docviews::catalog::Catalog;
use docviews::views::{self, Document, Emit, View};
use serde_json::json;

fn view(name: &str) -> Box<dyn View> {
    let catalog = Catalog::default();
    views::build(&catalog.find(name).unwrap().kind)
}

fn doc(value: serde_json::Value) -> Document {
    Document::from_value(value).unwrap()
}

fn sorted_keys(out: &[Emit]) -> Vec<String> {
    let mut keys: Vec<String> = out.iter().map(|e| e.key.clone()).collect();
    keys.sort();
    keys
}

#[test]
fn switch_view_emits_id_and_document() {
    let d = doc(json!({"_id": "0x1", "data": {"flows": ["f1", "f2"]}}));
    assert_eq!(view("switch").map(&d).unwrap(), vec![Emit::new("0x1", d.to_value())]);
}

#[test]
fn flow_view_emits_id_and_document() {
    let d = doc(json!({"_id": "f1", "data": {"match": {"in_port": 1}}, "tags": []}));
    assert_eq!(view("flow").map(&d).unwrap(), vec![Emit::new("f1", d.to_value())]);
}

#[test]
fn tags_view_without_field_emits_nothing() {
    let d = doc(json!({"_id": "f1", "data": {}}));
    assert!(view("tags").map(&d).unwrap().is_empty());
}

#[test]
fn tags_view_emits_each_tag() {
    let d = doc(json!({"_id": "f1", "tags": ["a", "b"]}));
    let out = view("tags").map(&d).unwrap();
    assert_eq!(sorted_keys(&out), vec!["a", "b"]);
    assert!(out.iter().all(|e| e.value == d.to_value()));
}

#[test]
fn tags_view_empty_list_emits_nothing() {
    let d = doc(json!({"_id": "f1", "tags": []}));
    assert!(view("tags").map(&d).unwrap().is_empty());
}

#[test]
fn tags_view_keeps_duplicates() {
    let d = doc(json!({"_id": "f1", "tags": ["a", "a"]}));
    let out = view("tags").map(&d).unwrap();
    assert_eq!(out, vec![Emit::new("a", d.to_value()), Emit::new("a", d.to_value())]);
}

#[test]
fn every_view_is_idempotent() {
    let d = doc(json!({"_id": "f7", "tags": ["edge", "core", "edge"]}));
    for name in ["switch", "flow", "tags"] {
        let v = view(name);
        let first = v.map(&d).unwrap();
        assert_eq!(v.map(&d).unwrap(), first, "view {name}");
    }
}

#[test]
fn views_are_shareable_across_threads() {
    let v: std::sync::Arc<dyn View> = std::sync::Arc::from(view("tags"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let v = v.clone();
            std::thread::spawn(move || {
                let d = doc(json!({"_id": format!("f{i}"), "tags": ["t"]}));
                v.map(&d).unwrap().len()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
}
