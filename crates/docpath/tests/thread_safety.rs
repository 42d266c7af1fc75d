//! Thread safety tests for docpath.
//!
//! Root contexts are shared across threads; concurrent construction of the
//! same path must converge on one instance.

use docpath::{keys, Path, RootContext, Template};
use serde_json::json;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_handles_are_send_sync() {
    assert_send_sync::<RootContext>();
    assert_send_sync::<Path>();
    assert_send_sync::<Template>();
}

#[test]
fn test_concurrent_construction_converges() {
    let ctx = RootContext::new();
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let ctx = ctx.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ctx.root().sub_path(keys!["shared", 0usize, "leaf"])
            })
        })
        .collect();

    let paths: Vec<Path> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for p in &paths[1..] {
        assert!(p.ptr_eq(&paths[0]));
    }
    assert!(paths[0].ptr_eq(&ctx.root().sub_path(keys!["shared", 0usize, "leaf"])));
}

#[test]
fn test_concurrent_templates_converge() {
    let ctx = RootContext::new();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let root = ctx.root();
            thread::spawn(move || root.sub_path(keys!["items"]).dynamic_child())
        })
        .collect();

    let templates: Vec<Template> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(templates.iter().all(|t| t.ptr_eq(&templates[0])));
    assert_eq!(ctx.template_count(), 1);
}

#[test]
fn test_serialized_writes_through_shared_paths() {
    let ctx = RootContext::new();
    let doc = Arc::new(Mutex::new(json!({})));
    let slots = ctx.root().sub_path(keys!["slots"]).dynamic_child();

    let handles: Vec<_> = (0..10usize)
        .map(|i| {
            let doc = Arc::clone(&doc);
            let slots = slots.clone();
            thread::spawn(move || {
                let p = slots.get_path(keys![format!("s{i}")]).unwrap();
                p.set_value(&mut *doc.lock().unwrap(), json!(i)).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let doc = doc.lock().unwrap();
    assert_eq!(slots.enumerate_all_paths(&*doc).len(), 10);
}
