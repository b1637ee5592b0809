//! Tests for deferred hooks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use svclog::{Context, ERROR, INFO, Line, WARN, time};

fn ctx() -> Context {
    Context::builder()
        .service("ex")
        .time(time::fixed(1000))
        .build()
}

fn counting(calls: &Arc<AtomicUsize>) -> impl Fn(Line) -> Line + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |ln| {
        calls.fetch_add(1, Ordering::SeqCst);
        ln
    }
}

#[test]
fn hook_fires_exactly_once_per_render() {
    let calls = Arc::new(AtomicUsize::new(0));
    let line = INFO.with("k", "v").with_hook(counting(&calls));
    let c = ctx();

    let first = line.render_in(&c);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let second = line.render_in(&c);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    assert_eq!(first, second);
    assert_eq!(line.fields().len(), 1);
    assert_eq!(line.level(), "info");
}

#[test]
fn hook_injects_fields_after_instance_fields() {
    let line = WARN
        .with("user", "ada")
        .with_hook(|ln| ln.with("caller", "handler.rs:42"));
    assert_eq!(
        line.msg("slow").render_in(&ctx()),
        r#"{"svc":"ex", "ts":1000, "level":"warn", "user":"ada", "caller":"handler.rs:42", "msg":"slow"}"#
    );
    assert_eq!(line.fields().len(), 1);
}

#[test]
fn hook_result_replaces_working_copy() {
    let line = INFO.with_hook(|ln| ln.error().msg("rewritten"));
    assert_eq!(
        line.render_in(&ctx()),
        r#"{"svc":"ex", "ts":1000, "level":"error", "msg":"rewritten"}"#
    );
    assert_eq!(line.level(), "info");
    assert_eq!(line.message(), "");
}

#[test]
fn hook_survives_copies() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = INFO.with_hook(counting(&calls));
    let derived = base.with("a", 1).error().msg("m");
    assert!(derived.hook().is_some());

    let _ = derived.render_in(&ctx());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn without_hook_clears_it() {
    let calls = Arc::new(AtomicUsize::new(0));
    let line = INFO.with_hook(counting(&calls)).without_hook();
    assert!(line.hook().is_none());
    let _ = line.render_in(&ctx());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn hook_may_render_another_line() {
    let c = ctx();
    let inner_ctx = c.clone();
    let line = INFO.with_hook(move |ln| {
        let inner = ERROR.with("inner", true).render_in(&inner_ctx);
        ln.with("inner_len", inner.len())
    });
    let out = line.render_in(&c);
    assert!(out.contains(r#""inner_len":"#));
}

#[test]
fn rendering_own_line_inside_hook_does_not_recurse() {
    let calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<OnceLock<Line>> = Arc::new(OnceLock::new());

    let c = ctx();
    let hook_ctx = c.clone();
    let hook_slot = Arc::clone(&slot);
    let hook_calls = Arc::clone(&calls);
    let line = INFO.with_hook(move |ln| {
        hook_calls.fetch_add(1, Ordering::SeqCst);
        let nested = hook_slot
            .get()
            .map(|me| me.render_in(&hook_ctx))
            .unwrap_or_default();
        ln.with("nested", nested)
    });
    slot.set(line.clone()).unwrap();

    let out = line.render_in(&c);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(out.contains(r#""nested":"{\"svc\":\"ex\""#));

    // the guard is released once the hook returns
    let _ = line.render_in(&c);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn panicking_hook_releases_guard() {
    let armed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&armed);
    let line = INFO.with_hook(move |ln| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("first render fails");
        }
        ln
    });

    let c = ctx();
    let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| line.render_in(&c)));
    assert!(first.is_err());
    assert!(!line.hook().unwrap().is_firing());

    let _ = line.render_in(&c);
    assert_eq!(armed.load(Ordering::SeqCst), 2);
}
