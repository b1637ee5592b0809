//! svclog's own diagnostics: config loading, file sink trouble, swallowed write errors.
//!
//! Off unless `SVCLOG_INTERNAL` is set (to anything but `0`/`false`) or [`enable`]
//! is called. Records go to stderr through the regular line renderer, with
//! `svc` set to `svclog` and a `scope` field naming the subsystem.
//!
//! Uses `OnceLock` so the context is built exactly once, even if several entry
//! points race to initialise it.

use crate::context::Context;
use crate::level::Level;
use crate::line::Line;
use crate::sink::StderrSink;
use crate::time;
use std::sync::OnceLock;

/// Environment switch for internal diagnostics.
pub const INTERNAL_ENV: &str = "SVCLOG_INTERNAL";

static INTERNAL_CONTEXT: OnceLock<Context> = OnceLock::new();

/// Turns diagnostics on if the environment asks for it. Later calls are no-ops.
pub fn init() {
    let wanted = std::env::var(INTERNAL_ENV)
        .is_ok_and(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"));
    if wanted {
        enable();
    }
}

/// Turns diagnostics on regardless of the environment.
pub fn enable() {
    let was_init = INTERNAL_CONTEXT.get().is_some();
    INTERNAL_CONTEXT.get_or_init(build_internal_context);
    if !was_init {
        debug("INTERNAL", "Internal diagnostics enabled");
    }
}

#[must_use]
pub fn is_enabled() -> bool {
    INTERNAL_CONTEXT.get().is_some()
}

fn build_internal_context() -> Context {
    Context::builder()
        .service("svclog")
        .time(time::rfc3339)
        .debug(true)
        .sink(StderrSink)
        .build()
}

/// Pre-init calls silently vanish.
fn log(level: Level, scope: &str, msg: &str) {
    if let Some(ctx) = INTERNAL_CONTEXT.get() {
        // never fatal, and a failing stderr has nowhere left to report to
        let _ = Line::at(level).with("scope", scope).try_print_in(ctx, msg);
    }
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
