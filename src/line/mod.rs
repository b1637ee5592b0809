//! The log line builder.
//!
//! A `Line` is a plain value: level tag, instance fields, message, and an optional
//! hook. Every mutator borrows the receiver and returns a new line, so a partially
//! configured line can be stored in a `static`/`const` or shared across threads and
//! specialised per call site without one caller's fields leaking into another's.
//!
//! ```
//! use svclog::{Context, ERROR, fields, sink::MemorySink, time};
//!
//! let out = MemorySink::new();
//! let ctx = Context::builder()
//!     .service("ex")
//!     .time(time::fixed(1000))
//!     .sink(out.clone())
//!     .build();
//!
//! let db = ERROR.add(fields!["component", "db"]);
//! db.print_in(&ctx, format_args!("query failed: {}", "timeout"));
//!
//! assert_eq!(
//!     out.last().unwrap(),
//!     r#"{"svc":"ex", "ts":1000, "level":"error", "component":"db", "msg":"query failed: timeout"}"#
//! );
//! ```

mod hook;

pub use hook::Hook;

use crate::context::{self, Context};
use crate::fatal;
use crate::fields::{Fields, ObjectWriter};
use crate::internal;
use crate::level::{Level, LevelTag};
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;

/// One potential log record.
#[derive(Debug, Clone, Default)]
pub struct Line {
    level: LevelTag,
    fields: Fields,
    msg: String,
    hook: Option<Hook>,
}

impl Line {
    /// A line with no level; it renders at the context's default level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: Cow::Borrowed(""),
            fields: Fields::new(),
            msg: String::new(),
            hook: None,
        }
    }

    #[must_use]
    pub const fn at(level: Level) -> Self {
        Self {
            level: level.tag(),
            fields: Fields::new(),
            msg: String::new(),
            hook: None,
        }
    }

    /// The level tag as set on the line, possibly empty.
    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    #[must_use]
    pub const fn hook(&self) -> Option<&Hook> {
        self.hook.as_ref()
    }

    /// Returns a copy with `pairs` appended to the instance fields.
    ///
    /// ```
    /// use svclog::{INFO, fields};
    ///
    /// let train = INFO.add(fields!["railway", "east", "stop", 5]);
    /// assert_eq!(train.fields().len(), 2);
    /// assert!(INFO.fields().is_empty());
    /// ```
    #[must_use]
    pub fn add<I>(&self, pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            fields: self.fields.add(pairs),
            ..self.clone()
        }
    }

    /// Returns a copy with one more pair.
    #[must_use]
    pub fn with(&self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.add([key.into(), value.into()])
    }

    /// Returns a copy tagged with `level`, which may be a [`Level`] or any text.
    #[must_use]
    pub fn as_level(&self, level: impl Into<LevelTag>) -> Self {
        Self {
            level: level.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn info(&self) -> Self {
        self.as_level(Level::Info)
    }

    #[must_use]
    pub fn warn(&self) -> Self {
        self.as_level(Level::Warn)
    }

    #[must_use]
    pub fn error(&self) -> Self {
        self.as_level(Level::Error)
    }

    #[must_use]
    pub fn fatal(&self) -> Self {
        self.as_level(Level::Fatal)
    }

    #[must_use]
    pub fn debug(&self) -> Self {
        self.as_level(Level::Debug)
    }

    /// Returns a copy that runs `hook` once at the start of every render.
    ///
    /// The hook gets the line with the hook detached and its return value is what
    /// gets rendered. Rendering a *different* line from inside the hook is fine;
    /// rendering a line that carries this same hook renders it without running the
    /// hook again.
    ///
    /// ```
    /// use svclog::{Context, WARN, time};
    ///
    /// let ctx = Context::builder().service("ex").time(time::fixed(1)).build();
    /// let line = WARN.with_hook(|ln| ln.with("caller", "main.rs:10"));
    /// assert_eq!(
    ///     line.render_in(&ctx),
    ///     r#"{"svc":"ex", "ts":1, "level":"warn", "caller":"main.rs:10", "msg":""}"#
    /// );
    /// ```
    #[must_use]
    pub fn with_hook(&self, hook: impl Fn(Self) -> Self + Send + Sync + 'static) -> Self {
        self.set_hook(Some(Hook::new(hook)))
    }

    /// Returns a copy with `hook` attached, or with no hook for `None`.
    #[must_use]
    pub fn set_hook(&self, hook: Option<Hook>) -> Self {
        Self {
            hook,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn without_hook(&self) -> Self {
        self.set_hook(None)
    }

    /// Returns a copy with the message set. Nothing is rendered or written.
    ///
    /// Pass `format_args!` for templated messages.
    #[must_use]
    pub fn msg(&self, message: impl fmt::Display) -> Self {
        Self {
            msg: message.to_string(),
            ..self.clone()
        }
    }

    /// Renders against the process context.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_in(&context::current())
    }

    /// Renders the record:
    /// `{"svc":..., "ts":..., "level":..., <global tags>, <fields>, "msg":...}`.
    ///
    /// The hook, if any, runs first. The clock is read on every call.
    #[must_use]
    pub fn render_in(&self, ctx: &Context) -> String {
        match &self.hook {
            Some(hook) => hook.fire(self.clone()).serialize(ctx),
            None => self.serialize(ctx),
        }
    }

    fn serialize(&self, ctx: &Context) -> String {
        let level = ctx.resolve_level(&self.level);

        let mut object = ObjectWriter::new();
        object.field("svc", &Value::from(ctx.service()));
        object.field("ts", &ctx.now());
        object.field("level", &Value::from(level));
        object.fields(ctx.tags());
        object.fields(&self.fields);
        object.pair("msg", &Value::from(self.msg.as_str()));
        object.finish()
    }

    /// Global tags followed by the instance fields, as plain text.
    #[must_use]
    pub fn export(&self) -> Vec<(String, String)> {
        self.export_in(&context::current())
    }

    #[must_use]
    pub fn export_in(&self, ctx: &Context) -> Vec<(String, String)> {
        ctx.tags().concat(&self.fields).export()
    }

    /// Sets the message, renders, and writes to the process sink.
    ///
    /// Sink failures are reported through svclog's internal diagnostics and
    /// otherwise ignored. A `fatal` line panics with a
    /// [`FatalSignal`](crate::fatal::FatalSignal) after writing.
    pub fn print(&self, message: impl fmt::Display) {
        self.print_in(&context::current(), message);
    }

    pub fn print_in(&self, ctx: &Context, message: impl fmt::Display) {
        if let Err(e) = self.try_print_in(ctx, message) {
            internal::warn("LINE", &format!("Sink write failed: {e}"));
        }
    }

    /// [`print`](Self::print), returning the sink's error.
    ///
    /// # Errors
    /// I/O errors from the active sink.
    pub fn try_print(&self, message: impl fmt::Display) -> Result<(), crate::Error> {
        self.try_print_in(&context::current(), message)
    }

    /// Writes the record to `ctx`'s sink.
    ///
    /// A debug line with debug output disabled returns immediately: no hook, no
    /// clock, no write. A fatal line flushes the sink and then raises
    /// [`FatalSignal`](crate::fatal::FatalSignal) once the write has been attempted,
    /// whether or not it succeeded.
    ///
    /// # Errors
    /// I/O errors from the sink.
    pub fn try_print_in(
        &self,
        ctx: &Context,
        message: impl fmt::Display,
    ) -> Result<(), crate::Error> {
        let level = ctx.resolve_level(&self.level);
        if level == Level::Debug.as_str() && !ctx.debug_enabled() {
            return Ok(());
        }
        let fatal = level == Level::Fatal.as_str();

        let line = self.msg(message);
        let written = ctx.sink().write_line(&line.render_in(ctx));

        if fatal {
            if let Err(e) = ctx.sink().flush() {
                internal::warn("LINE", &format!("Sink flush failed: {e}"));
            }
            fatal::raise(line.msg);
        }
        written
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
