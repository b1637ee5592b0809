//! Process-wide logging context: service name, clock, default level, global tags,
//! debug gate, and output sink.
//!
//! A `Context` is an immutable value. The process holds one behind an `Arc`, and
//! the setters below swap in a modified copy rather than mutating it, so a render
//! that already grabbed the current context keeps a consistent view. The setters
//! are meant for startup; nothing orders them against renders running on other
//! threads.

mod builder;

pub use builder::ContextBuilder;

use crate::fields::Fields;
use crate::internal;
use crate::level::{Level, LevelTag};
use crate::sink::{Sink, StderrSink};
use crate::time::{self, TimeSource};
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Environment variable holding the default service name.
pub const SERVICE_ENV: &str = "SVC";

/// Everything a render reads besides the line itself.
#[derive(Clone)]
pub struct Context {
    pub(crate) service: String,
    pub(crate) time: TimeSource,
    pub(crate) default_level: LevelTag,
    pub(crate) tags: Fields,
    pub(crate) debug: bool,
    pub(crate) sink: Arc<dyn Sink>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            service: String::new(),
            time: Arc::new(time::unix_seconds),
            default_level: Level::Info.tag(),
            tags: Fields::new(),
            debug: false,
            sink: Arc::new(StderrSink),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("service", &self.service)
            .field("default_level", &self.default_level)
            .field("tags", &self.tags)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Context {
    #[must_use]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// The defaults, with the service name taken from `$SVC`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            service: std::env::var(SERVICE_ENV).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// A builder seeded with this context's settings.
    #[must_use]
    pub fn to_builder(&self) -> ContextBuilder {
        ContextBuilder::from(self.clone())
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Evaluates the clock.
    #[must_use]
    pub fn now(&self) -> Value {
        (self.time)()
    }

    #[must_use]
    pub fn default_level(&self) -> &str {
        &self.default_level
    }

    #[must_use]
    pub const fn tags(&self) -> &Fields {
        &self.tags
    }

    #[must_use]
    pub const fn debug_enabled(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Resolves a line's level, substituting the default for an empty tag.
    pub(crate) fn resolve_level<'a>(&'a self, tag: &'a str) -> &'a str {
        if tag.is_empty() {
            &self.default_level
        } else {
            tag
        }
    }
}

static CURRENT: LazyLock<RwLock<Arc<Context>>> = LazyLock::new(|| {
    internal::init();
    RwLock::new(Arc::new(Context::from_env()))
});

/// The context renders use when none is passed explicitly.
#[must_use]
pub fn current() -> Arc<Context> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process context, returning the one it replaced.
pub fn install(context: Context) -> Arc<Context> {
    let mut slot = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, Arc::new(context))
}

/// Copies the current context, applies `change`, and installs the result.
/// Returns the context that was replaced.
pub fn update(change: impl FnOnce(&mut Context)) -> Arc<Context> {
    let mut slot = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    let mut next = Context::clone(&slot);
    change(&mut next);
    std::mem::replace(&mut *slot, Arc::new(next))
}

pub fn set_service(service: impl Into<String>) {
    let service = service.into();
    update(|ctx| ctx.service = service);
}

pub fn set_time(time: impl Fn() -> Value + Send + Sync + 'static) {
    let time: TimeSource = Arc::new(time);
    update(|ctx| ctx.time = time);
}

/// Level used by lines that carry no level of their own.
pub fn set_default_level(level: impl Into<LevelTag>) {
    let level = level.into();
    update(|ctx| ctx.default_level = level);
}

/// Replaces the global tags written on every record.
pub fn set_tags(tags: Fields) {
    update(|ctx| ctx.tags = tags);
}

/// Appends to the global tags.
pub fn add_tags<I>(pairs: I)
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let extra = Fields::new().add(pairs);
    update(|ctx| ctx.tags = ctx.tags.concat(&extra));
}

pub fn set_debug(enabled: bool) {
    update(|ctx| ctx.debug = enabled);
}

/// Swaps the active sink, returning the previous one so it can be restored.
pub fn set_output(sink: impl Sink + 'static) -> Arc<dyn Sink> {
    let sink: Arc<dyn Sink> = Arc::new(sink);
    let previous = update(|ctx| ctx.sink = sink);
    Arc::clone(&previous.sink)
}

/// Like [`set_output`], for a sink that is already shared.
pub fn set_shared_output(sink: Arc<dyn Sink>) -> Arc<dyn Sink> {
    let previous = update(|ctx| ctx.sink = sink);
    Arc::clone(&previous.sink)
}
