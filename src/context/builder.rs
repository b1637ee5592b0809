//! Stepwise construction of a `Context`, for startup code and for tests that want
//! a private context instead of touching the process one.

use super::Context;
use crate::fields::Fields;
use crate::level::LevelTag;
use crate::sink::Sink;
use crate::time::TimeSource;
use crate::value::Value;
use std::sync::Arc;

/// Starts from the defaults: no service, unix-second clock, `info`, no tags,
/// debug off, stderr.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    context: Context,
}

impl ContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.context.service = service.into();
        self
    }

    #[must_use]
    pub fn time(mut self, time: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.context.time = Arc::new(time);
        self
    }

    /// Shares an existing clock, e.g. one picked from a [`TimeFormat`](crate::time::TimeFormat).
    #[must_use]
    pub fn time_source(mut self, time: TimeSource) -> Self {
        self.context.time = time;
        self
    }

    #[must_use]
    pub fn default_level(mut self, level: impl Into<LevelTag>) -> Self {
        self.context.default_level = level.into();
        self
    }

    /// Replaces the global tags.
    #[must_use]
    pub fn tags(mut self, tags: Fields) -> Self {
        self.context.tags = tags;
        self
    }

    /// Appends pairs to the global tags.
    #[must_use]
    pub fn tag(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.context.tags = self.context.tags.add([key.into(), value.into()]);
        self
    }

    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.context.debug = enabled;
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.context.sink = Arc::new(sink);
        self
    }

    #[must_use]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.context.sink = sink;
        self
    }

    #[must_use]
    pub fn build(self) -> Context {
        self.context
    }
}

impl From<Context> for ContextBuilder {
    fn from(context: Context) -> Self {
        Self { context }
    }
}
