//! Timestamp sources for the `ts` field.
//!
//! The source is called once per render, never cached, and may return any value
//! that renders as JSON: an integer epoch by default, a string for RFC 3339.

use crate::value::Value;
use chrono::{Local, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// A zero-argument clock, shared by every render in the process.
pub type TimeSource = Arc<dyn Fn() -> Value + Send + Sync>;

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_seconds() -> Value {
    Value::from(Utc::now().timestamp())
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn unix_millis() -> Value {
    Value::from(Utc::now().timestamp_millis())
}

/// Local time as RFC 3339 text.
#[must_use]
pub fn rfc3339() -> Value {
    Value::from(Local::now().to_rfc3339())
}

/// A clock frozen at `value`, mostly for tests and reproducible output.
#[must_use]
pub fn fixed(value: impl Into<Value>) -> impl Fn() -> Value + Send + Sync + 'static {
    let value = value.into();
    move || value.clone()
}

/// Named clocks selectable from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    #[default]
    Unix,
    UnixMs,
    Rfc3339,
}

impl TimeFormat {
    #[must_use]
    pub fn source(self) -> TimeSource {
        match self {
            Self::Unix => Arc::new(unix_seconds),
            Self::UnixMs => Arc::new(unix_millis),
            Self::Rfc3339 => Arc::new(rfc3339),
        }
    }
}
