//! `svclog` - leveled, single-line JSON logging for small services.
//!
//! There is no logger object to construct or pass around. Start from one of the
//! level lines ([`INFO`], [`WARN`], [`ERROR`], [`FATAL`], [`DEBUG`]), add fields,
//! and print:
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
//! let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "EOF");
//! ERROR
//!     .add(fields!["env", "prod", "burning", true])
//!     .print_in(&ctx, format_args!("error: {eof}"));
//!
//! assert_eq!(
//!     out.last().unwrap(),
//!     r#"{"svc":"ex", "ts":1000, "level":"error", "env":"prod", "burning":true, "msg":"error: EOF"}"#
//! );
//! ```
//!
//! Lines are values: every method returns a new line and leaves the receiver
//! untouched, so a configured base line can be kept around and shared between
//! threads.
//!
//! Process-wide settings (service name, clock, default level, global tags, debug
//! flag, output) live in a [`Context`]. Set them once at startup through the
//! accessors in [`context`] or from a TOML file via [`config::Settings`]; the
//! `print`/`render` methods read them, and the `*_in` variants take an explicit
//! context instead.
//!
//! Fatal lines unwind with a [`fatal::FatalSignal`] after writing. Wrap `main`
//! in [`trap`] to turn that into `exit(1)` once cleanup has run.

pub mod config;
pub mod context;
mod error;
pub mod fatal;
pub mod fields;
pub mod internal;
pub mod level;
pub mod line;
pub mod sink;
pub mod time;
pub mod value;

pub use context::{Context, ContextBuilder, set_output};
pub use error::Error;
pub use fatal::{FatalSignal, trap};
pub use fields::Fields;
pub use level::{Level, LevelTag};
pub use line::{Hook, Line};
pub use value::Value;

use std::fmt;

pub const INFO: Line = Line::at(Level::Info);
pub const WARN: Line = Line::at(Level::Warn);
pub const ERROR: Line = Line::at(Level::Error);
/// Writes, then raises [`FatalSignal`].
pub const FATAL: Line = Line::at(Level::Fatal);
/// Written only while the context's debug flag is on.
pub const DEBUG: Line = Line::at(Level::Debug);

/// Prints `message` at the context's default level.
pub fn printf(message: impl fmt::Display) {
    Line::new().print(message);
}

/// Prints `message` as a fatal record, then raises [`FatalSignal`].
pub fn fatalf(message: impl fmt::Display) -> ! {
    FATAL.print(message);
    unreachable!("fatal lines always raise")
}

/// A line at the default level carrying `pairs`.
#[must_use]
pub fn new<I>(pairs: I) -> Line
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Line::new().add(pairs)
}

/// Builds a `Vec<Value>` from alternating keys and values of mixed types.
///
/// ```
/// let pairs = svclog::fields!["user", "ada", "admin", true, "logins", 3];
/// assert_eq!(pairs.len(), 6);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

/// `info!("fmt", args...)` prints at info level through the process context.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::INFO.print(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::WARN.print(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::ERROR.print(::std::format_args!($($arg)+))
    };
}

/// Arguments are formatted only when debug output is on.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::DEBUG.print(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatalf(::std::format_args!($($arg)+))
    };
}
