//! Fatal escalation.
//!
//! A fatal line is written like any other and then unwinds with a [`FatalSignal`]
//! payload instead of exiting on the spot, so destructors and cleanup guards on the
//! way up still run. [`trap`] at the top of `main` turns the signal into
//! `exit(1)`; panics from anywhere else pass through it untouched.
//!
//! ```no_run
//! struct Lockfile;
//!
//! impl Drop for Lockfile {
//!     fn drop(&mut self) {
//!         // still runs: the fatal signal unwinds through here
//!     }
//! }
//!
//! fn main() {
//!     svclog::trap(|| {
//!         let _lock = Lockfile;
//!         svclog::FATAL.print("cannot open database");
//!     });
//! }
//! ```

use crate::context;
use crate::internal;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::Once;

/// Exit status used by [`trap`].
pub const EXIT_CODE: i32 = 1;

/// Panic payload raised after a fatal record is written. Carries the formatted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalSignal(String);

impl FatalSignal {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FatalSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal: {}", self.0)
    }
}

impl std::error::Error for FatalSignal {}

pub(crate) fn raise(message: String) -> ! {
    silence_fatal_panics();
    panic::panic_any(FatalSignal(message))
}

/// Runs `f`, returning the fatal signal as an error if one unwinds out of it.
/// Other panics are resumed.
///
/// # Errors
/// The [`FatalSignal`] raised by a fatal line inside `f`.
pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, FatalSignal> {
    silence_fatal_panics();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<FatalSignal>() {
            Ok(signal) => Err(*signal),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Runs `f`; a fatal signal escaping it exits the process with [`EXIT_CODE`].
///
/// The process sink is flushed before exiting, since `exit` runs no destructors.
pub fn trap<T>(f: impl FnOnce() -> T) -> T {
    catch(f).unwrap_or_else(|_| {
        if let Err(e) = context::current().sink().flush() {
            internal::warn("FATAL", &format!("Sink flush failed: {e}"));
        }
        process::exit(EXIT_CODE)
    })
}

/// The record is already on the sink, so the default hook's
/// "panicked at" report would only duplicate it.
fn silence_fatal_panics() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if info.payload().is::<FatalSignal>() {
                return;
            }
            previous(info);
        }));
    });
}
