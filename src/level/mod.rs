//! Severity tags written into the `level` field of every record.
//!
//! A line carries its level as free text so services can invent their own tags
//! ("audit", "trace"); `Level` names the ones svclog itself treats specially.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The level text stored on a line. Empty means "use the context's default level".
pub type LevelTag = Cow<'static, str>;

/// The built-in levels. `Debug` is gated by the context's debug flag and `Fatal`
/// escalates after writing; the rest are plain tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Only written when debug output is switched on.
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    /// Written, then raised as a [`FatalSignal`](crate::fatal::FatalSignal).
    Fatal = 4,
}

impl Level {
    /// Lowercase, as it appears in rendered records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    #[must_use]
    pub const fn tag(self) -> LevelTag {
        Cow::Borrowed(self.as_str())
    }

    /// Every built-in level, least severe first.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
        ]
    }

    /// Matches a rendered tag back to a built-in level, exactly.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().into_iter().find(|level| level.as_str() == tag)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Level> for LevelTag {
    fn from(level: Level) -> Self {
        level.tag()
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl From<ParseLevelError> for crate::Error {
    fn from(e: ParseLevelError) -> Self {
        Self::InvalidLevel(e.0)
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "fatal" | "crit" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
