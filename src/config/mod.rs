//! TOML startup configuration for the process context.
//!
//! ```toml
//! service = "billing"
//! level = "info"       # debug | info | warn | error | fatal, or a custom tag
//! debug = false
//! time = "unix"          # unix | unix_ms | rfc3339
//! output = "stderr"      # stderr | stdout | <file path>
//!
//! tags = [
//!     { key = "region", value = "eu-west-1" },
//!     { key = "build", value = 412 },
//! ]
//!
//! [services.billing-worker]
//! debug = true
//! tags = [{ key = "role", value = "worker" }]
//! ```
//!
//! Every field has a default, so an empty file produces the same context as
//! no file at all.

mod structs;

pub use structs::{ServiceOverride, TagEntry};

use crate::context::{self, Context};
use crate::fields::Fields;
use crate::internal;
use crate::level::{Level, LevelTag};
use crate::sink::{FileSink, Sink, StderrSink, StdoutSink};
use crate::time::TimeFormat;
use crate::value::Value;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable that turns debug output on (`1`/`true`) or off (`0`/`false`).
pub const DEBUG_ENV: &str = "SVC_DEBUG";

const CONFIG_FILE: &str = "svclog.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Written as `svc` on every record.
    pub service: String,
    /// Level for lines that carry none.
    pub level: String,
    /// Enables debug-level records.
    pub debug: bool,
    pub time: TimeFormat,
    /// `stderr`, `stdout`, or a file path (`~` allowed).
    pub output: String,
    /// Global tags, in order.
    pub tags: Vec<TagEntry>,
    /// Overrides keyed by service name.
    pub services: HashMap<String, ServiceOverride>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service: String::new(),
            level: Level::Info.as_str().to_string(),
            debug: false,
            time: TimeFormat::default(),
            output: "stderr".to_string(),
            tags: Vec::new(),
            services: HashMap::new(),
        }
    }
}

impl Settings {
    /// # Errors
    /// TOML syntax or type errors.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Unreadable file or invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(settings)
    }

    /// Reads `svclog.toml` from the user's config directory, if there is one.
    ///
    /// # Errors
    /// Unreadable file or invalid TOML.
    pub fn load() -> Result<Self, crate::Error> {
        internal::init();
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                internal::debug("CONFIG", "No config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `$XDG_CONFIG_HOME/svclog/svclog.toml` on Linux.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "svclog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Applies `$SVC` and `$SVC_DEBUG` on top of the file settings.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        if let Ok(service) = std::env::var(context::SERVICE_ENV)
            && !service.is_empty()
        {
            self.service = service;
        }
        if let Ok(debug) = std::env::var(DEBUG_ENV) {
            match debug.to_lowercase().as_str() {
                "1" | "true" | "on" => self.debug = true,
                "0" | "false" | "off" => self.debug = false,
                other => internal::warn("CONFIG", &format!("Ignoring {DEBUG_ENV}={other}")),
            }
        }
        self
    }

    /// Folds the `[services.<service>]` override for the configured service into
    /// the top-level settings.
    #[must_use]
    pub fn for_service(&self) -> Self {
        let mut settings = self.clone();
        let Some(over) = self.services.get(&self.service) else {
            return settings;
        };
        if let Some(ref level) = over.level {
            settings.level.clone_from(level);
        }
        if let Some(debug) = over.debug {
            settings.debug = debug;
        }
        if let Some(ref output) = over.output {
            settings.output.clone_from(output);
        }
        settings.tags.extend(over.tags.iter().cloned());
        settings
    }

    /// Builds the context these settings describe.
    ///
    /// Built-in level names (and their aliases) are normalized; any other name is
    /// kept as a caller-defined tag.
    ///
    /// # Errors
    /// A blank level and tag values that have no JSON form.
    pub fn to_context(&self) -> Result<Context, crate::Error> {
        let level = self.default_level()?;
        Ok(Context::builder()
            .service(self.service.clone())
            .default_level(level)
            .debug(self.debug)
            .time_source(self.time.source())
            .tags(self.global_tags()?)
            .shared_sink(self.sink())
            .build())
    }

    fn default_level(&self) -> Result<LevelTag, crate::Error> {
        let name = self.level.trim();
        if name.is_empty() {
            return Err(crate::Error::InvalidLevel(self.level.clone()));
        }
        Ok(name
            .parse::<Level>()
            .map_or_else(|_| LevelTag::Owned(name.to_string()), LevelTag::from))
    }

    /// Builds the context and makes it the process context.
    ///
    /// # Errors
    /// See [`to_context`](Self::to_context).
    pub fn install(&self) -> Result<(), crate::Error> {
        context::install(self.to_context()?);
        internal::debug(
            "CONFIG",
            &format!("Installed context for service '{}'", self.service),
        );
        Ok(())
    }

    fn global_tags(&self) -> Result<Fields, crate::Error> {
        let mut pairs = Vec::with_capacity(self.tags.len() * 2);
        for tag in &self.tags {
            pairs.push(Value::from(tag.key.as_str()));
            pairs.push(toml_to_value(&tag.value)?);
        }
        Ok(Fields::new().add(pairs))
    }

    fn sink(&self) -> Arc<dyn Sink> {
        match self.output.trim() {
            "" | "stderr" => Arc::new(StderrSink),
            "stdout" => Arc::new(StdoutSink),
            path => Arc::new(FileSink::new(path)),
        }
    }
}

fn toml_to_value(value: &toml::Value) -> Result<Value, crate::Error> {
    Ok(match value {
        toml::Value::String(s) => Value::from(s.as_str()),
        toml::Value::Integer(n) => Value::from(*n),
        toml::Value::Float(n) => Value::from(*n),
        toml::Value::Boolean(b) => Value::from(*b),
        toml::Value::Datetime(dt) => Value::display(dt),
        toml::Value::Array(items) => Value::from(
            items
                .iter()
                .map(toml_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        toml::Value::Table(table) => serde_json::to_value(table)
            .map(Value::from)
            .map_err(|e| crate::Error::Format(format!("tag value: {e}")))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.level, "info");
        assert_eq!(settings.output, "stderr");
        assert_eq!(settings.time, TimeFormat::Unix);
        assert!(!settings.debug);
    }

    #[test]
    fn tag_values_keep_their_types() {
        let settings = Settings::from_toml_str(
            r#"
tags = [
    { key = "region", value = "eu" },
    { key = "build", value = 412 },
    { key = "canary", value = true },
    { key = "zones", value = ["a", "b"] },
]
"#,
        )
        .unwrap();
        let tags = settings.global_tags().unwrap();
        assert_eq!(
            tags.render(),
            r#"{"region":"eu", "build":412, "canary":true, "zones":["a","b"]}"#
        );
    }

    #[test]
    fn level_aliases_normalize() {
        let settings = Settings::from_toml_str(r#"level = "WARNING""#).unwrap();
        assert_eq!(settings.to_context().unwrap().default_level(), "warn");
    }

    #[test]
    fn custom_level_passes_through() {
        let settings = Settings::from_toml_str(r#"level = "audit""#).unwrap();
        let ctx = settings.to_context().unwrap();
        assert_eq!(ctx.default_level(), "audit");
        assert!(crate::Line::new().render_in(&ctx).contains(r#""level":"audit""#));
    }

    #[test]
    fn blank_level_is_rejected() {
        let settings = Settings::from_toml_str(r#"level = " ""#).unwrap();
        let err = settings.to_context().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidLevel(l) if l == " "));
    }

    #[test]
    fn service_override_applies() {
        let settings = Settings::from_toml_str(
            r#"
service = "api"
tags = [{ key = "region", value = "eu" }]

[services.api]
level = "warn"
debug = true
tags = [{ key = "role", value = "edge" }]

[services.other]
level = "error"
"#,
        )
        .unwrap()
        .for_service();

        assert_eq!(settings.level, "warn");
        assert!(settings.debug);
        let keys: Vec<_> = settings.tags.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["region", "role"]);
    }

    #[test]
    fn syntax_error_surfaces() {
        let err = Settings::from_toml_str("level = ").unwrap_err();
        assert!(matches!(err, crate::Error::ConfigParse(_)));
    }
}
