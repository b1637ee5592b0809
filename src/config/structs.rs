//! Configuration struct definitions.

use serde::Deserialize;

/// One global tag. Tags are an array rather than a table so their order is kept.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagEntry {
    pub key: String,
    pub value: toml::Value,
}

/// Per-service overrides, applied by `Settings::for_service`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceOverride {
    /// Default level for this service.
    pub level: Option<String>,
    pub debug: Option<bool>,
    /// Output target for this service.
    pub output: Option<String>,
    /// Appended after the shared tags.
    pub tags: Vec<TagEntry>,
}
