//! Ordered key/value lists and the object-shaped rendering shared by every record.
//!
//! A `Fields` is a flat list where even positions are keys and odd positions are
//! values. It only ever grows by copying: `add` builds a fresh list and leaves the
//! receiver's storage alone, so a base list can be shared across threads and
//! extended independently by each of them.

use crate::value::{Value, quote_str};
use std::fmt;

/// An append-only list of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<Value>);

impl Fields {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a new list holding the receiver's pairs followed by `pairs`.
    ///
    /// `pairs` alternates key, value. A trailing key without a value is dropped
    /// by this call, so it is not paired with the first value of a later `add`.
    ///
    /// ```
    /// use svclog::{Fields, fields};
    ///
    /// let base = Fields::new().add(fields!["railway", "east"]);
    /// let stop = base.add(fields!["stop", 5]);
    /// assert_eq!(base.len(), 1);
    /// assert_eq!(stop.to_string(), r#"{"railway":"east", "stop":5}"#);
    /// ```
    #[must_use]
    pub fn add<I>(&self, pairs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut extra: Vec<Value> = pairs.into_iter().map(Into::into).collect();
        if extra.len() % 2 == 1 {
            extra.pop();
        }
        let mut values = Vec::with_capacity(self.0.len() + extra.len());
        values.extend_from_slice(&self.0);
        values.append(&mut extra);
        Self(values)
    }

    /// Concatenates two lists into a new one.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut values = Vec::with_capacity(self.0.len() + other.0.len());
        values.extend_from_slice(&self.0);
        values.extend_from_slice(&other.0);
        Self(values)
    }

    /// Number of complete pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.len() < 2
    }

    /// Iterates complete pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Renders `{"k1":v1, "k2":v2}` in insertion order.
    ///
    /// Pairs whose value is nil, empty, or an empty array are left out. Repeated
    /// keys are all written; nothing is merged.
    #[must_use]
    pub fn render(&self) -> String {
        let mut object = ObjectWriter::new();
        object.fields(self);
        object.finish()
    }

    /// Plain-text pairs for consumers that don't want JSON.
    ///
    /// A pair is skipped when its key is empty or its value is nil or the empty
    /// string. Empty arrays are kept and exported as `[]`.
    #[must_use]
    pub fn export(&self) -> Vec<(String, String)> {
        self.pairs()
            .filter(|(_, val)| !val.is_blank())
            .map(|(key, val)| (key.as_text().into_owned(), val.as_text().into_owned()))
            .filter(|(key, val)| !key.is_empty() && !val.is_empty())
            .collect()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<V: Into<Value>> FromIterator<V> for Fields {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new().add(iter)
    }
}

/// Incremental writer for one JSON-object-shaped record.
pub(crate) struct ObjectWriter {
    buf: String,
    empty: bool,
}

impl ObjectWriter {
    pub(crate) fn new() -> Self {
        let mut buf = String::with_capacity(128);
        buf.push('{');
        Self { buf, empty: true }
    }

    /// Writes one pair unconditionally.
    pub(crate) fn pair(&mut self, key: &str, val: &Value) {
        if !self.empty {
            self.buf.push_str(", ");
        }
        self.empty = false;
        self.buf.push_str(&quote_str(key));
        self.buf.push(':');
        self.buf.push_str(&val.to_json_text());
    }

    /// Writes the pair unless its value is suppressed.
    pub(crate) fn field(&mut self, key: &str, val: &Value) {
        if !val.is_suppressed() {
            self.pair(key, val);
        }
    }

    pub(crate) fn fields(&mut self, fields: &Fields) {
        for (key, val) in fields.pairs() {
            self.field(&key.as_text(), val);
        }
    }

    pub(crate) fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }
}
