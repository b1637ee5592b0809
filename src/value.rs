//! Field values and the quoting rule that turns them into JSON text.
//!
//! A record's fields are heterogeneous (`"burning", true, "pi", 3.14`), so everything
//! added to a line is first lowered into a `Value`. Text-like things (strings,
//! `Display` types, errors) become `Text`; everything else is held as JSON.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// One key or value in a field list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value. Never rendered.
    #[default]
    Null,
    /// A string, or the string form of a `Display`/error value.
    Text(String),
    /// Anything JSON can express directly: numbers, booleans, arrays, objects.
    Json(serde_json::Value),
}

impl Value {
    /// Captures the `Display` form of `value`, so it renders as a quoted string
    /// rather than as structured JSON.
    #[must_use]
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// An error renders as its message text.
    #[must_use]
    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        Self::Text(err.to_string())
    }

    /// Serializes any `Serialize` type. A value that fails to serialize
    /// degrades to `Null` and is dropped from the record.
    #[must_use]
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        serde_json::to_value(value).map_or(Self::Null, Self::from)
    }

    /// Values the record leaves out entirely: nil, the empty string, and empty arrays.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        match self {
            Self::Null | Self::Json(serde_json::Value::Null) => true,
            Self::Text(s) | Self::Json(serde_json::Value::String(s)) => s.is_empty(),
            Self::Json(serde_json::Value::Array(items)) => items.is_empty(),
            Self::Json(_) => false,
        }
    }

    /// True for nil and the empty string; the export filter ignores empty arrays.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null | Self::Json(serde_json::Value::Null) => true,
            Self::Text(s) | Self::Json(serde_json::Value::String(s)) => s.is_empty(),
            Self::Json(_) => false,
        }
    }

    /// The JSON text for this value. `Null` quotes as `""`.
    #[must_use]
    pub fn to_json_text(&self) -> String {
        match self {
            Self::Null => String::from("\"\""),
            Self::Text(s) => quote_str(s),
            Self::Json(v) => v.to_string(),
        }
    }

    /// Unquoted text, as used for keys and by `export`.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Text(s) | Self::Json(serde_json::Value::String(s)) => Cow::Borrowed(s),
            Self::Json(v) => Cow::Owned(v.to_string()),
        }
    }

    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Text(s) => serde_json::Value::String(s),
            Self::Json(v) => v,
        }
    }
}

pub(crate) fn quote_str(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Self::Text(s.into_owned())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Json(serde_json::Value::Bool(b))
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Json(serde_json::Value::from(n))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        // non-finite floats have no JSON form
        serde_json::Number::from_f64(n).map_or(Self::Null, |n| Self::Json(n.into()))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        // widen through the shortest decimal form so 0.1f32 renders as 0.1
        let wide = n.to_string().parse::<f64>().unwrap_or_else(|_| f64::from(n));
        Self::from(wide)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Json(serde_json::Value::Array(
            items.into_iter().map(|item| item.into().into_json()).collect(),
        ))
    }
}

impl<T: Into<Self> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Self::from(items.to_vec())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Self::from(Vec::from(items))
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}
