//! Conversions from raw environment strings to resolved values.
//!
//! A transform only ever sees strings actually read from the environment.
//! Defaults bypass it entirely.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use super::error::BoxError;

type TransformFn = dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync;

/// A shareable conversion from a raw string to a [`Value`].
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    /// Wraps a fallible conversion. Its error is handed back to the caller as-is.
    pub fn new<F, T, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Into<Value>,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |raw: &str| -> Result<Value, BoxError> {
            f(raw).map(Into::into).map_err(Into::into)
        }))
    }

    /// Wraps a conversion that cannot fail.
    pub fn from_fn<F, T>(f: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        Self(Arc::new(move |raw: &str| -> Result<Value, BoxError> {
            Ok(f(raw).into())
        }))
    }

    /// Returns the raw string unchanged.
    pub fn identity() -> Self {
        Self::from_fn(|raw: &str| raw.to_owned())
    }

    pub fn apply(&self, raw: &str) -> Result<Value, BoxError> {
        (self.0)(raw)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Parses the raw string with [`FromStr`], e.g. `parse::<f64>()` or `parse::<u16>()`.
///
/// Values with no JSON representation (`inf`, `nan`, `1e400` as floats) are
/// rejected rather than resolved to null.
pub fn parse<T>() -> Transform
where
    T: FromStr + Into<Value> + 'static,
    T::Err: Into<BoxError>,
{
    Transform::new(|raw: &str| -> Result<Value, BoxError> {
        let value: Value = raw.parse::<T>().map_err(Into::<BoxError>::into)?.into();
        if value.is_null() {
            return Err(format!("non-finite float `{raw}` cannot be represented").into());
        }
        Ok(value)
    })
}

/// Infers the most specific type for the raw string.
///
/// Tried in order: boolean (case-insensitive `true`/`false`), integer,
/// float (only when a decimal point is present), then string.
pub fn coerce() -> Transform {
    Transform::from_fn(coerce_value)
}

/// Splits on `separator` into an array of trimmed strings, dropping empty items.
pub fn list(separator: impl Into<String>) -> Transform {
    let separator = separator.into();
    assert!(!separator.is_empty(), "separator must not be empty");
    Transform::from_fn(move |raw| {
        raw.split(separator.as_str())
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect::<Vec<_>>()
    })
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::from(i);
        }
    }

    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Value::from(f);
            }
        }
    }

    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
