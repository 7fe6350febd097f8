//! A single configuration entry bound to one environment variable.

use serde_json::Value;
use tracing::{debug, trace};

use super::source::{ProcessEnv, Source};
use super::transform::Transform;
use super::ConfigError;

/// Binding from a configuration entry to one environment variable.
///
/// Resolution order:
/// 1. variable present: the transform is applied to the raw string
/// 2. variable absent and [`required`](Self::required): [`ConfigError::RequiredArgumentMissed`]
/// 3. variable absent with a default: the default, untransformed
/// 4. otherwise [`Value::Null`]
///
/// A required field never falls back to its default.
///
/// ## Example
///
/// ```no_run
/// use envconf::{transform, Field};
///
/// let port = Field::new("APP_PORT")
///     .with_default(8080)
///     .with_transform(transform::parse::<u16>());
///
/// let value = port.resolve()?;
/// # Ok::<(), envconf::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Field {
    source_key: String,
    required: bool,
    default: Option<Value>,
    transform: Transform,
}

impl Field {
    /// Creates an optional field with no default and the identity transform.
    pub fn new(source_key: impl Into<String>) -> Self {
        Self {
            source_key: source_key.into(),
            required: false,
            default: None,
            transform: Transform::identity(),
        }
    }

    /// Marks the field as required. Any default is ignored from then on.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value returned verbatim when the variable is absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Shorthand for [`with_transform`](Self::with_transform) with a fallible closure.
    pub fn map<F, T, E>(self, f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Into<Value>,
        E: Into<super::error::BoxError>,
    {
        self.with_transform(Transform::new(f))
    }

    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Resolves against the current process environment.
    pub fn resolve(&self) -> Result<Value, ConfigError> {
        self.resolve_from(&ProcessEnv)
    }

    /// Resolves against an arbitrary lookup table.
    pub fn resolve_from<S: Source + ?Sized>(&self, source: &S) -> Result<Value, ConfigError> {
        let key = self.source_key.as_str();
        trace!(key, "resolving configuration field");

        match source.get(key) {
            Some(raw) => self.transform.apply(&raw).map_err(|e| {
                debug!(key, error = %e, "transform rejected environment value");
                ConfigError::Transform(e)
            }),
            None if self.required => {
                debug!(key, "required environment variable is missing");
                Err(ConfigError::RequiredArgumentMissed(self.source_key.clone()))
            }
            None => {
                debug!(key, has_default = self.default.is_some(), "environment variable not set");
                Ok(self.default.clone().unwrap_or(Value::Null))
            }
        }
    }
}
