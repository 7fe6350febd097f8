use thiserror::Error;

/// Boxed error produced by a [`Transform`](super::Transform).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Configuration variable \"{0}\" does not found in environment")]
    RequiredArgumentMissed(String),

    /// Failure raised by a field's transform, passed through untouched.
    #[error(transparent)]
    Transform(BoxError),

    #[error("failed to deserialize snapshot: {0}")]
    DeserializeError(#[from] serde_json::Error),

    #[error("failed to render snapshot as TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Name of the missing variable, if this is a [`RequiredArgumentMissed`](Self::RequiredArgumentMissed).
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::RequiredArgumentMissed(key) => Some(key),
            _ => None,
        }
    }
}
