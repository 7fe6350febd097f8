//! Environment-backed configuration fields and groups.

mod error;
mod field;
mod group;
mod snapshot;
mod source;
pub mod transform;

pub use error::{BoxError, ConfigError};
pub use field::Field;
pub use group::{EnvConfig, Entry, Group, IntoEntry};
pub use snapshot::Snapshot;
pub use source::{ProcessEnv, Source};
pub use transform::Transform;
