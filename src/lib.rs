//! Typed configuration resolved from environment variables.
//!
//! A configuration is declared once as an ordered [`Group`] of named
//! entries. Each entry is either a [`Field`] bound to one environment
//! variable or another, nested group. Calling [`Group::snapshot`] (or
//! [`EnvConfig::snapshot`]) reads the environment and returns a
//! [`Snapshot`]: an ordered, serializable tree of resolved values.
//!
//! Nothing is cached. Every snapshot reflects the environment at the time
//! it is taken.

pub mod config;
mod macros;

pub use config::{
    transform, BoxError, ConfigError, Entry, EnvConfig, Field, Group, IntoEntry, ProcessEnv,
    Snapshot, Source, Transform,
};
