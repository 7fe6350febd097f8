//! Ordered, nestable collections of configuration fields.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::debug;

use super::field::Field;
use super::snapshot::Snapshot;
use super::source::{ProcessEnv, Source};
use super::ConfigError;

/// A member of a [`Group`].
#[derive(Debug, Clone)]
pub enum Entry {
    Field(Field),
    Group(Cow<'static, Group>),
}

/// Conversion into a group [`Entry`].
///
/// Implemented for [`Field`], [`Group`] and every [`EnvConfig`] type, so a
/// nested group type can be registered by value (`inner: Database`).
pub trait IntoEntry {
    fn into_entry(self) -> Entry;
}

impl IntoEntry for Entry {
    fn into_entry(self) -> Entry {
        self
    }
}

impl IntoEntry for Field {
    fn into_entry(self) -> Entry {
        Entry::Field(self)
    }
}

impl IntoEntry for Group {
    fn into_entry(self) -> Entry {
        Entry::Group(Cow::Owned(self))
    }
}

impl<C: EnvConfig> IntoEntry for C {
    fn into_entry(self) -> Entry {
        Entry::Group(Cow::Borrowed(C::group()))
    }
}

/// Builder and resolver for an ordered set of named entries.
///
/// Entries keep the order they were registered in, and every snapshot
/// reports them in that order at every nesting level.
///
/// ## Example
///
/// ```no_run
/// use envconf::{transform, Field, Group};
///
/// let database = Group::builder()
///     .with_field("host", Field::new("DB_HOST").with_default("localhost"))
///     .with_field("port", Field::new("DB_PORT").with_default(5432).with_transform(transform::parse::<u16>()));
///
/// let app = Group::builder()
///     .with_field("name", Field::new("APP_NAME").required())
///     .with_group("database", database);
///
/// let snapshot = app.snapshot()?;
/// # Ok::<(), envconf::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Group {
    entries: Vec<(String, Entry)>,
}

impl Group {
    /// Creates an empty group.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Appends an entry.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered in this group.
    pub fn with_entry(mut self, name: impl Into<String>, entry: impl IntoEntry) -> Self {
        let name = name.into();
        assert!(
            !self.contains(&name),
            "duplicate entry `{name}` in configuration group"
        );
        self.entries.push((name, entry.into_entry()));
        self
    }

    pub fn with_field(self, name: impl Into<String>, field: Field) -> Self {
        self.with_entry(name, field)
    }

    pub fn with_group(self, name: impl Into<String>, group: Group) -> Self {
        self.with_entry(name, group)
    }

    /// Nests the shared declaration of the group type `C`.
    pub fn with_nested<C: EnvConfig>(self, name: impl Into<String>) -> Self {
        self.with_entry(name, Entry::Group(Cow::Borrowed(C::group())))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, entry)| entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Names of all entries, nested groups included, in declaration order.
    pub fn entry_names(&self) -> Vec<&str> {
        self.entries().map(|(name, _)| name).collect()
    }

    /// Names of the scalar fields only, in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.entries()
            .filter(|(_, entry)| matches!(entry, Entry::Field(_)))
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves every entry against the current process environment.
    pub fn snapshot(&self) -> Result<Snapshot, ConfigError> {
        self.snapshot_from(&ProcessEnv)
    }

    /// Resolves every entry, in order, against `source`.
    ///
    /// Stops at the first failing field; no partial snapshot is returned.
    pub fn snapshot_from<S: Source + ?Sized>(&self, source: &S) -> Result<Snapshot, ConfigError> {
        debug!(entries = self.entries.len(), "resolving configuration group");

        let mut resolved = Map::with_capacity(self.entries.len());
        for (name, entry) in &self.entries {
            let value = match entry {
                Entry::Field(field) => field.resolve_from(source)?,
                Entry::Group(group) => Value::Object(group.snapshot_from(source)?.into_map()),
            };
            resolved.insert(name.clone(), value);
        }

        Ok(Snapshot::from(resolved))
    }
}

/// A declared configuration group type.
///
/// The entry list is built once per type and shared by all of its values.
/// Implementations are normally generated by [`env_config!`](crate::env_config).
pub trait EnvConfig {
    /// The shared declaration of this group type.
    fn group() -> &'static Group;

    fn snapshot(&self) -> Result<Snapshot, ConfigError> {
        Self::group().snapshot()
    }

    fn snapshot_from<S: Source + ?Sized>(&self, source: &S) -> Result<Snapshot, ConfigError> {
        Self::group().snapshot_from(source)
    }

    fn entry_names() -> Vec<&'static str> {
        Self::group().entry_names()
    }

    fn field_names() -> Vec<&'static str> {
        Self::group().field_names()
    }
}
