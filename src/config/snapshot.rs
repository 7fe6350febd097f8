//! Fully resolved configuration values.

use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

use super::ConfigError;

/// Ordered mapping from entry name to resolved value.
///
/// Holds no references back into the group it came from. Nested groups
/// appear as nested objects under their entry name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a dotted path such as `database.port`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserializes the snapshot into a typed configuration struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        T::deserialize(Value::Object(self.0.clone())).map_err(ConfigError::DeserializeError)
    }

    /// Renders the snapshot as a TOML document.
    ///
    /// TOML writes plain values before tables, so entry order is kept within
    /// the scalars and within the nested tables of each level, not across
    /// them. TOML has no null: unresolved optional entries and null array
    /// items are left out. Integers above `i64::MAX` fail with
    /// [`ConfigError::SerializeError`].
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let table = to_toml_table(&self.0)?;
        Ok(toml::to_string(&table)?)
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Snapshot> for Value {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.into_value()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn to_toml_table(map: &Map<String, Value>) -> Result<toml::Table, toml::ser::Error> {
    let mut table = toml::Table::new();
    for (key, value) in map {
        if let Some(value) = to_toml_value(value)? {
            table.insert(key.clone(), value);
        }
    }
    Ok(table)
}

fn to_toml_value(value: &Value) -> Result<Option<toml::Value>, toml::ser::Error> {
    let value = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => toml::Value::Integer(i),
            None if n.is_u64() => {
                return Err(toml::ser::Error::custom(format!(
                    "integer {n} is out of range for TOML"
                )));
            }
            None => toml::Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for item in items {
                if let Some(item) = to_toml_value(item)? {
                    array.push(item);
                }
            }
            toml::Value::Array(array)
        }
        Value::Object(map) => toml::Value::Table(to_toml_table(map)?),
    };
    Ok(Some(value))
}
