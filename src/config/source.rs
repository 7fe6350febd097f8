//! Lookup tables that fields are resolved against.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A read-only table of environment-style key/value strings.
///
/// [`ProcessEnv`] is what [`Field::resolve`](super::Field::resolve) and
/// [`Group::snapshot`](super::Group::snapshot) use. In-memory maps implement
/// the trait too, which keeps resolution testable without touching process
/// state.
pub trait Source {
    fn get(&self, key: &str) -> Option<String>;
}

/// The environment variable table of the running process.
///
/// Read fresh on every lookup; nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are read lossily rather than treated as absent.
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
