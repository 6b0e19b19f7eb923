//! Named parameters in a single flat map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat store of named parameters of one value type.
///
/// A key that is present always has an associated value; the value may itself
/// be an in-band "no value" marker of `V` (for example `serde_json::Value::Null`
/// or `Option::None`), which the accessors keep distinguishable from a key that
/// was never set. No operation can fail: absence is reported as `None` or by
/// falling back to a caller-supplied default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore<V> {
    parameters: HashMap<String, V>,
}

impl<V> ParameterStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            parameters: HashMap::new(),
        }
    }

    /// Creates a store seeded from `initial`. The entries are copied in; the
    /// store never aliases caller-owned maps.
    pub fn with_parameters<I, K>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self {
            parameters: initial.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns the stored value, or `None` when `name` was never set.
    ///
    /// Presence is checked independently of the value itself, so a key holding
    /// an in-band "no value" marker still returns `Some`.
    pub fn get_parameter(&self, name: &str) -> Option<&V> {
        self.parameters.get(name)
    }

    /// Returns the stored value when `name` is present, else `default`.
    pub fn get_parameter_or<'a>(&'a self, name: &str, default: &'a V) -> &'a V {
        self.parameters.get(name).unwrap_or(default)
    }

    /// Snapshot of the current parameter names. Callers must not rely on the
    /// ordering across calls.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    /// A fresh shallow copy of the full internal mapping.
    pub fn parameters(&self) -> HashMap<String, V>
    where
        V: Clone,
    {
        self.parameters.clone()
    }

    /// Borrowed iteration over the current entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.parameters.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Removes `name` and returns its value; `None` leaves the map unchanged.
    pub fn remove_parameter(&mut self, name: &str) -> Option<V> {
        self.parameters.remove(name)
    }

    /// Inserts or overwrites the entry for `name`.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: V) {
        self.parameters.insert(name.into(), value);
    }

    /// Merges `parameters` into the store, last writer wins on key collision.
    ///
    /// Any iterator of key/value pairs is accepted, so both maps and plain
    /// pair lists normalize through the same path. A pair carrying an in-band
    /// "no value" marker is stored as a present key, not treated as a delete.
    pub fn set_parameters<I, K>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        self.parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v)));
    }

    /// Removes all entries.
    pub fn clear_parameters(&mut self) {
        self.parameters.clear();
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<V> Default for ParameterStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: Into<String>> FromIterator<(K, V)> for ParameterStore<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_parameters(iter)
    }
}
