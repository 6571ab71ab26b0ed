//! Per-call field-to-dictionary overrides.

use std::collections::HashMap;

/// Field name to dictionary name map supplied at call time.
///
/// An entry takes precedence over the field's declared directive and also
/// makes fields without a directive translatable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    points: HashMap<String, String>,
}

impl FieldOverrides {
    /// Creates an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, builder style.
    pub fn with(mut self, field: impl Into<String>, dict: impl Into<String>) -> Self {
        self.insert(field, dict);
        self
    }

    /// Adds an override.
    pub fn insert(&mut self, field: impl Into<String>, dict: impl Into<String>) {
        self.points.insert(field.into(), dict.into());
    }

    /// Dictionary for a field name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.points.get(field).map(String::as_str)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no overrides are set.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<HashMap<String, String>> for FieldOverrides {
    fn from(points: HashMap<String, String>) -> Self {
        Self { points }
    }
}

impl<K, V> FromIterator<(K, V)> for FieldOverrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            points: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
