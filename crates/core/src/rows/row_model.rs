//! Raw row model.

use serde::{Deserialize, Serialize};

/// One record from a product export: an ordered mapping of field names to
/// text values. Immutable once handed to the pipeline.
///
/// Field access is by exact, case-sensitive name. A field counts as blank
/// when it is absent or its value is empty/whitespace-only; callers that
/// care about "present but empty" use [`RawRow::get`] directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(name, value)` pairs, keeping their order.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Sets a field value, replacing an existing field of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Logical blank check: absent, empty, and whitespace-only all count.
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).is_none_or(|value| value.trim().is_empty())
    }

    /// The field value when it is not blank, trimmed of nothing.
    pub fn get_present(&self, name: &str) -> Option<&str> {
        if self.is_blank(name) {
            None
        } else {
            self.get(name)
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
