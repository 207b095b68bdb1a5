use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single committed filter value.
///
/// Variant order matters for untagged deserialization: booleans and numbers
/// must be tried before the catch-all text variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Render the value the way the backend expects it in a query string.
    /// Booleans travel as "1"/"0" (form semantics).
    pub fn to_query(&self) -> String {
        match self {
            FilterValue::Bool(true) => "1".to_string(),
            FilterValue::Bool(false) => "0".to_string(),
            FilterValue::Int(n) => n.to_string(),
            FilterValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        FilterValue::Int(i64::from(v))
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

/// The committed set of active list filters.
///
/// Backed by a `BTreeMap` so two sets with the same contents always compare
/// and serialize identically regardless of insertion order. That structural
/// equality is what the reconciliation loop relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet(BTreeMap<String, FilterValue>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Set a text filter, treating an empty (or whitespace) value as absent.
    pub fn set_text(&mut self, key: impl Into<String>, value: &str) {
        let trimmed = value.trim();
        let key = key.into();
        if trimmed.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, FilterValue::Text(trimmed.to_string()));
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Key-sorted query pairs, with booleans rendered as "1"/"0".
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_query()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn equality_is_structural_not_insertion_order() {
        let a = FilterSet::new().with("search", "acme").with("is_active", true);
        let b = FilterSet::new().with("is_active", true).with("search", "acme");

        assert_eq!(a, b);
    }

    #[test]
    fn booleans_render_as_form_flags() {
        let filters = FilterSet::new()
            .with("is_active", true)
            .with("archived", false)
            .with("company_id", "01ARZ3");

        let pairs = filters.to_query_pairs();

        assert_eq!(
            pairs,
            vec![
                ("archived".to_string(), "0".to_string()),
                ("company_id".to_string(), "01ARZ3".to_string()),
                ("is_active".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn set_text_drops_empty_values() {
        let mut filters = FilterSet::new();
        filters.set_text("search", "acme");
        assert_eq!(filters.len(), 1);

        filters.set_text("search", "   ");
        assert!(filters.is_empty());
    }

    #[test]
    fn roundtrips_through_json() {
        let filters = FilterSet::new()
            .with("search", "acme")
            .with("is_active", true)
            .with("kind", "asset");

        let json = serde_json::to_string(&filters).unwrap();
        let back: FilterSet = serde_json::from_str(&json).unwrap();

        assert_eq!(filters, back);
        assert_eq!(back.get("is_active"), Some(&FilterValue::Bool(true)));
    }
}
