//! Caller-supplied merge inputs: token values and table datasets.

use super::classify::DatasetKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Token to replacement text.
///
/// Keys are matched literally against document text, so they normally carry
/// their braces (`{{CUSTOMER_NAME}}`). Iteration is sorted by key, which
/// makes substitution order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    values: BTreeMap<String, String>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key verbatim. Empty keys are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.values.insert(key, value.into());
    }

    /// Insert a field by name, adding the braces when they are missing.
    pub fn insert_field(&mut self, name: &str, value: impl Into<String>) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let key = if name.starts_with("{{") && name.ends_with("}}") {
            name.to_string()
        } else {
            format!("{{{{{}}}}}", name)
        };
        self.values.insert(key, value.into());
    }

    /// Insert a field by name and return self.
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    /// Look up the replacement for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check if a key is mapped.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of mapped keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tokens from `tokens` that have no mapping.
    pub fn missing<'a>(&self, tokens: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
        tokens
            .into_iter()
            .filter(|t| !self.values.contains_key(t.as_str()))
            .cloned()
            .collect()
    }

    /// Merge another mapping into this one; its values win.
    pub fn extend(&mut self, other: Mapping) {
        self.values.extend(other.values);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// Rows of cell values for one dataset.
pub type DatasetRows = Vec<Vec<String>>;

/// Row data per dataset kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Datasets {
    rows: HashMap<DatasetKind, DatasetRows>,
}

impl Datasets {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rows for a kind, replacing earlier rows.
    pub fn insert<R, S>(&mut self, kind: DatasetKind, rows: impl IntoIterator<Item = R>)
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.rows.insert(kind, rows);
    }

    /// Set the rows for a kind and return self.
    pub fn with<R, S>(mut self, kind: DatasetKind, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(kind, rows);
        self
    }

    /// Rows for a kind; `None` when absent or empty.
    pub fn rows(&self, kind: DatasetKind) -> Option<&[Vec<String>]> {
        self.rows
            .get(&kind)
            .map(Vec::as_slice)
            .filter(|rows| !rows.is_empty())
    }

    /// Check if no kind has rows.
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(Vec::is_empty)
    }

    /// Kinds that have at least one row.
    pub fn kinds(&self) -> impl Iterator<Item = DatasetKind> + '_ {
        self.rows
            .iter()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(kind, _)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_field_adds_braces() {
        let mut mapping = Mapping::new();
        mapping.insert_field("CUSTOMER_NAME", "Acme");
        mapping.insert_field("{{DATE}}", "14/11/2025");

        assert_eq!(mapping.get("{{CUSTOMER_NAME}}"), Some("Acme"));
        assert_eq!(mapping.get("{{DATE}}"), Some("14/11/2025"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_empty_keys_ignored() {
        let mut mapping = Mapping::new();
        mapping.insert("", "x");
        mapping.insert_field("  ", "x");
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mapping: Mapping = [("{{B}}", "2"), ("{{A}}", "1")].into_iter().collect();
        let keys: Vec<_> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["{{A}}", "{{B}}"]);
    }

    #[test]
    fn test_missing() {
        let mapping = Mapping::new().with_field("A", "1");
        let tokens: BTreeSet<String> = ["{{A}}".to_string(), "{{B}}".to_string()].into();
        let missing = mapping.missing(&tokens);
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), vec!["{{B}}"]);
    }

    #[test]
    fn test_datasets_empty_rows_are_absent() {
        let datasets = Datasets::new()
            .with(DatasetKind::Milestones, [["Kickoff", "01/06"]])
            .with(DatasetKind::Deliverables, Vec::<Vec<String>>::new());

        assert_eq!(datasets.rows(DatasetKind::Milestones).map(|r| r.len()), Some(1));
        assert!(datasets.rows(DatasetKind::Deliverables).is_none());
        assert!(datasets.rows(DatasetKind::OpenItems).is_none());
        assert_eq!(datasets.kinds().count(), 1);
    }

    #[test]
    fn test_datasets_json_keys() {
        let json = r#"{"open_items": [["Finalize RBAC", "20/11/2025", "IT Team"]]}"#;
        let datasets: Datasets = serde_json::from_str(json).unwrap();
        assert_eq!(datasets.rows(DatasetKind::OpenItems).unwrap()[0][2], "IT Team");
    }
}
