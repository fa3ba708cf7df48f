//! In-memory snapshot of the legacy key-value store

use serde::Serialize;
use std::collections::BTreeMap;

/// Complete extracted state of the legacy store at read time.
///
/// Built once from the raw rows, immutable afterwards. Duplicate keys
/// in the source resolve last-write-wins. The ordered map keeps the
/// serialized payload deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MigrationSnapshot {
    entries: BTreeMap<String, String>,
}

impl MigrationSnapshot {
    /// Builds a snapshot from rows in read order; later rows win on
    /// key collisions.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: rows.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for MigrationSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::from_rows(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_row_wins_on_duplicate_key() {
        let snapshot = MigrationSnapshot::from_rows([
            ("k".to_string(), "1".to_string()),
            ("k".to_string(), "2".to_string()),
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("k"), Some("2"));
    }

    #[test]
    fn empty_rows_give_empty_snapshot() {
        let snapshot = MigrationSnapshot::from_rows([]);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let snapshot = MigrationSnapshot::from_rows([
            ("theme".to_string(), "dark".to_string()),
            ("token".to_string(), "abc".to_string()),
        ]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"theme":"dark","token":"abc"}"#);
    }
}
