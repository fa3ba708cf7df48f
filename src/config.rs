//! Migration configuration
//!
//! Defaults describe the Crosswalk on-disk layout; every segment can be
//! overridden for other legacy runtimes that used the same SQLite
//! localStorage format.

use crate::paths::join_rooted;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_legacy_data_dir() -> String {
    "app_xwalkcore/Default".to_string()
}

fn default_local_storage_dir() -> String {
    "Local Storage".to_string()
}

fn default_db_file() -> String {
    "file__0.localstorage".to_string()
}

fn default_table() -> String {
    "ItemTable".to_string()
}

/// Layout of the legacy runtime's storage tree, relative to the
/// resolved storage root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Legacy runtime's data directory under the storage root.
    #[serde(default = "default_legacy_data_dir")]
    pub legacy_data_dir: String,

    /// localStorage directory under the data directory.
    #[serde(default = "default_local_storage_dir")]
    pub local_storage_dir: String,

    /// SQLite database file name.
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// Key-value table inside the database.
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            legacy_data_dir: default_legacy_data_dir(),
            local_storage_dir: default_local_storage_dir(),
            db_file: default_db_file(),
            table: default_table(),
        }
    }
}

impl MigrationConfig {
    pub fn with_legacy_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.legacy_data_dir = dir.into();
        self
    }

    pub fn with_local_storage_dir(mut self, dir: impl Into<String>) -> Self {
        self.local_storage_dir = dir.into();
        self
    }

    pub fn with_db_file(mut self, file: impl Into<String>) -> Self {
        self.db_file = file.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Expected location of the legacy database under a resolved
    /// storage root.
    pub fn db_path(&self, legacy_root: &Path) -> PathBuf {
        join_rooted(legacy_root, &self.legacy_data_dir)
            .join(&self.local_storage_dir)
            .join(&self.db_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_crosswalk() {
        let config = MigrationConfig::default();
        let db = config.db_path(Path::new("/data/user/0/app"));
        assert_eq!(
            db,
            Path::new(
                "/data/user/0/app/app_xwalkcore/Default/Local Storage/file__0.localstorage"
            )
        );
    }

    #[test]
    fn deserializes_with_partial_overrides() {
        let config: MigrationConfig =
            serde_json::from_str(r#"{"legacy_data_dir": "app_webview/Default"}"#).unwrap();
        assert_eq!(config.legacy_data_dir, "app_webview/Default");
        assert_eq!(config.db_file, "file__0.localstorage");
    }

    #[test]
    fn builder_overrides_apply() {
        let config = MigrationConfig::default()
            .with_table("OtherTable")
            .with_db_file("store.db");
        assert_eq!(config.table, "OtherTable");
        assert_eq!(config.db_file, "store.db");
    }
}
