//! Store location settings.
use crate::database::SqliteStore;
use crate::store::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "SRS_DB_PATH";
pub const NAMESPACE_VAR: &str = "SRS_NAMESPACE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub database_path: PathBuf,
    /// Key the card collection is stored under.
    pub namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("db.sqlite3"),
            namespace: "srs_cards".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `SRS_DB_PATH` and `SRS_NAMESPACE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(DB_PATH_VAR).filter(|v| !v.is_empty()) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(namespace) = lookup(NAMESPACE_VAR).filter(|v| !v.is_empty()) {
            config.namespace = namespace;
        }
        config
    }

    /// Opens the SQLite store at `database_path` under `namespace`.
    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.database_path, &self.namespace)
    }
}
