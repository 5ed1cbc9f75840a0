use std::path::Path;
use std::path::PathBuf;

use crate::store::SnapshotStore;
use crate::store::json::JsonSnapshotStore;

#[cfg(feature = "sqlite")]
use crate::store::sqlite::SqliteSnapshotStore;

/// Directory inside a vault that holds the reminder snapshot.
pub const DATA_DIR: &str = ".forgetting-curve";

/// Backend selection for snapshot persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Json,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Choose backend using env `FFC_BACKEND` if present: `sqlite` or `json`.
/// Defaults to JSON; if `sqlite` is requested but not compiled in, falls back to JSON.
pub fn choose_backend_from_env() -> Backend {
    let v = std::env::var("FFC_BACKEND").unwrap_or_default();
    match v.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" | "SQLITE" => Backend::Sqlite,
        "" | "json" | "JSON" => Backend::Json,
        other => {
            tracing::warn!("unsupported FFC_BACKEND {other:?}, using json");
            Backend::Json
        }
    }
}

/// Build a store for a vault under `<vault>/.forgetting-curve/`.
/// Paths can be overridden via env:
/// - `FFC_DATA_JSON` for the JSON snapshot path
/// - `FFC_DATA_DB` for the SQLite file path
pub fn open_vault_store(
    vault: &Path,
    backend: Option<Backend>,
) -> anyhow::Result<Box<dyn SnapshotStore>> {
    let base = vault.join(DATA_DIR);
    let be = backend.unwrap_or_else(choose_backend_from_env);
    Ok(match be {
        Backend::Json => {
            let path = std::env::var("FFC_DATA_JSON")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base.join("data.json"));
            Box::new(JsonSnapshotStore::new(path))
        }
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let path = std::env::var("FFC_DATA_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| base.join("data.db"));
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            Box::new(SqliteSnapshotStore::new(path))
        }
    })
}
