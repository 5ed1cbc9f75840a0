/// Copy a JSON snapshot into a SQLite database file.
///
/// - `json_path`: source snapshot
/// - `sqlite_path`: destination SQLite DB (created if missing, replaced wholesale)
///
/// Returns the count of imported reminders.
#[cfg(feature = "sqlite")]
pub fn migrate_json_to_sqlite(
    json_path: &std::path::Path,
    sqlite_path: &std::path::Path,
) -> anyhow::Result<usize> {
    use crate::store::SnapshotStore;
    use crate::store::json::JsonSnapshotStore;
    use crate::store::sqlite::SqliteSnapshotStore;

    if !json_path.exists() {
        anyhow::bail!("snapshot not found: {}", json_path.display());
    }
    let snapshot = JsonSnapshotStore::new(json_path).load()?;
    if let Some(dir) = sqlite_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    SqliteSnapshotStore::new(sqlite_path).save(&snapshot)?;
    Ok(snapshot.records.len())
}

#[cfg(not(feature = "sqlite"))]
pub fn migrate_json_to_sqlite(
    _json_path: &std::path::Path,
    _sqlite_path: &std::path::Path,
) -> anyhow::Result<usize> {
    anyhow::bail!("sqlite backend not compiled; enable with `--features ffc-curve/sqlite`");
}
