use anyhow::Context;
use rusqlite::Connection;
use rusqlite::params;
use std::path::Path;
use std::path::PathBuf;

use super::*;
use crate::time;
use crate::types::Label;
use crate::types::ReminderRecord;

fn init_db(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        CREATE TABLE IF NOT EXISTS labels (
            pos INTEGER NOT NULL,
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS files (
            pos INTEGER NOT NULL,
            label TEXT NOT NULL,
            file TEXT NOT NULL,
            name TEXT NOT NULL,
            remark TEXT NOT NULL,
            level INTEGER NOT NULL,
            remind TEXT NOT NULL,
            date TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_files_file ON files(file);
        "#,
    )?;
    Ok(())
}

fn open_conn(path: &Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
    init_db(&conn)?;
    Ok(conn)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReminderRecord> {
    use rusqlite::types::Type;
    let parse_ts = |idx: usize| -> rusqlite::Result<time::Timestamp> {
        let raw: String = row.get(idx)?;
        time::parse(&raw)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    };
    let level: i64 = row.get(4)?;
    Ok(ReminderRecord {
        label_id: row.get(0)?,
        file_path: row.get(1)?,
        display_name: row.get(2)?,
        note: row.get(3)?,
        level: u32::try_from(level)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(e)))?,
        due_at: parse_ts(5)?,
        created_at: parse_ts(6)?,
    })
}

/// Snapshot kept in a SQLite database, rewritten in one transaction per save.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    path: PathBuf,
}

impl SqliteSnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> anyhow::Result<Snapshot> {
        let conn = open_conn(&self.path)?;

        let mut stmt = conn.prepare("SELECT id, name FROM labels ORDER BY pos")?;
        let labels = stmt
            .query_map([], |row| {
                Ok(Label {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
            "SELECT label, file, name, remark, level, remind, date
             FROM files ORDER BY pos",
        )?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(
            "loaded {} labels and {} reminders from {}",
            labels.len(),
            records.len(),
            self.path.display()
        );
        Ok(Snapshot { labels, records })
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let mut conn = open_conn(&self.path)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM labels", [])?;
        tx.execute("DELETE FROM files", [])?;
        for (pos, label) in snapshot.labels.iter().enumerate() {
            tx.execute(
                "INSERT INTO labels (pos, id, name) VALUES (?1, ?2, ?3)",
                params![pos as i64, label.id, label.name],
            )?;
        }
        for (pos, rec) in snapshot.records.iter().enumerate() {
            tx.execute(
                "INSERT INTO files (pos, label, file, name, remark, level, remind, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    pos as i64,
                    rec.label_id,
                    rec.file_path,
                    rec.display_name,
                    rec.note,
                    i64::from(rec.level),
                    time::format(&rec.due_at),
                    time::format(&rec.created_at),
                ],
            )?;
        }
        tx.commit()?;
        tracing::debug!("saved snapshot to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
