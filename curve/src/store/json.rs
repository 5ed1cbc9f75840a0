use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;

use super::*;

/// Snapshot kept as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> anyhow::Result<Snapshot> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("snapshot {} missing, starting empty", self.path.display());
                return Ok(Snapshot::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        if data.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        let snapshot: Snapshot =
            serde_json::from_str(&data).with_context(|| format!("parse {}", self.path.display()))?;
        tracing::debug!(
            "loaded {} labels and {} reminders from {}",
            snapshot.labels.len(),
            snapshot.records.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let mut out = serde_json::to_string_pretty(snapshot)?;
        out.push('\n');
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, out).with_context(|| format!("write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        tracing::debug!("saved snapshot to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
