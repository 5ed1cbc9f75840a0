use crate::types::Snapshot;

/// Host storage for the whole label and reminder snapshot.
///
/// Snapshots are loaded and saved wholesale; a save that returns an error
/// means nothing was made durable.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Snapshot>;
    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;
    /// Where this store keeps its data, for messages.
    fn location(&self) -> &std::path::Path;
}

pub mod json;
#[cfg(feature = "sqlite")]
pub mod sqlite;
