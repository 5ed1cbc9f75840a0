//! A loaded snapshot plus the collaborators needed to change it.
//!
//! Front ends hold their own `Session` and re-read `view()` after each
//! mutation instead of sharing a global "active panel".

use crate::clock::Clock;
use crate::error::CurveError;
use crate::labels;
use crate::ops;
use crate::schedule::ScheduleTable;
use crate::store::SnapshotStore;
use crate::time::Timestamp;
use crate::types::Label;
use crate::types::ReminderPatch;
use crate::types::ReminderRecord;
use crate::types::Snapshot;

/// Due and pending reminders, each ordered by due time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderView {
    pub now: Timestamp,
    pub due: Vec<ReminderRecord>,
    pub pending: Vec<ReminderRecord>,
}

pub struct Session {
    store: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    table: ScheduleTable,
    snapshot: Snapshot,
    dirty: bool,
}

impl Session {
    pub fn open(store: Box<dyn SnapshotStore>, clock: Box<dyn Clock>) -> anyhow::Result<Self> {
        Self::with_table(store, clock, ScheduleTable::standard())
    }

    pub fn with_table(
        store: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        table: ScheduleTable,
    ) -> anyhow::Result<Self> {
        let snapshot = store.load()?;
        Ok(Self {
            store,
            clock,
            table,
            snapshot,
            dirty: false,
        })
    }

    pub fn table(&self) -> &ScheduleTable {
        &self.table
    }

    pub fn labels(&self) -> &[Label] {
        &self.snapshot.labels
    }

    pub fn records(&self) -> &[ReminderRecord] {
        &self.snapshot.records
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// True when the in-memory snapshot has changes that were not saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn find(&self, file_path: &str) -> Option<&ReminderRecord> {
        ops::find_record(&self.snapshot.records, file_path)
    }

    pub fn resolve_label(&self, key: &str) -> Result<&Label, CurveError> {
        labels::resolve_label(&self.snapshot.labels, key)
    }

    pub fn create_label(&mut self, name: &str) -> anyhow::Result<Label> {
        let label =
            labels::create_label(&mut self.snapshot.labels, name, labels::new_label_id)?.clone();
        self.dirty = true;
        self.save()?;
        Ok(label)
    }

    pub fn remove_label(&mut self, key: &str) -> anyhow::Result<Label> {
        let id = self.resolve_label(key)?.id.clone();
        let removed = labels::remove_label(&mut self.snapshot.labels, &id)
            .ok_or_else(|| CurveError::UnknownLabel(key.to_string()))?;
        self.dirty = true;
        self.save()?;
        Ok(removed)
    }

    /// Create or replace the reminder for `file_path`.
    pub fn attach(
        &mut self,
        file_path: &str,
        patch: ReminderPatch,
    ) -> anyhow::Result<ReminderRecord> {
        let now = self.clock.now();
        let rec = ops::upsert(
            &mut self.snapshot.records,
            &self.table,
            file_path,
            patch,
            now,
        )?
        .clone();
        self.dirty = true;
        self.save()?;
        Ok(rec)
    }

    /// Remove the reminder for `file_path`; returns whether one existed.
    pub fn detach(&mut self, file_path: &str) -> anyhow::Result<bool> {
        let n = ops::remove(&mut self.snapshot.records, file_path);
        if n == 0 {
            return Ok(false);
        }
        self.dirty = true;
        self.save()?;
        Ok(true)
    }

    /// Drop reminders whose files no longer exist and persist the result if
    /// anything was removed.
    pub fn reconcile<F>(&mut self, exists: F) -> anyhow::Result<Vec<ReminderRecord>>
    where
        F: FnMut(&str) -> bool,
    {
        let records = std::mem::take(&mut self.snapshot.records);
        let ops::Reconciled { kept, removed } = ops::reconcile_missing(records, exists);
        self.snapshot.records = kept;
        if !removed.is_empty() {
            for rec in &removed {
                tracing::info!("dropping reminder for missing file {}", rec.file_path);
            }
            self.dirty = true;
            self.save()?;
        }
        Ok(removed)
    }

    pub fn view(&self, label_filter: Option<&str>) -> ReminderView {
        let now = self.clock.now();
        let ops::Partition { mut due, mut pending } =
            ops::partition_due(&self.snapshot.records, now, label_filter);
        ops::order_by_due_at(&mut due);
        ops::order_by_due_at(&mut pending);
        ReminderView {
            now,
            due: due.into_iter().cloned().collect(),
            pending: pending.into_iter().cloned().collect(),
        }
    }

    pub fn notice(&self) -> Option<ops::DueNotice<'_>> {
        ops::expired_notice(&self.snapshot.records, self.clock.now())
    }

    /// Persist the current snapshot. On failure the session stays dirty.
    pub fn save(&mut self) -> anyhow::Result<()> {
        match self.store.save(&self.snapshot) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "saving {} failed, changes not durable: {e:#}",
                    self.store.location().display()
                );
                Err(e)
            }
        }
    }

    /// Replace the in-memory snapshot with what the store holds.
    pub fn reload(&mut self) -> anyhow::Result<()> {
        self.snapshot = self.store.load()?;
        self.dirty = false;
        Ok(())
    }
}
