//! Queries and lifecycle mutations over the reminder collection. No I/O.

use serde::Serialize;
use std::borrow::Borrow;

use crate::error::CurveError;
use crate::schedule::ScheduleTable;
use crate::time::Timestamp;
use crate::types::Label;
use crate::types::ReminderPatch;
use crate::types::ReminderRecord;
use crate::types::file_name;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub due: Vec<&'a ReminderRecord>,
    pub pending: Vec<&'a ReminderRecord>,
}

/// Split records into due (`now >= due_at`) and pending, keeping input
/// order. A label filter that matches nothing yields two empty lists.
pub fn partition_due<'a>(
    records: &'a [ReminderRecord],
    now: Timestamp,
    label_filter: Option<&str>,
) -> Partition<'a> {
    let mut out = Partition::default();
    for rec in records {
        if label_filter.is_some_and(|l| rec.label_id != l) {
            continue;
        }
        if rec.is_due(now) {
            out.due.push(rec);
        } else {
            out.pending.push(rec);
        }
    }
    out
}

/// Stable ascending sort by due time.
pub fn order_by_due_at<R: Borrow<ReminderRecord>>(records: &mut [R]) {
    records.sort_by_key(|r| <R as Borrow<ReminderRecord>>::borrow(r).due_at);
}

pub fn find_record<'a>(
    records: &'a [ReminderRecord],
    file_path: &str,
) -> Option<&'a ReminderRecord> {
    records.iter().find(|r| r.file_path == file_path)
}

/// Create or replace the reminder for `file_path`. The due time is
/// recomputed from `now`; `created_at` survives an edit.
pub fn upsert<'a>(
    records: &'a mut Vec<ReminderRecord>,
    table: &ScheduleTable,
    file_path: &str,
    patch: ReminderPatch,
    now: Timestamp,
) -> Result<&'a ReminderRecord, CurveError> {
    let level = table
        .find(patch.level)
        .ok_or(CurveError::UnknownLevel(patch.level))?;
    let due_at = level
        .due_at(now)
        .ok_or(CurveError::InvalidSchedule("due time out of range"))?;

    let idx = match records.iter().position(|r| r.file_path == file_path) {
        Some(idx) => {
            // Collapse accidental duplicates onto the first match.
            let mut seen = false;
            records.retain(|r| {
                if r.file_path != file_path {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });
            let rec = &mut records[idx];
            rec.label_id = patch.label_id;
            rec.display_name = patch.display_name;
            rec.note = patch.note;
            rec.level = patch.level;
            rec.due_at = due_at;
            idx
        }
        None => {
            records.push(ReminderRecord {
                label_id: patch.label_id,
                file_path: file_path.to_string(),
                display_name: patch.display_name,
                note: patch.note,
                level: patch.level,
                due_at,
                created_at: now,
            });
            records.len() - 1
        }
    };
    Ok(&records[idx])
}

/// Remove every record for `file_path`, returning how many were dropped.
pub fn remove(records: &mut Vec<ReminderRecord>, file_path: &str) -> usize {
    let before = records.len();
    records.retain(|r| r.file_path != file_path);
    before - records.len()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub kept: Vec<ReminderRecord>,
    pub removed: Vec<ReminderRecord>,
}

/// Split records by whether their backing file still exists.
pub fn reconcile_missing<F>(records: Vec<ReminderRecord>, mut exists: F) -> Reconciled
where
    F: FnMut(&str) -> bool,
{
    let (kept, removed): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|r| exists(&r.file_path));
    Reconciled { kept, removed }
}

/// What an ambient "files expired" notice should say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueNotice<'a> {
    Single(&'a ReminderRecord),
    Many(usize),
}

pub fn expired_notice(records: &[ReminderRecord], now: Timestamp) -> Option<DueNotice<'_>> {
    let due = partition_due(records, now, None).due;
    match due.as_slice() {
        [] => None,
        [one] => Some(DueNotice::Single(*one)),
        many => Some(DueNotice::Many(many.len())),
    }
}

/// First due record (in record order) whose label still exists.
pub fn first_label_with_due<'a>(
    records: &[ReminderRecord],
    labels: &'a [Label],
    now: Timestamp,
) -> Option<&'a Label> {
    partition_due(records, now, None)
        .due
        .into_iter()
        .find_map(|r| labels.iter().find(|l| l.id == r.label_id))
}

/// Whole days, hours and minutes left until a reminder is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

pub fn remaining(due_at: Timestamp, now: Timestamp) -> Option<Remaining> {
    if now >= due_at {
        return None;
    }
    let total = (due_at - now).num_minutes();
    Some(Remaining {
        days: total / (24 * 60),
        hours: total % (24 * 60) / 60,
        minutes: total % 60,
    })
}

/// Display name to store: empty when it would just repeat the file's name.
pub fn display_name(requested: &str, file_path: &str) -> String {
    let requested = requested.trim();
    if requested == file_name(file_path) {
        String::new()
    } else {
        requested.to_string()
    }
}
