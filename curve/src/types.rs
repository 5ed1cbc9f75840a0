use serde::Deserialize;
use serde::Serialize;

use crate::time::Timestamp;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub name: String,
}

/// One tracked file. Field names follow the persisted snapshot layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderRecord {
    #[serde(rename = "label")]
    pub label_id: String,
    #[serde(rename = "file")]
    pub file_path: String,
    /// Empty means "use the file's current name".
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(rename = "remark", default)]
    pub note: String,
    pub level: u32,
    #[serde(rename = "remind", with = "crate::time::serde_format")]
    pub due_at: Timestamp,
    #[serde(rename = "date", with = "crate::time::serde_format")]
    pub created_at: Timestamp,
}

impl ReminderRecord {
    /// Final path component of the tracked file.
    pub fn file_name(&self) -> &str {
        file_name(&self.file_path)
    }

    pub fn shown_name(&self) -> &str {
        if self.display_name.is_empty() {
            self.file_name()
        } else {
            &self.display_name
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        now >= self.due_at
    }
}

/// The mutable fields a user sets when attaching or editing a reminder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReminderPatch {
    pub label_id: String,
    pub level: u32,
    pub display_name: String,
    pub note: String,
}

impl ReminderPatch {
    pub fn new(label_id: impl Into<String>, level: u32) -> Self {
        Self {
            label_id: label_id.into(),
            level,
            display_name: String::new(),
            note: String::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Everything persisted by a store, loaded and saved wholesale.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(rename = "files", default)]
    pub records: Vec<ReminderRecord>,
}

pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_uses_snapshot_field_names() {
        let rec = ReminderRecord {
            label_id: "L1".into(),
            file_path: "notes/a.md".into(),
            display_name: String::new(),
            note: "look again".into(),
            level: 60,
            due_at: time::parse("2024-01-01 01:00:00").unwrap(),
            created_at: time::parse("2024-01-01 00:00:00").unwrap(),
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "label": "L1",
                "file": "notes/a.md",
                "name": "",
                "remark": "look again",
                "level": 60,
                "remind": "2024-01-01 01:00:00",
                "date": "2024-01-01 00:00:00",
            })
        );
        assert_eq!(rec.shown_name(), "a.md");
    }

    #[test]
    fn snapshot_defaults_missing_collections() {
        let snap: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, Snapshot::default());
        let snap: Snapshot =
            serde_json::from_str(r#"{"labels":[{"id":"a","name":"Work"}]}"#).unwrap();
        assert_eq!(snap.labels.len(), 1);
        assert!(snap.records.is_empty());
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let raw = r#"{"label":"L","file":"a.md","name":"","remark":"","level":20,
            "remind":"tomorrow","date":"2024-01-01 00:00:00"}"#;
        assert!(serde_json::from_str::<ReminderRecord>(raw).is_err());
    }

    #[test]
    fn file_name_handles_separators() {
        assert_eq!(file_name("a/b/c.md"), "c.md");
        assert_eq!(file_name("c.md"), "c.md");
        assert_eq!(file_name("a\\b.md"), "b.md");
    }
}
