use thiserror::Error;

/// Validation failures reported by the schedule and store operations.
///
/// None of these leave the reminder or label collections modified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("unknown reminder level: {0}")]
    UnknownLevel(u32),

    #[error("label already exists: {0}")]
    DuplicateLabel(String),

    #[error("label name cannot be empty")]
    EmptyLabelName,

    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("invalid schedule table: {0}")]
    InvalidSchedule(&'static str),
}
