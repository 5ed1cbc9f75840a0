//! Forgetting-curve reminders for files: the schedule of review intervals,
//! the reminder and label collections, and their persistence.

pub mod clock;
pub mod error;
pub mod factory;
pub mod labels;
pub mod migrate;
pub mod ops;
pub mod schedule;
pub mod session;
pub mod store;
pub mod time;
pub mod types;

pub use error::CurveError;
pub use schedule::ScheduleTable;
pub use session::Session;
