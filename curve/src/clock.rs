use chrono::Local;

use crate::time;
use crate::time::Timestamp;

/// Source of "now" for due checks and new reminders.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Local wall-clock time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        time::truncate(Local::now().naive_local())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self(now)
    }

    /// Parse a `YYYY-MM-DD HH:mm:ss` string.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let now = time::parse(s).map_err(|e| anyhow::anyhow!("invalid fixed time {s:?}: {e}"))?;
        Ok(Self(now))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
