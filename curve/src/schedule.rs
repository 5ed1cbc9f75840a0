//! The forgetting-curve schedule: a fixed, ordered list of reminder levels and
//! the level arithmetic used to recommend and classify the next interval.

use chrono::TimeDelta;
use serde::Serialize;

use crate::clock::Clock;
use crate::error::CurveError;
use crate::time::Timestamp;

/// How hard an interval is relative to another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    ImpossibleForget,
    MaybeForget,
    VeryEasy,
    Easy,
    Normal,
    Hard,
    VeryHard,
    ForgottenSome,
    Forgotten,
}

impl Difficulty {
    /// Classify a candidate interval by its table distance from the current
    /// one, `position(current) - position(candidate)`.
    pub fn from_distance(distance: i64) -> Option<Self> {
        Some(match distance {
            -5 => Difficulty::ImpossibleForget,
            -4 => Difficulty::MaybeForget,
            -3 => Difficulty::VeryEasy,
            -2 => Difficulty::Easy,
            -1 => Difficulty::Normal,
            0 => Difficulty::Hard,
            1 => Difficulty::VeryHard,
            2 => Difficulty::ForgottenSome,
            3 => Difficulty::Forgotten,
            _ => return None,
        })
    }

    /// Stable English key, also used as the localization lookup key.
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::ImpossibleForget => "Impossible Forget",
            Difficulty::MaybeForget => "Maybe Forget",
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
            Difficulty::ForgottenSome => "Forgotten Some",
            Difficulty::Forgotten => "Forgotten",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderLevel {
    pub level: u32,
    pub label: String,
    pub difficulty: Difficulty,
    /// Minutes added to the base time.
    pub offset: i64,
}

impl ReminderLevel {
    pub fn new(level: u32, label: impl Into<String>, difficulty: Difficulty, offset: i64) -> Self {
        Self {
            level,
            label: label.into(),
            difficulty,
            offset,
        }
    }

    /// `base` plus the offset, or `None` when that is not a representable time.
    pub fn due_at(&self, base: Timestamp) -> Option<Timestamp> {
        base.checked_add_signed(TimeDelta::try_minutes(self.offset)?)
    }

    pub fn due_from(&self, clock: &dyn Clock) -> Option<Timestamp> {
        self.due_at(clock.now())
    }
}

/// One entry of a level picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelOption {
    pub level: u32,
    pub label: String,
    pub difficulty: Difficulty,
    pub recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    levels: Vec<ReminderLevel>,
}

impl Default for ScheduleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScheduleTable {
    /// Build a table, rejecting empty input, levels that are not strictly
    /// ascending and offsets that are not a positive number of minutes.
    pub fn new(levels: Vec<ReminderLevel>) -> Result<Self, CurveError> {
        if levels.is_empty() {
            return Err(CurveError::InvalidSchedule("table is empty"));
        }
        if levels.windows(2).any(|w| w[0].level >= w[1].level) {
            return Err(CurveError::InvalidSchedule("levels must be strictly ascending"));
        }
        if levels.iter().any(|l| l.offset <= 0) {
            return Err(CurveError::InvalidSchedule("offsets must be positive"));
        }
        if levels.iter().any(|l| TimeDelta::try_minutes(l.offset).is_none()) {
            return Err(CurveError::InvalidSchedule("offset out of range"));
        }
        Ok(Self { levels })
    }

    /// Twenty minutes through thirty days.
    pub fn standard() -> Self {
        const HOUR: i64 = 60;
        const DAY: i64 = 24 * HOUR;
        Self {
            levels: vec![
                ReminderLevel::new(20, "20 minutes", Difficulty::VeryHard, 20),
                ReminderLevel::new(60, "1 hours", Difficulty::Hard, HOUR),
                ReminderLevel::new(480, "8 hours", Difficulty::Normal, 8 * HOUR),
                ReminderLevel::new(1440, "1 days", Difficulty::Easy, DAY),
                ReminderLevel::new(2880, "2 days", Difficulty::VeryEasy, 2 * DAY),
                ReminderLevel::new(10080, "7 days", Difficulty::MaybeForget, 7 * DAY),
                ReminderLevel::new(43200, "30 days", Difficulty::ImpossibleForget, 30 * DAY),
            ],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReminderLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn position(&self, level: u32) -> Option<usize> {
        self.levels.iter().position(|l| l.level == level)
    }

    pub fn find(&self, level: u32) -> Option<&ReminderLevel> {
        self.position(level).map(|i| &self.levels[i])
    }

    pub fn next(&self, level: u32) -> Option<&ReminderLevel> {
        self.position(level).and_then(|i| self.levels.get(i + 1))
    }

    pub fn previous(&self, level: u32) -> Option<&ReminderLevel> {
        self.position(level)
            .and_then(|i| i.checked_sub(1))
            .map(|i| &self.levels[i])
    }

    /// Signed difference of table positions, `position(a) - position(b)`.
    pub fn distance(&self, a: u32, b: u32) -> Option<i64> {
        let pa = self.position(a)?;
        let pb = self.position(b)?;
        Some(pa as i64 - pb as i64)
    }

    /// The level a picker preselects. New reminders start at the second
    /// entry; existing ones move to the next level, or stay on the last.
    pub fn recommend(&self, current: Option<u32>) -> &ReminderLevel {
        let fallback = &self.levels[self.levels.len() - 1];
        match current {
            None => self.levels.get(1).unwrap_or(&self.levels[0]),
            Some(level) => self.next(level).unwrap_or(fallback),
        }
    }

    /// Picker entries. With a current level, each candidate is classified by
    /// its distance from it and unclassifiable candidates are left out.
    pub fn options(&self, current: Option<u32>) -> Vec<LevelOption> {
        let recommended = self.recommend(current).level;
        self.levels
            .iter()
            .filter_map(|l| {
                let difficulty = match current {
                    None => l.difficulty,
                    Some(cur) => Difficulty::from_distance(self.distance(cur, l.level)?)?,
                };
                Some(LevelOption {
                    level: l.level,
                    label: l.label.clone(),
                    difficulty,
                    recommended: l.level == recommended,
                })
            })
            .collect()
    }
}
