use chrono::{DateTime, Utc};
use db::models::shift::Shift;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use ts_rs::TS;

/// Client-side filter over the shift list.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    TS,
    EnumString,
    EnumIter,
    Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShiftFilter {
    #[default]
    All,
    /// Shifts carrying a recurrence descriptor
    Recurring,
    /// Shifts starting strictly after `now`
    Upcoming,
}

impl ShiftFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Recurring => "Recurring",
            Self::Upcoming => "Upcoming",
        }
    }

    pub fn matches(&self, shift: &Shift, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Recurring => shift.is_recurring(),
            Self::Upcoming => shift.starts_after(now),
        }
    }

    pub fn apply<'a>(&self, shifts: &'a [Shift], now: DateTime<Utc>) -> Vec<&'a Shift> {
        shifts.iter().filter(|s| self.matches(s, now)).collect()
    }
}
