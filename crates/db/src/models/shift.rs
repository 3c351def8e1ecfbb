use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};
use ts_rs::TS;

use super::opaque_id;
use crate::{
    DBService,
    remote::{RemoteError, SelectQuery, select_rows},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

/// Marks a shift as repeating rather than one-off.
///
/// Decoded leniently: any non-null descriptor makes the shift recurring, and
/// fields that are missing or unrecognized fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(default)]
    pub pattern: Option<RecurrencePattern>,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// 0 = Sunday
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

fn default_interval() -> u32 {
    1
}

impl Recurrence {
    pub fn from_descriptor(descriptor: &Value) -> Self {
        let field = |names: &[&str]| names.iter().find_map(|name| descriptor.get(*name));

        let pattern = field(&["pattern", "frequency"])
            .and_then(Value::as_str)
            .and_then(|s| RecurrencePattern::from_str(&s.to_ascii_lowercase()).ok());
        let interval = field(&["interval"])
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(default_interval);
        let days_of_week = field(&["daysOfWeek", "days_of_week"])
            .and_then(Value::as_array)
            .map(|days| {
                days.iter()
                    .filter_map(Value::as_u64)
                    .filter(|d| *d < 7)
                    .map(|d| d as u8)
                    .collect()
            })
            .unwrap_or_default();
        let until = field(&["until"])
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc));

        Self {
            pattern,
            interval,
            days_of_week,
            until,
        }
    }
}

fn lenient_recurrence<'de, D>(deserializer: D) -> Result<Option<Recurrence>, D::Error>
where
    D: Deserializer<'de>,
{
    let descriptor = Option::<Value>::deserialize(deserializer)?;
    Ok(descriptor
        .filter(|v| !v.is_null())
        .map(|v| Recurrence::from_descriptor(&v)))
}

/// Row of the `shifts` table as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftRow {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(deserialize_with = "opaque_id")]
    pub officer_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_recurrence")]
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub officer_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: Option<String>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub recurrence: Option<Recurrence>,
}

impl From<ShiftRow> for Shift {
    fn from(row: ShiftRow) -> Self {
        Self {
            id: row.id,
            officer_id: row.officer_id,
            start_time: row.start_time,
            end_time: row.end_time,
            title: row.title,
            notes: row.notes,
            recurrence: row.recurrence,
        }
    }
}

impl Shift {
    pub const TABLE: &'static str = "shifts";

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    pub fn starts_after(&self, instant: DateTime<Utc>) -> bool {
        self.start_time > instant
    }

    /// All shifts ordered by start time.
    pub async fn find_all(db: &DBService) -> Result<Vec<Self>, RemoteError> {
        let rows: Vec<ShiftRow> = select_rows(
            db.remote.as_ref(),
            Self::TABLE,
            &SelectQuery::all().order_by("start_time", true),
        )
        .await?;
        Ok(rows.into_iter().map(Shift::from).collect())
    }
}
