use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use ts_rs::TS;

use super::opaque_id;
use crate::{
    DBService,
    remote::{RemoteError, SelectQuery, insert_row, select_rows},
};

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    TS,
    EnumString,
    EnumIter,
    Display,
    Default,
)]
pub enum Rank {
    #[default]
    Officer,
    Corporal,
    Sergeant,
    Lieutenant,
    Captain,
    Major,
    Chief,
    Detective,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    TS,
    EnumString,
    EnumIter,
    Display,
    Default,
)]
pub enum Department {
    #[default]
    Patrol,
    Traffic,
    Investigations,
    Administration,
    #[serde(rename = "K-9")]
    #[strum(serialize = "K-9")]
    K9,
    #[serde(rename = "SWAT")]
    #[strum(serialize = "SWAT")]
    Swat,
    #[serde(rename = "Community Relations")]
    #[strum(serialize = "Community Relations")]
    CommunityRelations,
}

/// Paid time off balances in hours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS, Default)]
pub struct PtoBalances {
    pub vacation: f64,
    pub holiday: f64,
    pub sick: f64,
}

/// Row of the `officers` table as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfficerRow {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    pub badge: String,
    pub rank: Rank,
    pub department: Department,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_supervisor: Option<bool>,
    #[serde(default)]
    pub vacation_balance: Option<f64>,
    #[serde(default)]
    pub holiday_balance: Option<f64>,
    #[serde(default)]
    pub sick_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub rank: Rank,
    pub department: Department,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_supervisor: bool,
    pub pto_balances: PtoBalances,
}

impl From<OfficerRow> for Officer {
    fn from(row: OfficerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            badge: row.badge,
            rank: row.rank,
            department: row.department,
            email: row.email,
            phone: row.phone,
            avatar: row.avatar,
            is_supervisor: row.is_supervisor.unwrap_or(false),
            pto_balances: PtoBalances {
                vacation: row.vacation_balance.unwrap_or(0.0),
                holiday: row.holiday_balance.unwrap_or(0.0),
                sick: row.sick_balance.unwrap_or(0.0),
            },
        }
    }
}

/// Insert payload for the `officers` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct CreateOfficer {
    pub name: String,
    pub badge: String,
    pub rank: Rank,
    pub department: Department,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_supervisor: bool,
    pub vacation_balance: f64,
    pub holiday_balance: f64,
    pub sick_balance: f64,
}

impl Officer {
    pub const TABLE: &'static str = "officers";

    pub const DEFAULT_VACATION_BALANCE: f64 = 120.0;
    pub const DEFAULT_HOLIDAY_BALANCE: f64 = 40.0;
    pub const DEFAULT_SICK_BALANCE: f64 = 80.0;

    /// All officers ordered by name.
    pub async fn find_all(db: &DBService) -> Result<Vec<Self>, RemoteError> {
        let rows: Vec<OfficerRow> = select_rows(
            db.remote.as_ref(),
            Self::TABLE,
            &SelectQuery::all().order_by("name", true),
        )
        .await?;
        Ok(rows.into_iter().map(Officer::from).collect())
    }

    pub async fn create(db: &DBService, data: &CreateOfficer) -> Result<Self, RemoteError> {
        let row: OfficerRow = insert_row(db.remote.as_ref(), Self::TABLE, data).await?;
        Ok(row.into())
    }
}
