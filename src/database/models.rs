//! Contains the data structures that map to the `players` and `units` tables.

use sqlx::Type;
use sqlx::types::chrono::{DateTime, Utc};
use std::fmt;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i32,
    pub discord_id: i64,
    pub name: String,
}

/// Lifecycle status of a unit. Stored as the `unit_status` enum.
#[derive(Type, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "unit_status", rename_all = "UPPERCASE")]
pub enum UnitStatus {
    Proposed,
    Inactive,
    Active,
}

impl UnitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitStatus::Proposed => "PROPOSED",
            UnitStatus::Inactive => "INACTIVE",
            UnitStatus::Active => "ACTIVE",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: i32,
    pub player_id: i32,
    pub name: String,
    pub unit_type: String,
    pub callsign: Option<String>,
    pub active: bool,
    pub status: UnitStatus,
    pub created_at: DateTime<Utc>,
}
