//! In-process [`UnitStore`] used by tests and local runs without PostgreSQL.

use super::error::UnitError;
use super::store::UnitStore;
use crate::database::models::{Player, Unit, UnitStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Tables {
    players: Vec<Player>,
    units: Vec<Unit>,
    next_player_id: i32,
    next_unit_id: i32,
}

impl Tables {
    fn unit_mut(&mut self, id: i32) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }
}

/// Every method takes the single table lock, so each guarded write is atomic
/// with its checks.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_player(&self, discord_id: u64, name: &str) -> Player {
        let mut t = self.lock();
        t.next_player_id += 1;
        let player = Player {
            id: t.next_player_id,
            discord_id: discord_id as i64,
            name: name.to_string(),
        };
        t.players.push(player.clone());
        player
    }

    /// Moves a unit to `status` directly, standing in for the review process
    /// that promotes proposals outside the bot.
    pub fn set_status(&self, unit_id: i32, status: UnitStatus) -> bool {
        match self.lock().unit_mut(unit_id) {
            Some(u) => {
                u.status = status;
                true
            }
            None => false,
        }
    }

    /// Snapshot of every unit, in insertion order.
    pub fn units(&self) -> Vec<Unit> {
        self.lock().units.clone()
    }
}

#[async_trait]
impl UnitStore for MemoryStore {
    async fn find_player(&self, discord_id: u64) -> Result<Option<Player>, UnitError> {
        Ok(self
            .lock()
            .players
            .iter()
            .find(|p| p.discord_id == discord_id as i64)
            .cloned())
    }

    async fn units_for_player(&self, player_id: i32) -> Result<Vec<Unit>, UnitError> {
        Ok(self
            .lock()
            .units
            .iter()
            .filter(|u| u.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn find_unit_by_name(
        &self,
        player_id: i32,
        name: &str,
    ) -> Result<Option<Unit>, UnitError> {
        Ok(self
            .lock()
            .units
            .iter()
            .find(|u| u.player_id == player_id && u.name == name)
            .cloned())
    }

    async fn find_active_unit(&self, player_id: i32) -> Result<Option<Unit>, UnitError> {
        Ok(self
            .lock()
            .units
            .iter()
            .find(|u| u.player_id == player_id && u.active)
            .cloned())
    }

    async fn callsign_in_use(&self, callsign: &str) -> Result<bool, UnitError> {
        Ok(self
            .lock()
            .units
            .iter()
            .any(|u| u.callsign.as_deref() == Some(callsign)))
    }

    async fn insert_proposed(
        &self,
        player_id: i32,
        name: &str,
        unit_type: &str,
        max_proposed: usize,
    ) -> Result<Unit, UnitError> {
        let mut t = self.lock();
        let proposed = t
            .units
            .iter()
            .filter(|u| u.player_id == player_id && u.status == UnitStatus::Proposed)
            .count();
        if proposed >= max_proposed {
            return Err(UnitError::TooManyProposed(max_proposed));
        }
        if t.units.iter().any(|u| u.player_id == player_id && u.name == name) {
            return Err(UnitError::DuplicateName);
        }
        t.next_unit_id += 1;
        let unit = Unit {
            id: t.next_unit_id,
            player_id,
            name: name.to_string(),
            unit_type: unit_type.to_string(),
            callsign: None,
            active: false,
            status: UnitStatus::Proposed,
            created_at: Utc::now(),
        };
        t.units.push(unit.clone());
        Ok(unit)
    }

    async fn activate(&self, unit: &Unit, callsign: &str) -> Result<Unit, UnitError> {
        let mut t = self.lock();
        if t
            .units
            .iter()
            .any(|u| u.player_id == unit.player_id && u.active)
        {
            return Err(UnitError::AlreadyActive);
        }
        if t.units.iter().any(|u| u.callsign.as_deref() == Some(callsign)) {
            return Err(UnitError::CallsignTaken);
        }
        let row = t.unit_mut(unit.id).ok_or(UnitError::UnitNotFound)?;
        if row.status != UnitStatus::Inactive {
            return Err(UnitError::UnitNotInactive);
        }
        row.active = true;
        row.status = UnitStatus::Active;
        row.callsign = Some(callsign.to_string());
        Ok(row.clone())
    }

    async fn deactivate(&self, unit: &Unit) -> Result<Unit, UnitError> {
        let mut t = self.lock();
        let row = t
            .unit_mut(unit.id)
            .filter(|u| u.active)
            .ok_or(UnitError::NoActiveUnit)?;
        row.active = false;
        row.status = UnitStatus::Inactive;
        row.callsign = None;
        Ok(row.clone())
    }

    async fn delete_proposed(&self, unit: &Unit) -> Result<bool, UnitError> {
        let mut t = self.lock();
        let before = t.units.len();
        t.units
            .retain(|u| !(u.id == unit.id && u.status == UnitStatus::Proposed));
        Ok(t.units.len() < before)
    }

    async fn rename(&self, unit: &Unit, new_name: &str) -> Result<Unit, UnitError> {
        let mut t = self.lock();
        if t
            .units
            .iter()
            .any(|u| u.player_id == unit.player_id && u.name == new_name)
        {
            return Err(UnitError::DuplicateName);
        }
        let row = t.unit_mut(unit.id).ok_or(UnitError::UnitNotFound)?;
        row.name = new_name.to_string();
        Ok(row.clone())
    }

    async fn set_unit_type(&self, unit: &Unit, unit_type: &str) -> Result<Unit, UnitError> {
        let mut t = self.lock();
        let row = t.unit_mut(unit.id).ok_or(UnitError::UnitNotFound)?;
        row.unit_type = unit_type.to_string();
        Ok(row.clone())
    }
}
