//! The unit lifecycle: validated state transitions on behalf of a player.

use super::error::UnitError;
use super::recalc::{RecalcSender, Recalculation};
use super::store::UnitStore;
use super::validate::UnitRules;
use crate::constants::{
    MAX_CREATE_NAME_LEN, MAX_PROPOSED_UNITS, MAX_RENAME_NAME_LEN, REMOVAL_RECALC_PRIORITY,
};
use crate::database::models::{Player, Unit, UnitStatus};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A player together with the units shown to them for a selection.
#[derive(Debug, Clone)]
pub struct Roster {
    pub player: Player,
    pub units: Vec<Unit>,
}

/// Result of a deactivation; the callsign is cleared on the unit, so the one
/// that was released is returned alongside it.
#[derive(Debug, Clone)]
pub struct Deactivated {
    pub unit: Unit,
    pub released_callsign: Option<String>,
}

/// Validates and applies unit transitions. Interactive flows are split into
/// a `*_candidates` call that lists units and an apply call that takes the
/// selected name and re-checks every precondition itself.
#[derive(Clone)]
pub struct UnitManager {
    store: Arc<dyn UnitStore>,
    rules: Arc<UnitRules>,
    recalc: RecalcSender,
}

impl UnitManager {
    pub fn new(store: Arc<dyn UnitStore>, rules: UnitRules, recalc: RecalcSender) -> Self {
        Self {
            store,
            rules: Arc::new(rules),
            recalc,
        }
    }

    pub fn unit_types(&self) -> &[String] {
        &self.rules.unit_types
    }

    async fn player(&self, account: u64) -> Result<Player, UnitError> {
        self.store
            .find_player(account)
            .await?
            .ok_or(UnitError::NoCompany)
    }

    async fn owned_units(&self, player: &Player) -> Result<Vec<Unit>, UnitError> {
        let units = self.store.units_for_player(player.id).await?;
        if units.is_empty() {
            return Err(UnitError::NoUnits);
        }
        Ok(units)
    }

    async fn proposed_units(&self, player: &Player) -> Result<Vec<Unit>, UnitError> {
        let units: Vec<Unit> = self
            .store
            .units_for_player(player.id)
            .await?
            .into_iter()
            .filter(|u| u.status == UnitStatus::Proposed)
            .collect();
        if units.is_empty() {
            return Err(UnitError::NoProposedUnits);
        }
        Ok(units)
    }

    async fn ensure_can_activate(&self, player: &Player, callsign: &str) -> Result<(), UnitError> {
        if self.store.find_active_unit(player.id).await?.is_some() {
            return Err(UnitError::AlreadyActive);
        }
        if self.store.callsign_in_use(callsign).await? {
            return Err(UnitError::CallsignTaken);
        }
        Ok(())
    }

    /// Every creation check that does not depend on the unit type, in the
    /// order `create_unit` applies them. Run before the type menu is shown.
    #[instrument(level = "debug", skip(self))]
    pub async fn creation_precheck(&self, account: u64, name: &str) -> Result<Player, UnitError> {
        let player = self.player(account).await?;
        let proposed = self
            .store
            .units_for_player(player.id)
            .await?
            .iter()
            .filter(|u| u.status == UnitStatus::Proposed)
            .count();
        debug!(target: "units", proposed, "proposed unit count");
        if proposed >= MAX_PROPOSED_UNITS {
            return Err(UnitError::TooManyProposed(MAX_PROPOSED_UNITS));
        }
        if self
            .store
            .find_unit_by_name(player.id, name)
            .await?
            .is_some()
        {
            return Err(UnitError::DuplicateName);
        }
        self.rules.check_name(name, MAX_CREATE_NAME_LEN)?;
        Ok(player)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn create_unit(
        &self,
        account: u64,
        name: &str,
        unit_type: &str,
    ) -> Result<Unit, UnitError> {
        let player = self.creation_precheck(account, name).await?;
        if !self.rules.is_known_type(unit_type) {
            return Err(UnitError::UnknownUnitType);
        }
        let unit = self
            .store
            .insert_proposed(player.id, name, unit_type, MAX_PROPOSED_UNITS)
            .await?;
        info!(target: "units", unit_id = unit.id, player = %player.name, "unit proposed");
        Ok(unit)
    }

    /// First phase of activation: everything that does not depend on which
    /// unit is picked.
    #[instrument(level = "debug", skip(self))]
    pub async fn activation_candidates(
        &self,
        account: u64,
        callsign: &str,
    ) -> Result<Roster, UnitError> {
        self.rules.check_callsign(callsign)?;
        let player = self.player(account).await?;
        let units = self.owned_units(&player).await?;
        self.ensure_can_activate(&player, callsign).await?;
        Ok(Roster { player, units })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn activate_unit(
        &self,
        account: u64,
        unit_name: &str,
        callsign: &str,
    ) -> Result<Unit, UnitError> {
        self.rules.check_callsign(callsign)?;
        let player = self.player(account).await?;
        self.owned_units(&player).await?;
        let unit = self
            .store
            .find_unit_by_name(player.id, unit_name)
            .await?
            .ok_or(UnitError::UnitNotFound)?;
        // The picked unit's status is reported before active/callsign conflicts.
        if unit.status != UnitStatus::Inactive {
            return Err(UnitError::UnitNotInactive);
        }
        self.ensure_can_activate(&player, callsign).await?;
        let unit = self.store.activate(&unit, callsign).await?;
        info!(target: "units", unit_id = unit.id, callsign, "unit activated");
        Ok(unit)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn deactivate_unit(&self, account: u64) -> Result<Deactivated, UnitError> {
        let player = self.player(account).await?;
        let active = self
            .store
            .find_active_unit(player.id)
            .await?
            .ok_or(UnitError::NoActiveUnit)?;
        let released_callsign = active.callsign.clone();
        let unit = self.store.deactivate(&active).await?;
        info!(target: "units", unit_id = unit.id, callsign = ?released_callsign, "unit deactivated");
        Ok(Deactivated {
            unit,
            released_callsign,
        })
    }

    pub async fn removal_candidates(&self, account: u64) -> Result<Roster, UnitError> {
        let player = self.player(account).await?;
        let units = self.proposed_units(&player).await?;
        Ok(Roster { player, units })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn remove_proposed_unit(
        &self,
        account: u64,
        unit_name: &str,
    ) -> Result<Unit, UnitError> {
        let Roster { player, units } = self.removal_candidates(account).await?;
        let unit = units
            .into_iter()
            .find(|u| u.name == unit_name)
            .ok_or(UnitError::UnitNotFound)?;
        if !self.store.delete_proposed(&unit).await? {
            return Err(UnitError::UnitNotFound);
        }
        info!(target: "units", unit_id = unit.id, player = %player.name, "proposed unit removed");
        let request = Recalculation {
            priority: REMOVAL_RECALC_PRIORITY,
            player,
        };
        if self.recalc.send(request).is_err() {
            warn!(target: "units", "recalculation queue closed; request dropped");
        }
        Ok(unit)
    }

    pub async fn rename_candidates(&self, account: u64) -> Result<Roster, UnitError> {
        let player = self.player(account).await?;
        let units = self.owned_units(&player).await?;
        Ok(Roster { player, units })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn rename_unit(
        &self,
        account: u64,
        unit_name: &str,
        new_name: &str,
    ) -> Result<Unit, UnitError> {
        let Roster { player, units } = self.rename_candidates(account).await?;
        let unit = units
            .iter()
            .find(|u| u.name == unit_name)
            .cloned()
            .ok_or(UnitError::UnitNotFound)?;
        if units.iter().any(|u| u.name == new_name) {
            return Err(UnitError::DuplicateName);
        }
        self.rules.check_name(new_name, MAX_RENAME_NAME_LEN)?;
        let renamed = self.store.rename(&unit, new_name).await?;
        info!(target: "units", unit_id = renamed.id, from = unit_name, to = new_name, player = %player.name, "unit renamed");
        Ok(renamed)
    }

    pub async fn retype_candidates(&self, account: u64) -> Result<Roster, UnitError> {
        let player = self.player(account).await?;
        let units = self.proposed_units(&player).await?;
        Ok(Roster { player, units })
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn change_unit_type(
        &self,
        account: u64,
        unit_name: &str,
        unit_type: &str,
    ) -> Result<Unit, UnitError> {
        let player = self.player(account).await?;
        let unit = self
            .store
            .find_unit_by_name(player.id, unit_name)
            .await?
            .ok_or(UnitError::UnitNotFound)?;
        if !self.rules.is_known_type(unit_type) {
            return Err(UnitError::UnknownUnitType);
        }
        let unit = self.store.set_unit_type(&unit, unit_type).await?;
        info!(target: "units", unit_id = unit.id, unit_type, "unit type changed");
        Ok(unit)
    }

    /// Read-only listing of another player's units.
    pub async fn list_units(&self, target_account: u64) -> Result<Roster, UnitError> {
        let player = self.player(target_account).await?;
        let units = self.owned_units(&player).await?;
        Ok(Roster { player, units })
    }
}
