//! Persistence seam for the unit lifecycle.

use super::error::UnitError;
use crate::database::models::{Player, Unit};
use async_trait::async_trait;

/// Whole-row reads and guarded writes over players and units.
///
/// Read methods are plain lookups. Write methods must re-check the invariant
/// they touch atomically with the write and report a violation as the
/// matching [`UnitError`], so that two racing callers cannot both succeed
/// after both passed the manager's earlier reads.
#[async_trait]
pub trait UnitStore: Send + Sync {
    async fn find_player(&self, discord_id: u64) -> Result<Option<Player>, UnitError>;

    async fn units_for_player(&self, player_id: i32) -> Result<Vec<Unit>, UnitError>;

    async fn find_unit_by_name(
        &self,
        player_id: i32,
        name: &str,
    ) -> Result<Option<Unit>, UnitError>;

    async fn find_active_unit(&self, player_id: i32) -> Result<Option<Unit>, UnitError>;

    async fn callsign_in_use(&self, callsign: &str) -> Result<bool, UnitError>;

    /// Inserts a PROPOSED, inactive unit. Fails with `TooManyProposed` when
    /// the player already holds `max_proposed` proposed units and with
    /// `DuplicateName` when the name is taken.
    async fn insert_proposed(
        &self,
        player_id: i32,
        name: &str,
        unit_type: &str,
        max_proposed: usize,
    ) -> Result<Unit, UnitError>;

    /// INACTIVE -> ACTIVE with the callsign. Fails with `UnitNotInactive`,
    /// `AlreadyActive` or `CallsignTaken`.
    async fn activate(&self, unit: &Unit, callsign: &str) -> Result<Unit, UnitError>;

    /// Clears `active` and the callsign and sets INACTIVE. Fails with
    /// `NoActiveUnit` if the unit is no longer active.
    async fn deactivate(&self, unit: &Unit) -> Result<Unit, UnitError>;

    /// Deletes the unit if it is still PROPOSED. Returns whether a row went.
    async fn delete_proposed(&self, unit: &Unit) -> Result<bool, UnitError>;

    async fn rename(&self, unit: &Unit, new_name: &str) -> Result<Unit, UnitError>;

    async fn set_unit_type(&self, unit: &Unit, unit_type: &str) -> Result<Unit, UnitError>;
}
