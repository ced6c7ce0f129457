// Central limits for the unit roster.
pub const MAX_PROPOSED_UNITS: usize = 3;
pub const MAX_CREATE_NAME_LEN: usize = 30;
pub const MAX_RENAME_NAME_LEN: usize = 32; // rename modal allows two more than create
pub const MAX_CALLSIGN_LEN: usize = 10;
// Always rejected in unit names on top of BANNED_CHARS, keeps links out of names.
pub const NAME_EXTRA_BANNED: char = ':';
// Priority marker attached to recalculation requests after a removal.
pub const REMOVAL_RECALC_PRIORITY: u8 = 1;

pub const DEFAULT_UNIT_TYPES: &[&str] = &["Infantry", "Armor", "Artillery", "Air", "Support"];
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

use crate::database::models::UnitStatus;
/// Return a short icon for a given unit status.
pub fn status_icon(s: UnitStatus) -> &'static str {
    use UnitStatus::*;
    match s {
        Proposed => "📝",
        Inactive => "💤",
        Active => "⚔️",
    }
}
