//! Centralized custom_id strings for unit components and modals.
//!
//! State that a follow-up interaction needs (the name typed into `/unit
//! create`, the callsign given to `/unit activate`, the unit being renamed)
//! travels inside the custom_id after a `:`.

pub const UNIT_FAMILY: &str = "unit";

pub const UNIT_CREATE_PREFIX: &str = "unit_create:"; // followed by unit name
pub const UNIT_ACTIVATE_PREFIX: &str = "unit_activate:"; // followed by callsign
pub const UNIT_REMOVE: &str = "unit_remove";
pub const UNIT_RENAME: &str = "unit_rename";
pub const UNIT_RENAME_MODAL_PREFIX: &str = "unit_rename_modal:"; // followed by unit name
pub const UNIT_RENAME_INPUT: &str = "new_name";
pub const UNIT_RETYPE: &str = "unit_retype";
pub const UNIT_RETYPE_TYPE_PREFIX: &str = "unit_retype_type:"; // followed by unit name

/// Discord rejects custom_ids longer than this.
pub const MAX_CUSTOM_ID_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitAction {
    /// Unit type picked for a pending creation.
    Create { name: String },
    /// Unit picked for activation under `callsign`.
    Activate { callsign: String },
    Remove,
    /// Unit picked for renaming; opens the modal.
    Rename,
    /// Rename modal submitted for `name`.
    RenameSubmit { name: String },
    /// Unit picked for a type change; shows the type menu.
    Retype,
    /// New type picked for `name`.
    RetypeTo { name: String },
}

impl UnitAction {
    pub fn custom_id(&self) -> String {
        match self {
            UnitAction::Create { name } => format!("{UNIT_CREATE_PREFIX}{name}"),
            UnitAction::Activate { callsign } => format!("{UNIT_ACTIVATE_PREFIX}{callsign}"),
            UnitAction::Remove => UNIT_REMOVE.to_string(),
            UnitAction::Rename => UNIT_RENAME.to_string(),
            UnitAction::RenameSubmit { name } => format!("{UNIT_RENAME_MODAL_PREFIX}{name}"),
            UnitAction::Retype => UNIT_RETYPE.to_string(),
            UnitAction::RetypeTo { name } => format!("{UNIT_RETYPE_TYPE_PREFIX}{name}"),
        }
    }
}

pub fn is_unit_family(id: &str) -> bool {
    id.split(['_', ':']).next() == Some(UNIT_FAMILY)
}

/// Parse a unit custom_id. Payloads may themselves contain `:`; only the
/// first one separates it from the prefix. Empty payloads are rejected.
pub fn parse_unit_action(id: &str) -> Option<UnitAction> {
    match id {
        UNIT_REMOVE => return Some(UnitAction::Remove),
        UNIT_RENAME => return Some(UnitAction::Rename),
        UNIT_RETYPE => return Some(UnitAction::Retype),
        _ => {}
    }
    let payload = |prefix: &str| {
        id.strip_prefix(prefix)
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    };
    if let Some(name) = payload(UNIT_CREATE_PREFIX) {
        return Some(UnitAction::Create { name });
    }
    if let Some(callsign) = payload(UNIT_ACTIVATE_PREFIX) {
        return Some(UnitAction::Activate { callsign });
    }
    if let Some(name) = payload(UNIT_RENAME_MODAL_PREFIX) {
        return Some(UnitAction::RenameSubmit { name });
    }
    if let Some(name) = payload(UNIT_RETYPE_TYPE_PREFIX) {
        return Some(UnitAction::RetypeTo { name });
    }
    None
}
