//! Format checks for user supplied unit names and callsigns.

use super::error::UnitError;
use crate::constants::{MAX_CALLSIGN_LEN, NAME_EXTRA_BANNED};

/// Validation inputs that come from configuration rather than code.
#[derive(Debug, Clone, Default)]
pub struct UnitRules {
    pub unit_types: Vec<String>,
    pub banned_chars: String,
}

impl UnitRules {
    pub fn new(unit_types: Vec<String>, banned_chars: impl Into<String>) -> Self {
        Self {
            unit_types,
            banned_chars: banned_chars.into(),
        }
    }

    pub fn is_known_type(&self, unit_type: &str) -> bool {
        self.unit_types.iter().any(|t| t == unit_type)
    }

    fn contains_banned(&self, value: &str) -> bool {
        value.chars().any(|c| self.banned_chars.contains(c))
    }

    /// Checks a unit name: length, then banned characters (including `:`),
    /// then ASCII.
    pub fn check_name(&self, name: &str, max_len: usize) -> Result<(), UnitError> {
        if name.chars().count() > max_len {
            return Err(UnitError::NameTooLong);
        }
        if name.contains(NAME_EXTRA_BANNED) || self.contains_banned(name) {
            return Err(UnitError::InvalidCharacters);
        }
        if !name.is_ascii() {
            return Err(UnitError::NotAscii);
        }
        Ok(())
    }

    /// Same order as [`check_name`](Self::check_name) but `:` is allowed.
    pub fn check_callsign(&self, callsign: &str) -> Result<(), UnitError> {
        if callsign.chars().count() > MAX_CALLSIGN_LEN {
            return Err(UnitError::CallsignTooLong);
        }
        if self.contains_banned(callsign) {
            return Err(UnitError::InvalidCharacters);
        }
        if !callsign.is_ascii() {
            return Err(UnitError::NotAscii);
        }
        Ok(())
    }
}
