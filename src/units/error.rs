//! Named outcomes of unit lifecycle operations.

use thiserror::Error;

/// Every rejection a unit operation can produce. All variants except
/// [`UnitError::Database`] are expected, user-facing outcomes; the display
/// text is the reply shown to the player.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("You don't have a Meta Campaign company")]
    NoCompany,
    #[error("You already have {0} proposed Units, which is the maximum allowed")]
    TooManyProposed(usize),
    #[error("You already have a unit with that name")]
    DuplicateName,
    #[error("Unit name is too long, please use a shorter name")]
    NameTooLong,
    #[error("Callsign is too long, please use a shorter callsign")]
    CallsignTooLong,
    #[error("Names and callsigns cannot contain discord tags")]
    InvalidCharacters,
    #[error("Names and callsigns must be ASCII")]
    NotAscii,
    #[error("That unit type is not available")]
    UnknownUnitType,
    #[error("You don't have any units")]
    NoUnits,
    #[error("You don't have any proposed units")]
    NoProposedUnits,
    #[error("You don't have any active units")]
    NoActiveUnit,
    #[error("You already have an active unit")]
    AlreadyActive,
    #[error("That callsign is already taken")]
    CallsignTaken,
    #[error("That unit is not inactive")]
    UnitNotInactive,
    #[error("Unit not found")]
    UnitNotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UnitError {
    /// False only for infrastructure faults that should be logged and
    /// answered with a generic failure message.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, UnitError::Database(_))
    }
}
