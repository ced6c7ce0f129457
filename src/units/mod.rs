//! Unit lifecycle core: validation, state transitions and the persistence
//! seam they run through. Nothing in here knows about Discord.

pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod recalc;
pub mod store;
pub mod validate;

pub use error::UnitError;
pub use lifecycle::{Deactivated, Roster, UnitManager};
pub use memory::MemoryStore;
pub use recalc::{RecalcReceiver, RecalcSender, Recalculation};
pub use store::UnitStore;
pub use validate::UnitRules;
