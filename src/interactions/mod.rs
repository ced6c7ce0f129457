//! Component and modal interaction handlers.

pub mod ids;
pub mod unit_handler;
pub mod util;
