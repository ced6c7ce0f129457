//! Implements the `/unit` command family for managing a company's units.

pub mod run;
pub mod ui;

pub use run::{register, run_slash};
