//! Central hub for database-related logic: schema bootstrap, row models and
//! the PostgreSQL implementation of the unit store.

pub mod init;
pub mod models;
pub mod units;

pub use init::DbPool;
pub use units::PgUnitStore;
