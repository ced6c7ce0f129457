//! PostgreSQL implementation of [`UnitStore`].
//!
//! Guarded writes run in a transaction holding a per-player advisory lock,
//! and the unique indexes from `init.rs` catch the cross-player races the
//! lock cannot (two players claiming one callsign).

use super::init::DbPool;
use super::models::{Player, Unit, UnitStatus};
use crate::units::{UnitError, UnitStore};
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::{instrument, warn};

pub struct PgUnitStore {
    pool: DbPool,
}

impl PgUnitStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn begin_locked(&self, player_id: i32) -> Result<Transaction<'static, Postgres>, UnitError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(player_id))
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

/// Maps unique-index violations to the invariant they protect.
pub(crate) fn map_conflict(err: sqlx::Error) -> UnitError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        match db.constraint() {
            Some("units_player_name_key") => return UnitError::DuplicateName,
            Some("units_callsign_key") => return UnitError::CallsignTaken,
            Some("units_one_active_per_player") => return UnitError::AlreadyActive,
            other => warn!(target: "database", constraint = ?other, "unmapped unique violation"),
        }
    }
    UnitError::Database(err)
}

#[async_trait]
impl UnitStore for PgUnitStore {
    #[instrument(level = "trace", skip(self))]
    async fn find_player(&self, discord_id: u64) -> Result<Option<Player>, UnitError> {
        let player = sqlx::query_as::<_, Player>(
            "SELECT id, discord_id, name FROM players WHERE discord_id = $1",
        )
        .bind(discord_id as i64)
        .fetch_optional(&self.pool)
        .await?;
        Ok(player)
    }

    #[instrument(level = "trace", skip(self))]
    async fn units_for_player(&self, player_id: i32) -> Result<Vec<Unit>, UnitError> {
        let units = sqlx::query_as::<_, Unit>(
            "SELECT id, player_id, name, unit_type, callsign, active, status, created_at
             FROM units WHERE player_id = $1 ORDER BY id",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(units)
    }

    #[instrument(level = "trace", skip(self))]
    async fn find_unit_by_name(
        &self,
        player_id: i32,
        name: &str,
    ) -> Result<Option<Unit>, UnitError> {
        let unit = sqlx::query_as::<_, Unit>(
            "SELECT id, player_id, name, unit_type, callsign, active, status, created_at
             FROM units WHERE player_id = $1 AND name = $2",
        )
        .bind(player_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    #[instrument(level = "trace", skip(self))]
    async fn find_active_unit(&self, player_id: i32) -> Result<Option<Unit>, UnitError> {
        let unit = sqlx::query_as::<_, Unit>(
            "SELECT id, player_id, name, unit_type, callsign, active, status, created_at
             FROM units WHERE player_id = $1 AND active = TRUE",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    #[instrument(level = "trace", skip(self))]
    async fn callsign_in_use(&self, callsign: &str) -> Result<bool, UnitError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM units WHERE callsign = $1)",
        )
        .bind(callsign)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[instrument(level = "debug", skip(self))]
    async fn insert_proposed(
        &self,
        player_id: i32,
        name: &str,
        unit_type: &str,
        max_proposed: usize,
    ) -> Result<Unit, UnitError> {
        let mut tx = self.begin_locked(player_id).await?;
        let proposed = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM units WHERE player_id = $1 AND status = 'PROPOSED'",
        )
        .bind(player_id)
        .fetch_one(&mut *tx)
        .await?;
        if proposed >= max_proposed as i64 {
            tx.rollback().await.ok();
            return Err(UnitError::TooManyProposed(max_proposed));
        }
        let unit = sqlx::query_as::<_, Unit>(
            "INSERT INTO units (player_id, name, unit_type, active, status)
             VALUES ($1, $2, $3, FALSE, $4)
             RETURNING id, player_id, name, unit_type, callsign, active, status, created_at",
        )
        .bind(player_id)
        .bind(name)
        .bind(unit_type)
        .bind(UnitStatus::Proposed)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_conflict)?;
        tx.commit().await?;
        Ok(unit)
    }

    #[instrument(level = "debug", skip(self, unit), fields(unit_id = unit.id))]
    async fn activate(&self, unit: &Unit, callsign: &str) -> Result<Unit, UnitError> {
        let mut tx = self.begin_locked(unit.player_id).await?;
        let has_active = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM units WHERE player_id = $1 AND active = TRUE)",
        )
        .bind(unit.player_id)
        .fetch_one(&mut *tx)
        .await?;
        if has_active {
            tx.rollback().await.ok();
            return Err(UnitError::AlreadyActive);
        }
        let status = sqlx::query_scalar::<_, UnitStatus>(
            "SELECT status FROM units WHERE id = $1 FOR UPDATE",
        )
        .bind(unit.id)
        .fetch_optional(&mut *tx)
        .await?;
        match status {
            None => {
                tx.rollback().await.ok();
                return Err(UnitError::UnitNotFound);
            }
            Some(s) if s != UnitStatus::Inactive => {
                tx.rollback().await.ok();
                return Err(UnitError::UnitNotInactive);
            }
            Some(_) => {}
        }
        let activated = sqlx::query_as::<_, Unit>(
            "UPDATE units SET active = TRUE, status = $2, callsign = $3 WHERE id = $1
             RETURNING id, player_id, name, unit_type, callsign, active, status, created_at",
        )
        .bind(unit.id)
        .bind(UnitStatus::Active)
        .bind(callsign)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_conflict)?;
        tx.commit().await?;
        Ok(activated)
    }

    #[instrument(level = "debug", skip(self, unit), fields(unit_id = unit.id))]
    async fn deactivate(&self, unit: &Unit) -> Result<Unit, UnitError> {
        sqlx::query_as::<_, Unit>(
            "UPDATE units SET active = FALSE, status = $2, callsign = NULL
             WHERE id = $1 AND active = TRUE
             RETURNING id, player_id, name, unit_type, callsign, active, status, created_at",
        )
        .bind(unit.id)
        .bind(UnitStatus::Inactive)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UnitError::NoActiveUnit)
    }

    #[instrument(level = "debug", skip(self, unit), fields(unit_id = unit.id))]
    async fn delete_proposed(&self, unit: &Unit) -> Result<bool, UnitError> {
        let deleted = sqlx::query("DELETE FROM units WHERE id = $1 AND status = $2")
            .bind(unit.id)
            .bind(UnitStatus::Proposed)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    #[instrument(level = "debug", skip(self, unit), fields(unit_id = unit.id))]
    async fn rename(&self, unit: &Unit, new_name: &str) -> Result<Unit, UnitError> {
        sqlx::query_as::<_, Unit>(
            "UPDATE units SET name = $2 WHERE id = $1
             RETURNING id, player_id, name, unit_type, callsign, active, status, created_at",
        )
        .bind(unit.id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_conflict)?
        .ok_or(UnitError::UnitNotFound)
    }

    #[instrument(level = "debug", skip(self, unit), fields(unit_id = unit.id))]
    async fn set_unit_type(&self, unit: &Unit, unit_type: &str) -> Result<Unit, UnitError> {
        sqlx::query_as::<_, Unit>(
            "UPDATE units SET unit_type = $2 WHERE id = $1
             RETURNING id, player_id, name, unit_type, callsign, active, status, created_at",
        )
        .bind(unit.id)
        .bind(unit_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UnitError::UnitNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::map_conflict;
    use crate::units::UnitError;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct Rejected {
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "rejected by {:?}", self.constraint)
        }
    }

    impl StdError for Rejected {}

    impl DatabaseError for Rejected {
        fn message(&self) -> &str {
            "rejected"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }
    }

    fn db_error(unique: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(Rejected { unique, constraint }))
    }

    #[test]
    fn unique_violations_map_to_invariants() {
        let unique = |name: &'static str| map_conflict(db_error(true, Some(name)));
        assert!(matches!(unique("units_player_name_key"), UnitError::DuplicateName));
        assert!(matches!(unique("units_callsign_key"), UnitError::CallsignTaken));
        assert!(matches!(
            unique("units_one_active_per_player"),
            UnitError::AlreadyActive
        ));
    }

    #[test]
    fn other_errors_stay_database_faults() {
        let unknown = map_conflict(db_error(true, Some("players_discord_id_key")));
        assert!(matches!(unknown, UnitError::Database(_)));
        let fk = map_conflict(db_error(false, Some("units_callsign_key")));
        assert!(matches!(fk, UnitError::Database(_)));
        assert!(matches!(
            map_conflict(sqlx::Error::PoolTimedOut),
            UnitError::Database(_)
        ));
    }
}
