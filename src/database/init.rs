//! Shared database types and idempotent schema bootstrap.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

/// A type alias for the database connection pool (`Pool<Postgres>`).
pub type DbPool = Pool<Postgres>;

const SCHEMA: &[&str] = &[
    r#"DO $$ BEGIN
        CREATE TYPE unit_status AS ENUM ('PROPOSED', 'INACTIVE', 'ACTIVE');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$"#,
    r#"CREATE TABLE IF NOT EXISTS players (
        id SERIAL PRIMARY KEY,
        discord_id BIGINT NOT NULL UNIQUE,
        name TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS units (
        id SERIAL PRIMARY KEY,
        player_id INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        unit_type TEXT NOT NULL,
        callsign TEXT,
        active BOOLEAN NOT NULL DEFAULT FALSE,
        status unit_status NOT NULL DEFAULT 'PROPOSED',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT units_player_name_key UNIQUE (player_id, name)
    )"#,
    // Backstops for the two global invariants the manager checks before writing.
    "CREATE UNIQUE INDEX IF NOT EXISTS units_callsign_key ON units (callsign) WHERE callsign IS NOT NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS units_one_active_per_player ON units (player_id) WHERE active",
];

pub async fn connect(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::raw_sql(*statement).execute(pool).await?;
    }
    info!(target: "database", "schema ready");
    Ok(())
}
