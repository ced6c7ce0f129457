//! Runtime settings read from the environment (after `.env` is loaded).

use crate::constants::{DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_UNIT_TYPES};
use crate::units::UnitRules;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected {0} in the environment or .env file")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub server_id: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    pub unit_types: Vec<String>,
    pub banned_chars: String,
    pub use_ephemeral: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let server_id = required("SERVER_ID")?
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::Invalid {
                key: "SERVER_ID",
                reason: e.to_string(),
            })?;
        if server_id == 0 {
            return Err(ConfigError::Invalid {
                key: "SERVER_ID",
                reason: "guild ids are never zero".into(),
            });
        }
        let database_url = required("DATABASE_URL")?;

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse::<u32>().map_err(|e| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let unit_types = match lookup("UNIT_TYPES") {
            Some(raw) => parse_unit_types(&raw)?,
            None => DEFAULT_UNIT_TYPES.iter().map(|s| s.to_string()).collect(),
        };

        let use_ephemeral = match lookup("USE_EPHEMERAL") {
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                key: "USE_EPHEMERAL",
                reason: format!("expected true or false, got {v:?}"),
            })?,
            None => true,
        };

        Ok(Self {
            discord_token,
            server_id,
            database_url,
            db_max_connections,
            unit_types,
            banned_chars: lookup("BANNED_CHARS").unwrap_or_default(),
            use_ephemeral,
        })
    }

    pub fn unit_rules(&self) -> UnitRules {
        UnitRules::new(self.unit_types.clone(), self.banned_chars.clone())
    }
}

fn parse_unit_types(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut types: Vec<String> = Vec::new();
    for t in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !types.iter().any(|seen| seen == t) {
            types.push(t.to_string());
        }
    }
    if types.is_empty() {
        return Err(ConfigError::Invalid {
            key: "UNIT_TYPES",
            reason: "no unit types listed".into(),
        });
    }
    // Discord select menus hold at most 25 options.
    if types.len() > 25 {
        return Err(ConfigError::Invalid {
            key: "UNIT_TYPES",
            reason: format!("{} unit types listed, at most 25 fit a menu", types.len()),
        });
    }
    Ok(types)
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
