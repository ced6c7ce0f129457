use std::sync::Arc;

use metacampaign_bot::config::Settings;
use metacampaign_bot::database::{self, PgUnitStore};
use metacampaign_bot::handler::Handler;
use metacampaign_bot::model::{AppState, ShardManagerContainer};
use metacampaign_bot::units::{UnitManager, recalc};
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = dotenv::dotenv() {
        // Plain environment variables are enough in deployment.
        eprintln!("No .env file loaded: {e}");
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let pool = match database::init::connect(&settings.database_url, settings.db_max_connections)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "could not connect to the database");
            std::process::exit(1);
        }
    };
    if let Err(e) = database::init::ensure_schema(&pool).await {
        error!(error = %e, "could not prepare the database schema");
        std::process::exit(1);
    }

    let (recalc_tx, recalc_rx) = recalc::channel();
    tokio::spawn(recalc::run_consumer(recalc_rx));

    let app_state = Arc::new(AppState {
        units: UnitManager::new(
            Arc::new(PgUnitStore::new(pool)),
            settings.unit_rules(),
            recalc_tx,
        ),
        use_ephemeral: settings.use_ephemeral,
    });
    info!(
        unit_types = ?settings.unit_types,
        ephemeral = settings.use_ephemeral,
        "unit manager ready"
    );

    // Slash commands, components and modals all arrive with GUILDS.
    let intents = GatewayIntents::GUILDS;

    let mut client = match Client::builder(&settings.discord_token, intents)
        .event_handler(Handler {
            allowed_guild_id: GuildId::new(settings.server_id),
        })
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!(error = ?e, "error creating the Discord client");
            std::process::exit(1);
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(app_state);
    }

    if let Err(why) = client.start().await {
        warn!(error = ?why, "client error");
    }
}
