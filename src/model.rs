//! Shared state stored in Serenity's global context as a `TypeMapKey`.

use crate::units::UnitManager;
use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;

/// A container for the ShardManager, allowing it to be stored in the global context.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// The central, shared state of the application. An `Arc<AppState>` is
/// stored in the global context for access from any command or handler.
pub struct AppState {
    /// Unit lifecycle operations, backed by PostgreSQL in production.
    pub units: UnitManager,
    /// Whether replies are only visible to the invoking user.
    pub use_ephemeral: bool,
}

impl AppState {
    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
