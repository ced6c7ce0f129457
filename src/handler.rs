use crate::interactions::ids::is_unit_family;
use crate::{AppState, commands, interactions};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::Interaction;
use serenity::model::{gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use tracing::{error, info, warn};

pub struct Handler {
    pub allowed_guild_id: GuildId,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let guild_id = match &interaction {
            Interaction::Command(c) => c.guild_id,
            Interaction::Component(c) => c.guild_id,
            Interaction::Modal(m) => m.guild_id,
            _ => return,
        };
        if guild_id != Some(self.allowed_guild_id) {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            warn!("missing_app_state");
            return;
        };
        match &interaction {
            Interaction::Command(command) => {
                if command.data.name.as_str() == "unit" {
                    commands::unit::run_slash(&ctx, command, app_state).await
                }
            }
            Interaction::Component(component) if is_unit_family(&component.data.custom_id) => {
                interactions::unit_handler::handle(&ctx, component, app_state).await
            }
            Interaction::Modal(modal) if is_unit_family(&modal.data.custom_id) => {
                interactions::unit_handler::handle_modal(&ctx, modal, app_state).await
            }
            _ => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "connected and ready");
        let commands_to_register = vec![commands::unit::register()];
        match self
            .allowed_guild_id
            .set_commands(&ctx.http, commands_to_register)
            .await
        {
            Ok(registered) => info!(count = registered.len(), "registered guild commands"),
            Err(e) => error!(error = ?e, "error creating guild commands"),
        }
    }
}
