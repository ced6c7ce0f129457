//! Shared interaction helpers: single response wrappers that log failures.
use serenity::builder::CreateInteractionResponse;
use serenity::model::application::{CommandInteraction, ComponentInteraction, ModalInteraction};
use serenity::prelude::Context;

pub async fn respond_command(
    ctx: &Context,
    c: &CommandInteraction,
    tag: &str,
    response: CreateInteractionResponse,
) {
    if let Err(e) = c.create_response(&ctx.http, response).await {
        tracing::error!(target: "ui.respond", command=%c.data.name, tag=%tag, error=?e, "create_response failed");
    }
}

pub async fn respond_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    response: CreateInteractionResponse,
) {
    if let Err(e) = c.create_response(&ctx.http, response).await {
        tracing::error!(target: "ui.respond", cid=%c.data.custom_id, tag=%tag, error=?e, "create_response failed");
    }
}

pub async fn respond_modal(
    ctx: &Context,
    m: &ModalInteraction,
    tag: &str,
    response: CreateInteractionResponse,
) {
    if let Err(e) = m.create_response(&ctx.http, response).await {
        tracing::error!(target: "ui.respond", cid=%m.data.custom_id, tag=%tag, error=?e, "create_response failed");
    }
}

/// Log a failed operation at the level its kind deserves.
pub fn log_unit_error(tag: &str, user_id: u64, err: &crate::units::UnitError) {
    if err.is_user_facing() {
        tracing::debug!(target: "units", tag=%tag, user_id, reason=%err, "rejected");
    } else {
        tracing::error!(target: "units", tag=%tag, user_id, error=?err, "operation failed");
    }
}
