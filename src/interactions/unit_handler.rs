//! Handles unit select menus and the rename modal.
//!
//! Every handler passes the selection straight to the matching
//! [`UnitManager`](crate::units::UnitManager) call, which re-validates the
//! whole operation; nothing shown in the earlier menu is trusted.

use super::ids::{UNIT_RENAME_INPUT, UnitAction, parse_unit_action};
use super::util::{log_unit_error, respond_component, respond_modal};
use crate::AppState;
use crate::commands::unit::ui::{
    failure_message, menu_message, message, rename_modal, unit_type_menu,
};
use crate::units::UnitError;
use serenity::builder::CreateInteractionResponse;
use serenity::model::application::{
    ActionRowComponent, ComponentInteraction, ComponentInteractionDataKind, ModalInteraction,
};
use serenity::prelude::Context;
use std::sync::Arc;
use tracing::{instrument, warn};

fn selected_value(component: &ComponentInteraction) -> Option<String> {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.first().cloned(),
        _ => None,
    }
}

fn modal_input(modal: &ModalInteraction, input_id: &str) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|c| match c {
            ActionRowComponent::InputText(input) if input.custom_id == input_id => {
                input.value.clone()
            }
            _ => None,
        })
}

/// The rename modal's value, if one was actually typed.
pub fn submitted_name(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[instrument(level = "info", skip(ctx, component, app_state), fields(user_id = component.user.id.get(), custom_id = %component.data.custom_id))]
pub async fn handle(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    let Some(action) = parse_unit_action(&component.data.custom_id) else {
        warn!("unknown_unit_component");
        return;
    };
    let Some(selected) = selected_value(component) else {
        warn!("unit_component_without_selection");
        return;
    };
    let eph = app_state.use_ephemeral;
    let account = component.user.id.get();
    let units = &app_state.units;

    let outcome: Result<CreateInteractionResponse, UnitError> = match &action {
        UnitAction::Create { name } => units
            .create_unit(account, name, &selected)
            .await
            .map(|u| message(format!("Unit {} created", u.name), eph)),
        UnitAction::Activate { callsign } => units
            .activate_unit(account, &selected, callsign)
            .await
            .map(|u| message(format!("Unit {} activated", u.name), eph)),
        UnitAction::Remove => units
            .remove_proposed_unit(account, &selected)
            .await
            .map(|u| message(format!("Unit {} removed", u.name), eph)),
        UnitAction::Rename => match units.rename_candidates(account).await {
            Ok(roster) if roster.units.iter().any(|u| u.name == selected) => {
                Ok(CreateInteractionResponse::Modal(rename_modal(&selected)))
            }
            Ok(_) => Err(UnitError::UnitNotFound),
            Err(e) => Err(e),
        },
        UnitAction::Retype => Ok(menu_message(
            format!("Please select the new unit type for {selected}"),
            unit_type_menu(
                &UnitAction::RetypeTo { name: selected.clone() },
                units.unit_types(),
                "Select the unit type",
            ),
            eph,
        )),
        UnitAction::RetypeTo { name } => units
            .change_unit_type(account, name, &selected)
            .await
            .map(|u| message(format!("Unit {} unit type changed to {}", u.name, u.unit_type), eph)),
        UnitAction::RenameSubmit { .. } => {
            warn!("rename_modal_id_on_component");
            return;
        }
    };

    let response = outcome.unwrap_or_else(|e| {
        log_unit_error(&component.data.custom_id, account, &e);
        message(failure_message(&e), eph)
    });
    respond_component(ctx, component, "unit", response).await;
}

#[instrument(level = "info", skip(ctx, modal, app_state), fields(user_id = modal.user.id.get(), custom_id = %modal.data.custom_id))]
pub async fn handle_modal(ctx: &Context, modal: &ModalInteraction, app_state: Arc<AppState>) {
    let Some(UnitAction::RenameSubmit { name }) = parse_unit_action(&modal.data.custom_id) else {
        warn!("unknown_unit_modal");
        return;
    };
    let eph = app_state.use_ephemeral;
    let account = modal.user.id.get();
    let Some(new_name) = submitted_name(modal_input(modal, UNIT_RENAME_INPUT)) else {
        warn!("rename_modal_without_name");
        return;
    };
    tracing::debug!(target: "units", new_name = %new_name, "rename submitted");

    let response = match app_state.units.rename_unit(account, &name, &new_name).await {
        Ok(unit) => message(format!("Unit {name} renamed to {}", unit.name), eph),
        Err(e) => {
            log_unit_error("rename_modal", account, &e);
            message(failure_message(&e), eph)
        }
    };
    respond_modal(ctx, modal, "unit_rename", response).await;
}
