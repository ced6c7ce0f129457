//! Implements the `/unit` slash command and its subcommands.

use super::ui::{
    failure_message, listing_failure_message, menu_message, menu_prompt, message, unit_menu,
    unit_type_menu, units_table,
};
use crate::AppState;
use crate::interactions::ids::{MAX_CUSTOM_ID_LEN, UnitAction};
use crate::interactions::util::{log_unit_error, respond_command};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType,
};
use serenity::model::id::UserId;
use serenity::prelude::*;
use std::sync::Arc;
use tracing::{instrument, warn};

pub fn register() -> CreateCommand {
    CreateCommand::new("unit")
        .description("Manage the units of your Meta Campaign company")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "create",
                "Create a new unit for a player",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "unit_name",
                    "The name of the unit to create",
                )
                .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "activate", "Activate a unit")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "callsign",
                        "The callsign of the unit to activate, must be globally unique",
                    )
                    .required(true),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "deactivate",
            "Deactivate a unit",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "remove_unit",
            "Remove a proposed unit from your company",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "rename",
            "Rename a unit",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "edit_type",
            "Change the unit type of a proposed unit",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "units",
                "Display a list of all Units for a Player",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "player",
                    "The player to deliver results for",
                )
                .required(true),
            ),
        )
}

fn string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        CommandDataOptionValue::String(s) => Some(s.clone()),
        _ => None,
    })
}

fn user_option(options: &[CommandDataOption], name: &str) -> Option<UserId> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        CommandDataOptionValue::User(id) => Some(*id),
        _ => None,
    })
}

#[instrument(level = "info", skip(ctx, interaction, app_state), fields(user_id = interaction.user.id.get()))]
pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, app_state: Arc<AppState>) {
    let Some(sub) = interaction.data.options.first() else {
        return;
    };
    let CommandDataOptionValue::SubCommand(nested) = &sub.value else {
        return;
    };
    let eph = app_state.use_ephemeral;
    let account = interaction.user.id.get();
    let units = &app_state.units;

    let response = match sub.name.as_str() {
        "create" => {
            let Some(name) = string_option(nested, "unit_name") else {
                return;
            };
            match units.creation_precheck(account, &name).await {
                Ok(_) => {
                    // The name rides in the custom_id until a type is picked.
                    let action = UnitAction::Create { name: name.clone() };
                    debug_assert!(action.custom_id().len() <= MAX_CUSTOM_ID_LEN);
                    menu_message(
                        format!("Please select the unit type for {name}"),
                        unit_type_menu(&action, units.unit_types(), "Select the type of unit to create"),
                        eph,
                    )
                }
                Err(e) => {
                    log_unit_error("create", account, &e);
                    message(failure_message(&e), eph)
                }
            }
        }
        "activate" => {
            let Some(callsign) = string_option(nested, "callsign") else {
                return;
            };
            match units.activation_candidates(account, &callsign).await {
                Ok(roster) => menu_message(
                    menu_prompt("Please select the unit to activate", roster.units.len()),
                    unit_menu(
                        &UnitAction::Activate { callsign },
                        &roster.units,
                        "Select the unit to activate",
                    ),
                    eph,
                ),
                Err(e) => {
                    log_unit_error("activate", account, &e);
                    message(failure_message(&e), eph)
                }
            }
        }
        "deactivate" => match units.deactivate_unit(account).await {
            Ok(done) => match done.released_callsign {
                Some(cs) => message(format!("Unit with callsign {cs} deactivated"), eph),
                None => message(format!("Unit {} deactivated", done.unit.name), eph),
            },
            Err(e) => {
                log_unit_error("deactivate", account, &e);
                message(failure_message(&e), eph)
            }
        },
        "remove_unit" => match units.removal_candidates(account).await {
            Ok(roster) => menu_message(
                menu_prompt("Please select the unit to remove", roster.units.len()),
                unit_menu(&UnitAction::Remove, &roster.units, "Select the unit to remove"),
                eph,
            ),
            Err(e) => {
                log_unit_error("remove_unit", account, &e);
                message(failure_message(&e), eph)
            }
        },
        "rename" => match units.rename_candidates(account).await {
            Ok(roster) => menu_message(
                menu_prompt("Please select the unit to rename", roster.units.len()),
                unit_menu(&UnitAction::Rename, &roster.units, "Select the unit to rename"),
                eph,
            ),
            Err(e) => {
                log_unit_error("rename", account, &e);
                message(failure_message(&e), eph)
            }
        },
        "edit_type" => match units.retype_candidates(account).await {
            Ok(roster) => menu_message(
                menu_prompt("Please select the unit to edit", roster.units.len()),
                unit_menu(&UnitAction::Retype, &roster.units, "Select the unit to edit"),
                eph,
            ),
            Err(e) => {
                log_unit_error("edit_type", account, &e);
                message(failure_message(&e), eph)
            }
        },
        "units" => {
            let Some(target) = user_option(nested, "player") else {
                return;
            };
            match units.list_units(target.get()).await {
                Ok(roster) => message(units_table(&roster.player, &roster.units), eph),
                Err(e) => {
                    log_unit_error("units", account, &e);
                    message(listing_failure_message(&e), eph)
                }
            }
        }
        other => {
            warn!(command = "unit", subcommand = other, "unknown_subcommand");
            return;
        }
    };
    respond_command(ctx, interaction, sub.name.as_str(), response).await;
}
