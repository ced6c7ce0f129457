//! UI builders for the `/unit` command family.

use crate::constants::{MAX_RENAME_NAME_LEN, status_icon};
use crate::database::models::{Player, Unit};
use crate::interactions::ids::{UNIT_RENAME_INPUT, UnitAction};
use crate::units::UnitError;
use serenity::builder::{
    CreateActionRow, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateModal, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption,
};
use serenity::model::application::InputTextStyle;

/// Discord select menus hold at most this many options.
pub const MAX_MENU_OPTIONS: usize = 25;

pub const GENERIC_FAILURE: &str = "Something went wrong, please try again later.";

/// Text shown to the player for a failed operation.
pub fn failure_message(err: &UnitError) -> String {
    if err.is_user_facing() {
        err.to_string()
    } else {
        GENERIC_FAILURE.to_string()
    }
}

/// `/unit units` talks about another user, so the two lookup failures are
/// phrased in the third person.
pub fn listing_failure_message(err: &UnitError) -> String {
    match err {
        UnitError::NoCompany => "User doesn't have a Meta Campaign company".to_string(),
        UnitError::NoUnits => "User doesn't have any Units".to_string(),
        other => failure_message(other),
    }
}

pub fn message(content: impl Into<String>, ephemeral: bool) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(ephemeral),
    )
}

pub fn menu_message(
    content: impl Into<String>,
    row: CreateActionRow,
    ephemeral: bool,
) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .components(vec![row])
            .ephemeral(ephemeral),
    )
}

pub fn unit_type_menu(action: &UnitAction, unit_types: &[String], placeholder: &str) -> CreateActionRow {
    let options = unit_types
        .iter()
        .take(MAX_MENU_OPTIONS)
        .map(|t| CreateSelectMenuOption::new(t, t))
        .collect();
    let menu = CreateSelectMenu::new(action.custom_id(), CreateSelectMenuKind::String { options })
        .placeholder(placeholder);
    CreateActionRow::SelectMenu(menu)
}

/// Prompt for a unit menu, noting when the roster does not fit.
pub fn menu_prompt(prompt: &str, total: usize) -> String {
    if total > MAX_MENU_OPTIONS {
        format!("{prompt} (showing the first {MAX_MENU_OPTIONS} of {total} units)")
    } else {
        prompt.to_string()
    }
}

pub fn unit_menu(action: &UnitAction, units: &[Unit], placeholder: &str) -> CreateActionRow {
    if units.len() > MAX_MENU_OPTIONS {
        tracing::warn!(target: "ui.menu", total = units.len(), shown = MAX_MENU_OPTIONS, "unit menu truncated");
    }
    let options = units
        .iter()
        .take(MAX_MENU_OPTIONS)
        .map(|u| {
            CreateSelectMenuOption::new(&u.name, &u.name)
                .description(format!("{} {} ({})", status_icon(u.status), u.unit_type, u.status))
        })
        .collect();
    let menu = CreateSelectMenu::new(action.custom_id(), CreateSelectMenuKind::String { options })
        .placeholder(placeholder);
    CreateActionRow::SelectMenu(menu)
}

pub fn rename_modal(unit_name: &str) -> CreateModal {
    let input = CreateInputText::new(InputTextStyle::Short, "New Name", UNIT_RENAME_INPUT)
        .placeholder(unit_name)
        .max_length(MAX_RENAME_NAME_LEN as u16)
        .required(true);
    let action = UnitAction::RenameSubmit {
        name: unit_name.to_string(),
    };
    CreateModal::new(action.custom_id(), "Rename Unit")
        .components(vec![CreateActionRow::InputText(input)])
}

/// Markdown table of a player's units for `/unit units`.
pub fn units_table(player: &Player, units: &[Unit]) -> String {
    let mut out = format!("Here are {}'s Units:\n\n", player.name);
    out.push_str("| Unit Name | Callsign | Unit Type | Status |\n");
    out.push_str("|-----------|----------|-----------|--------|\n");
    for u in units {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            u.name,
            u.callsign.as_deref().unwrap_or("-"),
            u.unit_type,
            u.status
        ));
    }
    out
}
