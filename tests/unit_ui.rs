use chrono::Utc;
use metacampaign_bot::commands::unit::ui::{
    GENERIC_FAILURE, MAX_MENU_OPTIONS, failure_message, listing_failure_message, menu_prompt,
    units_table,
};
use metacampaign_bot::interactions::unit_handler::submitted_name;
use metacampaign_bot::database::models::{Player, Unit, UnitStatus};
use metacampaign_bot::units::UnitError;

fn unit(id: i32, name: &str, callsign: Option<&str>, status: UnitStatus) -> Unit {
    Unit {
        id,
        player_id: 1,
        name: name.into(),
        unit_type: "Infantry".into(),
        callsign: callsign.map(str::to_string),
        active: status == UnitStatus::Active,
        status,
        created_at: Utc::now(),
    }
}

#[test]
fn table_lists_every_unit() {
    let player = Player {
        id: 1,
        discord_id: 99,
        name: "Vanguard".into(),
    };
    let units = vec![
        unit(1, "Alpha", Some("A1"), UnitStatus::Active),
        unit(2, "Beta", None, UnitStatus::Proposed),
    ];
    let table = units_table(&player, &units);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "Here are Vanguard's Units:");
    assert_eq!(lines[2], "| Unit Name | Callsign | Unit Type | Status |");
    assert_eq!(lines[4], "| Alpha | A1 | Infantry | ACTIVE |");
    assert_eq!(lines[5], "| Beta | - | Infantry | PROPOSED |");
    assert_eq!(lines.len(), 6);
}

#[test]
fn failure_messages() {
    assert_eq!(
        failure_message(&UnitError::NoCompany),
        "You don't have a Meta Campaign company"
    );
    assert_eq!(
        failure_message(&UnitError::TooManyProposed(3)),
        "You already have 3 proposed Units, which is the maximum allowed"
    );
    assert_eq!(
        failure_message(&UnitError::Database(sqlx::Error::PoolClosed)),
        GENERIC_FAILURE
    );
    assert_eq!(
        listing_failure_message(&UnitError::NoUnits),
        "User doesn't have any Units"
    );
}

#[test]
fn menu_prompt_notes_truncation() {
    assert_eq!(menu_prompt("Pick one", 3), "Pick one");
    assert_eq!(menu_prompt("Pick one", MAX_MENU_OPTIONS), "Pick one");
    assert_eq!(
        menu_prompt("Pick one", 40),
        "Pick one (showing the first 25 of 40 units)"
    );
}

#[test]
fn blank_rename_submissions_are_ignored() {
    assert_eq!(submitted_name(None), None);
    assert_eq!(submitted_name(Some(String::new())), None);
    assert_eq!(submitted_name(Some("   ".into())), None);
    assert_eq!(submitted_name(Some("Delta".into())), Some("Delta".to_string()));
}
