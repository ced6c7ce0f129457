use metacampaign_bot::interactions::ids::{
    UNIT_ACTIVATE_PREFIX, UNIT_REMOVE, UnitAction, is_unit_family, parse_unit_action,
};

#[test]
fn parse_fixed_ids() {
    assert_eq!(parse_unit_action(UNIT_REMOVE), Some(UnitAction::Remove));
    assert_eq!(parse_unit_action("unit_rename"), Some(UnitAction::Rename));
    assert_eq!(parse_unit_action("unit_retype"), Some(UnitAction::Retype));
}

#[test]
fn parse_payload_ids() {
    assert_eq!(
        parse_unit_action("unit_create:Iron Wolves"),
        Some(UnitAction::Create {
            name: "Iron Wolves".into()
        })
    );
    assert_eq!(
        parse_unit_action(&format!("{UNIT_ACTIVATE_PREFIX}A1")),
        Some(UnitAction::Activate {
            callsign: "A1".into()
        })
    );
    assert_eq!(
        parse_unit_action("unit_rename_modal:Alpha"),
        Some(UnitAction::RenameSubmit {
            name: "Alpha".into()
        })
    );
    assert_eq!(
        parse_unit_action("unit_retype_type:Alpha"),
        Some(UnitAction::RetypeTo {
            name: "Alpha".into()
        })
    );
}

#[test]
fn callsign_payload_may_contain_colons() {
    let action = UnitAction::Activate {
        callsign: "A:1".into(),
    };
    assert_eq!(parse_unit_action(&action.custom_id()), Some(action));
}

#[test]
fn parse_bad() {
    assert!(parse_unit_action("unit_create:").is_none());
    assert!(parse_unit_action("unit_activate").is_none());
    assert!(parse_unit_action("unit_removed").is_none());
    assert!(parse_unit_action("bond_host:select").is_none());
}

#[test]
fn family_matching() {
    assert!(is_unit_family("unit_remove"));
    assert!(is_unit_family("unit_create:Alpha"));
    assert!(!is_unit_family("units_table"));
    assert!(!is_unit_family("help_select_command"));
}
