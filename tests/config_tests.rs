use std::collections::HashMap;

use metacampaign_bot::config::{ConfigError, Settings};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

const BASE: [(&str, &str); 3] = [
    ("DISCORD_TOKEN", "token"),
    ("SERVER_ID", "123456789"),
    ("DATABASE_URL", "postgres://localhost/campaign"),
];

#[test]
fn defaults_apply() {
    let s = Settings::from_lookup(lookup(&BASE)).unwrap();
    assert_eq!(s.server_id, 123456789);
    assert!(s.use_ephemeral);
    assert_eq!(s.banned_chars, "");
    assert_eq!(s.db_max_connections, 5);
    assert!(s.unit_types.iter().any(|t| t == "Infantry"));
}

#[test]
fn unit_types_are_trimmed_and_deduplicated() {
    let mut pairs = BASE.to_vec();
    pairs.push(("UNIT_TYPES", " Mech , Aero,Mech,, Infantry "));
    pairs.push(("BANNED_CHARS", "@#<>"));
    pairs.push(("USE_EPHEMERAL", "false"));
    let s = Settings::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(s.unit_types, vec!["Mech", "Aero", "Infantry"]);
    assert!(!s.use_ephemeral);
    let rules = s.unit_rules();
    assert!(rules.is_known_type("Aero"));
    assert!(!rules.is_known_type("aero"));
    assert_eq!(rules.banned_chars, "@#<>");
}

#[test]
fn missing_required_values() {
    let err = Settings::from_lookup(lookup(&BASE[1..])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DISCORD_TOKEN"));

    let mut pairs = BASE.to_vec();
    pairs[2] = ("DATABASE_URL", "  ");
    let err = Settings::from_lookup(lookup(&pairs)).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
}

#[test]
fn invalid_values() {
    let mut pairs = BASE.to_vec();
    pairs[1] = ("SERVER_ID", "not-a-number");
    assert!(matches!(
        Settings::from_lookup(lookup(&pairs)),
        Err(ConfigError::Invalid { key: "SERVER_ID", .. })
    ));

    pairs[1] = ("SERVER_ID", "0");
    assert!(matches!(
        Settings::from_lookup(lookup(&pairs)),
        Err(ConfigError::Invalid { key: "SERVER_ID", .. })
    ));

    let mut pairs = BASE.to_vec();
    pairs.push(("USE_EPHEMERAL", "maybe"));
    assert!(matches!(
        Settings::from_lookup(lookup(&pairs)),
        Err(ConfigError::Invalid { key: "USE_EPHEMERAL", .. })
    ));

    let mut pairs = BASE.to_vec();
    pairs.push(("UNIT_TYPES", " , "));
    assert!(matches!(
        Settings::from_lookup(lookup(&pairs)),
        Err(ConfigError::Invalid { key: "UNIT_TYPES", .. })
    ));
}
