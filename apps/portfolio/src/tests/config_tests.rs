use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let settings = settings_from_sources(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.session_options().submit_delay,
        Duration::from_millis(2000)
    );
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
submit_delay_ms = 150
submit_timeout_ms = 900
simulate_failure = true
log_filter = "debug"
projects_path = "./data/projects.json"
"#;
    let settings = settings_from_sources(Some(raw), env_from(&[])).expect("settings");
    assert_eq!(settings.submit_delay_ms, 150);
    assert_eq!(settings.submit_timeout_ms, Some(900));
    assert!(settings.simulate_failure);
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(
        settings.projects_path.as_deref(),
        Some(Path::new("./data/projects.json"))
    );
    assert_eq!(settings.event_capacity, 256);

    let options = settings.session_options();
    assert_eq!(options.submit_timeout, Some(Duration::from_millis(900)));
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let raw = "submit_delay_ms = 150\n";
    let settings = settings_from_sources(
        Some(raw),
        env_from(&[
            ("PORTFOLIO_SUBMIT_DELAY_MS", "300"),
            ("APP__SUBMIT_DELAY_MS", "400"),
            ("PORTFOLIO_SIMULATE_FAILURE", "yes"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.submit_delay_ms, 400);
    assert!(settings.simulate_failure);
}

#[test]
fn unparsable_env_numbers_are_ignored() {
    let settings = settings_from_sources(
        None,
        env_from(&[
            ("PORTFOLIO_SUBMIT_DELAY_MS", "soon"),
            ("PORTFOLIO_EVENT_CAPACITY", "-3"),
            ("PORTFOLIO_SIMULATE_FAILURE", "maybe"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.submit_delay_ms, 2000);
    assert_eq!(settings.event_capacity, 256);
    assert!(!settings.simulate_failure);
}

#[test]
fn malformed_toml_is_an_error() {
    let err = settings_from_sources(Some("submit_delay_ms = ["), env_from(&[]))
        .expect_err("bad toml");
    assert!(err.to_string().contains("invalid portfolio config"));
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("portfolio_missing_{suffix}.toml"));
    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(format!("{err:#}").contains("failed to read config file"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("portfolio_config_{suffix}.toml"));
    fs::write(&path, "event_capacity = 8\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("settings");
    assert_eq!(settings.event_capacity, 8);

    fs::remove_file(path).expect("cleanup");
}
