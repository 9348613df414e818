use std::io::Write;
use std::time::Duration;
use unity_core::config::PlatformConfig;
use unity_core::error::ConfigError;
use unity_core::mock::HistoryWindow;
use unity_core::wizard::CreateAgentWizard;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "persona_prompt_max_chars = 40\ndefault_monthly_budget = \"2500\"\n\n[landing]\ntour_message_interval_ms = 4000"
    )
    .unwrap();

    let config = PlatformConfig::load(file.path()).unwrap();
    assert_eq!(config.persona_prompt_max_chars, 40);
    assert_eq!(config.landing.tour_message_interval(), Duration::from_secs(4));
    assert_eq!(config.history_days, 30);

    let wizard = CreateAgentWizard::new(&config);
    assert_eq!(wizard.monthly_budget(), "2500");
    assert_eq!(wizard.prompt_max_chars(), 40);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = PlatformConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_history_window_follows_config() {
    let config = PlatformConfig::from_toml_str("history_days = 10\nversion_marker_offset = 4\n").unwrap();
    let window = HistoryWindow::from_config(&config);
    assert_eq!(window.point_count(), 11);
}
