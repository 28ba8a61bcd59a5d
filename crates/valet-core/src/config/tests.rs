use super::*;

#[test]
fn test_reminders_config_default() {
    let rc = RemindersConfig::default();
    assert_eq!(rc.poll_interval_secs, 10);
    assert_eq!(rc.error_backoff_secs, 60);
    assert_eq!(rc.dedup_window_secs, 300);
    assert_eq!(rc.storage_path, "~/.valet/data/reminders.json");
}

#[test]
fn test_reminders_config_from_toml() {
    let toml_str = r#"
        storage_path = "/tmp/reminders.json"
        poll_interval_secs = 2
    "#;
    let rc: RemindersConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(rc.storage_path, "/tmp/reminders.json");
    assert_eq!(rc.poll_interval_secs, 2);
    // Unset fields fall back to defaults.
    assert_eq!(rc.dedup_window_secs, 300);
}

#[test]
fn test_full_config_partial_toml() {
    let toml_str = r#"
        [valet]
        name = "Jeeves"

        [watcher]
        enabled = false

        [alerts]
        visual = "desktop"
        speech_enabled = true
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.valet.name, "Jeeves");
    assert_eq!(cfg.valet.log_level, "info");
    assert!(!cfg.watcher.enabled);
    assert_eq!(cfg.watcher.poll_interval_secs, 30);
    assert_eq!(cfg.alerts.visual, AlertBackend::Desktop);
    assert!(cfg.alerts.speech_enabled);
    assert_eq!(cfg.alerts.speech_command, "say");
    assert_eq!(cfg.reminders.poll_interval_secs, 10);
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/valet-config.toml").unwrap();
    assert_eq!(cfg.valet.name, "Valet");
    assert!(cfg.watcher.enabled);
    assert_eq!(cfg.alerts.visual, AlertBackend::Console);
}

#[test]
fn test_shellexpand_home() {
    std::env::set_var("HOME", "/home/tester");
    assert_eq!(shellexpand("~/x/y.json"), "/home/tester/x/y.json");
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
}
