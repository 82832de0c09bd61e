// Config loading and validation tests

use platform_agent::config::AppConfig;

const VALID_CONFIG: &str = r#"
[agent]
name = "My Plugin"
guid_namespace = "net.example.agent"
poll_interval_secs = 60

[collector]
url = "https://collector.example.com/platform/v1/metrics"
license_key = "abc123"
timeout_secs = 20
verbose = true

[logging]
level = "debug"

[system]
enabled = false
component_name = "Host"
"#;

const MINIMAL_CONFIG: &str = r#"
[agent]
name = "My Plugin"

[collector]
license_key = "abc123"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.agent.name, "My Plugin");
    assert_eq!(config.agent.guid_namespace, "net.example.agent");
    assert_eq!(config.agent.poll_interval_secs, 60);
    assert_eq!(
        config.collector.url,
        "https://collector.example.com/platform/v1/metrics"
    );
    assert_eq!(config.collector.license_key, "abc123");
    assert!(config.collector.verbose);
    assert_eq!(config.logging.level, "debug");
    assert!(!config.system.enabled);
    assert_eq!(config.system.component_name, "Host");
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("minimal");
    assert_eq!(config.agent.poll_interval_secs, 60);
    assert_eq!(config.agent.guid_namespace, "com.platform.agent");
    assert_eq!(
        config.collector.url,
        "https://platform-api.newrelic.com/platform/v1/metrics"
    );
    assert_eq!(config.collector.timeout_secs, 20);
    assert!(!config.collector.verbose);
    assert_eq!(config.logging.level, "info");
    assert!(config.system.enabled);
    assert_eq!(config.system.component_name, "System");
}

#[test]
fn test_config_validation_rejects_empty_name() {
    let bad = VALID_CONFIG.replace("name = \"My Plugin\"", "name = \"  \"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("agent.name"));
}

#[test]
fn test_config_validation_rejects_poll_interval_zero() {
    let bad = VALID_CONFIG.replace("poll_interval_secs = 60", "poll_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("poll_interval_secs"));
}

#[test]
fn test_config_validation_rejects_empty_license_key() {
    let bad = VALID_CONFIG.replace("license_key = \"abc123\"", "license_key = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("license_key"));
}

#[test]
fn test_config_validation_rejects_non_http_url() {
    let bad = VALID_CONFIG.replace(
        "url = \"https://collector.example.com/platform/v1/metrics\"",
        "url = \"ftp://collector.example.com\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("collector.url"));
}

#[test]
fn test_config_validation_rejects_timeout_zero() {
    let bad = VALID_CONFIG.replace("timeout_secs = 20", "timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn test_config_validation_rejects_timeout_longer_than_interval() {
    let bad = VALID_CONFIG.replace("timeout_secs = 20", "timeout_secs = 120");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("must not exceed"));
}

#[test]
fn test_config_validation_rejects_missing_license_key() {
    let err = AppConfig::load_from_str("[agent]\nname = \"x\"\n[collector]\n").unwrap_err();
    assert!(err.to_string().contains("license_key"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.agent.name, "My Plugin");
    assert_eq!(config.collector.license_key, "abc123");
}
