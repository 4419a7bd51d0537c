use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "portfolio-config-{}-{}.toml",
        std::process::id(),
        name
    ));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = ClientSettings::default();
    assert_eq!(
        settings.base_url().expect("url").as_str(),
        "http://127.0.0.1:8000/api/v1/"
    );
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn bare_host_gets_versioned_path() {
    let url = normalize_base_url("portfolio.internal:9000").expect("url");
    assert_eq!(url.as_str(), "http://portfolio.internal:9000/api/v1/");
}

#[test]
fn explicit_path_gets_trailing_slash() {
    let url = normalize_base_url("https://example.com/backend/api?x=1#frag").expect("url");
    assert_eq!(url.as_str(), "https://example.com/backend/api/");
}

#[test]
fn file_values_then_env_overrides() {
    let path = write_temp_config(
        "layered",
        r#"
api_base_url = "http://from-file:8000"
token_path = "/tmp/file-token"
request_timeout_secs = 30
"#,
    );

    let raw = fs::read_to_string(&path).expect("read");
    let file_cfg: FileSettings = toml::from_str(&raw).expect("parse");
    let mut settings = ClientSettings::default();
    apply_file_settings(&mut settings, file_cfg);
    assert_eq!(settings.api_base_url, "http://from-file:8000");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));

    apply_env_overrides(
        &mut settings,
        env(&[
            ("PORTFOLIO_API_URL", "http://from-env:1"),
            ("APP__API_BASE_URL", "http://from-app-env:2"),
            ("APP__REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]),
    );
    assert_eq!(settings.api_base_url, "http://from-app-env:2");
    assert_eq!(settings.token_path, PathBuf::from("/tmp/file-token"));
    assert_eq!(settings.request_timeout_secs, Some(30));

    let _ = fs::remove_file(path);
}

#[test]
fn zero_timeout_means_transport_default() {
    let settings = ClientSettings {
        request_timeout_secs: Some(0),
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let missing = std::env::temp_dir().join("portfolio-config-does-not-exist.toml");
    let err = load_settings(Some(&missing)).expect_err("missing file");
    assert!(format!("{err:#}").contains("failed to read config file"));
}

#[test]
fn invalid_toml_is_reported_with_path() {
    let path = write_temp_config("invalid", "api_base_url = [");
    let err = load_settings(Some(&path)).expect_err("invalid toml");
    assert!(format!("{err:#}").contains("invalid config file"));
    let _ = fs::remove_file(path);
}
