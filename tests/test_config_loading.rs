//! Configuration loading and validation tests
//!
//! Tests focus on observable behavior: files on disk, defaults, validation
//! and credential lookup from the environment.

use news_sorter::config::{ConfigError, Credentials, SorterConfig};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_config_loads_successfully_from_valid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[todoist]
project_name = "Reading List"
timeout_secs = 5

[scheduling]
capacity_per_day = 2
max_lookahead_days = 14

[bot]
approve_emojis = ["👍", "🚀"]
listen_port = 9090
"#
    )
    .unwrap();

    let config = SorterConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.todoist.project_name, "Reading List");
    assert_eq!(config.http_timeout(), Duration::from_secs(5));
    assert_eq!(config.scheduling.capacity_per_day, 2);
    assert_eq!(config.scheduling.max_lookahead_days, 14);
    assert_eq!(config.bot.approve_emojis.len(), 2);
    assert!(config.bot.approve_emojis.contains("🚀"));
    assert_eq!(config.bot.listen_port, 9090);
    // untouched fields keep their defaults
    assert_eq!(config.todoist.api_key_env, "API_KEY");
    assert_eq!(config.bot.token_env, "DISCORD_TOKEN");
}

#[test]
fn test_missing_file_is_read_error() {
    let result = SorterConfig::load_from_file(std::path::Path::new("/nonexistent/sorter.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[todoist\nproject_name = ").unwrap();

    let result = SorterConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_wrong_value_type_is_parse_error() {
    let result = SorterConfig::from_toml_str("[scheduling]\ncapacity_per_day = \"five\"\n");
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_invalid_values_rejected_after_parse() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[todoist]\nproject_name = \"   \"\n").unwrap();

    let result = SorterConfig::load_from_file(temp_file.path());
    match result {
        Err(ConfigError::InvalidConfig(message)) => {
            assert!(message.contains("project_name"), "{message}");
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_config_round_trips_through_show_output() {
    let config = SorterConfig::default();
    let rendered = toml::to_string_pretty(&config).unwrap();

    assert!(rendered.contains("project_name = \"News\""));
    assert_eq!(SorterConfig::from_toml_str(&rendered).unwrap(), config);
}

#[test]
fn test_credentials_from_env() {
    let config = SorterConfig::from_toml_str(
        r#"
[todoist]
api_key_env = "NEWS_SORTER_TEST_API_KEY_OK"

[bot]
token_env = "NEWS_SORTER_TEST_BOT_TOKEN_OK"
"#,
    )
    .unwrap();

    std::env::set_var("NEWS_SORTER_TEST_API_KEY_OK", "api-123");
    std::env::set_var("NEWS_SORTER_TEST_BOT_TOKEN_OK", "bot-456");

    let credentials = Credentials::from_env(&config).unwrap();
    assert_eq!(credentials.api_key, "api-123");
    assert_eq!(credentials.bot_token, "bot-456");
    assert_eq!(Credentials::api_key_from_env(&config).unwrap(), "api-123");
}

#[test]
fn test_missing_bot_token_names_variable() {
    let config = SorterConfig::from_toml_str(
        r#"
[todoist]
api_key_env = "NEWS_SORTER_TEST_API_KEY_SET"

[bot]
token_env = "NEWS_SORTER_TEST_BOT_TOKEN_UNSET"
"#,
    )
    .unwrap();

    std::env::set_var("NEWS_SORTER_TEST_API_KEY_SET", "api-123");
    std::env::remove_var("NEWS_SORTER_TEST_BOT_TOKEN_UNSET");

    let error = Credentials::from_env(&config).unwrap_err();
    assert_eq!(
        error.to_string(),
        "NEWS_SORTER_TEST_BOT_TOKEN_UNSET must be provided by env var"
    );
}

#[test]
fn test_empty_api_key_counts_as_missing() {
    let config = SorterConfig::from_toml_str(
        "[todoist]\napi_key_env = \"NEWS_SORTER_TEST_API_KEY_EMPTY\"\n",
    )
    .unwrap();

    std::env::set_var("NEWS_SORTER_TEST_API_KEY_EMPTY", "  ");

    let result = Credentials::api_key_from_env(&config);
    assert!(matches!(result, Err(ConfigError::MissingCredential(name)) if name == "NEWS_SORTER_TEST_API_KEY_EMPTY"));
}
