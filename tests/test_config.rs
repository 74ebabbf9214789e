//! Configuration defaults and environment overrides.

use std::time::Duration;

use bikewatch::config::{Config, DATA_FILE_NAME, MARKETPLACE_BASE};

#[test]
fn defaults_match_daily_report_policy() {
    let config = Config::default();
    assert_eq!(config.marketplace_base, MARKETPLACE_BASE);
    assert_eq!(config.settle_delay, (Duration::from_secs(5), Duration::from_secs(8)));
    assert!(!config.notify_when_empty);
    assert!(config.bot_token.is_none());
    assert!(config.recipient.is_none());
    assert!(config.data_file.ends_with(DATA_FILE_NAME));
    assert_eq!(config.brands.resolve("혼다"), "Honda");
}

// Environment variables are process-wide, so every env case runs in this
// one test to avoid races with parallel tests.
#[test]
fn from_env_overrides_defaults() {
    std::env::set_var("BIKEWATCH_BOT_TOKEN", " 123:abc ");
    std::env::set_var("BIKEWATCH_CHAT_ID", "1715917739");
    std::env::set_var("BIKEWATCH_DATA_FILE", "/tmp/bikewatch-test/bikes.json");
    std::env::set_var("BIKEWATCH_NOTIFY_WHEN_EMPTY", "yes");

    let config = Config::from_env().unwrap();
    assert_eq!(config.bot_token.as_deref(), Some("123:abc"));
    assert_eq!(config.recipient, Some(1_715_917_739));
    assert_eq!(
        config.data_file,
        std::path::PathBuf::from("/tmp/bikewatch-test/bikes.json")
    );
    assert!(config.notify_when_empty);

    std::env::set_var("BIKEWATCH_CHAT_ID", "not-a-number");
    assert!(Config::from_env().is_err());

    std::env::set_var("BIKEWATCH_CHAT_ID", "42");
    std::env::set_var("BIKEWATCH_NOTIFY_WHEN_EMPTY", "maybe");
    assert!(Config::from_env().is_err());

    for key in [
        "BIKEWATCH_BOT_TOKEN",
        "BIKEWATCH_CHAT_ID",
        "BIKEWATCH_DATA_FILE",
        "BIKEWATCH_NOTIFY_WHEN_EMPTY",
    ] {
        std::env::remove_var(key);
    }
}
