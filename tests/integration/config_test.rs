//! Configuration loading tests

use rust_decimal_macros::dec;
use std::io::Write;
use turbo_bot::config::{Config, ConfigError, Strategy, EMAIL_ENV, PASSWORD_ENV};

const EXAMPLE: &str = include_str!("../../config.toml.example");

#[test]
fn test_example_config_is_valid() {
    let config: Config = toml::from_str(EXAMPLE).unwrap();
    let params = config.validate().unwrap();

    assert_eq!(params.policy.strategy, Strategy::Martingale);
    assert_eq!(params.limits.stop_loss_consecutive, 4);
    assert_eq!(params.assets.len(), 3);
    assert_eq!(config.trading.trade_duration_mins(), 1);
    assert_eq!(config.trading.min_payout, dec!(0.75));
}

#[test]
fn test_load_from_file_with_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE.as_bytes()).unwrap();

    // Only this test touches the credential variables
    std::env::set_var(EMAIL_ENV, "env@example.com");
    std::env::set_var(PASSWORD_ENV, "from-env");
    let config = Config::load(file.path());
    std::env::remove_var(EMAIL_ENV);
    std::env::remove_var(PASSWORD_ENV);

    let config = config.unwrap();
    assert_eq!(config.broker.email, "env@example.com");
    assert_eq!(config.broker.password, "from-env");
}

#[test]
fn test_missing_file() {
    let err = Config::load("/nonexistent/turbo-bot.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_missing_risk_key_is_rejected() {
    let broken = EXAMPLE.replace("stop_win_victories = 5\n", "");
    let err = toml::from_str::<Config>(&broken).unwrap_err();
    assert!(err.to_string().contains("stop_win_victories"));
}

#[test]
fn test_invalid_multiplier_is_rejected() {
    let broken = EXAMPLE.replace("martingale_factor = 2.0", "martingale_factor = 0.5");
    let config: Config = toml::from_str(&broken).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MultiplierTooSmall("martingale_factor", _))
    ));
}

#[test]
fn test_broken_file_does_not_fall_back() {
    let broken = EXAMPLE.replace("stop_loss_amount = 20\n", "");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(broken.as_bytes()).unwrap();

    let err = Config::load_or_default(file.path(), EXAMPLE).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("stop_loss_amount"));
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml"), EXAMPLE).unwrap();
    assert_eq!(config.risk.stop_loss_amount, dec!(20));
}
