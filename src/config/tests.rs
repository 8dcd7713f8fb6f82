use std::collections::HashMap;
use std::path::Path;

use crate::{ArcPath, ArcStr, fs::Fs, log::LogLevel};

use super::data::{Data, PathOpt, RESET_DELAY_MAX_MS, RESET_DELAY_MIN_MS, StrOpt, USizeOpt};
use super::Config;

#[test]
fn test_data_default_values() {
    let data = Data::default();
    assert_eq!(data.str_opt(StrOpt::BridgeAddr).as_ref(), "127.0.0.1:17235");
    assert_eq!(data.usize(USizeOpt::CommandKey), 0x0);
    assert_eq!(data.usize(USizeOpt::ResetDelayMs), 4000);
    assert_eq!(data.usize(USizeOpt::OutboxBytes), 256);
    assert_eq!(data.usize(USizeOpt::InboxBytes), 256);
    assert_eq!(data.usize(USizeOpt::MaxAge), 0);
    assert_eq!(data.log_level(), LogLevel::Warning);
    assert_eq!(
        data.path(PathOpt::LogDir).as_ref(),
        Path::new("/tmp/ring-my-phone/logs")
    );
}

#[test]
fn test_data_setters_and_getters() {
    let mut data = Data::default();

    data.set_log_level(LogLevel::Info);
    assert_eq!(data.log_level(), LogLevel::Info);

    let new_dir = ArcPath::from(Path::new("/var/log/ring-my-phone"));
    data.set_path(PathOpt::LogDir, new_dir.clone());
    assert_eq!(data.path(PathOpt::LogDir), new_dir);

    data.set_usize(USizeOpt::MaxAge, 14);
    assert_eq!(data.usize(USizeOpt::MaxAge), 14);

    data.set_str(StrOpt::BridgeAddr, ArcStr::from("10.0.0.2:4242"));
    assert_eq!(data.str_opt(StrOpt::BridgeAddr).as_ref(), "10.0.0.2:4242");
}

#[test]
fn test_reset_delay_is_clamped() {
    let mut data = Data::default();

    data.set_usize(USizeOpt::ResetDelayMs, 100);
    assert_eq!(data.usize(USizeOpt::ResetDelayMs), RESET_DELAY_MIN_MS);

    data.set_usize(USizeOpt::ResetDelayMs, 60_000);
    assert_eq!(data.usize(USizeOpt::ResetDelayMs), RESET_DELAY_MAX_MS);

    data.set_usize(USizeOpt::ResetDelayMs, 3500);
    assert_eq!(data.usize(USizeOpt::ResetDelayMs), 3500);
}

#[test]
fn test_data_toml_round_trip() {
    let mut data = Data::default();
    data.set_log_level(LogLevel::Error);
    data.set_usize(USizeOpt::ResetDelayMs, 5000);
    data.set_str(StrOpt::BridgeAddr, ArcStr::from("192.168.0.7:17235"));

    let toml = toml::to_string_pretty(&data).unwrap();
    let deserialized: Data = toml::from_str(&toml).unwrap();
    assert_eq!(data, deserialized);
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let data: Data = toml::from_str("reset_delay_ms = 3000\n").unwrap();
    assert_eq!(data.usize(USizeOpt::ResetDelayMs), 3000);
    assert_eq!(data.usize(USizeOpt::OutboxBytes), 256);
    assert_eq!(data.str_opt(StrOpt::BridgeAddr).as_ref(), "127.0.0.1:17235");
}

#[tokio::test]
async fn test_actor_load_missing_then_save() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("/mock/config/config.toml"));
    let config = Config::spawn(fs, path);

    // First run: no file yet, so load fails and defaults get written back.
    assert!(config.load().await.is_err());
    config.save().await.unwrap();
    config.load().await.unwrap();
    assert_eq!(config.usize(USizeOpt::ResetDelayMs).await, 4000);
}

#[tokio::test]
async fn test_actor_set_then_get() {
    let fs = Fs::mock(HashMap::new());
    let path = ArcPath::from(Path::new("/mock/config/config.toml"));
    let config = Config::spawn(fs, path);

    config.set_usize(USizeOpt::OutboxBytes, 128).await;
    assert_eq!(config.usize(USizeOpt::OutboxBytes).await, 128);

    config.set_log_level(LogLevel::Info).await;
    assert_eq!(config.log_level().await, LogLevel::Info);
}

#[tokio::test]
async fn test_mock_facade() {
    let config = Config::mock(Data::default());
    config.load().await.unwrap();
    config.save().await.unwrap();
    config.set_usize(USizeOpt::CommandKey, 0x1).await;
    assert_eq!(config.usize(USizeOpt::CommandKey).await, 0x1);
    assert_eq!(
        config.str_opt(StrOpt::BridgeAddr).await.as_ref(),
        "127.0.0.1:17235"
    );
}
