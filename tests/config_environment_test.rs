// ABOUTME: Tests for environment-driven client configuration
// ABOUTME: Defaults, policy parsing, REST backend requirements, and invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use fitlog::config::{
    BatchWriteMode, ClientConfig, StoreBackend, ValidationPolicy, WeightSeriesPolicy,
};
use fitlog::constants::env_config;
use serial_test::serial;

const ALL_VARS: &[&str] = &[
    env_config::STORE,
    env_config::STORE_URL,
    env_config::STORE_API_KEY,
    env_config::ACCESS_TOKEN,
    env_config::VALIDATION,
    env_config::BATCH_MODE,
    env_config::WEIGHT_SERIES,
    env_config::WEIGHT_SERIES_LIMIT,
    env_config::HTTP_TIMEOUT_SECS,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.store, StoreBackend::Memory);
    assert_eq!(config.submission.validation, ValidationPolicy::RejectLocally);
    assert_eq!(config.submission.batch_mode, BatchWriteMode::BestEffort);
    assert_eq!(config.aggregation.weight_series, WeightSeriesPolicy::MostRecent);
    assert_eq!(config.aggregation.weight_series_limit, 10);
}

#[test]
#[serial]
fn test_policies_from_environment() {
    clear_env();
    env::set_var(env_config::VALIDATION, "pass-through");
    env::set_var(env_config::BATCH_MODE, "TRANSACTIONAL");
    env::set_var(env_config::WEIGHT_SERIES, "oldest_first");
    env::set_var(env_config::WEIGHT_SERIES_LIMIT, "30");
    env::set_var(env_config::HTTP_TIMEOUT_SECS, "5");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.submission.validation, ValidationPolicy::PassThrough);
    assert_eq!(config.submission.batch_mode, BatchWriteMode::Transactional);
    assert_eq!(config.aggregation.weight_series, WeightSeriesPolicy::OldestFirst);
    assert_eq!(config.aggregation.weight_series_limit, 30);
    assert_eq!(config.http_timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_rest_backend_requires_url_and_key() {
    clear_env();
    env::set_var(env_config::STORE, "rest");
    let missing_url = ClientConfig::from_env().unwrap_err();
    assert!(format!("{missing_url:#}").contains(env_config::STORE_URL));

    env::set_var(env_config::STORE_URL, "https://project.example.co");
    let missing_key = ClientConfig::from_env().unwrap_err();
    assert!(format!("{missing_key:#}").contains(env_config::STORE_API_KEY));

    env::set_var(env_config::STORE_API_KEY, "anon-key");
    let config = ClientConfig::from_env().unwrap();
    clear_env();

    let StoreBackend::Rest {
        base_url,
        api_key,
        access_token,
    } = config.store
    else {
        panic!("expected rest backend");
    };
    assert_eq!(base_url.as_str(), "https://project.example.co/");
    assert_eq!(api_key, "anon-key");
    assert_eq!(access_token, None);
}

#[test]
#[serial]
fn test_rest_backend_reads_user_access_token() {
    clear_env();
    env::set_var(env_config::STORE, "rest");
    env::set_var(env_config::STORE_URL, "https://project.example.co");
    env::set_var(env_config::STORE_API_KEY, "anon-key");
    env::set_var(env_config::ACCESS_TOKEN, " user-jwt ");
    let config = ClientConfig::from_env().unwrap();
    env::set_var(env_config::ACCESS_TOKEN, "");
    let blank = ClientConfig::from_env().unwrap();
    clear_env();

    let StoreBackend::Rest { access_token, .. } = config.store else {
        panic!("expected rest backend");
    };
    assert_eq!(access_token.as_deref(), Some("user-jwt"));
    let StoreBackend::Rest { access_token, .. } = blank.store else {
        panic!("expected rest backend");
    };
    assert_eq!(access_token, None);
}

#[test]
#[serial]
fn test_unknown_store_backend_is_an_error() {
    clear_env();
    env::set_var(env_config::STORE, "sqlite");
    let error = ClientConfig::from_env().unwrap_err();
    clear_env();
    assert!(error.to_string().contains("sqlite"));
}

#[test]
#[serial]
fn test_invalid_policy_is_an_error() {
    clear_env();
    env::set_var(env_config::VALIDATION, "lenient");
    let error = ClientConfig::from_env().unwrap_err();
    clear_env();
    assert!(error.to_string().contains(env_config::VALIDATION));
}

#[test]
#[serial]
fn test_zero_weight_series_limit_is_an_error() {
    clear_env();
    env::set_var(env_config::WEIGHT_SERIES_LIMIT, "0");
    let zero = ClientConfig::from_env();
    env::set_var(env_config::WEIGHT_SERIES_LIMIT, "ten");
    let text = ClientConfig::from_env();
    clear_env();

    assert!(zero.is_err());
    assert!(text.is_err());
}
