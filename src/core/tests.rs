//! Tests for the core module

use std::io;

use http::Method;
use serde_json::json;

use super::error::{ClientError, ClientResult, ErrorContext};
use super::request::{CallOptions, LogicalRequest};

#[test]
fn test_error_display_and_conversion() {
    let config_error = ClientError::Configuration("bad yaml".to_string());
    assert!(config_error.to_string().contains("Configuration error"));

    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let client_error: ClientError = io_error.into();
    assert!(matches!(client_error, ClientError::Io(_)));

    let result: ClientResult<i32> = Err(ClientError::Internal("test".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_error_context_wraps_message() {
    let result: Result<(), &str> = Err("boom");
    let wrapped = result.with_context("loading defaults");
    match wrapped {
        Err(ClientError::Internal(msg)) => {
            assert!(msg.contains("loading defaults"));
            assert!(msg.contains("boom"));
        }
        other => panic!("expected internal error, got {other:?}"),
    }
}

#[test]
fn test_error_macros() {
    let err = crate::config_error!("missing field {}", "base_url");
    assert!(matches!(err, ClientError::Configuration(msg) if msg.contains("base_url")));

    let err = crate::registration_error!("dup name");
    assert!(matches!(err, ClientError::Registration(_)));
}

#[test]
fn test_call_options_defaults() {
    let options = CallOptions::default();
    assert!(options.show_visibility);
    assert!(options.show_error_toast);
    assert!(!options.suppress_duplicates);
    assert!(options.cache_ttl.is_none());

    let options = CallOptions::with_payload(json!({"q": 1}));
    assert_eq!(options.payload, json!({"q": 1}));
}

#[test]
fn test_request_describe() {
    let request = LogicalRequest {
        name: "user.get/7".to_string(),
        method: Method::GET,
        target: "/api/users/7".to_string(),
        options: CallOptions::default(),
    };
    let described = request.describe();
    assert!(described.contains("GET"));
    assert!(described.contains("/api/users/7"));
    assert!(described.contains("user.get/7"));
}
