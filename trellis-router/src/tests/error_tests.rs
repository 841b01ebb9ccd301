//! Property-based tests for error handling
//!
//! These tests validate error serialization and error code handling.

use crate::{RouterConfig, RouterError, RouterErrorCode};
use proptest::prelude::*;

/// Strategy to generate arbitrary RouterErrorCode values
fn arb_error_code() -> impl Strategy<Value = RouterErrorCode> {
    prop_oneof![
        Just(RouterErrorCode::InvalidPath),
        Just(RouterErrorCode::InvalidRoute),
        Just(RouterErrorCode::RouteNotFound),
        Just(RouterErrorCode::RedirectLimitExceeded),
        Just(RouterErrorCode::LoaderFailed),
        Just(RouterErrorCode::MiddlewareError),
        Just(RouterErrorCode::SerializationError),
        Just(RouterErrorCode::InternalError),
    ]
}

/// Strategy to generate arbitrary RouterError values
fn arb_router_error() -> impl Strategy<Value = RouterError> {
    (
        arb_error_code(),
        ".*",
        proptest::option::of(any::<String>()),
    )
        .prop_map(|(code, message, cause)| {
            let mut error = RouterError::new(code, message);
            if let Some(c) = cause {
                error = error.with_cause(c);
            }
            error
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Serialized errors carry code and message and deserialize back unchanged.
    #[test]
    fn prop_error_serialization_roundtrip(error in arb_router_error()) {
        let json = serde_json::to_value(&error).expect("Failed to serialize error");

        prop_assert!(json.get("code").is_some(), "Serialized error must have 'code' field");
        prop_assert!(json.get("message").is_some(), "Serialized error must have 'message' field");

        let restored: RouterError = serde_json::from_value(json)
            .expect("Failed to deserialize error");

        prop_assert_eq!(error.code, restored.code);
        prop_assert_eq!(error.message, restored.message);
        prop_assert_eq!(error.cause, restored.cause);
    }

    /// The serialized code matches `as_str`.
    #[test]
    fn prop_error_code_serializes_as_str(code in arb_error_code()) {
        let json = serde_json::to_value(code).expect("Failed to serialize code");
        prop_assert_eq!(json, serde_json::Value::String(code.as_str().to_string()));
    }

    /// Only an exhausted redirect ceiling is fatal.
    #[test]
    fn prop_only_redirect_limit_is_fatal(code in arb_error_code()) {
        let error = RouterError::new(code, "test");
        prop_assert_eq!(error.is_fatal(), code == RouterErrorCode::RedirectLimitExceeded);
    }

    /// Display shows the code in brackets followed by the message.
    #[test]
    fn prop_error_display_format(code in arb_error_code(), message in "[a-z ]{0,20}") {
        let error = RouterError::new(code, message.clone());
        prop_assert_eq!(error.to_string(), format!("[{}] {}", code.as_str(), message));
    }
}

#[test]
fn test_skipped_fields_are_omitted() {
    let json = serde_json::to_value(RouterError::internal("boom")).unwrap();
    assert_eq!(json, serde_json::json!({"code": "INTERNAL_ERROR", "message": "boom"}));
}

#[test]
fn test_convenience_constructors() {
    assert_eq!(
        RouterError::redirect_limit(5, "/login").code,
        RouterErrorCode::RedirectLimitExceeded
    );
    assert_eq!(
        RouterError::route_not_found("user").message,
        "Route 'user' not found"
    );

    let loader = RouterError::loader_failed("/settings", "timed out");
    assert_eq!(loader.code, RouterErrorCode::LoaderFailed);
    assert_eq!(
        loader.details,
        Some(serde_json::json!({ "path": "/settings" }))
    );
}

#[test]
fn test_conversions() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert_eq!(
        RouterError::from(json_err).code,
        RouterErrorCode::SerializationError
    );

    let url_err = url::Url::parse("not a url").unwrap_err();
    assert_eq!(RouterError::from(url_err).code, RouterErrorCode::InvalidPath);
}

#[test]
fn test_configuration_errors() {
    let err = RouterConfig::from_json("{\"base_url\": 3}").unwrap_err();
    assert_eq!(err.code, RouterErrorCode::SerializationError);
}
