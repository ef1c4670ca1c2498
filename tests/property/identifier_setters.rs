// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Identifier Setters

use proptest::prelude::*;
use servconf::ServerConfiguration;

use crate::fixtures::{test_cluster, RUNTIME};

fn configured() -> ServerConfiguration {
    let _guard = RUNTIME.enter();
    ServerConfiguration::new(test_cluster(), "alice", "web-01")
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Lowercase DNS labels
fn valid_identifier() -> impl Strategy<Value = String> {
    "[a-z]([-a-z0-9]{0,30}[a-z0-9])?"
}

/// Strings that break the label rule in one of the common ways
fn invalid_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        // Uppercase letter somewhere
        "[a-z0-9-]{0,10}[A-Z][a-zA-Z0-9-]{0,10}",
        // Underscore somewhere
        "[a-z][a-z0-9_-]{0,10}_[a-z0-9_-]{0,10}",
        // Leading digit or hyphen
        "[0-9-][a-z0-9-]{0,20}",
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Every valid label is stored exactly as given
    #[test]
    fn prop_valid_username_is_stored(value in valid_identifier()) {
        let mut config = configured();

        prop_assert!(config.set_username(&value).is_ok());
        prop_assert_eq!(config.username(), value.as_str());
    }

    /// Property: Setting the same valid value twice is idempotent
    #[test]
    fn prop_valid_server_type_idempotent(value in valid_identifier()) {
        let mut config = configured();

        config.set_server_type(&value).unwrap();
        let first = config.server_type().to_string();
        config.set_server_type(&value).unwrap();

        prop_assert_eq!(config.server_type(), first.as_str());
    }

    /// Property: Invalid values are rejected and leave the field unchanged
    #[test]
    fn prop_invalid_server_name_rejected(value in invalid_identifier()) {
        let mut config = configured();

        prop_assert!(config.set_server_name(&value).is_err());
        prop_assert_eq!(config.server_name(), "web-01");
    }

    /// Property: Construction never fails, whatever the input
    #[test]
    fn prop_construction_total(username in ".{0,20}", server_name in ".{0,20}") {
        let _guard = RUNTIME.enter();
        let config = ServerConfiguration::new(test_cluster(), &username, &server_name);

        let username_ok = config.username().is_empty() || config.username() == username;
        prop_assert!(username_ok);
        let server_name_ok = config.server_name().is_empty() || config.server_name() == server_name;
        prop_assert!(server_name_ok);
    }
}
