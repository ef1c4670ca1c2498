// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects: transport protocol and port checks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Unknown protocol: {0} (expected TCP, UDP or SCTP)")]
    UnknownProtocol(String),

    #[error("Invalid {kind} port: {port} (must be {min}-{max})", min = MIN_PORT, max = MAX_PORT)]
    InvalidPort { kind: PortKind, port: i32 },
}

/// Lowest usable port number
pub const MIN_PORT: i32 = 1;

/// Highest usable port number
pub const MAX_PORT: i32 = 65535;

/// Which side of the service a port belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    Internal,
    External,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => f.write_str("internal"),
            Self::External => f.write_str("external"),
        }
    }
}

/// Check that `port` is a usable port number
///
/// Ports are accepted as-is when set; this check runs only when a
/// configuration is validated for provisioning.
pub fn validate_port(kind: PortKind, port: i32) -> Result<(), NetworkError> {
    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        return Err(NetworkError::InvalidPort { kind, port });
    }
    Ok(())
}

/// Transport protocol for an exposed port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
}

impl Protocol {
    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TCP" => Ok(Self::Tcp),
            "UDP" => Ok(Self::Udp),
            "SCTP" => Ok(Self::Sctp),
            _ => Err(NetworkError::UnknownProtocol(s.to_string())),
        }
    }
}
