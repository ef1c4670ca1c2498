// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for server configuration operations

use thiserror::Error;

use crate::cluster::ClusterError;
use crate::domain::{IdentifierError, NetworkError, QuantityError};

/// Errors that can occur while building or validating a server configuration
#[derive(Debug, Error)]
pub enum ServconfError {
    /// Identifier field rejected
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// Resource quantity rejected
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// Port or protocol rejected
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Cluster client bootstrap failed
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// A field required for provisioning was never set
    #[error("Required field not set: {0}")]
    MissingField(&'static str),
}

/// Result type for server configuration operations
pub type ServconfResult<T> = Result<T, ServconfError>;
