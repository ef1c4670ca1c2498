//! Validated server request configuration
//!
//! This crate holds the parameters of a requested compute server (identity,
//! resource quantities, network settings), validates each one as it is set,
//! and binds the request to a Kubernetes cluster client for provisioning.

pub mod cluster;
pub mod domain;
pub mod errors;
pub mod server_config;

// Re-export commonly used types
pub use cluster::{ClusterClient, ClusterConfig, ClusterError};
pub use domain::{Identifier, IdentifierError, Protocol, Quantity, QuantityError};
pub use errors::{ServconfError, ServconfResult};
pub use server_config::{PublicView, ServerConfiguration};
