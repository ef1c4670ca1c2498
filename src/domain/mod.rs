// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server Request Domain Models
//!
//! Value objects that a server request is assembled from. Each one
//! enforces its invariants on construction, so a value that exists is valid.
//!
//! # Value Objects with Invariants
//!
//! - [`Identifier`] - lowercase DNS label (username, server name, server type)
//! - [`Quantity`] - fixed-point resource amount with SI or binary suffix
//! - [`Protocol`] - transport protocol for an exposed port

pub mod identifier;
pub mod network;
pub mod quantity;

// Re-export value objects
pub use identifier::{validate_identifier, Identifier, IdentifierError, IdentifierField};
pub use network::{validate_port, NetworkError, PortKind, Protocol, MAX_PORT, MIN_PORT};
pub use quantity::{Quantity, QuantityError, QuantityFormat};
