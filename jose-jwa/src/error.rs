//! Error handling for JOSE algorithms
//!
//! This module provides error types and utilities for the key encryption and
//! signature algorithms.

use thiserror::Error;

/// Type alias for Results with JWA errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for JWA operations
#[derive(Error, Debug)]
pub enum Error {
    /// The key has the wrong type, belongs to another curve, or lacks the
    /// secret / scalar / point the operation needs
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A required header member (`alg`) is missing or empty
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Algorithm-specific header members (`p2s`, `p2c`) are missing or invalid
    #[error("Invalid additional header parameters: {0}")]
    InvalidAdditionalParameters(String),

    /// Input with the wrong shape, such as a signature or wrapped key of the wrong length
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// No algorithm is registered under the requested name
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// An algorithm could not be assembled from its descriptor, primitives and configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A cryptographic primitive failed (e.g. key unwrap integrity check)
    #[error("Cryptography error: {0}")]
    Cryptography(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON error
    #[error("Serde JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
