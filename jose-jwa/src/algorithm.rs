//! Algorithm contracts
//!
//! Callers pick a concrete algorithm by name at runtime (see
//! [`crate::registry`]) and drive it through one of these traits without
//! knowing which parameter set is behind it.

use crate::error::Result;
use crate::header::{Header, HeaderAdditions};
use crate::jwk::Jwk;
use std::fmt::Debug;

/// Defines core properties of every JWA algorithm
pub trait JwaAlgorithm: Send + Sync + Debug {
    /// Returns the algorithm identifier (the `alg` value)
    fn name(&self) -> &str;
}

/// Algorithm capable of protecting a content encryption key (CEK).
///
/// Implementations validate the key and header before any primitive runs.
pub trait KeyEncryptionAlgorithm: JwaAlgorithm {
    /// Encrypts `cek` under `key`
    ///
    /// # Arguments
    /// * `key` - The key encryption key
    /// * `cek` - The content encryption key to protect
    /// * `header` - The header the encrypted key will travel with
    ///
    /// # Returns
    /// * `Ok((encrypted_key, additions))` - The encrypted key and the header
    ///   members the caller must merge into `header` before sending it
    fn encrypt_key(&self, key: &Jwk, cek: &[u8], header: &Header)
        -> Result<(Vec<u8>, HeaderAdditions)>;

    /// Recovers the CEK from `encrypted_key` using `key` and the received header
    fn decrypt_key(&self, key: &Jwk, encrypted_key: &[u8], header: &Header) -> Result<Vec<u8>>;
}

/// Algorithm capable of producing and checking JWS signatures
pub trait SignatureAlgorithm: JwaAlgorithm {
    /// Exact length in bytes of every signature this algorithm produces
    fn signature_length(&self) -> usize;

    /// Generates a new private key usable with this algorithm, tagged with its `alg`
    fn generate_key(&self) -> Result<Jwk>;

    /// Signs `message` with the private part of `key`
    fn sign(&self, key: &Jwk, message: &[u8]) -> Result<Vec<u8>>;

    /// Verifies `signature` over `message` with the public part of `key`
    ///
    /// # Returns
    /// * `Ok(true)` - The signature is valid
    /// * `Ok(false)` - The signature is well formed but does not verify
    /// * `Err` - The signature has the wrong length or the key is unusable
    fn verify(&self, key: &Jwk, message: &[u8], signature: &[u8]) -> Result<bool>;
}
