//! Password-Based Key Derivation (PBKDF2, RFC 8018)
//!
//! Derives key encryption keys (KEK) from passwords for use with AES Key Wrap
//! in the PBES2 algorithms (RFC 7518 Section 4.8).

use super::hash::HashAlgorithm;
use crate::error::{Error, Result};
use hmac::Hmac;
use sha2::{Sha256, Sha384, Sha512};
use std::fmt::Debug;
use zeroize::Zeroizing;

/// Key derivation primitive consumed by the PBES2 algorithms.
///
/// Implementations must be deterministic: identical inputs give identical output.
pub trait KeyDerivation: Send + Sync + Debug {
    /// Derive `output_bits / 8` bytes from `password` and `salt`
    ///
    /// # Arguments
    /// * `hash` - The PRF hash (used through HMAC)
    /// * `password` - The raw password bytes
    /// * `salt` - The full salt input
    /// * `iterations` - Iteration count, must be positive
    /// * `output_bits` - Desired output length in bits (positive multiple of 8)
    fn derive(
        &self,
        hash: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        output_bits: usize,
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// PBKDF2 with HMAC-SHA-2 as the PRF
#[derive(Debug, Default, Clone, Copy)]
pub struct Pbkdf2;

impl KeyDerivation for Pbkdf2 {
    fn derive(
        &self,
        hash: HashAlgorithm,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        output_bits: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        if output_bits == 0 || output_bits % 8 != 0 {
            return Err(Error::Cryptography(
                "output_bits must be a positive multiple of 8".to_string(),
            ));
        }
        if iterations == 0 {
            return Err(Error::Cryptography(
                "PBKDF2 iteration count must be positive".to_string(),
            ));
        }

        let mut derived = Zeroizing::new(vec![0u8; output_bits / 8]);
        let result = match hash {
            HashAlgorithm::Sha256 => {
                pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut derived)
            }
            HashAlgorithm::Sha384 => {
                pbkdf2::pbkdf2::<Hmac<Sha384>>(password, salt, iterations, &mut derived)
            }
            HashAlgorithm::Sha512 => {
                pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, &mut derived)
            }
        };
        result.map_err(|e| Error::Cryptography(format!("PBKDF2 derivation failed: {}", e)))?;

        Ok(derived)
    }
}
