//! AES Key Wrap per RFC 3394
//!
//! Implements the AES Key Wrap algorithm for securely wrapping
//! content encryption keys (CEK) using a key encryption key (KEK).
//! KEKs of 128, 192 and 256 bits are supported.

use crate::error::{Error, Result};
use aes::{Aes128, Aes192, Aes256};
use aes_kw::Kek;
use std::fmt::Debug;
use zeroize::Zeroizing;

/// Symmetric key wrapping primitive consumed by the PBES2 algorithms.
///
/// Implementations must satisfy `unwrap(kek, wrap(kek, x)) == x`.
pub trait KeyWrapCipher: Send + Sync + Debug {
    /// Whether a KEK of `bits` bits can be used with this cipher
    fn supports_key_size(&self, bits: usize) -> bool;

    /// Checks that a payload of `len` bytes can be wrapped, without touching any key
    fn check_payload_len(&self, len: usize) -> Result<()>;

    /// Checks that a wrapped value of `len` bytes is well formed, without touching any key
    fn check_wrapped_len(&self, len: usize) -> Result<()>;

    /// Wrap `payload` under `kek`
    fn wrap(&self, kek: &[u8], payload: &[u8]) -> Result<Vec<u8>>;

    /// Unwrap `wrapped` under `kek`, verifying its integrity
    fn unwrap(&self, kek: &[u8], wrapped: &[u8]) -> Result<Vec<u8>>;
}

/// RFC 3394 AES Key Wrap
#[derive(Debug, Default, Clone, Copy)]
pub struct AesKeyWrap;

impl KeyWrapCipher for AesKeyWrap {
    fn supports_key_size(&self, bits: usize) -> bool {
        matches!(bits, 128 | 192 | 256)
    }

    fn check_payload_len(&self, len: usize) -> Result<()> {
        validate_plaintext_len(len)
    }

    fn check_wrapped_len(&self, len: usize) -> Result<()> {
        validate_wrapped_len(len)
    }

    fn wrap(&self, kek: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
        wrap_key_aes_kw(kek, payload)
    }

    fn unwrap(&self, kek: &[u8], wrapped: &[u8]) -> Result<Vec<u8>> {
        unwrap_key_aes_kw(kek, wrapped).map(|key| key.to_vec())
    }
}

/// Wrap a key using AES-KW (RFC 3394)
///
/// # Arguments
/// * `kek` - The 128, 192 or 256-bit Key Encryption Key
/// * `plaintext_key` - The key to wrap (must be multiple of 8 bytes, minimum 16 bytes)
///
/// # Returns
/// The wrapped key (input length + 8 bytes for integrity check value)
pub fn wrap_key_aes_kw(kek: &[u8], plaintext_key: &[u8]) -> Result<Vec<u8>> {
    validate_plaintext_len(plaintext_key.len())?;

    let mut output = vec![0u8; plaintext_key.len() + 8];
    let wrapped = match kek.len() {
        16 => Kek::<Aes128>::from(kek_array::<16>(kek)?).wrap(plaintext_key, &mut output),
        24 => Kek::<Aes192>::from(kek_array::<24>(kek)?).wrap(plaintext_key, &mut output),
        32 => Kek::<Aes256>::from(kek_array::<32>(kek)?).wrap(plaintext_key, &mut output),
        other => return Err(unsupported_kek(other)),
    };
    wrapped.map_err(|e| Error::Cryptography(format!("Key wrap failed: {:?}", e)))?;

    Ok(output)
}

/// Unwrap a key using AES-KW (RFC 3394)
///
/// # Arguments
/// * `kek` - The 128, 192 or 256-bit Key Encryption Key
/// * `wrapped_key` - The wrapped key (must be input length + 8 bytes)
///
/// # Returns
/// The unwrapped plaintext key
///
/// # Security
/// The unwrap operation verifies the integrity check value (ICV) and will
/// return an error if:
/// - The KEK is incorrect
/// - The wrapped key has been tampered with
/// - The wrapped key is malformed
pub fn unwrap_key_aes_kw(kek: &[u8], wrapped_key: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    validate_wrapped_len(wrapped_key.len())?;

    let mut output = Zeroizing::new(vec![0u8; wrapped_key.len() - 8]);
    let unwrapped = match kek.len() {
        16 => Kek::<Aes128>::from(kek_array::<16>(kek)?).unwrap(wrapped_key, &mut output),
        24 => Kek::<Aes192>::from(kek_array::<24>(kek)?).unwrap(wrapped_key, &mut output),
        32 => Kek::<Aes256>::from(kek_array::<32>(kek)?).unwrap(wrapped_key, &mut output),
        other => return Err(unsupported_kek(other)),
    };
    unwrapped.map_err(|e| Error::Cryptography(format!("Key unwrap failed: {:?}", e)))?;

    Ok(output)
}

fn validate_plaintext_len(len: usize) -> Result<()> {
    if len < 16 {
        return Err(Error::MalformedInput(
            "Key to wrap must be at least 16 bytes".to_string(),
        ));
    }
    if len % 8 != 0 {
        return Err(Error::MalformedInput(
            "Key to wrap must be multiple of 8 bytes".to_string(),
        ));
    }
    Ok(())
}

fn validate_wrapped_len(len: usize) -> Result<()> {
    if len < 24 {
        return Err(Error::MalformedInput(
            "Wrapped key must be at least 24 bytes".to_string(),
        ));
    }
    if len % 8 != 0 {
        return Err(Error::MalformedInput(
            "Wrapped key must be multiple of 8 bytes".to_string(),
        ));
    }
    Ok(())
}

fn kek_array<const N: usize>(kek: &[u8]) -> Result<[u8; N]> {
    <[u8; N]>::try_from(kek).map_err(|_| unsupported_kek(kek.len()))
}

fn unsupported_kek(len: usize) -> Error {
    Error::Cryptography(format!(
        "Unsupported KEK length: {} bytes, expected 16, 24 or 32",
        len
    ))
}
