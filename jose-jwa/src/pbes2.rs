//! PBES2 key encryption (RFC 7518 Section 4.8)
//!
//! A password-derived key wraps the CEK with AES Key Wrap. The variants
//! differ only in the PBKDF2 hash and the derived key size, so a single
//! [`Pbes2KeyWrap`] runs every variant from a [`Pbes2Descriptor`].
//!
//! # Protocol Flow
//!
//! 1. Generate a random salt of `key_size / 8` bytes
//! 2. Emit `p2s = base64url(salt)` and `p2c = iteration count`
//! 3. Derive the KEK with PBKDF2 over `alg || 0x00 || salt`
//! 4. Wrap the CEK with the KEK

use crate::algorithm::{JwaAlgorithm, KeyEncryptionAlgorithm};
use crate::config::{self, JwaConfig};
use crate::crypto::{AesKeyWrap, HashAlgorithm, KeyDerivation, KeyWrapCipher, Pbkdf2};
use crate::encoding::base64url_encode;
use crate::error::{Error, Result};
use crate::header::{Header, HeaderAdditions, P2C, P2S};
use crate::jwk::Jwk;
use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Fixed parameters of one PBES2 variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pbes2Descriptor {
    /// Algorithm identifier
    pub name: &'static str,
    /// PBKDF2 PRF hash
    pub hash: HashAlgorithm,
    /// Derived key size in bits
    pub key_size_bits: usize,
}

impl Pbes2Descriptor {
    /// Creates a descriptor
    pub const fn new(name: &'static str, hash: HashAlgorithm, key_size_bits: usize) -> Self {
        Self {
            name,
            hash,
            key_size_bits,
        }
    }

    /// Salt length in bytes
    pub fn salt_len(&self) -> usize {
        self.key_size_bits / 8
    }
}

/// PBES2 with HMAC SHA-256 and AES-128 Key Wrap
pub const PBES2_HS256_A128KW: Pbes2Descriptor =
    Pbes2Descriptor::new("PBES2-HS256+A128KW", HashAlgorithm::Sha256, 128);

/// PBES2 with HMAC SHA-384 and AES-192 Key Wrap
pub const PBES2_HS384_A192KW: Pbes2Descriptor =
    Pbes2Descriptor::new("PBES2-HS384+A192KW", HashAlgorithm::Sha384, 192);

/// PBES2 with HMAC SHA-512 and AES-256 Key Wrap
pub const PBES2_HS512_A256KW: Pbes2Descriptor =
    Pbes2Descriptor::new("PBES2-HS512+A256KW", HashAlgorithm::Sha512, 256);

/// All registered PBES2 variants
pub const PBES2_ALGORITHMS: [Pbes2Descriptor; 3] =
    [PBES2_HS256_A128KW, PBES2_HS384_A192KW, PBES2_HS512_A256KW];

/// PBES2 key encryption for one descriptor
#[derive(Debug, Clone)]
pub struct Pbes2KeyWrap {
    descriptor: Pbes2Descriptor,
    iteration_count: u32,
    max_iteration_count: u32,
    kdf: Arc<dyn KeyDerivation>,
    wrapper: Arc<dyn KeyWrapCipher>,
}

impl Pbes2KeyWrap {
    /// Assembles a PBES2 algorithm from its parameters and primitives
    ///
    /// Fails with `Configuration` when the configuration is invalid or the
    /// wrap cipher cannot use keys of the descriptor's size.
    pub fn new(
        descriptor: Pbes2Descriptor,
        config: &JwaConfig,
        kdf: Arc<dyn KeyDerivation>,
        wrapper: Arc<dyn KeyWrapCipher>,
    ) -> Result<Self> {
        config::validate(config)?;
        if descriptor.key_size_bits == 0 || descriptor.key_size_bits % 8 != 0 {
            return Err(Error::Configuration(format!(
                "{}: key size {} is not a positive multiple of 8",
                descriptor.name, descriptor.key_size_bits
            )));
        }
        if !wrapper.supports_key_size(descriptor.key_size_bits) {
            return Err(Error::Configuration(format!(
                "{}: key wrap cipher does not support {}-bit keys",
                descriptor.name, descriptor.key_size_bits
            )));
        }

        Ok(Self {
            descriptor,
            iteration_count: config.pbes2_iteration_count,
            max_iteration_count: config.pbes2_max_iteration_count,
            kdf,
            wrapper,
        })
    }

    /// Assembles a PBES2 algorithm with PBKDF2 and AES Key Wrap
    pub fn with_defaults(descriptor: Pbes2Descriptor, config: &JwaConfig) -> Result<Self> {
        Self::new(
            descriptor,
            config,
            Arc::new(Pbkdf2),
            Arc::new(AesKeyWrap),
        )
    }

    /// Returns the descriptor
    pub fn descriptor(&self) -> &Pbes2Descriptor {
        &self.descriptor
    }

    /// Returns the iteration count written on encryption
    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    fn derive_kek(
        &self,
        password: &[u8],
        alg: &str,
        salt: &[u8],
        count: u32,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let salt_input = salt_input(alg, salt);
        self.kdf.derive(
            self.descriptor.hash,
            password,
            &salt_input,
            count,
            self.descriptor.key_size_bits,
        )
    }

    fn warn_on_alg_mismatch(&self, alg: &str) {
        if alg != self.descriptor.name {
            warn!(
                header_alg = alg,
                algorithm = self.descriptor.name,
                "header 'alg' differs from the PBES2 variant in use"
            );
        }
    }
}

/// Builds the PBKDF2 salt input `alg || 0x00 || salt`
pub fn salt_input(alg: &str, salt: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(alg.len() + 1 + salt.len());
    input.extend_from_slice(alg.as_bytes());
    input.push(0x00);
    input.extend_from_slice(salt);
    input
}

impl JwaAlgorithm for Pbes2KeyWrap {
    fn name(&self) -> &str {
        self.descriptor.name
    }
}

impl KeyEncryptionAlgorithm for Pbes2KeyWrap {
    fn encrypt_key(
        &self,
        key: &Jwk,
        cek: &[u8],
        header: &Header,
    ) -> Result<(Vec<u8>, HeaderAdditions)> {
        let alg = header.alg()?;
        let password = key.symmetric_secret()?;
        self.wrapper.check_payload_len(cek.len())?;
        self.warn_on_alg_mismatch(alg);

        let mut salt = vec![0u8; self.descriptor.salt_len()];
        OsRng.fill_bytes(&mut salt);
        let count = self.iteration_count;

        debug!(
            algorithm = self.descriptor.name,
            salt_len = salt.len(),
            p2c = count,
            "wrapping content encryption key"
        );

        let kek = self.derive_kek(&password, alg, &salt, count)?;
        let encrypted_key = self.wrapper.wrap(&kek, cek)?;

        let mut additions = HeaderAdditions::new();
        additions.insert(P2S, base64url_encode(&salt));
        additions.insert(P2C, count);

        Ok((encrypted_key, additions))
    }

    fn decrypt_key(&self, key: &Jwk, encrypted_key: &[u8], header: &Header) -> Result<Vec<u8>> {
        let alg = header.alg()?;
        let params = header.pbes2_parameters(self.max_iteration_count)?;
        let password = key.symmetric_secret()?;
        self.wrapper.check_wrapped_len(encrypted_key.len())?;
        self.warn_on_alg_mismatch(alg);

        debug!(
            algorithm = self.descriptor.name,
            salt_len = params.salt.len(),
            p2c = params.count,
            "unwrapping content encryption key"
        );

        let kek = self.derive_kek(&password, alg, &params.salt, params.count)?;
        self.wrapper.unwrap(&kek, encrypted_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fast_config() -> JwaConfig {
        JwaConfig::new().with_pbes2_iteration_count(16)
    }

    #[test]
    fn test_salt_input_layout() {
        assert_eq!(
            salt_input("PBES2-HS256+A128KW", &[1, 2]),
            b"PBES2-HS256+A128KW\x00\x01\x02".to_vec()
        );
    }

    #[test]
    fn test_descriptor_salt_len() {
        assert_eq!(PBES2_HS256_A128KW.salt_len(), 16);
        assert_eq!(PBES2_HS384_A192KW.salt_len(), 24);
        assert_eq!(PBES2_HS512_A256KW.salt_len(), 32);
    }

    #[test]
    fn test_roundtrip_all_variants() {
        let key = Jwk::symmetric(b"correct horse battery staple");
        let cek = [0x11u8; 32];

        for descriptor in PBES2_ALGORITHMS {
            let alg = Pbes2KeyWrap::with_defaults(descriptor, &fast_config()).unwrap();
            let mut header = Header::with_alg(descriptor.name);

            let (encrypted, additions) = alg.encrypt_key(&key, &cek, &header).unwrap();
            header.merge(additions);

            let decrypted = alg.decrypt_key(&key, &encrypted, &header).unwrap();
            assert_eq!(decrypted, cek.to_vec(), "{}", descriptor.name);
        }
    }

    #[test]
    fn test_unsupported_key_size_is_configuration_error() {
        let descriptor = Pbes2Descriptor::new("PBES2-HS256+A160KW", HashAlgorithm::Sha256, 160);
        assert!(matches!(
            Pbes2KeyWrap::with_defaults(descriptor, &JwaConfig::default()),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_configuration_error() {
        let config = JwaConfig::new().with_pbes2_iteration_count(0);
        assert!(matches!(
            Pbes2KeyWrap::with_defaults(PBES2_HS256_A128KW, &config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_wrong_password_fails_unwrap() {
        let alg = Pbes2KeyWrap::with_defaults(PBES2_HS256_A128KW, &fast_config()).unwrap();
        let mut header = Header::with_alg(PBES2_HS256_A128KW.name);

        let (encrypted, additions) = alg
            .encrypt_key(&Jwk::symmetric(b"right"), &[0u8; 16], &header)
            .unwrap();
        header.merge(additions);

        assert!(matches!(
            alg.decrypt_key(&Jwk::symmetric(b"wrong"), &encrypted, &header),
            Err(Error::Cryptography(_))
        ));
    }

    #[test]
    fn test_alg_is_bound_into_salt() {
        let alg = Pbes2KeyWrap::with_defaults(PBES2_HS256_A128KW, &fast_config()).unwrap();
        let key = Jwk::symmetric(b"secret");
        let mut header = Header::with_alg(PBES2_HS256_A128KW.name);

        let (encrypted, additions) = alg.encrypt_key(&key, &[7u8; 16], &header).unwrap();
        header.merge(additions);
        header.insert("alg", "PBES2-HS512+A256KW");

        assert!(alg.decrypt_key(&key, &encrypted, &header).is_err());
    }

    #[test]
    fn test_decrypt_rejects_excessive_count() {
        let alg = Pbes2KeyWrap::with_defaults(
            PBES2_HS256_A128KW,
            &fast_config().with_pbes2_max_iteration_count(100),
        )
        .unwrap();
        let header = Header::from_value(json!({
            "alg": PBES2_HS256_A128KW.name,
            "p2s": "AAAAAAAAAAAAAAAAAAAAAA",
            "p2c": 101,
        }))
        .unwrap();

        assert!(matches!(
            alg.decrypt_key(&Jwk::symmetric(b"secret"), &[0u8; 24], &header),
            Err(Error::InvalidAdditionalParameters(_))
        ));
    }
}
