//! Algorithm lookup by name
//!
//! The registry maps `alg` identifiers to ready-to-use algorithm instances.
//! Instances are immutable and shared, so one registry serves any number of
//! concurrent callers.

use crate::algorithm::{KeyEncryptionAlgorithm, SignatureAlgorithm};
use crate::config::JwaConfig;
use crate::ecdsa::{EcdsaSignature, ECDSA_ALGORITHMS};
use crate::error::{Error, Result};
use crate::pbes2::{Pbes2KeyWrap, PBES2_ALGORITHMS};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Table of key encryption and signature algorithms keyed by name
#[derive(Debug, Default, Clone)]
pub struct AlgorithmRegistry {
    key_encryption: HashMap<String, Arc<dyn KeyEncryptionAlgorithm>>,
    signature: HashMap<String, Arc<dyn SignatureAlgorithm>>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every PBES2 and ECDSA variant
    pub fn with_defaults(config: &JwaConfig) -> Result<Self> {
        let mut registry = Self::new();
        for descriptor in PBES2_ALGORITHMS {
            registry.register_key_encryption(Arc::new(Pbes2KeyWrap::with_defaults(
                descriptor, config,
            )?));
        }
        for descriptor in ECDSA_ALGORITHMS {
            registry.register_signature(Arc::new(EcdsaSignature::with_defaults(descriptor)?));
        }
        debug!(
            key_encryption = registry.key_encryption.len(),
            signature = registry.signature.len(),
            "algorithm registry initialized"
        );
        Ok(registry)
    }

    /// Registers a key encryption algorithm under its name, replacing any previous one
    pub fn register_key_encryption(&mut self, algorithm: Arc<dyn KeyEncryptionAlgorithm>) {
        self.key_encryption
            .insert(algorithm.name().to_string(), algorithm);
    }

    /// Registers a signature algorithm under its name, replacing any previous one
    pub fn register_signature(&mut self, algorithm: Arc<dyn SignatureAlgorithm>) {
        self.signature.insert(algorithm.name().to_string(), algorithm);
    }

    /// Looks up a key encryption algorithm
    pub fn key_encryption(&self, name: &str) -> Result<Arc<dyn KeyEncryptionAlgorithm>> {
        self.key_encryption
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnsupportedAlgorithm(name.to_string()))
    }

    /// Looks up a signature algorithm
    pub fn signature(&self, name: &str) -> Result<Arc<dyn SignatureAlgorithm>> {
        self.signature
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnsupportedAlgorithm(name.to_string()))
    }

    /// Sorted names of the registered key encryption algorithms
    pub fn key_encryption_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.key_encryption.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted names of the registered signature algorithms
    pub fn signature_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.signature.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

static DEFAULT_REGISTRY: OnceCell<AlgorithmRegistry> = OnceCell::new();

/// Returns the process-wide registry, built on first use from [`JwaConfig::from_env`]
pub fn default_registry() -> Result<&'static AlgorithmRegistry> {
    DEFAULT_REGISTRY.get_or_try_init(|| {
        let config = JwaConfig::from_env()?;
        AlgorithmRegistry::with_defaults(&config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let registry = AlgorithmRegistry::with_defaults(&JwaConfig::default()).unwrap();
        assert_eq!(
            registry.key_encryption_names(),
            vec![
                "PBES2-HS256+A128KW",
                "PBES2-HS384+A192KW",
                "PBES2-HS512+A256KW"
            ]
        );
        assert_eq!(
            registry.signature_names(),
            vec!["ES256", "ES256K", "ES384", "ES512"]
        );
    }

    #[test]
    fn test_unknown_algorithm() {
        let registry = AlgorithmRegistry::new();
        assert!(matches!(
            registry.signature("ES256"),
            Err(Error::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            registry.key_encryption("RSA-OAEP"),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_lookup_returns_matching_name() {
        let registry = AlgorithmRegistry::with_defaults(&JwaConfig::default()).unwrap();
        assert_eq!(registry.signature("ES512").unwrap().name(), "ES512");
        assert_eq!(registry.signature("ES512").unwrap().signature_length(), 132);
        assert_eq!(
            registry.key_encryption("PBES2-HS384+A192KW").unwrap().name(),
            "PBES2-HS384+A192KW"
        );
    }

    #[test]
    fn test_default_registry_is_shared() {
        let first = default_registry().unwrap();
        let second = default_registry().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
