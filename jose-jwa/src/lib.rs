//! JOSE JWA algorithm implementations
//!
//! This crate provides two families of JSON Web Algorithms:
//! - PBES2 key encryption: a password-derived key (PBKDF2) wraps the content
//!   encryption key with AES Key Wrap
//! - ECDSA signatures over P-256, P-384, P-521 and secp256k1 with the
//!   fixed-width `R || S` encoding
//!
//! Every variant of a family runs the same code, parameterized by an
//! immutable descriptor and the primitives injected at construction time.
//! Algorithms are looked up by name through [`AlgorithmRegistry`].
//!
//! # Example
//!
//! ```
//! use jose_jwa::{default_registry, Header, Jwk};
//!
//! # fn example() -> jose_jwa::Result<()> {
//! let alg = default_registry()?.key_encryption("PBES2-HS256+A128KW")?;
//! let key = Jwk::symmetric(b"secret");
//!
//! let mut header = Header::with_alg("PBES2-HS256+A128KW");
//! let (encrypted_key, additions) = alg.encrypt_key(&key, &[0u8; 16], &header)?;
//! header.merge(additions);
//!
//! let cek = alg.decrypt_key(&key, &encrypted_key, &header)?;
//! assert_eq!(cek, vec![0u8; 16]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

/// Algorithm contracts
pub mod algorithm;

/// Configuration
pub mod config;

/// Cryptographic primitives
pub mod crypto;

/// ECDSA signature algorithms
pub mod ecdsa;

/// Base64url helpers
pub mod encoding;

/// Error types
pub mod error;

/// JOSE header handling
pub mod header;

/// JSON Web Keys
pub mod jwk;

/// PBES2 key encryption algorithms
pub mod pbes2;

/// Algorithm registry
pub mod registry;

// Re-export key types for convenience
pub use algorithm::{JwaAlgorithm, KeyEncryptionAlgorithm, SignatureAlgorithm};
pub use config::JwaConfig;
pub use crypto::{Curve, HashAlgorithm};
pub use ecdsa::{EcdsaDescriptor, EcdsaSignature, ES256, ES256K, ES384, ES512};
pub use error::{Error, Result};
pub use header::{Header, HeaderAdditions};
pub use jwk::{Jwk, KeyKind};
pub use pbes2::{
    Pbes2Descriptor, Pbes2KeyWrap, PBES2_HS256_A128KW, PBES2_HS384_A192KW, PBES2_HS512_A256KW,
};
pub use registry::{default_registry, AlgorithmRegistry};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
