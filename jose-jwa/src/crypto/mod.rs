//! Cryptographic primitives for the JWA algorithms
//!
//! This module provides the building blocks the algorithms are assembled from:
//! - SHA-2 hashing
//! - PBKDF2 key derivation (RFC 8018)
//! - AES Key Wrap (RFC 3394)
//! - Elliptic curve arithmetic and raw ECDSA for P-256, P-384, P-521 and secp256k1
//!
//! Each primitive sits behind a trait so that an algorithm receives its
//! implementation at construction time.

mod curve;
mod hash;
mod kdf;
mod key_wrap;

pub use curve::{
    to_fixed_width, Curve, CurveArithmetic, EcKeyMaterial, P256Arithmetic, P384Arithmetic,
    P521Arithmetic, Secp256k1Arithmetic,
};
pub use hash::HashAlgorithm;
pub use kdf::{KeyDerivation, Pbkdf2};
pub use key_wrap::{unwrap_key_aes_kw, wrap_key_aes_kw, AesKeyWrap, KeyWrapCipher};
