//! ECDSA signatures for JWS (RFC 7518 Section 3.4, RFC 8812)
//!
//! Signatures use the fixed-width `R || S` encoding, not ASN.1 DER: each
//! half is the big-endian integer left-padded with zeros to the curve's
//! field size. A single [`EcdsaSignature`] runs every variant from an
//! [`EcdsaDescriptor`].

use crate::algorithm::{JwaAlgorithm, SignatureAlgorithm};
use crate::crypto::{to_fixed_width, Curve, CurveArithmetic, HashAlgorithm};
use crate::error::{Error, Result};
use crate::jwk::Jwk;
use std::sync::Arc;
use tracing::debug;

/// Fixed parameters of one ECDSA variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaDescriptor {
    /// Algorithm identifier
    pub name: &'static str,
    /// Curve the keys live on
    pub curve: Curve,
    /// Message hash
    pub hash: HashAlgorithm,
    /// Total signature length in bytes (`R || S`)
    pub signature_length: usize,
}

impl EcdsaDescriptor {
    /// Creates a descriptor
    pub const fn new(
        name: &'static str,
        curve: Curve,
        hash: HashAlgorithm,
        signature_length: usize,
    ) -> Self {
        Self {
            name,
            curve,
            hash,
            signature_length,
        }
    }

    /// Length of each of `R` and `S` in bytes
    pub fn part_length(&self) -> usize {
        self.signature_length / 2
    }
}

/// ECDSA using P-256 and SHA-256
pub const ES256: EcdsaDescriptor =
    EcdsaDescriptor::new("ES256", Curve::P256, HashAlgorithm::Sha256, 64);

/// ECDSA using P-384 and SHA-384
pub const ES384: EcdsaDescriptor =
    EcdsaDescriptor::new("ES384", Curve::P384, HashAlgorithm::Sha384, 96);

/// ECDSA using P-521 and SHA-512
pub const ES512: EcdsaDescriptor =
    EcdsaDescriptor::new("ES512", Curve::P521, HashAlgorithm::Sha512, 132);

/// ECDSA using secp256k1 and SHA-256
pub const ES256K: EcdsaDescriptor =
    EcdsaDescriptor::new("ES256K", Curve::Secp256k1, HashAlgorithm::Sha256, 64);

/// All registered ECDSA variants
pub const ECDSA_ALGORITHMS: [EcdsaDescriptor; 4] = [ES256, ES384, ES512, ES256K];

/// ECDSA signature algorithm for one descriptor
#[derive(Debug, Clone)]
pub struct EcdsaSignature {
    descriptor: EcdsaDescriptor,
    arithmetic: Arc<dyn CurveArithmetic>,
}

impl EcdsaSignature {
    /// Assembles an ECDSA algorithm from its parameters and curve arithmetic
    ///
    /// Fails with `Configuration` when the arithmetic works on another curve or
    /// the signature length is not two field elements.
    pub fn new(descriptor: EcdsaDescriptor, arithmetic: Arc<dyn CurveArithmetic>) -> Result<Self> {
        if arithmetic.curve() != descriptor.curve {
            return Err(Error::Configuration(format!(
                "{}: curve arithmetic is for {}, expected {}",
                descriptor.name,
                arithmetic.curve(),
                descriptor.curve
            )));
        }
        if descriptor.signature_length != 2 * descriptor.curve.field_size() {
            return Err(Error::Configuration(format!(
                "{}: signature length {} does not match {} ({} bytes per part)",
                descriptor.name,
                descriptor.signature_length,
                descriptor.curve,
                descriptor.curve.field_size()
            )));
        }
        Ok(Self {
            descriptor,
            arithmetic,
        })
    }

    /// Assembles an ECDSA algorithm with the RustCrypto curve arithmetic
    pub fn with_defaults(descriptor: EcdsaDescriptor) -> Result<Self> {
        Self::new(descriptor, descriptor.curve.arithmetic())
    }

    /// Returns the descriptor
    pub fn descriptor(&self) -> &EcdsaDescriptor {
        &self.descriptor
    }
}

/// Concatenates `r` and `s`, each left-padded to `part_length` bytes
pub fn encode_signature(r: &[u8], s: &[u8], part_length: usize) -> Result<Vec<u8>> {
    let mut signature = Vec::with_capacity(2 * part_length);
    for part in [r, s] {
        let fixed = to_fixed_width(part, part_length).ok_or_else(|| {
            Error::Cryptography(format!(
                "Signature component exceeds {} bytes",
                part_length
            ))
        })?;
        signature.extend_from_slice(&fixed);
    }
    Ok(signature)
}

/// Splits an `R || S` signature at its midpoint
///
/// Fails with `MalformedInput` unless `signature` is exactly `2 * part_length` bytes.
pub fn decode_signature(signature: &[u8], part_length: usize) -> Result<(&[u8], &[u8])> {
    if signature.len() != 2 * part_length {
        return Err(Error::MalformedInput(format!(
            "Invalid signature length: {}, expected {} bytes",
            signature.len(),
            2 * part_length
        )));
    }
    Ok(signature.split_at(part_length))
}

impl JwaAlgorithm for EcdsaSignature {
    fn name(&self) -> &str {
        self.descriptor.name
    }
}

impl SignatureAlgorithm for EcdsaSignature {
    fn signature_length(&self) -> usize {
        self.descriptor.signature_length
    }

    fn generate_key(&self) -> Result<Jwk> {
        let mut jwk = Jwk::generate_ec(self.descriptor.curve)?;
        jwk.insert("alg", self.descriptor.name);
        debug!(
            algorithm = self.descriptor.name,
            curve = %self.descriptor.curve,
            "generated key pair"
        );
        Ok(jwk)
    }

    fn sign(&self, key: &Jwk, message: &[u8]) -> Result<Vec<u8>> {
        let d = key.ec_private_scalar(self.descriptor.curve)?;

        debug!(
            algorithm = self.descriptor.name,
            message_len = message.len(),
            "signing message"
        );

        let digest = self.descriptor.hash.digest(message);
        let (r, s) = self.arithmetic.sign_prehash(&d, &digest)?;
        encode_signature(&r, &s, self.descriptor.part_length())
    }

    fn verify(&self, key: &Jwk, message: &[u8], signature: &[u8]) -> Result<bool> {
        let (r, s) = decode_signature(signature, self.descriptor.part_length())?;
        let (x, y) = key.ec_public_coordinates(self.descriptor.curve)?;

        let digest = self.descriptor.hash.digest(message);
        let valid = self.arithmetic.verify_prehash(&x, &y, &digest, r, s)?;
        if !valid {
            debug!(algorithm = self.descriptor.name, "signature did not verify");
        }
        Ok(valid)
    }
}
