//! Elliptic curve arithmetic for ECDSA
//!
//! The signature algorithms only see raw big-endian integers and coordinates.
//! Each [`CurveArithmetic`] implementation owns the curve parameters, the
//! generator and the ECDSA primitives of one RustCrypto curve crate.

use crate::error::{Error, Result};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use zeroize::Zeroizing;

/// Curves supported by the ECDSA algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// NIST P-256 (secp256r1)
    P256,
    /// NIST P-384 (secp384r1)
    P384,
    /// NIST P-521 (secp521r1)
    P521,
    /// secp256k1
    Secp256k1,
}

impl Curve {
    /// Returns the JWK `crv` name of the curve
    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::Secp256k1 => "secp256k1",
        }
    }

    /// Looks a curve up by its JWK `crv` name
    pub fn from_jwk_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(Curve::P256),
            "P-384" => Some(Curve::P384),
            "P-521" => Some(Curve::P521),
            "secp256k1" => Some(Curve::Secp256k1),
            _ => None,
        }
    }

    /// Size of a field element in bytes, rounded up to a byte boundary
    pub fn field_size(&self) -> usize {
        match self {
            Curve::P256 | Curve::Secp256k1 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// The RustCrypto arithmetic for this curve
    pub fn arithmetic(&self) -> std::sync::Arc<dyn CurveArithmetic> {
        match self {
            Curve::P256 => std::sync::Arc::new(P256Arithmetic),
            Curve::P384 => std::sync::Arc::new(P384Arithmetic),
            Curve::P521 => std::sync::Arc::new(P521Arithmetic),
            Curve::Secp256k1 => std::sync::Arc::new(Secp256k1Arithmetic),
        }
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw key material of a freshly generated key pair, each value a
/// big-endian field element of exactly [`Curve::field_size`] bytes
pub struct EcKeyMaterial {
    /// Private scalar
    pub d: Zeroizing<Vec<u8>>,
    /// Affine x coordinate of the public point
    pub x: Vec<u8>,
    /// Affine y coordinate of the public point
    pub y: Vec<u8>,
}

/// Point and scalar operations of a single curve
pub trait CurveArithmetic: Send + Sync + Debug {
    /// The curve these operations work on
    fn curve(&self) -> Curve;

    /// Generates a random key pair
    fn generate_key(&self) -> Result<EcKeyMaterial>;

    /// Computes an ECDSA signature over a message digest
    ///
    /// # Arguments
    /// * `d` - The private scalar, big-endian, exactly one field element long
    /// * `digest` - The message digest
    ///
    /// # Returns
    /// `(r, s)` as big-endian unsigned integers
    fn sign_prehash(&self, d: &[u8], digest: &[u8]) -> Result<(Vec<u8>, Vec<u8>)>;

    /// Verifies `(r, s)` against a digest and the public point `(x, y)`.
    ///
    /// `r` and `s` are big-endian unsigned integers of at most one field element.
    /// Values of zero or not below the curve order verify as `false`.
    /// An `(x, y)` that is not a point on the curve is an `InvalidKey` error.
    fn verify_prehash(
        &self,
        x: &[u8],
        y: &[u8],
        digest: &[u8],
        r: &[u8],
        s: &[u8],
    ) -> Result<bool>;
}

/// Left-pads a big-endian unsigned integer to exactly `len` bytes.
///
/// Leading zero bytes beyond `len` are dropped; a value that still does not
/// fit returns `None`.
pub fn to_fixed_width(value: &[u8], len: usize) -> Option<Vec<u8>> {
    let first_nonzero = value.iter().position(|b| *b != 0).unwrap_or(value.len());
    let significant = &value[first_nonzero..];
    if significant.len() > len {
        return None;
    }
    let mut out = vec![0u8; len];
    out[len - significant.len()..].copy_from_slice(significant);
    Some(out)
}

macro_rules! rustcrypto_curve {
    ($(#[$doc:meta])* $name:ident, $krate:ident, $curve:expr) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl CurveArithmetic for $name {
            fn curve(&self) -> Curve {
                $curve
            }

            fn generate_key(&self) -> Result<EcKeyMaterial> {
                use $krate::elliptic_curve::sec1::ToEncodedPoint;

                let secret_key = $krate::SecretKey::random(&mut OsRng);
                let point = secret_key.public_key().to_encoded_point(false);
                let (x, y) = match (point.x(), point.y()) {
                    (Some(x), Some(y)) => (x.to_vec(), y.to_vec()),
                    _ => {
                        return Err(Error::Cryptography(format!(
                            "Failed to encode {} public key",
                            $curve
                        )))
                    }
                };

                Ok(EcKeyMaterial {
                    d: Zeroizing::new(secret_key.to_bytes().to_vec()),
                    x,
                    y,
                })
            }

            fn sign_prehash(&self, d: &[u8], digest: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
                let signing_key = $krate::ecdsa::SigningKey::from_slice(d).map_err(|e| {
                    Error::InvalidKey(format!("Invalid {} private scalar: {:?}", $curve, e))
                })?;

                let signature: $krate::ecdsa::Signature =
                    signing_key.sign_prehash(digest).map_err(|e| {
                        Error::Cryptography(format!("{} signing failed: {:?}", $curve, e))
                    })?;

                let (r, s) = signature.split_bytes();
                Ok((r.to_vec(), s.to_vec()))
            }

            fn verify_prehash(
                &self,
                x: &[u8],
                y: &[u8],
                digest: &[u8],
                r: &[u8],
                s: &[u8],
            ) -> Result<bool> {
                let field_size = $curve.field_size();

                // Uncompressed SEC1 point: 0x04 || x || y
                let mut point_bytes = Vec::with_capacity(1 + 2 * field_size);
                point_bytes.push(0x04);
                for coordinate in [x, y] {
                    let fixed = to_fixed_width(coordinate, field_size).ok_or_else(|| {
                        Error::InvalidKey(format!("{} coordinate is too long", $curve))
                    })?;
                    point_bytes.extend_from_slice(&fixed);
                }

                let verifying_key = $krate::ecdsa::VerifyingKey::from_sec1_bytes(&point_bytes)
                    .map_err(|e| {
                        Error::InvalidKey(format!("Invalid {} public key: {:?}", $curve, e))
                    })?;

                let mut signature_bytes = Vec::with_capacity(2 * field_size);
                for part in [r, s] {
                    match to_fixed_width(part, field_size) {
                        Some(fixed) => signature_bytes.extend_from_slice(&fixed),
                        None => return Ok(false),
                    }
                }

                // Rejects r or s equal to zero or not below the curve order
                let signature = match $krate::ecdsa::Signature::from_slice(&signature_bytes) {
                    Ok(signature) => signature,
                    Err(_) => return Ok(false),
                };

                Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
            }
        }
    };
}

rustcrypto_curve!(
    /// NIST P-256 arithmetic backed by the `p256` crate
    P256Arithmetic,
    p256,
    Curve::P256
);

rustcrypto_curve!(
    /// NIST P-384 arithmetic backed by the `p384` crate
    P384Arithmetic,
    p384,
    Curve::P384
);

rustcrypto_curve!(
    /// NIST P-521 arithmetic backed by the `p521` crate
    P521Arithmetic,
    p521,
    Curve::P521
);

rustcrypto_curve!(
    /// secp256k1 arithmetic backed by the `k256` crate
    Secp256k1Arithmetic,
    k256,
    Curve::Secp256k1
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_pads_and_strips() {
        assert_eq!(to_fixed_width(&[0x01, 0x02], 4), Some(vec![0, 0, 1, 2]));
        assert_eq!(to_fixed_width(&[0x00, 0x00, 0x01], 2), Some(vec![0, 1]));
        assert_eq!(to_fixed_width(&[0x01, 0x00, 0x00], 2), None);
        assert_eq!(to_fixed_width(&[], 2), Some(vec![0, 0]));
    }

    #[test]
    fn test_curve_names_roundtrip() {
        for curve in [Curve::P256, Curve::P384, Curve::P521, Curve::Secp256k1] {
            assert_eq!(Curve::from_jwk_name(curve.as_str()), Some(curve));
            assert_eq!(curve.arithmetic().curve(), curve);
        }
        assert_eq!(Curve::from_jwk_name("Ed25519"), None);
    }

    #[test]
    fn test_generated_key_sizes() {
        for curve in [Curve::P256, Curve::P384, Curve::P521, Curve::Secp256k1] {
            let key = curve.arithmetic().generate_key().unwrap();
            assert_eq!(key.d.len(), curve.field_size());
            assert_eq!(key.x.len(), curve.field_size());
            assert_eq!(key.y.len(), curve.field_size());
        }
    }

    #[test]
    fn test_sign_verify_prehash() {
        let arithmetic = P384Arithmetic;
        let key = arithmetic.generate_key().unwrap();
        let digest = [0x5Au8; 48];

        let (r, s) = arithmetic.sign_prehash(&key.d, &digest).unwrap();
        assert!(arithmetic
            .verify_prehash(&key.x, &key.y, &digest, &r, &s)
            .unwrap());

        let other_digest = [0xA5u8; 48];
        assert!(!arithmetic
            .verify_prehash(&key.x, &key.y, &other_digest, &r, &s)
            .unwrap());
    }

    #[test]
    fn test_zero_scalars_verify_false() {
        let arithmetic = P256Arithmetic;
        let key = arithmetic.generate_key().unwrap();
        let zero = [0u8; 32];

        assert!(!arithmetic
            .verify_prehash(&key.x, &key.y, &[1u8; 32], &zero, &zero)
            .unwrap());
    }

    #[test]
    fn test_scalar_above_order_verifies_false() {
        let arithmetic = P256Arithmetic;
        let key = arithmetic.generate_key().unwrap();
        let max = [0xFFu8; 32];

        assert!(!arithmetic
            .verify_prehash(&key.x, &key.y, &[1u8; 32], &max, &max)
            .unwrap());
    }

    #[test]
    fn test_point_off_curve_is_invalid_key() {
        let arithmetic = P256Arithmetic;
        let result = arithmetic.verify_prehash(&[1u8; 32], &[2u8; 32], &[0u8; 32], &[1], &[1]);
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_zero_private_scalar_rejected() {
        let arithmetic = Secp256k1Arithmetic;
        assert!(matches!(
            arithmetic.sign_prehash(&[0u8; 32], &[1u8; 32]),
            Err(Error::InvalidKey(_))
        ));
    }
}
