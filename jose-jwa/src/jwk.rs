//! JSON Web Key access for the JWA algorithms
//!
//! Keys are created and owned by the caller's key management layer. The
//! algorithms only borrow them to read the parameters they need: the secret
//! `k` of an `oct` key, or `crv`/`x`/`y`/`d` of an `EC` key.

use crate::crypto::Curve;
use crate::encoding::{base64url_decode, base64url_encode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use zeroize::Zeroizing;

/// JWK parameters that carry secret material
const PRIVATE_PARAMETERS: [&str; 2] = ["k", "d"];

/// Key kind, selected by the `kty` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// `oct`: raw symmetric secret
    Symmetric,
    /// `EC`: elliptic curve key pair or public key
    EllipticCurve,
    /// Any other or missing `kty`
    Other,
}

/// A JSON Web Key (RFC 7517)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jwk(Map<String, Value>);

impl Jwk {
    /// Wraps a JSON object as a JWK
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(params) => Ok(Self(params)),
            _ => Err(Error::InvalidKey("JWK must be a JSON object".to_string())),
        }
    }

    /// Creates an `oct` key holding `secret`
    pub fn symmetric(secret: &[u8]) -> Self {
        let mut params = Map::new();
        params.insert("kty".to_string(), Value::from("oct"));
        params.insert("k".to_string(), Value::from(base64url_encode(secret)));
        Self(params)
    }

    /// Generates a new `EC` key pair on `curve`
    pub fn generate_ec(curve: Curve) -> Result<Self> {
        let material = curve.arithmetic().generate_key()?;

        let mut params = Map::new();
        params.insert("kty".to_string(), Value::from("EC"));
        params.insert("crv".to_string(), Value::from(curve.as_str()));
        params.insert("x".to_string(), Value::from(base64url_encode(&material.x)));
        params.insert("y".to_string(), Value::from(base64url_encode(&material.y)));
        params.insert(
            "d".to_string(),
            Value::from(base64url_encode(material.d.as_slice())),
        );
        Ok(Self(params))
    }

    /// Returns a parameter value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a string parameter value
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Sets a parameter value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Removes a parameter, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Returns the key kind from `kty`
    pub fn kind(&self) -> KeyKind {
        match self.get_str("kty") {
            Some("oct") => KeyKind::Symmetric,
            Some("EC") => KeyKind::EllipticCurve,
            _ => KeyKind::Other,
        }
    }

    /// Returns the key ID (`kid`), if any
    pub fn key_id(&self) -> Option<&str> {
        self.get_str("kid")
    }

    /// Returns the decoded secret of an `oct` key
    pub fn symmetric_secret(&self) -> Result<Zeroizing<Vec<u8>>> {
        if self.kind() != KeyKind::Symmetric {
            return Err(Error::InvalidKey(format!(
                "Expected an 'oct' key, got kty={:?}",
                self.get_str("kty")
            )));
        }
        let encoded = self
            .get_str("k")
            .ok_or_else(|| Error::InvalidKey("Missing secret (k) in JWK".to_string()))?;
        let secret = Zeroizing::new(
            base64url_decode(encoded)
                .map_err(|e| Error::InvalidKey(format!("Failed to decode secret (k): {}", e)))?,
        );
        if secret.is_empty() {
            return Err(Error::InvalidKey("Secret (k) is empty".to_string()));
        }
        Ok(secret)
    }

    /// Returns the private scalar `d`, left-padded to the field size of `curve`
    pub fn ec_private_scalar(&self, curve: Curve) -> Result<Zeroizing<Vec<u8>>> {
        self.check_curve(curve)?;
        let scalar = Zeroizing::new(self.decode_ec_parameter("d", curve)?);
        Ok(scalar)
    }

    /// Returns the public coordinates `(x, y)`, each left-padded to the field size of `curve`
    pub fn ec_public_coordinates(&self, curve: Curve) -> Result<(Vec<u8>, Vec<u8>)> {
        self.check_curve(curve)?;
        let x = self.decode_ec_parameter("x", curve)?;
        let y = self.decode_ec_parameter("y", curve)?;
        Ok((x, y))
    }

    /// Returns a copy of this key without its private parameters
    pub fn to_public(&self) -> Jwk {
        let params = self
            .0
            .iter()
            .filter(|(name, _)| !PRIVATE_PARAMETERS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Jwk(params)
    }

    /// Returns the key as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    fn check_curve(&self, curve: Curve) -> Result<()> {
        if self.kind() != KeyKind::EllipticCurve {
            return Err(Error::InvalidKey(format!(
                "Expected an 'EC' key, got kty={:?}",
                self.get_str("kty")
            )));
        }
        match self.get_str("crv") {
            Some(crv) if crv == curve.as_str() => Ok(()),
            other => Err(Error::InvalidKey(format!(
                "Key curve {:?} does not match {}",
                other, curve
            ))),
        }
    }

    fn decode_ec_parameter(&self, name: &str, curve: Curve) -> Result<Vec<u8>> {
        let encoded = self
            .get_str(name)
            .ok_or_else(|| Error::InvalidKey(format!("Missing '{}' in EC JWK", name)))?;
        let bytes = base64url_decode(encoded)
            .map_err(|e| Error::InvalidKey(format!("Failed to decode '{}': {}", name, e)))?;
        if bytes.is_empty() || bytes.len() > curve.field_size() {
            return Err(Error::InvalidKey(format!(
                "Invalid '{}' length for {}: {} bytes, expected {}",
                name,
                curve,
                bytes.len(),
                curve.field_size()
            )));
        }
        let mut padded = vec![0u8; curve.field_size() - bytes.len()];
        padded.extend_from_slice(&bytes);
        Ok(padded)
    }
}

impl fmt::Debug for Jwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.0 {
            if PRIVATE_PARAMETERS.contains(&name.as_str()) {
                map.entry(name, &"<redacted>");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

impl TryFrom<Value> for Jwk {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Jwk::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symmetric_secret() {
        let jwk = Jwk::symmetric(b"secret");
        assert_eq!(jwk.kind(), KeyKind::Symmetric);
        assert_eq!(jwk.symmetric_secret().unwrap().as_slice(), b"secret");
    }

    #[test]
    fn test_symmetric_secret_rejects_ec_key() {
        let jwk = Jwk::generate_ec(Curve::P256).unwrap();
        assert!(matches!(jwk.symmetric_secret(), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_symmetric_secret_missing_or_empty() {
        let missing = Jwk::from_value(json!({"kty": "oct"})).unwrap();
        assert!(matches!(missing.symmetric_secret(), Err(Error::InvalidKey(_))));

        let empty = Jwk::from_value(json!({"kty": "oct", "k": ""})).unwrap();
        assert!(matches!(empty.symmetric_secret(), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(Jwk::from_value(json!("oct")).is_err());
    }

    #[test]
    fn test_ec_parameters_padded_to_field_size() {
        let jwk = Jwk::from_value(json!({
            "kty": "EC",
            "crv": "P-256",
            "x": base64url_encode([1u8; 31]),
            "y": base64url_encode([2u8; 32]),
        }))
        .unwrap();

        let (x, y) = jwk.ec_public_coordinates(Curve::P256).unwrap();
        assert_eq!(x.len(), 32);
        assert_eq!(x[0], 0);
        assert_eq!(y, vec![2u8; 32]);
    }

    #[test]
    fn test_ec_curve_mismatch() {
        let jwk = Jwk::generate_ec(Curve::P384).unwrap();
        assert!(matches!(
            jwk.ec_private_scalar(Curve::P256),
            Err(Error::InvalidKey(_))
        ));
        assert!(jwk.ec_private_scalar(Curve::P384).is_ok());
    }

    #[test]
    fn test_to_public_strips_private_parameters() {
        let jwk = Jwk::generate_ec(Curve::P521).unwrap();
        let public = jwk.to_public();
        assert!(public.get("d").is_none());
        assert_eq!(public.get_str("crv"), Some("P-521"));
        assert!(matches!(
            public.ec_private_scalar(Curve::P521),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let jwk = Jwk::symmetric(b"top secret password");
        let debug = format!("{:?}", jwk);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&base64url_encode(b"top secret password")));
    }
}
