//! JOSE header handling
//!
//! Headers are partly attacker-controlled on the decrypt and verify paths, so
//! every member an algorithm relies on is validated here before any key
//! material is touched.

use crate::encoding::base64url_decode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Algorithm header parameter
pub const ALG: &str = "alg";
/// PBES2 salt input header parameter
pub const P2S: &str = "p2s";
/// PBES2 iteration count header parameter
pub const P2C: &str = "p2c";

/// Decoded PBES2 header parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbes2Parameters {
    /// Decoded `p2s` value
    pub salt: Vec<u8>,
    /// `p2c` value
    pub count: u32,
}

/// A JOSE header: an insertion-ordered JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(Map<String, Value>);

impl Header {
    /// Creates an empty header
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Creates a header with the given `alg`
    pub fn with_alg(alg: &str) -> Self {
        let mut header = Self::new();
        header.insert(ALG, alg);
        header
    }

    /// Wraps a JSON object as a header
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(members) => Ok(Self(members)),
            _ => Err(Error::InvalidHeader(
                "Header must be a JSON object".to_string(),
            )),
        }
    }

    /// Returns a member value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Sets a member value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Removes a member, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Iterates over the members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the header as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Applies the members produced by an encryption
    pub fn merge(&mut self, additions: HeaderAdditions) {
        for (name, value) in additions.0 {
            self.0.insert(name, value);
        }
    }

    /// Returns the `alg` member
    ///
    /// Fails with `InvalidHeader` when it is missing, not a string, or empty.
    pub fn alg(&self) -> Result<&str> {
        match self.0.get(ALG).and_then(Value::as_str) {
            Some(alg) if !alg.is_empty() => Ok(alg),
            _ => Err(Error::InvalidHeader(
                "The header parameter 'alg' is missing or invalid".to_string(),
            )),
        }
    }

    /// Returns the decoded `p2s` and `p2c` members
    ///
    /// `p2s` must be a non-empty base64url string with a non-empty decoding.
    /// `p2c` must be a JSON integer in `1..=max_count`.
    pub fn pbes2_parameters(&self, max_count: u32) -> Result<Pbes2Parameters> {
        let salt = match self.0.get(P2S).and_then(Value::as_str) {
            Some(encoded) if !encoded.is_empty() => base64url_decode(encoded).map_err(|e| {
                Error::InvalidAdditionalParameters(format!("'p2s' is not valid base64url: {}", e))
            })?,
            _ => {
                return Err(Error::InvalidAdditionalParameters(
                    "'p2s' parameter is missing or invalid".to_string(),
                ))
            }
        };
        if salt.is_empty() {
            return Err(Error::InvalidAdditionalParameters(
                "'p2s' decodes to an empty salt".to_string(),
            ));
        }

        let count = match self.0.get(P2C).and_then(Value::as_u64) {
            Some(count) if count > 0 => count,
            _ => {
                return Err(Error::InvalidAdditionalParameters(
                    "'p2c' parameter is missing or is not a positive integer".to_string(),
                ))
            }
        };
        if count > u64::from(max_count) {
            return Err(Error::InvalidAdditionalParameters(format!(
                "'p2c' value {} exceeds the maximum of {}",
                count, max_count
            )));
        }

        Ok(Pbes2Parameters {
            salt,
            count: count as u32,
        })
    }
}

impl TryFrom<Value> for Header {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Header::from_value(value)
    }
}

/// Header members produced by an encryption, for the caller to merge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderAdditions(Map<String, Value>);

impl HeaderAdditions {
    /// Creates an empty set of additions
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Adds a member
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns a member value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterates over the members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Whether there are no members
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
