use crate::error::{Error, Result};
use jose_jwa::{AlgorithmRegistry, Jwk, SignatureAlgorithm};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct GeneratedKeyResponse {
    pub alg: String,
    pub jwk: Value,
    pub public_jwk: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

/// Generates a key pair for a signature algorithm, optionally saving the JWK
pub fn generate(
    registry: &AlgorithmRegistry,
    alg: &str,
    output: Option<&Path>,
) -> Result<GeneratedKeyResponse> {
    if registry.key_encryption(alg).is_ok() {
        return Err(Error::InvalidArgument(format!(
            "{} derives its key from a password; pass --password instead",
            alg
        )));
    }
    let jwk = registry.signature(alg)?.generate_key()?;
    debug!(alg, kid = ?jwk.key_id(), "generated key pair");

    let saved_to = match output {
        Some(path) => {
            std::fs::write(path, serde_json::to_string_pretty(&jwk)?)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    Ok(GeneratedKeyResponse {
        alg: alg.to_string(),
        jwk: jwk.to_value(),
        public_jwk: jwk.to_public().to_value(),
        saved_to,
    })
}

/// Reads a JWK from a JSON file
pub fn load_jwk(path: &Path) -> Result<Jwk> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    Ok(Jwk::from_value(value)?)
}
