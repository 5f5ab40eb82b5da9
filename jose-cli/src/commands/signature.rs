use super::decode_arg;
use super::keys::load_jwk;
use crate::error::Result;
use jose_jwa::encoding::base64url_encode;
use jose_jwa::{AlgorithmRegistry, SignatureAlgorithm};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SignResponse {
    pub alg: String,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub alg: String,
    pub valid: bool,
}

/// Signs a UTF-8 message with the JWK stored at `key_path`
pub fn sign(
    registry: &AlgorithmRegistry,
    alg: &str,
    key_path: &Path,
    message: &str,
) -> Result<SignResponse> {
    let algorithm = registry.signature(alg)?;
    let key = load_jwk(key_path)?;

    let signature = algorithm.sign(&key, message.as_bytes())?;
    Ok(SignResponse {
        alg: alg.to_string(),
        signature: base64url_encode(signature),
    })
}

/// Verifies a base64url signature over a UTF-8 message
pub fn verify(
    registry: &AlgorithmRegistry,
    alg: &str,
    key_path: &Path,
    message: &str,
    signature: &str,
) -> Result<VerifyResponse> {
    let algorithm = registry.signature(alg)?;
    let key = load_jwk(key_path)?;
    let signature = decode_arg("signature", signature)?;

    let valid = algorithm.verify(&key, message.as_bytes(), &signature)?;
    Ok(VerifyResponse {
        alg: alg.to_string(),
        valid,
    })
}
