use super::decode_arg;
use crate::error::{Error, Result};
use jose_jwa::encoding::base64url_encode;
use jose_jwa::{AlgorithmRegistry, Header, Jwk, KeyEncryptionAlgorithm};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct WrapResponse {
    pub alg: String,
    pub encrypted_key: String,
    pub header: Value,
}

#[derive(Debug, Serialize)]
pub struct UnwrapResponse {
    pub alg: String,
    pub cek: String,
}

/// Wraps a hex-encoded CEK under a password
///
/// The returned header already carries the `p2s` and `p2c` members needed to unwrap.
pub fn wrap(
    registry: &AlgorithmRegistry,
    alg: &str,
    password: &str,
    cek_hex: &str,
) -> Result<WrapResponse> {
    let algorithm = registry.key_encryption(alg)?;
    let cek = hex::decode(cek_hex.trim())?;
    let key = password_key(password)?;

    let mut header = Header::with_alg(alg);
    let (encrypted_key, additions) = algorithm.encrypt_key(&key, &cek, &header)?;
    header.merge(additions);

    Ok(WrapResponse {
        alg: alg.to_string(),
        encrypted_key: base64url_encode(encrypted_key),
        header: header.to_value(),
    })
}

/// Unwraps a base64url encrypted key using the header produced by [`wrap`]
pub fn unwrap(
    registry: &AlgorithmRegistry,
    alg: &str,
    password: &str,
    header_json: &str,
    encrypted_key: &str,
) -> Result<UnwrapResponse> {
    let algorithm = registry.key_encryption(alg)?;
    let header = Header::from_value(serde_json::from_str(header_json)?)?;
    let encrypted_key = decode_arg("encrypted-key", encrypted_key)?;
    let key = password_key(password)?;

    let cek = algorithm.decrypt_key(&key, &encrypted_key, &header)?;
    Ok(UnwrapResponse {
        alg: alg.to_string(),
        cek: hex::encode(cek),
    })
}

fn password_key(password: &str) -> Result<Jwk> {
    if password.is_empty() {
        return Err(Error::InvalidArgument(
            "--password must not be empty".to_string(),
        ));
    }
    Ok(Jwk::symmetric(password.as_bytes()))
}
