pub mod algorithms;
pub mod keys;
pub mod signature;
pub mod wrap;

use crate::error::{Error, Result};
use jose_jwa::encoding::base64url_decode;

/// Decodes a base64url command-line argument
pub(crate) fn decode_arg(name: &str, value: &str) -> Result<Vec<u8>> {
    base64url_decode(value.trim()).map_err(|e| Error::Base64(format!("--{}: {}", name, e)))
}
