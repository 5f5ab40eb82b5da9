//! Base64url helpers (RFC 7515 Section 2, no padding)

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encodes bytes as unpadded base64url
pub fn base64url_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decodes unpadded base64url
pub fn base64url_decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_alphabet_without_padding() {
        let encoded = base64url_encode([0xFBu8, 0xFF]);
        assert_eq!(encoded, "-_8");
        assert_eq!(base64url_decode(&encoded).unwrap(), vec![0xFB, 0xFF]);
    }

    #[test]
    fn test_padding_rejected() {
        assert!(base64url_decode("-_8=").is_err());
    }
}
