//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random URL-safe token (unpadded base64 of `len` random bytes)
pub fn random_token(len: usize) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes(len))
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard base64, tolerating missing padding and embedded whitespace
///
/// Mobile image pickers sometimes wrap long payloads with newlines.
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let trimmed = compact.trim_end_matches('=');
    general_purpose::STANDARD_NO_PAD.decode(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_token_is_url_safe() {
        let token = random_token(16);
        assert_eq!(token.len(), 22);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, random_token(16));
    }

    #[test]
    fn test_base64_tolerates_whitespace_and_padding() {
        let encoded = to_base64(b"hello world");
        assert_eq!(from_base64(&encoded).unwrap(), b"hello world");

        let wrapped = format!("{}\n{}", &encoded[..8], &encoded[8..]);
        assert_eq!(from_base64(&wrapped).unwrap(), b"hello world");

        let unpadded = encoded.trim_end_matches('=');
        assert_eq!(from_base64(unpadded).unwrap(), b"hello world");
    }

    #[test]
    fn test_base64_rejects_garbage() {
        assert!(from_base64("not*base64!").is_err());
    }
}
