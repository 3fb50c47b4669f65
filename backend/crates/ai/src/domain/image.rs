//! Inline Image
//!
//! Photos arrive as a data URL (`data:image/png;base64,...`) or as bare
//! base64, which is assumed to be JPEG.

use crate::error::{AiError, AiResult};

/// Largest decoded image accepted
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Photo formats accepted from clients and served back from the cache
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/heic",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn parse(input: &str) -> AiResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AiError::InvalidImage("Image is required".into()));
        }

        let (mime_type, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| AiError::InvalidImage("Malformed data URL".into()))?;
                let mime_type = header
                    .strip_suffix(";base64")
                    .ok_or_else(|| AiError::InvalidImage("Data URL must be base64".into()))?;
                let mime_type = match mime_type.to_ascii_lowercase().as_str() {
                    "image/jpg" => DEFAULT_MIME_TYPE.to_string(),
                    known if ALLOWED_MIME_TYPES.contains(&known) => known.to_string(),
                    _ => {
                        return Err(AiError::InvalidImage(
                            "Unsupported image type; use JPEG, PNG, WebP, GIF or HEIC".into(),
                        ));
                    }
                };
                (mime_type, payload)
            }
            None => (DEFAULT_MIME_TYPE.to_string(), input),
        };

        // Reject before decoding when the encoded size already rules it out
        if payload.len() / 4 * 3 > MAX_IMAGE_BYTES + 3 {
            return Err(too_large());
        }

        let data = platform::crypto::from_base64(payload)
            .map_err(|_| AiError::InvalidImage("Image is not valid base64".into()))?;
        if data.is_empty() {
            return Err(AiError::InvalidImage("Image is required".into()));
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(too_large());
        }

        Ok(Self { mime_type, data })
    }

    pub fn to_base64(&self) -> String {
        platform::crypto::to_base64(&self.data)
    }
}

fn too_large() -> AiError {
    AiError::InvalidImage(format!(
        "Image exceeds {} MiB",
        MAX_IMAGE_BYTES / (1024 * 1024)
    ))
}
