//! Uploaded images kept inline as `data:` URIs.
//!
//! A picked post image or business logo is stored in the same text column as
//! an image URL, so both kinds of value render through a plain `src`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Type used when the browser reports none for a picked file.
const UNKNOWN_TYPE: &str = "application/octet-stream";

/// `data:<type>;base64,<payload>` for the bytes of an uploaded file.
pub fn data_uri(content_type: Option<&str>, bytes: &[u8]) -> String {
    let content_type = content_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_TYPE);
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

pub fn is_data_uri(value: &str) -> bool {
    value.starts_with("data:")
}
