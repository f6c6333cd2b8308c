//! Encoding utilities for base64 and hex.
//!
//! Shared parse helpers with contextual error messages, so callers do not
//! repeat the same error-wrapping boilerplate at every decode site.

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode a base64 string with a context-aware error message.
///
/// # Arguments
/// * `data` - Base64 input
/// * `context` - Description for error messages (e.g., "transaction envelope")
pub fn parse_b64(data: &str, context: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| anyhow!("Invalid {} base64: {}", context, e))
}

/// Encode bytes to standard base64.
pub fn encode_b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a hex string (with or without `0x` prefix) with a context-aware
/// error message.
pub fn parse_hex_bytes(hex_str: &str, context: &str) -> Result<Vec<u8>> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    hex::decode(hex_str).map_err(|e| anyhow!("Invalid {} hex '{}': {}", context, hex_str, e))
}
