//! The decoded host-value union.
//!
//! Every Soroban value tag maps to exactly one variant here; tags the decoder
//! does not recognize land in [`DecodedValue::Unknown`] so a single unfamiliar
//! value can never abort decoding of an otherwise-valid transaction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many collection elements the truncated rendering shows before
/// switching to a count suffix.
pub const MAX_DISPLAY_ELEMENTS: usize = 10;

/// A checksummed strkey address, split by discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "address", rename_all = "snake_case")]
pub enum DecodedAddress {
    /// `G...` account address.
    Account(String),
    /// `C...` contract address.
    Contract(String),
}

impl DecodedAddress {
    pub fn as_str(&self) -> &str {
        match self {
            DecodedAddress::Account(s) | DecodedAddress::Contract(s) => s,
        }
    }
}

/// One key/value pair of a decoded map. Entry order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: DecodedValue,
    pub val: DecodedValue,
}

/// A fully-decoded Soroban host value.
///
/// 128- and 256-bit integers are carried as decimal strings so consumers
/// without native wide arithmetic lose no precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
    Void,
    Bool(bool),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    U128(String),
    I128(String),
    U256(String),
    I256(String),
    Bytes(Vec<u8>),
    Str(String),
    Symbol(String),
    Vec(Vec<DecodedValue>),
    Map(Vec<MapEntry>),
    Address(DecodedAddress),
    Timepoint(u64),
    Duration(u64),
    /// Sentinel for the reserved contract-instance storage key.
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
    ContractInstance {
        executable: String,
        wasm_hash: Option<String>,
    },
    /// Catch-all for tags this version does not understand. Never an error.
    Unknown { tag: String },
}

impl DecodedValue {
    /// Render for human display, truncating collections to the first
    /// [`MAX_DISPLAY_ELEMENTS`] elements with a count suffix.
    pub fn display_truncated(&self) -> String {
        self.render(Some(MAX_DISPLAY_ELEMENTS))
    }

    /// Lossless rendering for programmatic consumers; never truncates.
    pub fn display_full(&self) -> String {
        self.render(None)
    }

    /// The symbol text, when this value is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            DecodedValue::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn render(&self, limit: Option<usize>) -> String {
        match self {
            DecodedValue::Void => "void".to_string(),
            DecodedValue::Bool(b) => b.to_string(),
            DecodedValue::U32(v) => v.to_string(),
            DecodedValue::I32(v) => v.to_string(),
            DecodedValue::U64(v) => v.to_string(),
            DecodedValue::I64(v) => v.to_string(),
            DecodedValue::U128(s)
            | DecodedValue::I128(s)
            | DecodedValue::U256(s)
            | DecodedValue::I256(s) => s.clone(),
            DecodedValue::Bytes(b) => hex::encode(b),
            DecodedValue::Str(s) => format!("\"{}\"", s),
            DecodedValue::Symbol(s) => s.clone(),
            DecodedValue::Vec(items) => {
                let shown = visible(items.len(), limit);
                let body: Vec<String> =
                    items[..shown].iter().map(|v| v.render(limit)).collect();
                format!("[{}{}]", body.join(", "), suffix(items.len(), shown))
            }
            DecodedValue::Map(entries) => {
                let shown = visible(entries.len(), limit);
                let body: Vec<String> = entries[..shown]
                    .iter()
                    .map(|e| format!("{}: {}", e.key.render(limit), e.val.render(limit)))
                    .collect();
                format!("{{{}{}}}", body.join(", "), suffix(entries.len(), shown))
            }
            DecodedValue::Address(a) => a.as_str().to_string(),
            DecodedValue::Timepoint(t) => format!("timepoint({})", t),
            DecodedValue::Duration(d) => format!("duration({})", d),
            DecodedValue::LedgerKeyContractInstance => "<contract instance>".to_string(),
            DecodedValue::LedgerKeyNonce(n) => format!("nonce({})", n),
            DecodedValue::ContractInstance {
                executable,
                wasm_hash,
            } => match wasm_hash {
                Some(h) => format!("contract_instance({}, {})", executable, h),
                None => format!("contract_instance({})", executable),
            },
            DecodedValue::Unknown { tag } => format!("<unknown: {}>", tag),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_truncated())
    }
}

fn visible(len: usize, limit: Option<usize>) -> usize {
    match limit {
        Some(max) => len.min(max),
        None => len,
    }
}

fn suffix(len: usize, shown: usize) -> String {
    if shown < len {
        format!(", … (+{} more)", len - shown)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_of(n: usize) -> DecodedValue {
        DecodedValue::Vec((0..n).map(|i| DecodedValue::U32(i as u32)).collect())
    }

    #[test]
    fn test_truncated_display_caps_elements() {
        let v = vec_of(14);
        let shown = v.display_truncated();
        assert!(shown.contains("(+4 more)"), "got: {}", shown);
        assert!(shown.contains('9'));
        assert!(!shown.contains("13"));
    }

    #[test]
    fn test_full_display_is_lossless() {
        let v = vec_of(14);
        let full = v.display_full();
        assert!(full.contains("13"));
        assert!(!full.contains("more"));
    }

    #[test]
    fn test_display_is_idempotent() {
        let v = DecodedValue::Map(vec![MapEntry {
            key: DecodedValue::Symbol("balance".into()),
            val: DecodedValue::I128("340282366920938463463374607431768211455".into()),
        }]);
        assert_eq!(v.display_truncated(), v.display_truncated());
        assert_eq!(v.display_full(), v.display_full());
    }

    #[test]
    fn test_bytes_render_as_hex_not_address() {
        let v = DecodedValue::Bytes(vec![0xab; 32]);
        let shown = v.display_truncated();
        assert_eq!(shown, "ab".repeat(32));
        assert!(!shown.starts_with('C'));
        assert!(!shown.starts_with('G'));
    }

    #[test]
    fn test_serde_round_trip() {
        let v = DecodedValue::Address(DecodedAddress::Contract("CAAAA".into()));
        let json = serde_json::to_string(&v).unwrap();
        let back: DecodedValue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
