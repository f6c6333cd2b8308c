//! Value Decoder: XDR host values to [`DecodedValue`].
//!
//! Decoding is total. Every `ScVal` arm maps to exactly one variant and the
//! arms this engine cannot render meaningfully (errors, post-CAP-67 address
//! forms) degrade to [`DecodedValue::Unknown`] rather than failing, so one
//! odd value never aborts analysis of the surrounding transaction.

use stellar_xdr::curr::{
    AccountId, ContractExecutable, ContractId, Int256Parts, PublicKey, ScAddress, ScVal, Uint256,
};
use tracing::debug;

use soroban_txmeta_types::address;
use soroban_txmeta_types::{DecodedAddress, DecodedValue, MapEntry};

/// Decode one host value. Total; never errors.
pub fn decode_sc_val(val: &ScVal) -> DecodedValue {
    match val {
        ScVal::Void => DecodedValue::Void,
        ScVal::Bool(b) => DecodedValue::Bool(*b),
        ScVal::Error(e) => {
            debug!(error = ?e, "decoding ScError as opaque value");
            DecodedValue::Unknown {
                tag: format!("error({:?})", e),
            }
        }
        ScVal::U32(v) => DecodedValue::U32(*v),
        ScVal::I32(v) => DecodedValue::I32(*v),
        ScVal::U64(v) => DecodedValue::U64(*v),
        ScVal::I64(v) => DecodedValue::I64(*v),
        ScVal::Timepoint(tp) => DecodedValue::Timepoint(tp.0),
        ScVal::Duration(d) => DecodedValue::Duration(d.0),
        ScVal::U128(parts) => {
            DecodedValue::U128((((parts.hi as u128) << 64) | parts.lo as u128).to_string())
        }
        ScVal::I128(parts) => {
            DecodedValue::I128((((parts.hi as i128) << 64) | parts.lo as i128).to_string())
        }
        ScVal::U256(parts) => DecodedValue::U256(u256_to_decimal([
            parts.hi_hi,
            parts.hi_lo,
            parts.lo_hi,
            parts.lo_lo,
        ])),
        ScVal::I256(parts) => DecodedValue::I256(i256_to_decimal(parts)),
        // Explicitly-tagged bytes stay bytes. A 32-byte payload here must
        // never be reinterpreted as an address.
        ScVal::Bytes(b) => DecodedValue::Bytes(b.0.to_vec()),
        ScVal::String(s) => DecodedValue::Str(s.0.to_utf8_string_lossy()),
        ScVal::Symbol(s) => DecodedValue::Symbol(s.0.to_utf8_string_lossy()),
        ScVal::Vec(Some(vec)) => DecodedValue::Vec(vec.0.iter().map(decode_sc_val).collect()),
        ScVal::Vec(None) => DecodedValue::Vec(Vec::new()),
        ScVal::Map(Some(map)) => DecodedValue::Map(
            map.0
                .iter()
                .map(|entry| MapEntry {
                    key: decode_sc_val(&entry.key),
                    val: decode_sc_val(&entry.val),
                })
                .collect(),
        ),
        ScVal::Map(None) => DecodedValue::Map(Vec::new()),
        ScVal::Address(addr) => decode_sc_address(addr),
        ScVal::LedgerKeyContractInstance => DecodedValue::LedgerKeyContractInstance,
        ScVal::LedgerKeyNonce(nonce) => DecodedValue::LedgerKeyNonce(nonce.nonce),
        ScVal::ContractInstance(inst) => match &inst.executable {
            ContractExecutable::Wasm(hash) => DecodedValue::ContractInstance {
                executable: "wasm".to_string(),
                wasm_hash: Some(hex::encode(hash.0)),
            },
            ContractExecutable::StellarAsset => DecodedValue::ContractInstance {
                executable: "stellar_asset".to_string(),
                wasm_hash: None,
            },
        },
    }
}

/// Decode an address discriminant to its strkey form. The post-CAP-67
/// variants (muxed account, claimable balance, liquidity pool) have no
/// stable display convention here and land in `Unknown`.
pub fn decode_sc_address(addr: &ScAddress) -> DecodedValue {
    match addr {
        ScAddress::Account(id) => {
            DecodedValue::Address(DecodedAddress::Account(account_id_strkey(id)))
        }
        ScAddress::Contract(id) => {
            DecodedValue::Address(DecodedAddress::Contract(contract_id_strkey(id)))
        }
        other => DecodedValue::Unknown {
            tag: format!("address:{}", other.name()),
        },
    }
}

/// The `C...` strkey of an address, when it is a contract address.
pub fn sc_address_contract_strkey(addr: &ScAddress) -> Option<String> {
    match addr {
        ScAddress::Contract(id) => Some(contract_id_strkey(id)),
        _ => None,
    }
}

pub fn account_id_strkey(id: &AccountId) -> String {
    let PublicKey::PublicKeyTypeEd25519(Uint256(bytes)) = &id.0;
    address::account_strkey(bytes)
}

pub fn contract_id_strkey(id: &ContractId) -> String {
    address::contract_strkey(&id.0 .0)
}

/// Reconstruct an index-mapped byte buffer.
///
/// Intermediate JSON layers sometimes re-serialize typed byte buffers as
/// objects whose keys are the contiguous integers `0..n`. This rebuilds the
/// raw bytes from that shape; it must run before any base64/address
/// heuristics touch the value.
pub fn normalize_index_map(value: &serde_json::Value) -> Option<Vec<u8>> {
    let obj = value.as_object()?;
    if obj.is_empty() {
        return None;
    }
    let mut bytes = vec![0u8; obj.len()];
    let mut filled = vec![false; obj.len()];
    for (key, val) in obj {
        let idx: usize = key.parse().ok()?;
        // Distinct keys can still alias one index ("0" and "00"); only a
        // buffer where every index 0..len was filled exactly once is valid.
        if idx >= bytes.len() || filled[idx] {
            return None;
        }
        filled[idx] = true;
        bytes[idx] = u8::try_from(val.as_u64()?).ok()?;
    }
    Some(bytes)
}

fn u256_to_decimal(mut limbs: [u64; 4]) -> String {
    if limbs == [0u64; 4] {
        return "0".to_string();
    }
    let mut digits: Vec<u8> = Vec::with_capacity(78);
    while limbs != [0u64; 4] {
        let mut rem: u64 = 0;
        for limb in limbs.iter_mut() {
            let cur = ((rem as u128) << 64) | *limb as u128;
            *limb = (cur / 10) as u64;
            rem = (cur % 10) as u64;
        }
        digits.push(b'0' + rem as u8);
    }
    digits.iter().rev().map(|d| *d as char).collect()
}

fn i256_to_decimal(parts: &Int256Parts) -> String {
    let mut limbs = [parts.hi_hi as u64, parts.hi_lo, parts.lo_hi, parts.lo_lo];
    if parts.hi_hi < 0 {
        // Two's complement negation, carrying from the low limb up.
        let mut carry = 1u64;
        for limb in limbs.iter_mut().rev() {
            let (value, overflowed) = (!*limb).overflowing_add(carry);
            *limb = value;
            carry = u64::from(overflowed);
        }
        format!("-{}", u256_to_decimal(limbs))
    } else {
        u256_to_decimal(limbs)
    }
}
