//! Strkey rendering and validation helpers.
//!
//! This module is the canonical source for address formatting in the
//! workspace. Other crates should import from here rather than calling
//! stellar-strkey directly.

use stellar_strkey::{ed25519, Contract, Strkey};

/// Render a raw 32-byte ed25519 public key as a `G...` account strkey.
pub fn account_strkey(bytes: &[u8; 32]) -> String {
    Strkey::PublicKeyEd25519(ed25519::PublicKey(*bytes)).to_string()
}

/// Render a raw 32-byte contract hash as a `C...` contract strkey.
pub fn contract_strkey(bytes: &[u8; 32]) -> String {
    Strkey::Contract(Contract(*bytes)).to_string()
}

/// True when `s` is a well-formed `C...` contract strkey.
///
/// This is the validation gate for the resolver's direct-field scan: any
/// candidate that does not round-trip through strkey decoding is rejected.
pub fn is_contract_strkey(s: &str) -> bool {
    matches!(Strkey::from_string(s), Ok(Strkey::Contract(_)))
}

/// True when `s` is a well-formed `G...` account strkey.
pub fn is_account_strkey(s: &str) -> bool {
    matches!(Strkey::from_string(s), Ok(Strkey::PublicKeyEd25519(_)))
}
