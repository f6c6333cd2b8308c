//! Entry Decoder: ledger-entry snapshots to storage-slot records.
//!
//! Only contract data and contract code are interesting to this engine.
//! Every other entry kind (accounts, trustlines, offers, ...) decodes to
//! `None`, which callers treat as "skip", never as an error.

use stellar_xdr::curr::{
    ContractDataDurability, LedgerEntry, LedgerEntryData, LedgerKey, ScVal,
};

use soroban_txmeta_types::{DecodedValue, StorageClass};

use crate::scval::{decode_sc_val, sc_address_contract_strkey};

/// A decoded ledger-entry snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEntry {
    /// One contract storage slot.
    ContractData {
        contract_id: String,
        storage_class: StorageClass,
        key: DecodedValue,
        value: DecodedValue,
    },
    /// Uploaded contract code; only the content hash is surfaced, the
    /// bytecode itself is not decoded.
    ContractCode { hash: String },
}

impl DecodedEntry {
    pub fn contract_id(&self) -> Option<&str> {
        match self {
            DecodedEntry::ContractData { contract_id, .. } => Some(contract_id.as_str()),
            DecodedEntry::ContractCode { .. } => None,
        }
    }
}

/// The slot identity of an entry, without its value. Used for removal
/// records, where only the key survives in the meta.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntryKey {
    pub contract_id: String,
    pub storage_class: StorageClass,
    pub key: DecodedValue,
}

pub fn decode_ledger_entry(entry: &LedgerEntry) -> Option<DecodedEntry> {
    decode_entry_data(&entry.data)
}

pub fn decode_entry_data(data: &LedgerEntryData) -> Option<DecodedEntry> {
    match data {
        LedgerEntryData::ContractData(entry) => {
            let contract_id = sc_address_contract_strkey(&entry.contract)?;
            let (storage_class, key) = classify_key(&entry.key, entry.durability);
            Some(DecodedEntry::ContractData {
                contract_id,
                storage_class,
                key,
                value: decode_sc_val(&entry.val),
            })
        }
        LedgerEntryData::ContractCode(code) => Some(DecodedEntry::ContractCode {
            hash: hex::encode(code.hash.0),
        }),
        _ => None,
    }
}

pub fn decode_entry_key(key: &LedgerKey) -> Option<DecodedEntryKey> {
    match key {
        LedgerKey::ContractData(data) => {
            let contract_id = sc_address_contract_strkey(&data.contract)?;
            let (storage_class, key) = classify_key(&data.key, data.durability);
            Some(DecodedEntryKey {
                contract_id,
                storage_class,
                key,
            })
        }
        _ => None,
    }
}

/// True when this entry or key is a TTL record; the meta walker collapses
/// these into a single per-operation TTL-extension marker.
pub fn is_ttl_entry(data: &LedgerEntryData) -> bool {
    matches!(data, LedgerEntryData::Ttl(_))
}

pub fn is_ttl_key(key: &LedgerKey) -> bool {
    matches!(key, LedgerKey::Ttl(_))
}

// The reserved instance key never goes through the generic value path: it
// decodes to the fixed sentinel and forces the Instance storage class.
fn classify_key(key: &ScVal, durability: ContractDataDurability) -> (StorageClass, DecodedValue) {
    if matches!(key, ScVal::LedgerKeyContractInstance) {
        return (StorageClass::Instance, DecodedValue::LedgerKeyContractInstance);
    }
    let class = match durability {
        ContractDataDurability::Temporary => StorageClass::Temporary,
        ContractDataDurability::Persistent => StorageClass::Persistent,
    };
    (class, decode_sc_val(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{
        AccountEntry, AccountEntryExt, AccountId, ContractCodeEntry, ContractDataEntry,
        ContractId, ExtensionPoint, Hash, PublicKey, ScAddress, ScSymbol, SequenceNumber,
        String32, Thresholds, Uint256,
    };

    fn contract_addr(byte: u8) -> ScAddress {
        ScAddress::Contract(ContractId(Hash([byte; 32])))
    }

    fn data_entry(key: ScVal, durability: ContractDataDurability) -> LedgerEntryData {
        LedgerEntryData::ContractData(ContractDataEntry {
            ext: ExtensionPoint::V0,
            contract: contract_addr(1),
            key,
            durability,
            val: ScVal::U32(7),
        })
    }

    #[test]
    fn test_persistent_slot_decodes_key_and_value() {
        let key = ScVal::Symbol(ScSymbol("counter".try_into().unwrap()));
        let decoded = decode_entry_data(&data_entry(key, ContractDataDurability::Persistent))
            .expect("contract data decodes");
        match decoded {
            DecodedEntry::ContractData {
                storage_class,
                key,
                value,
                contract_id,
            } => {
                assert_eq!(storage_class, StorageClass::Persistent);
                assert_eq!(key, DecodedValue::Symbol("counter".to_string()));
                assert_eq!(value, DecodedValue::U32(7));
                assert!(contract_id.starts_with('C'));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_instance_key_uses_sentinel_not_generic_path() {
        let decoded = decode_entry_data(&data_entry(
            ScVal::LedgerKeyContractInstance,
            // Durability says persistent, but the instance key wins.
            ContractDataDurability::Persistent,
        ))
        .expect("contract data decodes");
        match decoded {
            DecodedEntry::ContractData {
                storage_class, key, ..
            } => {
                assert_eq!(storage_class, StorageClass::Instance);
                assert_eq!(key, DecodedValue::LedgerKeyContractInstance);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_contract_code_decodes_to_hash_only() {
        let data = LedgerEntryData::ContractCode(ContractCodeEntry {
            ext: stellar_xdr::curr::ContractCodeEntryExt::V0,
            hash: Hash([0xaa; 32]),
            code: vec![0, 97, 115, 109].try_into().unwrap(),
        });
        assert_eq!(
            decode_entry_data(&data),
            Some(DecodedEntry::ContractCode {
                hash: "aa".repeat(32),
            })
        );
    }

    #[test]
    fn test_irrelevant_entry_kinds_are_skipped() {
        let account = LedgerEntryData::Account(AccountEntry {
            account_id: AccountId(PublicKey::PublicKeyTypeEd25519(Uint256([2u8; 32]))),
            balance: 100,
            seq_num: SequenceNumber(1),
            num_sub_entries: 0,
            inflation_dest: None,
            flags: 0,
            home_domain: String32::default(),
            thresholds: Thresholds([1, 0, 0, 0]),
            signers: Default::default(),
            ext: AccountEntryExt::V0,
        });
        assert_eq!(decode_entry_data(&account), None);
    }
}
