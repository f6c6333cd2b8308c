//! Shared types for the soroban-txmeta workspace.
//!
//! This crate holds the plain-data side of the engine: the decoded value
//! union, the analysis record types, strkey and encoding helpers, and the
//! explicit network configuration value. The decoding logic itself lives in
//! the `soroban-txmeta` crate; everything here is inert data the engine
//! produces and the SDK facade consumes.

pub mod address;
pub mod encoding;
pub mod network;
pub mod records;
pub mod value;

pub use network::Network;
pub use records::{
    ChangeAction, ContractInvocation, CrossContractCall, DiagnosisLayer, DiagnosisLevel,
    DiagnosticEventRecord, EventType, FailureDiagnosis, RawTransactionRecord, ResourceUsage,
    StateChange, StorageClass, TransactionAnalysis, TtlExtension,
};
pub use value::{DecodedAddress, DecodedValue, MapEntry, MAX_DISPLAY_ELEMENTS};
