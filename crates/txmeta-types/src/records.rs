//! Analysis record types.
//!
//! Everything here is a read-only projection of one [`RawTransactionRecord`]:
//! plain serde data with no behavior beyond small accessors, handed to the
//! SDK facade and discarded once the caller has consumed it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::network::Network;
use crate::value::DecodedValue;

/// Immutable input to one analysis run: the already-fetched buffers and
/// records for a single transaction. The engine never mutates this and
/// performs no I/O of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransactionRecord {
    /// Base64 XDR `TransactionEnvelope`.
    pub envelope_xdr: String,
    /// Base64 XDR `TransactionResult`, when the caller has it.
    pub result_xdr: Option<String>,
    /// Base64 XDR `TransactionMeta`, when the caller has it.
    pub result_meta_xdr: Option<String>,
    /// Horizon-style operation records, one per operation. May carry
    /// ambiguous invocation hints; may be shorter than the envelope's
    /// operation list.
    pub operations: Vec<serde_json::Value>,
    /// Optional soroban-rpc lookup payload with supplementary per-operation
    /// results and resource data.
    pub rpc_payload: Option<serde_json::Value>,
}

impl RawTransactionRecord {
    pub fn new(envelope_xdr: impl Into<String>) -> Self {
        Self {
            envelope_xdr: envelope_xdr.into(),
            result_xdr: None,
            result_meta_xdr: None,
            operations: Vec::new(),
            rpc_payload: None,
        }
    }

    pub fn with_result(mut self, result_xdr: impl Into<String>) -> Self {
        self.result_xdr = Some(result_xdr.into());
        self
    }

    pub fn with_meta(mut self, result_meta_xdr: impl Into<String>) -> Self {
        self.result_meta_xdr = Some(result_meta_xdr.into());
        self
    }

    pub fn with_operations(mut self, operations: Vec<serde_json::Value>) -> Self {
        self.operations = operations;
        self
    }

    pub fn with_rpc_payload(mut self, payload: serde_json::Value) -> Self {
        self.rpc_payload = Some(payload);
        self
    }
}

/// What happened to a ledger entry within one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Removed,
}

/// Which storage tier a contract-data slot lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageClass {
    Persistent,
    Temporary,
    Instance,
}

/// One contract storage-slot transition.
///
/// `before` is present only for Updated/Removed; `after` only for
/// Created/Updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    pub action: ChangeAction,
    pub storage_class: StorageClass,
    pub contract_id: String,
    pub key: DecodedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DecodedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DecodedValue>,
}

/// Resource consumption for one invocation.
///
/// `is_actual` distinguishes measured post-execution values from
/// pre-execution budget estimates; callers must not conflate the two.
/// The flag is set opportunistically: when any measured source contributed,
/// it is true even if some individual counters fell back to the budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub cpu_instructions: u64,
    pub memory_bytes: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_entry_count: u32,
    pub write_entry_count: u32,
    /// Stroops.
    pub refundable_fee: i64,
    /// Stroops.
    pub non_refundable_fee: i64,
    /// Stroops.
    pub rent_fee: i64,
    pub is_actual: bool,
}

/// Event classification carried over from the XDR event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Contract,
    System,
    Diagnostic,
}

/// A decoded diagnostic or contract event.
///
/// Call/return markers (`fn_call`, `fn_return`) are preserved so callers
/// can reconstruct call trees; only the generic `diagnostic_event` marker
/// is dropped during the walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEventRecord {
    /// Emitting contract, when the event named one or the caller supplied
    /// fallback context.
    pub contract_id: Option<String>,
    pub event_type: EventType,
    pub in_successful_contract_call: bool,
    pub topics: Vec<DecodedValue>,
    pub data: DecodedValue,
}

/// An inferred call edge between two contracts.
///
/// Inferred from event adjacency, not true call-stack structure: when
/// sibling contracts interleave events the edge can be misattributed.
/// Treat as approximate, not authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossContractCall {
    pub from: String,
    pub to: String,
    pub function: Option<String>,
    pub success: bool,
}

/// Marker that an operation extended entry time-to-lives. The meta does not
/// say which keys were extended, so this carries a static description only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlExtension {
    pub description: String,
}

impl Default for TtlExtension {
    fn default() -> Self {
        Self {
            description: "Entry time-to-live extended for one or more ledger entries".to_string(),
        }
    }
}

/// Everything decoded for one invoke-host-function operation.
///
/// `contract_id` is never empty: when resolution exhausts every strategy it
/// holds a labeled placeholder and `contract_id_resolved` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInvocation {
    pub operation_index: usize,
    pub contract_id: String,
    pub contract_id_resolved: bool,
    pub function_name: Option<String>,
    pub arguments: Vec<DecodedValue>,
    pub resource_usage: ResourceUsage,
    pub state_changes: Vec<StateChange>,
    pub diagnostic_events: Vec<DiagnosticEventRecord>,
    pub cross_contract_calls: Vec<CrossContractCall>,
    pub ttl_extensions: Vec<TtlExtension>,
}

/// Where in the nesting a failure layer sits.
///
/// `Outer` is the outermost surfaced code: the fee-bump wrapper for bumped
/// transactions, the transaction itself otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "operation", rename_all = "snake_case")]
pub enum DiagnosisLevel {
    Outer,
    Inner,
    Operation(usize),
}

impl fmt::Display for DiagnosisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosisLevel::Outer => f.write_str("outer"),
            DiagnosisLevel::Inner => f.write_str("inner"),
            DiagnosisLevel::Operation(i) => write!(f, "operation {}", i),
        }
    }
}

/// One layer of the failure diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisLayer {
    pub level: DiagnosisLevel,
    /// Raw result-code name, e.g. `PaymentUnderfunded`.
    pub code: String,
    /// One-line human meaning; `Error: <code>` for unmapped codes.
    pub meaning: String,
    /// One-line remediation, where the code table has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Ordered failure layers: outermost wrapper first, root cause last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDiagnosis {
    pub layers: Vec<DiagnosisLayer>,
}

impl FailureDiagnosis {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}

/// The single output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionAnalysis {
    pub network: Network,
    pub successful: bool,
    pub fee_bump: bool,
    /// Stroops actually charged, from the result; zero when no result buffer
    /// was supplied.
    pub fee_charged: i64,
    pub operation_count: usize,
    /// Soroban return value, when the metadata carried one.
    pub return_value: Option<DecodedValue>,
    pub invocations: Vec<ContractInvocation>,
    pub diagnosis: FailureDiagnosis,
}

impl TransactionAnalysis {
    /// Total state changes across all invocations.
    pub fn state_change_count(&self) -> usize {
        self.invocations.iter().map(|i| i.state_changes.len()).sum()
    }

    /// Total decoded events across all invocations.
    pub fn diagnostic_event_count(&self) -> usize {
        self.invocations
            .iter()
            .map(|i| i.diagnostic_events.len())
            .sum()
    }
}
