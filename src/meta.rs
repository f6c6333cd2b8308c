//! Meta Walker: execution metadata to state changes, events, and call edges.
//!
//! The metadata union has grown several generations; V3 (the first Soroban
//! generation) and V4 (unified events) are supported and carry the same
//! information at different nesting paths. Older generations pre-date
//! Soroban and yield an empty result set rather than an error.

use stellar_xdr::curr::{
    ContractEvent, ContractEventBody, ContractEventType, LedgerEntryChange, LedgerEntryChanges,
    TransactionMeta, TransactionMetaV3, TransactionMetaV4,
};
use tracing::{debug, warn};

use soroban_txmeta_types::{
    ChangeAction, CrossContractCall, DecodedValue, DiagnosticEventRecord, EventType, StateChange,
    TtlExtension,
};

use crate::entry::{decode_entry_key, decode_ledger_entry, is_ttl_entry, is_ttl_key, DecodedEntry};
use crate::scval::{contract_id_strkey, decode_sc_val};

/// Post-execution fee totals from the soroban meta extension. Stroops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SorobanFeeTotals {
    pub non_refundable: i64,
    pub refundable: i64,
    pub rent: i64,
}

/// Everything the walker extracted for one operation index.
#[derive(Debug, Clone, Default)]
pub struct OperationMetaAnalysis {
    pub state_changes: Vec<StateChange>,
    pub diagnostic_events: Vec<DiagnosticEventRecord>,
    pub cross_contract_calls: Vec<CrossContractCall>,
    pub ttl_extensions: Vec<TtlExtension>,
}

/// The walker's whole-transaction output.
#[derive(Debug, Clone, Default)]
pub struct MetaAnalysis {
    pub operations: Vec<OperationMetaAnalysis>,
    pub return_value: Option<DecodedValue>,
    pub actual_fees: Option<SorobanFeeTotals>,
}

impl MetaAnalysis {
    pub fn operation(&self, index: usize) -> Option<&OperationMetaAnalysis> {
        self.operations.get(index)
    }
}

/// Walk one transaction's metadata.
///
/// `fallback_contract_id` fills in the emitting contract for events that do
/// not name one themselves (host-emitted diagnostics frequently omit it).
pub fn walk_meta(
    meta: &TransactionMeta,
    tx_successful: bool,
    fallback_contract_id: Option<&str>,
) -> MetaAnalysis {
    match meta {
        TransactionMeta::V3(v3) => walk_v3(v3, fallback_contract_id),
        TransactionMeta::V4(v4) => walk_v4(v4, tx_successful, fallback_contract_id),
        other => {
            warn!(generation = other.name(), "unsupported metadata generation");
            MetaAnalysis::default()
        }
    }
}

fn walk_v3(meta: &TransactionMetaV3, fallback: Option<&str>) -> MetaAnalysis {
    let mut operations: Vec<OperationMetaAnalysis> = meta
        .operations
        .iter()
        .map(|op| walk_operation_changes(&op.changes))
        .collect();
    if operations.is_empty() {
        operations.push(OperationMetaAnalysis::default());
    }

    let mut analysis = MetaAnalysis {
        operations,
        return_value: None,
        actual_fees: None,
    };

    if let Some(soroban) = &meta.soroban_meta {
        analysis.return_value = Some(decode_sc_val(&soroban.return_value));
        analysis.actual_fees = fee_totals(&soroban.ext);

        // A Soroban transaction carries exactly one operation; its event
        // streams live at the transaction level and attach to index 0.
        let mut events: Vec<DiagnosticEventRecord> = Vec::new();
        for event in soroban.events.iter() {
            if let Some(record) = decode_event(event, true, fallback) {
                events.push(record);
            }
        }
        for diag in soroban.diagnostic_events.iter() {
            if let Some(record) =
                decode_event(&diag.event, diag.in_successful_contract_call, fallback)
            {
                events.push(record);
            }
        }
        attach_events(&mut analysis.operations[0], events);
    }

    analysis
}

fn walk_v4(meta: &TransactionMetaV4, tx_successful: bool, fallback: Option<&str>) -> MetaAnalysis {
    let mut operations: Vec<OperationMetaAnalysis> = Vec::with_capacity(meta.operations.len());
    for op in meta.operations.iter() {
        let mut op_analysis = walk_operation_changes(&op.changes);
        let events: Vec<DiagnosticEventRecord> = op
            .events
            .iter()
            .filter_map(|e| decode_event(e, tx_successful, fallback))
            .collect();
        attach_events(&mut op_analysis, events);
        operations.push(op_analysis);
    }
    if operations.is_empty() {
        operations.push(OperationMetaAnalysis::default());
    }

    let mut analysis = MetaAnalysis {
        operations,
        return_value: None,
        actual_fees: None,
    };

    if let Some(soroban) = &meta.soroban_meta {
        analysis.return_value = soroban.return_value.as_ref().map(decode_sc_val);
        analysis.actual_fees = fee_totals(&soroban.ext);
    }

    // Transaction-level diagnostics attach to the first operation, matching
    // the single-operation shape of Soroban transactions.
    let diagnostics: Vec<DiagnosticEventRecord> = meta
        .diagnostic_events
        .iter()
        .filter_map(|d| decode_event(&d.event, d.in_successful_contract_call, fallback))
        .collect();
    attach_events(&mut analysis.operations[0], diagnostics);

    analysis
}

fn fee_totals(ext: &stellar_xdr::curr::SorobanTransactionMetaExt) -> Option<SorobanFeeTotals> {
    match ext {
        stellar_xdr::curr::SorobanTransactionMetaExt::V0 => None,
        stellar_xdr::curr::SorobanTransactionMetaExt::V1(v1) => Some(SorobanFeeTotals {
            non_refundable: v1.total_non_refundable_resource_fee_charged,
            refundable: v1.total_refundable_resource_fee_charged,
            rent: v1.rent_fee_charged,
        }),
    }
}

fn attach_events(op: &mut OperationMetaAnalysis, events: Vec<DiagnosticEventRecord>) {
    if events.is_empty() {
        return;
    }
    op.diagnostic_events.extend(events);
    op.cross_contract_calls = infer_cross_calls(&op.diagnostic_events);
}

/// Walk one operation's ledger-entry change list.
///
/// A `State` change is the before-image of the `Updated`/`Removed` change
/// that follows it; the walker remembers the latest one and consumes it when
/// the transition arrives.
fn walk_operation_changes(changes: &LedgerEntryChanges) -> OperationMetaAnalysis {
    let mut analysis = OperationMetaAnalysis::default();
    let mut saw_ttl = false;
    let mut last_state: Option<DecodedEntry> = None;

    for change in changes.0.iter() {
        match change {
            LedgerEntryChange::State(entry) => {
                if is_ttl_entry(&entry.data) {
                    last_state = None;
                } else {
                    last_state = decode_ledger_entry(entry);
                }
            }
            LedgerEntryChange::Created(entry) | LedgerEntryChange::Restored(entry) => {
                if is_ttl_entry(&entry.data) {
                    saw_ttl = true;
                    continue;
                }
                if let Some(DecodedEntry::ContractData {
                    contract_id,
                    storage_class,
                    key,
                    value,
                }) = decode_ledger_entry(entry)
                {
                    analysis.state_changes.push(StateChange {
                        action: ChangeAction::Created,
                        storage_class,
                        contract_id,
                        key,
                        before: None,
                        after: Some(value),
                    });
                }
            }
            LedgerEntryChange::Updated(entry) => {
                if is_ttl_entry(&entry.data) {
                    saw_ttl = true;
                    last_state = None;
                    continue;
                }
                let before = take_state_value(&mut last_state);
                if let Some(DecodedEntry::ContractData {
                    contract_id,
                    storage_class,
                    key,
                    value,
                }) = decode_ledger_entry(entry)
                {
                    analysis.state_changes.push(StateChange {
                        action: ChangeAction::Updated,
                        storage_class,
                        contract_id,
                        key,
                        before,
                        after: Some(value),
                    });
                }
            }
            LedgerEntryChange::Removed(key) => {
                if is_ttl_key(key) {
                    saw_ttl = true;
                    last_state = None;
                    continue;
                }
                let before = take_state_value(&mut last_state);
                if let Some(decoded) = decode_entry_key(key) {
                    analysis.state_changes.push(StateChange {
                        action: ChangeAction::Removed,
                        storage_class: decoded.storage_class,
                        contract_id: decoded.contract_id,
                        key: decoded.key,
                        before,
                        after: None,
                    });
                }
            }
        }
    }

    if saw_ttl {
        // The meta does not say which keys were extended; one marker per
        // operation regardless of how many entries were touched.
        analysis.ttl_extensions.push(TtlExtension::default());
    }
    analysis
}

fn take_state_value(last_state: &mut Option<DecodedEntry>) -> Option<DecodedValue> {
    match last_state.take() {
        Some(DecodedEntry::ContractData { value, .. }) => Some(value),
        _ => None,
    }
}

/// Decode one event. Returns `None` only for the generic `diagnostic_event`
/// marker; call/return markers and contract/system events all survive, since
/// callers reconstruct call trees from them.
fn decode_event(
    event: &ContractEvent,
    in_successful_contract_call: bool,
    fallback: Option<&str>,
) -> Option<DiagnosticEventRecord> {
    let ContractEventBody::V0(body) = &event.body;
    let topics: Vec<DecodedValue> = body.topics.iter().map(decode_sc_val).collect();

    if topics.first().and_then(DecodedValue::as_symbol) == Some("diagnostic_event") {
        debug!("dropping generic diagnostic_event marker");
        return None;
    }

    let contract_id = event
        .contract_id
        .as_ref()
        .map(contract_id_strkey)
        .or_else(|| fallback.map(str::to_string));

    Some(DiagnosticEventRecord {
        contract_id,
        event_type: match event.type_ {
            ContractEventType::System => EventType::System,
            ContractEventType::Contract => EventType::Contract,
            ContractEventType::Diagnostic => EventType::Diagnostic,
        },
        in_successful_contract_call,
        topics,
        data: decode_sc_val(&body.data),
    })
}

/// Infer cross-contract call edges from event adjacency.
///
/// Two consecutive events from two different known contracts yield one edge.
/// This is a heuristic, not call-stack truth: interleaved sibling calls can
/// misattribute an edge.
fn infer_cross_calls(events: &[DiagnosticEventRecord]) -> Vec<CrossContractCall> {
    let mut calls = Vec::new();
    for pair in events.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if let (Some(from), Some(to)) = (prev.contract_id.as_deref(), cur.contract_id.as_deref()) {
            if from != to {
                let function = cur.topics.first().map(|t| match t.as_symbol() {
                    Some(s) => s.to_string(),
                    None => t.display_truncated(),
                });
                calls.push(CrossContractCall {
                    from: from.to_string(),
                    to: to.to_string(),
                    function,
                    success: cur.in_successful_contract_call,
                });
            }
        }
    }
    calls
}
