//! Aggregator: one raw transaction record in, one analysis record out.
//!
//! Pure assembly over the decoder modules; performs no network or disk I/O.
//! A missing result or meta buffer degrades the output (empty diagnosis,
//! budget-estimate resources), but a buffer that is present and unparseable
//! is an error: silently analyzing half a transaction misleads.

use anyhow::{Context, Result};
use stellar_xdr::curr::{
    FeeBumpTransactionInnerTx, Limits, Operation, OperationBody, ReadXdr,
    SorobanTransactionData, TransactionEnvelope, TransactionExt, TransactionMeta,
    TransactionResult,
};
use tracing::debug;

use soroban_txmeta_types::{
    ContractInvocation, FailureDiagnosis, Network, RawTransactionRecord, TransactionAnalysis,
};

use crate::classifier::{classify_failure, result_successful};
use crate::meta::walk_meta;
use crate::resolver::{resolve_contract, resolve_function, ResolveContext, ResolvedContract, ResolvedFunction};
use crate::resources::extract_resource_usage;

/// Envelope fields shared by all three envelope generations, with fee-bump
/// wrappers peeled to the inner transaction.
struct FlatEnvelope {
    operations: Vec<Operation>,
    fee_bump: bool,
    soroban_data: Option<SorobanTransactionData>,
}

fn flatten_envelope(envelope: &TransactionEnvelope) -> FlatEnvelope {
    match envelope {
        TransactionEnvelope::TxV0(e) => FlatEnvelope {
            operations: e.tx.operations.to_vec(),
            fee_bump: false,
            // V0 pre-dates Soroban and cannot carry a resource budget.
            soroban_data: None,
        },
        TransactionEnvelope::Tx(e) => FlatEnvelope {
            operations: e.tx.operations.to_vec(),
            fee_bump: false,
            soroban_data: budget_of(&e.tx.ext),
        },
        TransactionEnvelope::TxFeeBump(e) => {
            let inner = match &e.tx.inner_tx {
                FeeBumpTransactionInnerTx::Tx(inner) => inner,
            };
            FlatEnvelope {
                operations: inner.tx.operations.to_vec(),
                fee_bump: true,
                soroban_data: budget_of(&inner.tx.ext),
            }
        }
    }
}

fn budget_of(ext: &TransactionExt) -> Option<SorobanTransactionData> {
    match ext {
        TransactionExt::V1(data) => Some(data.clone()),
        TransactionExt::V0 => None,
    }
}

/// Analyze one transaction.
///
/// The envelope is required; result and meta buffers are optional and their
/// absence narrows the output rather than failing it. With no result buffer
/// the transaction is presumed successful and `fee_charged` is zero.
pub fn analyze_transaction(
    record: &RawTransactionRecord,
    network: Network,
) -> Result<TransactionAnalysis> {
    let envelope = TransactionEnvelope::from_xdr_base64(&record.envelope_xdr, Limits::none())
        .context("decoding transaction envelope XDR")?;
    let result = record
        .result_xdr
        .as_deref()
        .map(|xdr| {
            TransactionResult::from_xdr_base64(xdr, Limits::none())
                .context("decoding transaction result XDR")
        })
        .transpose()?;
    let meta = record
        .result_meta_xdr
        .as_deref()
        .map(|xdr| {
            TransactionMeta::from_xdr_base64(xdr, Limits::none())
                .context("decoding transaction meta XDR")
        })
        .transpose()?;

    let flat = flatten_envelope(&envelope);
    let successful = result.as_ref().map_or(true, result_successful);
    let fee_charged = result.as_ref().map_or(0, |r| r.fee_charged);

    // Resolve invocation targets before the meta walk: the first resolved
    // contract id seeds event attribution for events that omit their
    // emitter.
    let mut seeds: Vec<(usize, ResolvedContract, ResolvedFunction)> = Vec::new();
    for (index, op) in flat.operations.iter().enumerate() {
        if !matches!(op.body, OperationBody::InvokeHostFunction(_)) {
            continue;
        }
        let ctx = ResolveContext {
            operation: record.operations.get(index),
            rpc_payload: record.rpc_payload.as_ref(),
            envelope_ops: &flat.operations,
            op_index: index,
            network,
        };
        let contract = resolve_contract(&ctx);
        let function = resolve_function(&ctx);
        seeds.push((index, contract, function));
    }
    let fallback = seeds
        .iter()
        .find(|(_, contract, _)| contract.resolved)
        .map(|(_, contract, _)| contract.contract_id.clone());

    let mut meta_analysis = meta
        .as_ref()
        .map(|m| walk_meta(m, successful, fallback.as_deref()))
        .unwrap_or_default();

    let mut invocations: Vec<ContractInvocation> = Vec::with_capacity(seeds.len());
    for (index, contract, function) in seeds {
        let op_meta = meta_analysis
            .operations
            .get_mut(index)
            .map(std::mem::take)
            .unwrap_or_default();
        // Measured fee totals are transaction-scoped; attach them to the
        // first invocation to avoid double counting. Soroban transactions
        // carry exactly one operation, so the split is theoretical.
        let fees = if invocations.is_empty() {
            meta_analysis.actual_fees
        } else {
            None
        };
        let resource_usage = extract_resource_usage(
            flat.soroban_data.as_ref(),
            fees,
            record.rpc_payload.as_ref(),
        );
        invocations.push(ContractInvocation {
            operation_index: index,
            contract_id: contract.contract_id,
            contract_id_resolved: contract.resolved,
            function_name: function.name,
            arguments: function.arguments,
            resource_usage,
            state_changes: op_meta.state_changes,
            diagnostic_events: op_meta.diagnostic_events,
            cross_contract_calls: op_meta.cross_contract_calls,
            ttl_extensions: op_meta.ttl_extensions,
        });
    }

    let diagnosis = result
        .as_ref()
        .map(|r| classify_failure(r, flat.fee_bump))
        .unwrap_or_else(FailureDiagnosis::default);

    debug!(
        successful,
        fee_bump = flat.fee_bump,
        invocations = invocations.len(),
        layers = diagnosis.len(),
        "transaction analyzed"
    );

    Ok(TransactionAnalysis {
        network,
        successful,
        fee_bump: flat.fee_bump,
        fee_charged,
        operation_count: flat.operations.len(),
        return_value: meta_analysis.return_value.take(),
        invocations,
        diagnosis,
    })
}
