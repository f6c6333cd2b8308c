//! Error Classifier: result unions to a layered failure diagnosis.
//!
//! The diagnosis is ordered outermost-first: the fee-bump wrapper (when
//! present), then the inner transaction, then each failed operation by
//! index. Classification never fails; a code the table does not know still
//! produces a layer with a raw `Error: <code>` meaning.

use stellar_xdr::curr::{
    InnerTransactionResultResult, OperationResult, OperationResultTr, TransactionResult,
    TransactionResultResult,
};
use tracing::debug;

use soroban_txmeta_types::{DiagnosisLayer, DiagnosisLevel, FailureDiagnosis};

use crate::codes;

/// True when the transaction applied successfully at the top level.
pub fn result_successful(result: &TransactionResult) -> bool {
    matches!(
        result.result,
        TransactionResultResult::TxSuccess(_) | TransactionResultResult::TxFeeBumpInnerSuccess(_)
    )
}

/// Build the layered diagnosis for one transaction result.
///
/// `fee_bump` is the envelope's view; the result union carries its own
/// wrapper discriminant, which is authoritative.
pub fn classify_failure(result: &TransactionResult, fee_bump: bool) -> FailureDiagnosis {
    let mut layers: Vec<DiagnosisLayer> = Vec::new();

    match &result.result {
        // Wrapper success is terminal: the inner transaction applied.
        TransactionResultResult::TxFeeBumpInnerSuccess(_) => {}
        TransactionResultResult::TxFeeBumpInnerFailed(pair) => {
            push_layer(&mut layers, DiagnosisLevel::Outer, "TxFeeBumpInnerFailed");
            match &pair.result.result {
                InnerTransactionResultResult::TxSuccess(_) => {}
                InnerTransactionResultResult::TxFailed(ops) => {
                    push_layer(&mut layers, DiagnosisLevel::Inner, "TxFailed");
                    classify_operations(&mut layers, ops.as_slice());
                }
                other => push_layer(&mut layers, DiagnosisLevel::Inner, other.name()),
            }
        }
        TransactionResultResult::TxSuccess(ops) => {
            // All operations succeeded; the scan is a no-op but keeps the
            // invariant that every non-success operation gets a layer.
            classify_operations(&mut layers, ops.as_slice());
        }
        TransactionResultResult::TxFailed(ops) => {
            push_layer(&mut layers, DiagnosisLevel::Outer, "TxFailed");
            classify_operations(&mut layers, ops.as_slice());
        }
        other => {
            if fee_bump {
                debug!(code = other.name(), "fee-bump envelope with unwrapped result code");
            }
            push_layer(&mut layers, DiagnosisLevel::Outer, other.name());
        }
    }

    FailureDiagnosis { layers }
}

fn classify_operations(layers: &mut Vec<DiagnosisLayer>, ops: &[OperationResult]) {
    for (index, op) in ops.iter().enumerate() {
        match op {
            OperationResult::OpInner(tr) => {
                if let Some(code) = op_result_code(tr) {
                    push_layer(layers, DiagnosisLevel::Operation(index), &code);
                }
            }
            // The operation failed at the envelope level and never reached
            // its type-specific result arm.
            other => push_layer(layers, DiagnosisLevel::Operation(index), other.name()),
        }
    }
}

/// The type-specific result code for a failed operation; `None` when the
/// operation succeeded. The closed match over every operation-result arm
/// replaces the probe-each-accessor pattern of loosely-typed decoders.
///
/// Variant names inside the per-type result enums drop the operation
/// prefix (`PaymentResult::Underfunded`); the canonical code strings carry
/// it, so each arm re-applies its prefix before the table lookup.
fn op_result_code(tr: &OperationResultTr) -> Option<String> {
    let (prefix, name) = match tr {
        OperationResultTr::CreateAccount(r) => ("CreateAccount", r.name()),
        OperationResultTr::Payment(r) => ("Payment", r.name()),
        OperationResultTr::PathPaymentStrictReceive(r) => {
            ("PathPaymentStrictReceive", r.name())
        }
        OperationResultTr::ManageSellOffer(r) => ("ManageSellOffer", r.name()),
        // Passive offers share the sell-offer result type and code space.
        OperationResultTr::CreatePassiveSellOffer(r) => ("ManageSellOffer", r.name()),
        OperationResultTr::SetOptions(r) => ("SetOptions", r.name()),
        OperationResultTr::ChangeTrust(r) => ("ChangeTrust", r.name()),
        OperationResultTr::AllowTrust(r) => ("AllowTrust", r.name()),
        OperationResultTr::AccountMerge(r) => ("AccountMerge", r.name()),
        OperationResultTr::Inflation(r) => ("Inflation", r.name()),
        OperationResultTr::ManageData(r) => ("ManageData", r.name()),
        OperationResultTr::BumpSequence(r) => ("BumpSequence", r.name()),
        OperationResultTr::ManageBuyOffer(r) => ("ManageBuyOffer", r.name()),
        OperationResultTr::PathPaymentStrictSend(r) => ("PathPaymentStrictSend", r.name()),
        OperationResultTr::CreateClaimableBalance(r) => ("CreateClaimableBalance", r.name()),
        OperationResultTr::ClaimClaimableBalance(r) => ("ClaimClaimableBalance", r.name()),
        OperationResultTr::BeginSponsoringFutureReserves(r) => {
            ("BeginSponsoringFutureReserves", r.name())
        }
        OperationResultTr::EndSponsoringFutureReserves(r) => {
            ("EndSponsoringFutureReserves", r.name())
        }
        OperationResultTr::RevokeSponsorship(r) => ("RevokeSponsorship", r.name()),
        OperationResultTr::Clawback(r) => ("Clawback", r.name()),
        OperationResultTr::ClawbackClaimableBalance(r) => {
            ("ClawbackClaimableBalance", r.name())
        }
        OperationResultTr::SetTrustLineFlags(r) => ("SetTrustLineFlags", r.name()),
        OperationResultTr::LiquidityPoolDeposit(r) => ("LiquidityPoolDeposit", r.name()),
        OperationResultTr::LiquidityPoolWithdraw(r) => ("LiquidityPoolWithdraw", r.name()),
        OperationResultTr::InvokeHostFunction(r) => ("InvokeHostFunction", r.name()),
        OperationResultTr::ExtendFootprintTtl(r) => ("ExtendFootprintTtl", r.name()),
        OperationResultTr::RestoreFootprint(r) => ("RestoreFootprint", r.name()),
    };
    if name == "Success" {
        None
    } else {
        Some(format!("{}{}", prefix, name))
    }
}

fn push_layer(layers: &mut Vec<DiagnosisLayer>, level: DiagnosisLevel, code: &str) {
    layers.push(DiagnosisLayer {
        level,
        code: code.to_string(),
        meaning: codes::describe(code),
        explanation: codes::remediation(code),
    });
}
