#![allow(dead_code)]
//! Shared XDR fixture builders for integration tests.
//!
//! Everything here constructs real XDR structures and serializes them to
//! base64, so the tests exercise the same decode path production inputs
//! take.

use stellar_xdr::curr::{
    Asset, ContractDataDurability, ContractDataEntry, ContractEvent, ContractEventBody,
    ContractEventType, ContractEventV0, ContractId, DiagnosticEvent, ExtensionPoint,
    FeeBumpTransaction, FeeBumpTransactionEnvelope, FeeBumpTransactionExt,
    FeeBumpTransactionInnerTx, Hash, HostFunction, InnerTransactionResult,
    InnerTransactionResultExt, InnerTransactionResultPair, InnerTransactionResultResult,
    InvokeContractArgs, InvokeHostFunctionOp, LedgerEntry, LedgerEntryChange, LedgerEntryChanges,
    LedgerEntryData, LedgerEntryExt, Limits, Memo, MuxedAccount, Operation, OperationBody,
    OperationMeta, OperationResult, OperationResultTr, PaymentOp, PaymentResult, Preconditions,
    ScAddress, ScSymbol, ScVal, SequenceNumber, SorobanTransactionMeta, SorobanTransactionMetaExt,
    Transaction, TransactionEnvelope, TransactionExt, TransactionMeta, TransactionMetaV3,
    TransactionResult, TransactionResultExt, TransactionResultResult, TransactionV1Envelope,
    Uint256, VecM, WriteXdr,
};

use soroban_txmeta::types::address;

pub fn encode<T: WriteXdr>(value: &T) -> String {
    value.to_xdr_base64(Limits::none()).unwrap()
}

pub fn account(seed: u8) -> MuxedAccount {
    MuxedAccount::Ed25519(Uint256([seed; 32]))
}

pub fn contract_id(seed: u8) -> ContractId {
    ContractId(Hash([seed; 32]))
}

pub fn contract_address(seed: u8) -> ScAddress {
    ScAddress::Contract(contract_id(seed))
}

pub fn contract_strkey(seed: u8) -> String {
    address::contract_strkey(&[seed; 32])
}

pub fn symbol(s: &str) -> ScVal {
    ScVal::Symbol(ScSymbol(s.try_into().unwrap()))
}

fn tx(operations: Vec<Operation>) -> Transaction {
    Transaction {
        source_account: account(1),
        fee: 100,
        seq_num: SequenceNumber(7),
        cond: Preconditions::None,
        memo: Memo::None,
        operations: operations.try_into().unwrap(),
        ext: TransactionExt::V0,
    }
}

fn envelope(operations: Vec<Operation>) -> TransactionEnvelope {
    TransactionEnvelope::Tx(TransactionV1Envelope {
        tx: tx(operations),
        signatures: VecM::default(),
    })
}

fn payment_op() -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::Payment(PaymentOp {
            destination: account(2),
            asset: Asset::Native,
            amount: 10_000_000,
        }),
    }
}

/// A classic (non-Soroban) native payment envelope, base64.
pub fn payment_envelope() -> String {
    encode(&envelope(vec![payment_op()]))
}

/// An invoke-host-function envelope targeting `contract_id(seed)`, base64.
pub fn invoke_envelope(seed: u8, function: &str, args: Vec<ScVal>) -> String {
    let op = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(InvokeContractArgs {
                contract_address: contract_address(seed),
                function_name: ScSymbol(function.try_into().unwrap()),
                args: args.try_into().unwrap(),
            }),
            auth: VecM::default(),
        }),
    };
    encode(&envelope(vec![op]))
}

/// The payment envelope wrapped in a fee bump from a distinct fee source.
pub fn fee_bump_payment_envelope() -> String {
    let inner = TransactionV1Envelope {
        tx: tx(vec![payment_op()]),
        signatures: VecM::default(),
    };
    let bump = FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: account(9),
            fee: 200,
            inner_tx: FeeBumpTransactionInnerTx::Tx(inner),
            ext: FeeBumpTransactionExt::V0,
        },
        signatures: VecM::default(),
    };
    encode(&TransactionEnvelope::TxFeeBump(bump))
}

fn result(res: TransactionResultResult) -> TransactionResult {
    TransactionResult {
        fee_charged: 100,
        result: res,
        ext: TransactionResultExt::V0,
    }
}

/// A fully successful single-payment result, base64.
pub fn payment_success_result() -> String {
    let ops: VecM<OperationResult> = vec![OperationResult::OpInner(OperationResultTr::Payment(
        PaymentResult::Success,
    ))]
    .try_into()
    .unwrap();
    encode(&result(TransactionResultResult::TxSuccess(ops)))
}

/// A fee-bump result whose inner transaction failed with an underfunded
/// payment, base64.
pub fn fee_bump_underfunded_result() -> String {
    let ops: VecM<OperationResult> = vec![OperationResult::OpInner(OperationResultTr::Payment(
        PaymentResult::Underfunded,
    ))]
    .try_into()
    .unwrap();
    let inner = InnerTransactionResultPair {
        transaction_hash: Hash([0u8; 32]),
        result: InnerTransactionResult {
            fee_charged: 100,
            result: InnerTransactionResultResult::TxFailed(ops),
            ext: InnerTransactionResultExt::V0,
        },
    };
    encode(&result(TransactionResultResult::TxFeeBumpInnerFailed(inner)))
}

pub fn event(seed: u8, topic: &str, data: ScVal) -> ContractEvent {
    ContractEvent {
        ext: ExtensionPoint::V0,
        contract_id: Some(contract_id(seed)),
        type_: ContractEventType::Contract,
        body: ContractEventBody::V0(ContractEventV0 {
            topics: vec![symbol(topic)].try_into().unwrap(),
            data,
        }),
    }
}

pub fn diagnostic(event: ContractEvent, in_successful_contract_call: bool) -> DiagnosticEvent {
    DiagnosticEvent {
        in_successful_contract_call,
        event,
    }
}

pub fn contract_data_entry(seed: u8, key: ScVal, val: ScVal) -> LedgerEntry {
    LedgerEntry {
        last_modified_ledger_seq: 1,
        data: LedgerEntryData::ContractData(ContractDataEntry {
            ext: ExtensionPoint::V0,
            contract: contract_address(seed),
            key,
            durability: ContractDataDurability::Persistent,
            val,
        }),
        ext: LedgerEntryExt::V0,
    }
}

/// A V3 metadata blob with one operation's entry changes plus the given
/// soroban events and return value, base64.
pub fn meta_v3(
    changes: Vec<LedgerEntryChange>,
    events: Vec<ContractEvent>,
    return_value: ScVal,
) -> String {
    let meta = TransactionMeta::V3(TransactionMetaV3 {
        ext: ExtensionPoint::V0,
        tx_changes_before: LedgerEntryChanges(VecM::default()),
        operations: vec![OperationMeta {
            changes: LedgerEntryChanges(changes.try_into().unwrap()),
        }]
        .try_into()
        .unwrap(),
        tx_changes_after: LedgerEntryChanges(VecM::default()),
        soroban_meta: Some(SorobanTransactionMeta {
            ext: SorobanTransactionMetaExt::V0,
            events: events.try_into().unwrap(),
            return_value,
            diagnostic_events: VecM::default(),
        }),
    });
    encode(&meta)
}
