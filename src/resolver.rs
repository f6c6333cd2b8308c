//! Contract Resolver: contract id, function name, and arguments.
//!
//! Horizon operation records are inconsistent across deployment generations
//! and network tiers: the same invocation can carry its target in a direct
//! field, inside a parameters array, as an opaque host-function blob, only
//! in the RPC payload, or nowhere short of the envelope itself. Resolution
//! is therefore an ordered list of independent strategies folded in
//! sequence; each may silently find nothing, and the first hit wins.

use serde_json::Value;
use stellar_xdr::curr::{
    HostFunction, InvokeContractArgs, Limits, Operation, OperationBody, ReadXdr, ScVal,
};
use tracing::{debug, warn};

use soroban_txmeta_types::address::is_contract_strkey;
use soroban_txmeta_types::{DecodedValue, Network};

use crate::scval::{decode_sc_val, normalize_index_map, sc_address_contract_strkey};

/// Direct-field candidates, in probe order.
const CONTRACT_ID_FIELDS: &[&str] = &[
    "contract_id",
    "contractId",
    "contract_address",
    "contractAddress",
    "contract",
];

/// Direct function-name candidates.
const FUNCTION_NAME_FIELDS: &[&str] = &["function_name", "functionName"];

/// Inputs available to every resolution strategy.
pub struct ResolveContext<'a> {
    /// Horizon operation record for this index, when the caller has one.
    pub operation: Option<&'a Value>,
    /// Optional soroban-rpc lookup payload.
    pub rpc_payload: Option<&'a Value>,
    /// Operations decoded from the envelope (inner transaction for
    /// fee-bumps).
    pub envelope_ops: &'a [Operation],
    pub op_index: usize,
    pub network: Network,
}

/// Outcome of contract-id resolution. `resolved == false` means every
/// strategy reported "not found" and `contract_id` holds the labeled
/// placeholder; it never means an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContract {
    pub contract_id: String,
    pub resolved: bool,
    pub strategy: Option<&'static str>,
}

/// Function name and decoded arguments for an invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFunction {
    pub name: Option<String>,
    pub arguments: Vec<DecodedValue>,
}

type ContractStrategy = fn(&ResolveContext) -> Option<String>;

/// Ordered, independently-testable strategy chain. The envelope decode is
/// the most reliable and the most expensive, so it runs last.
const CONTRACT_STRATEGIES: &[(&str, ContractStrategy)] = &[
    ("direct_field", direct_field),
    ("parameters_address", parameters_address),
    ("host_function_field", host_function_field),
    ("rpc_payload", rpc_payload_field),
    ("envelope", envelope_target),
];

pub fn resolve_contract(ctx: &ResolveContext) -> ResolvedContract {
    for (name, strategy) in CONTRACT_STRATEGIES {
        if let Some(contract_id) = strategy(ctx) {
            debug!(strategy = name, contract_id = %contract_id, "contract id resolved");
            return ResolvedContract {
                contract_id,
                resolved: true,
                strategy: Some(name),
            };
        }
    }
    warn!(
        op_index = ctx.op_index,
        network = ctx.network.label(),
        "contract id resolution exhausted every strategy"
    );
    ResolvedContract {
        contract_id: format!(
            "unresolved-contract(op={}, network={})",
            ctx.op_index,
            ctx.network.label()
        ),
        resolved: false,
        strategy: None,
    }
}

/// Resolve function name and arguments. Shorter chain than the contract id:
/// direct field, then host-function XDR, then the raw parameters array.
/// A later strategy fills a slot only while it is still empty.
pub fn resolve_function(ctx: &ResolveContext) -> ResolvedFunction {
    let mut resolved = ResolvedFunction::default();

    if let Some(op) = ctx.operation {
        for field in FUNCTION_NAME_FIELDS {
            if let Some(name) = op.get(*field).and_then(Value::as_str) {
                if !name.is_empty() {
                    resolved.name = Some(name.to_string());
                    break;
                }
            }
        }
    }

    if let Some(invoke) = invoke_args(ctx) {
        if resolved.name.is_none() {
            resolved.name = Some(invoke.function_name.0.to_utf8_string_lossy());
        }
        if resolved.arguments.is_empty() {
            resolved.arguments = invoke.args.iter().map(decode_sc_val).collect();
        }
    }

    if resolved.arguments.is_empty() {
        if let Some(decoded) = decode_parameters(ctx) {
            // Horizon serializes the full invocation: target address first,
            // function symbol second, then the call arguments.
            let looks_like_invocation = decoded.len() >= 2
                && matches!(decoded[0], DecodedValue::Address(_))
                && matches!(decoded[1], DecodedValue::Symbol(_));
            if looks_like_invocation {
                if resolved.name.is_none() {
                    resolved.name = decoded[1].as_symbol().map(str::to_string);
                }
                resolved.arguments = decoded[2..].to_vec();
            } else {
                resolved.arguments = decoded;
            }
        }
    }

    resolved
}

fn direct_field(ctx: &ResolveContext) -> Option<String> {
    let op = ctx.operation?;
    for field in CONTRACT_ID_FIELDS {
        if let Some(candidate) = op.get(*field).and_then(Value::as_str) {
            if is_contract_strkey(candidate) {
                return Some(candidate.to_string());
            }
        }
    }
    None
}

fn parameters_address(ctx: &ResolveContext) -> Option<String> {
    let params = ctx.operation?.get("parameters")?.as_array()?;
    for param in params {
        // Only Address-tagged entries participate. An entry explicitly
        // tagged Bytes is never reinterpreted as an address, even when its
        // payload is exactly 32 bytes.
        let tag = param.get("type").and_then(Value::as_str).unwrap_or("");
        if !tag.eq_ignore_ascii_case("address") {
            continue;
        }
        if let Some(ScVal::Address(addr)) = parameter_sc_val(param) {
            if let Some(contract_id) = sc_address_contract_strkey(&addr) {
                return Some(contract_id);
            }
        }
    }
    None
}

fn host_function_field(ctx: &ResolveContext) -> Option<String> {
    let op = ctx.operation?;
    for field in ["host_function", "hostFunction", "function"] {
        if let Some(blob) = op.get(field).and_then(Value::as_str) {
            if let Ok(HostFunction::InvokeContract(args)) =
                HostFunction::from_xdr_base64(blob, Limits::none())
            {
                return sc_address_contract_strkey(&args.contract_address);
            }
        }
    }
    None
}

fn rpc_payload_field(ctx: &ResolveContext) -> Option<String> {
    let payload = ctx.rpc_payload?;
    let per_op = payload
        .get("results")
        .and_then(|r| r.get(ctx.op_index))
        .unwrap_or(payload);
    for field in CONTRACT_ID_FIELDS {
        if let Some(candidate) = per_op.get(*field).and_then(Value::as_str) {
            if is_contract_strkey(candidate) {
                return Some(candidate.to_string());
            }
        }
    }
    None
}

fn envelope_target(ctx: &ResolveContext) -> Option<String> {
    let invoke = envelope_invoke_args(ctx)?;
    sc_address_contract_strkey(&invoke.contract_address)
}

/// Invoke-contract arguments from either the operation's host-function blob
/// or the envelope, whichever is available first.
fn invoke_args(ctx: &ResolveContext) -> Option<InvokeContractArgs> {
    if let Some(op) = ctx.operation {
        for field in ["host_function", "hostFunction", "function"] {
            if let Some(blob) = op.get(field).and_then(Value::as_str) {
                if let Ok(HostFunction::InvokeContract(args)) =
                    HostFunction::from_xdr_base64(blob, Limits::none())
                {
                    return Some(args);
                }
            }
        }
    }
    envelope_invoke_args(ctx)
}

fn envelope_invoke_args(ctx: &ResolveContext) -> Option<InvokeContractArgs> {
    let op = ctx.envelope_ops.get(ctx.op_index)?;
    match &op.body {
        OperationBody::InvokeHostFunction(invoke) => match &invoke.host_function {
            HostFunction::InvokeContract(args) => Some(args.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Decode every entry of the Horizon `parameters` array. Index-mapped byte
/// buffers are normalized back to raw bytes before any decode heuristic.
fn decode_parameters(ctx: &ResolveContext) -> Option<Vec<DecodedValue>> {
    let params = ctx.operation?.get("parameters")?.as_array()?;
    if params.is_empty() {
        return None;
    }
    let decoded: Vec<DecodedValue> = params.iter().map(decode_parameter).collect();
    Some(decoded)
}

fn decode_parameter(param: &Value) -> DecodedValue {
    let tag = param.get("type").and_then(Value::as_str).unwrap_or("");
    let bytes_tagged = tag.eq_ignore_ascii_case("bytes");
    match parameter_sc_val(param) {
        Some(ScVal::Bytes(b)) => DecodedValue::Bytes(b.0.to_vec()),
        Some(val) if !bytes_tagged => decode_sc_val(&val),
        // The explicit Bytes tag is authoritative: even a payload that
        // parses as something richer stays raw bytes.
        _ => match parameter_raw_bytes(param) {
            Some(bytes) => DecodedValue::Bytes(bytes),
            None => DecodedValue::Unknown {
                tag: format!("parameter:{}", tag),
            },
        },
    }
}

/// The parameter value as an `ScVal`, from base64 or an index-mapped buffer.
fn parameter_sc_val(param: &Value) -> Option<ScVal> {
    let value = param.get("value")?;
    if let Some(blob) = value.as_str() {
        return ScVal::from_xdr_base64(blob, Limits::none()).ok();
    }
    let bytes = normalize_index_map(value)?;
    ScVal::from_xdr(&bytes, Limits::none()).ok()
}

fn parameter_raw_bytes(param: &Value) -> Option<Vec<u8>> {
    let value = param.get("value")?;
    if let Some(blob) = value.as_str() {
        return soroban_txmeta_types::encoding::parse_b64(blob, "parameter").ok();
    }
    normalize_index_map(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stellar_xdr::curr::{
        ContractId, Hash, InvokeHostFunctionOp, ScAddress, ScSymbol, VecM, WriteXdr,
    };

    use soroban_txmeta_types::address::contract_strkey;

    fn contract_addr(byte: u8) -> ScAddress {
        ScAddress::Contract(ContractId(Hash([byte; 32])))
    }

    fn invoke_op(byte: u8, function: &str, args: Vec<ScVal>) -> Operation {
        Operation {
            source_account: None,
            body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                host_function: HostFunction::InvokeContract(InvokeContractArgs {
                    contract_address: contract_addr(byte),
                    function_name: ScSymbol(function.try_into().unwrap()),
                    args: args.try_into().unwrap(),
                }),
                auth: VecM::default(),
            }),
        }
    }

    fn ctx<'a>(
        operation: Option<&'a Value>,
        rpc: Option<&'a Value>,
        ops: &'a [Operation],
    ) -> ResolveContext<'a> {
        ResolveContext {
            operation,
            rpc_payload: rpc,
            envelope_ops: ops,
            op_index: 0,
            network: Network::Testnet,
        }
    }

    #[test]
    fn test_direct_field_wins_first() {
        let key = contract_strkey(&[1u8; 32]);
        let op = json!({"contract_id": key});
        let ops = [invoke_op(2, "other", vec![])];
        let resolved = resolve_contract(&ctx(Some(&op), None, &ops));
        assert!(resolved.resolved);
        assert_eq!(resolved.strategy, Some("direct_field"));
        // The envelope names a different contract; the direct field wins.
        assert_eq!(resolved.contract_id, key);
    }

    #[test]
    fn test_direct_field_rejects_invalid_strkey() {
        let op = json!({"contract_id": "not-a-strkey"});
        let resolved = resolve_contract(&ctx(Some(&op), None, &[]));
        assert!(!resolved.resolved);
    }

    #[test]
    fn test_parameters_address_strategy() {
        let addr_b64 = ScVal::Address(contract_addr(3))
            .to_xdr_base64(Limits::none())
            .unwrap();
        let op = json!({"parameters": [
            {"type": "Sym", "value": ScVal::Symbol(ScSymbol("f".try_into().unwrap())).to_xdr_base64(Limits::none()).unwrap()},
            {"type": "Address", "value": addr_b64},
        ]});
        let resolved = resolve_contract(&ctx(Some(&op), None, &[]));
        assert_eq!(resolved.strategy, Some("parameters_address"));
        assert_eq!(resolved.contract_id, contract_strkey(&[3u8; 32]));
    }

    #[test]
    fn test_bytes_tagged_parameter_is_never_an_address() {
        // A Bytes-tagged parameter whose payload happens to be an encoded
        // contract address must not resolve.
        let addr_b64 = ScVal::Address(contract_addr(3))
            .to_xdr_base64(Limits::none())
            .unwrap();
        let op = json!({"parameters": [{"type": "Bytes", "value": addr_b64}]});
        let resolved = resolve_contract(&ctx(Some(&op), None, &[]));
        assert!(!resolved.resolved);
    }

    #[test]
    fn test_host_function_field_strategy() {
        let host_fn = HostFunction::InvokeContract(InvokeContractArgs {
            contract_address: contract_addr(4),
            function_name: ScSymbol("hello".try_into().unwrap()),
            args: VecM::default(),
        });
        let op = json!({"host_function": host_fn.to_xdr_base64(Limits::none()).unwrap()});
        let resolved = resolve_contract(&ctx(Some(&op), None, &[]));
        assert_eq!(resolved.strategy, Some("host_function_field"));
        assert_eq!(resolved.contract_id, contract_strkey(&[4u8; 32]));
    }

    #[test]
    fn test_rpc_payload_strategy() {
        let key = contract_strkey(&[5u8; 32]);
        let rpc = json!({"results": [{"contractId": key}]});
        let resolved = resolve_contract(&ctx(None, Some(&rpc), &[]));
        assert_eq!(resolved.strategy, Some("rpc_payload"));
        assert_eq!(resolved.contract_id, key);
    }

    #[test]
    fn test_envelope_strategy_is_last_resort() {
        let ops = [invoke_op(6, "transfer", vec![ScVal::U32(1)])];
        let resolved = resolve_contract(&ctx(None, None, &ops));
        assert_eq!(resolved.strategy, Some("envelope"));
        assert_eq!(resolved.contract_id, contract_strkey(&[6u8; 32]));
    }

    #[test]
    fn test_exhausted_chain_yields_labeled_placeholder() {
        let op = json!({"type": "invoke_host_function"});
        let resolved = resolve_contract(&ctx(Some(&op), None, &[]));
        assert!(!resolved.resolved);
        assert_eq!(resolved.strategy, None);
        assert_eq!(
            resolved.contract_id,
            "unresolved-contract(op=0, network=testnet)"
        );
    }

    #[test]
    fn test_function_from_envelope_args() {
        let ops = [invoke_op(7, "swap", vec![ScVal::U32(2), ScVal::U32(3)])];
        let resolved = resolve_function(&ctx(None, None, &ops));
        assert_eq!(resolved.name.as_deref(), Some("swap"));
        assert_eq!(
            resolved.arguments,
            vec![DecodedValue::U32(2), DecodedValue::U32(3)]
        );
    }

    #[test]
    fn test_direct_function_name_wins_over_envelope() {
        let ops = [invoke_op(7, "swap", vec![])];
        let op = json!({"function_name": "custom_name"});
        let resolved = resolve_function(&ctx(Some(&op), None, &ops));
        assert_eq!(resolved.name.as_deref(), Some("custom_name"));
    }

    #[test]
    fn test_raw_parameter_decode_skips_target_and_symbol() {
        let to_b64 = |val: &ScVal| val.to_xdr_base64(Limits::none()).unwrap();
        let op = json!({"parameters": [
            {"type": "Address", "value": to_b64(&ScVal::Address(contract_addr(8)))},
            {"type": "Sym", "value": to_b64(&ScVal::Symbol(ScSymbol("mint".try_into().unwrap())))},
            {"type": "U64", "value": to_b64(&ScVal::U64(99))},
        ]});
        let resolved = resolve_function(&ctx(Some(&op), None, &[]));
        assert_eq!(resolved.name.as_deref(), Some("mint"));
        assert_eq!(resolved.arguments, vec![DecodedValue::U64(99)]);
    }

    #[test]
    fn test_index_mapped_parameter_normalizes_to_bytes() {
        let bytes_val = ScVal::Bytes(stellar_xdr::curr::ScBytes(
            vec![1, 2, 3].try_into().unwrap(),
        ));
        let xdr = bytes_val.to_xdr(Limits::none()).unwrap();
        let index_map: serde_json::Map<String, Value> = xdr
            .iter()
            .enumerate()
            .map(|(i, b)| (i.to_string(), json!(*b)))
            .collect();
        let op = json!({"parameters": [{"type": "Bytes", "value": Value::Object(index_map)}]});
        let resolved = resolve_function(&ctx(Some(&op), None, &[]));
        assert_eq!(resolved.arguments, vec![DecodedValue::Bytes(vec![1, 2, 3])]);
    }
}
