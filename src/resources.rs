//! Resource-consumption extraction.
//!
//! Measured ("actual") counters come from the RPC lookup payload, whose JSON
//! shape has relocated across protocol minor-versions; the same counter is
//! probed at each historical nesting in order and the first non-zero match
//! wins, never to be overwritten by a later zero-valued path. Fees measured
//! post-execution come from the soroban meta extension. Anything still
//! missing falls back to the envelope's pre-execution budget, and a record
//! built purely from the budget carries `is_actual = false`.

use serde_json::Value;
use stellar_xdr::curr::SorobanTransactionData;

use soroban_txmeta_types::ResourceUsage;

use crate::meta::SorobanFeeTotals;

/// Historical nestings of the resource-extension object: directly-named
/// fields, the v1 extension, and the v1-extension-of-v1-extension.
const NESTINGS: &[&[&str]] = &[&[], &["ext", "v1"], &["ext", "v1", "ext", "v1"]];

/// Sub-objects of the RPC payload that have carried resource counters.
const ROOTS: &[&[&str]] = &[&[], &["cost"], &["sorobanMeta"], &["resources"]];

pub fn extract_resource_usage(
    budget: Option<&SorobanTransactionData>,
    actual_fees: Option<SorobanFeeTotals>,
    rpc: Option<&Value>,
) -> ResourceUsage {
    let mut used_actual = actual_fees.is_some();
    let mut usage = ResourceUsage::default();

    let resources = budget.map(|d| &d.resources);

    usage.cpu_instructions = counter(
        rpc,
        &["cpuInsns", "cpu_insns", "instructions"],
        resources.map(|r| u64::from(r.instructions)),
        &mut used_actual,
    );
    usage.memory_bytes = counter(
        rpc,
        &["memBytes", "mem_bytes", "memoryBytes"],
        None,
        &mut used_actual,
    );
    usage.read_bytes = counter(
        rpc,
        &["readBytes", "read_bytes", "diskReadBytes"],
        resources.map(|r| u64::from(r.disk_read_bytes)),
        &mut used_actual,
    );
    usage.write_bytes = counter(
        rpc,
        &["writeBytes", "write_bytes"],
        resources.map(|r| u64::from(r.write_bytes)),
        &mut used_actual,
    );

    if let Some(r) = resources {
        usage.read_entry_count = (r.footprint.read_only.len() + r.footprint.read_write.len()) as u32;
        usage.write_entry_count = r.footprint.read_write.len() as u32;
    }

    match actual_fees {
        Some(fees) => {
            usage.non_refundable_fee = fees.non_refundable;
            usage.refundable_fee = fees.refundable;
            usage.rent_fee = fees.rent;
        }
        None => {
            usage.refundable_fee =
                fee_counter(rpc, &["refundableFee", "refundable_fee"], &mut used_actual);
            usage.rent_fee =
                fee_counter(rpc, &["rentFee", "rent_fee", "rentFeeCharged"], &mut used_actual);
            usage.non_refundable_fee = fee_counter(
                rpc,
                &["nonRefundableFee", "non_refundable_fee"],
                &mut used_actual,
            );
            if usage.non_refundable_fee == 0 {
                // Budgeted total resource fee, the pre-execution estimate.
                usage.non_refundable_fee = budget.map(|d| d.resource_fee).unwrap_or(0);
            }
        }
    }

    usage.is_actual = used_actual;
    usage
}

fn counter(
    rpc: Option<&Value>,
    names: &[&str],
    budget_value: Option<u64>,
    used_actual: &mut bool,
) -> u64 {
    if let Some(found) = rpc.and_then(|root| probe(root, names)) {
        *used_actual = true;
        return found;
    }
    budget_value.unwrap_or(0)
}

fn fee_counter(rpc: Option<&Value>, names: &[&str], used_actual: &mut bool) -> i64 {
    match rpc.and_then(|root| probe(root, names)) {
        Some(found) => {
            *used_actual = true;
            found as i64
        }
        None => 0,
    }
}

/// First non-zero value for any of `names`, across every known sub-object
/// and historical nesting, in order.
fn probe(root: &Value, names: &[&str]) -> Option<u64> {
    for root_path in ROOTS {
        let Some(base) = descend(root, root_path) else {
            continue;
        };
        for nesting in NESTINGS {
            let Some(node) = descend(base, nesting) else {
                continue;
            };
            for name in names {
                if let Some(v) = json_u64(node.get(*name)) {
                    if v != 0 {
                        return Some(v);
                    }
                }
            }
        }
    }
    None
}

fn descend<'a>(mut node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    for seg in path {
        node = node.get(*seg)?;
    }
    Some(node)
}

// RPC payloads deliver counters both as JSON numbers and as decimal strings.
fn json_u64(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
