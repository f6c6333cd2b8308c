//! Decoding and analysis of Soroban transaction metadata.
//!
//! Takes the raw artifacts a Stellar data source hands back for one
//! transaction (envelope, result, and meta XDR, plus optional Horizon
//! operation records and a soroban-rpc payload) and produces a single
//! structured analysis: resolved contract invocations with decoded
//! arguments, storage-slot state changes, diagnostic events, inferred
//! cross-contract call edges, resource usage, and a layered failure
//! diagnosis for transactions that did not apply.
//!
//! The crate performs no I/O; fetch the buffers however you like and feed
//! them to [`analyze_transaction`].
//!
//! ```no_run
//! use soroban_txmeta::{analyze_transaction, types::{Network, RawTransactionRecord}};
//!
//! # fn main() -> anyhow::Result<()> {
//! let record = RawTransactionRecord::new("AAAAAgAAA...")
//!     .with_result("AAAAZAAAA...")
//!     .with_meta("AAAAAwAAA...");
//! let analysis = analyze_transaction(&record, Network::Public)?;
//! for invocation in &analysis.invocations {
//!     println!("{} -> {:?}", invocation.contract_id, invocation.function_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod classifier;
pub mod codes;
pub mod entry;
pub mod meta;
pub mod resolver;
pub mod resources;
pub mod scval;

pub use soroban_txmeta_types as types;

pub use analysis::analyze_transaction;
pub use classifier::{classify_failure, result_successful};
pub use codes::{describe, lookup, remediation};
pub use entry::{decode_ledger_entry, DecodedEntry};
pub use meta::{walk_meta, MetaAnalysis, OperationMetaAnalysis};
pub use resolver::{resolve_contract, resolve_function, ResolveContext, ResolvedContract};
pub use resources::extract_resource_usage;
pub use scval::decode_sc_val;
