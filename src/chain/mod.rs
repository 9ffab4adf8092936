//! # Chain Runtime
//!
//! The seam between the liquidity fixture and the node that executes it.
//! A runtime deploys artifacts, answers view calls, sends transactions and
//! lists the accounts it can send from.

/// Compiled artifact lookup
pub mod artifacts;
/// Local node lifecycle
pub mod node;
/// JSON-RPC runtime
pub mod rpc;
/// In-memory runtime used by unit tests
#[cfg(test)]
pub(crate) mod test_helpers;

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use eyre::{Result, WrapErr};

use crate::contracts::Contract;

pub use artifacts::ArtifactStore;
pub use node::LocalNode;
pub use rpc::RpcRuntime;

/// A chain the fixture can deploy to and transact with.
///
/// Every method is awaited to completion before the caller issues the next
/// request; implementations do not need to order concurrent requests.
#[async_trait]
pub trait ChainRuntime: Send + Sync {
    /// Accounts the runtime can send transactions from, in node order
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Deploys `contract` with ABI-encoded constructor arguments, returning its address
    async fn deploy(&self, from: Address, contract: Contract, constructor_args: Bytes)
        -> Result<Address>;

    /// Executes a view call against `to`, returning the raw return data
    async fn read(&self, to: Address, calldata: Bytes) -> Result<Bytes>;

    /// Sends a state-changing call and waits until it is mined
    async fn write(&self, from: Address, to: Address, calldata: Bytes) -> Result<TxHash>;
}

/// Encodes `call`, runs it as a view call and decodes the return values.
///
/// # Errors
/// * If the runtime call fails or the return data does not decode
pub async fn call_view<R, C>(runtime: &R, to: Address, call: &C) -> Result<C::Return>
where
    R: ChainRuntime + ?Sized,
    C: SolCall + Sync,
{
    let data = runtime
        .read(to, Bytes::from(call.abi_encode()))
        .await
        .wrap_err_with(|| format!("{} on {to} failed", C::SIGNATURE))?;
    C::abi_decode_returns(&data, true)
        .wrap_err_with(|| format!("{} on {to} returned undecodable data", C::SIGNATURE))
}

/// Encodes `call` and sends it as a transaction from `from`.
///
/// # Errors
/// * If the transaction cannot be sent or reverts
pub async fn send_call<R, C>(runtime: &R, from: Address, to: Address, call: &C) -> Result<TxHash>
where
    R: ChainRuntime + ?Sized,
    C: SolCall + Sync,
{
    runtime.write(from, to, Bytes::from(call.abi_encode())).await
}
