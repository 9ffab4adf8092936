use alloy::network::{ReceiptResponse as _, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use eyre::{bail, eyre, Result, WrapErr};
use log::debug;

use super::{ArtifactStore, ChainRuntime};
use crate::contracts::Contract;

/// [`ChainRuntime`] backed by a JSON-RPC node.
///
/// Transactions are sent unsigned with `from` set, so the node must hold the
/// sending accounts unlocked (Anvil and Hardhat do by default).
pub struct RpcRuntime<P> {
    provider: P,
    artifacts: ArtifactStore,
}

impl<P> RpcRuntime<P>
where
    P: Provider + Send + Sync,
{
    /// Creates a runtime deploying from `artifacts` through `provider`
    pub const fn new(provider: P, artifacts: ArtifactStore) -> Self {
        Self {
            provider,
            artifacts,
        }
    }

    /// The underlying provider
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// The artifacts this runtime deploys from
    pub const fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }
}

#[async_trait]
impl<P> ChainRuntime for RpcRuntime<P>
where
    P: Provider + Send + Sync,
{
    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.provider.get_accounts().await?)
    }

    async fn deploy(
        &self,
        from: Address,
        contract: Contract,
        constructor_args: Bytes,
    ) -> Result<Address> {
        let mut code = self.artifacts.bytecode(&contract.artifact_name())?.to_vec();
        code.extend_from_slice(&constructor_args);

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .wrap_err_with(|| format!("sending {contract} deployment"))?
            .get_receipt()
            .await?;

        if !receipt.status() {
            bail!("{contract} deployment reverted in {}", receipt.transaction_hash);
        }
        debug!(
            "chain::rpc: {contract} deployed in {} (gas used {})",
            receipt.transaction_hash, receipt.gas_used
        );
        receipt
            .contract_address
            .ok_or_else(|| eyre!("{contract} deployment receipt has no contract address"))
    }

    async fn read(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(calldata);
        Ok(self.provider.call(&tx).await?)
    }

    async fn write(&self, from: Address, to: Address, calldata: Bytes) -> Result<TxHash> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(calldata);
        let receipt = self.provider.send_transaction(tx).await?.get_receipt().await?;

        if !receipt.status() {
            bail!("transaction {} to {to} reverted", receipt.transaction_hash);
        }
        Ok(receipt.transaction_hash)
    }
}
