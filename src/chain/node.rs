use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::providers::Provider;
use eyre::{bail, Result, WrapErr};
use log::{info, warn};
use url::Url;

use super::{ArtifactStore, RpcRuntime};
use crate::config::Config;
use crate::utils::providers::{create_http_provider, HttpProvider};

/// The node a harness run talks to.
///
/// Either an Anvil process owned by this value (killed on drop) or an
/// externally managed node reached through `rpc_url`.
pub struct LocalNode {
    endpoint: Url,
    /// Kept alive for the lifetime of the node
    anvil: Option<AnvilInstance>,
}

impl LocalNode {
    /// Connects to `config.rpc_url`, or spawns Anvil when it is unset.
    ///
    /// # Errors
    /// * If the `anvil` binary is missing or fails to start
    pub fn start(config: &Config) -> Result<Self> {
        if let Some(endpoint) = &config.rpc_url {
            info!("chain::node: Using external node at {endpoint}");
            return Ok(Self {
                endpoint: endpoint.clone(),
                anvil: None,
            });
        }

        let mut anvil = Anvil::new().chain_id(config.chain_id);
        if config.allow_unlimited_contract_size {
            anvil = anvil.arg("--disable-code-size-limit");
        }
        let instance = anvil
            .try_spawn()
            .wrap_err("failed to spawn anvil, is it installed and on PATH?")?;
        info!(
            "chain::node: Spawned anvil on {} (chain id {})",
            instance.endpoint(),
            config.chain_id
        );

        Ok(Self {
            endpoint: instance.endpoint_url(),
            anvil: Some(instance),
        })
    }

    /// Endpoint of the node
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Whether the node process is owned by this value
    #[must_use]
    pub const fn is_spawned(&self) -> bool {
        self.anvil.is_some()
    }

    /// Connects a runtime and checks the node reports the expected chain id.
    ///
    /// # Errors
    /// * If the node is unreachable or reports another chain id
    pub async fn connect(
        &self,
        artifacts: ArtifactStore,
        expected_chain_id: u64,
    ) -> Result<RpcRuntime<HttpProvider>> {
        let provider = create_http_provider(self.endpoint.clone());
        let chain_id = provider
            .get_chain_id()
            .await
            .wrap_err_with(|| format!("node at {} is unreachable", self.endpoint))?;
        if chain_id != expected_chain_id {
            if self.is_spawned() {
                bail!("spawned node reports chain id {chain_id}, expected {expected_chain_id}");
            }
            warn!("chain::node: External node reports chain id {chain_id}, expected {expected_chain_id}");
        }
        Ok(RpcRuntime::new(provider, artifacts))
    }
}
