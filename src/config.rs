//! Harness configuration.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file) and fall back to the local development defaults.

use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use eyre::{eyre, Result, WrapErr};
use url::Url;

use crate::utils::constants::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_CHAIN_ID, DEFAULT_DEADLINE_SECS, DEPENDENCY_PATHS,
    SOLIDITY_COMPILERS,
};

/// Runtime configuration of the harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Node to connect to. When unset a local Anvil node is spawned.
    pub rpc_url: Option<Url>,
    /// Directory searched for compiled contract artifacts
    pub artifacts_dir: PathBuf,
    /// Expected chain id of the node
    pub chain_id: u64,
    /// Lift the 24 KiB contract size limit on spawned nodes
    pub allow_unlimited_contract_size: bool,
    /// Seconds from now until the add-liquidity deadline
    pub deadline_secs: u64,
    /// Solidity compiler versions used to build the artifacts
    pub compilers: Vec<String>,
    /// External contract sources the artifacts were compiled from
    pub dependency_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: None,
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            chain_id: DEFAULT_CHAIN_ID,
            allow_unlimited_contract_size: true,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            compilers: SOLIDITY_COMPILERS.iter().map(ToString::to_string).collect(),
            dependency_paths: DEPENDENCY_PATHS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Loads the configuration from the environment.
    ///
    /// # Environment Variables
    /// * `LP_HARNESS_RPC_URL` - Node endpoint, spawns Anvil when unset
    /// * `LP_HARNESS_ARTIFACTS_DIR` - Artifact directory (default `artifacts`)
    /// * `LP_HARNESS_CHAIN_ID` - Chain id (default 31337)
    /// * `LP_HARNESS_UNLIMITED_CONTRACT_SIZE` - `true`/`false` (default `true`)
    /// * `LP_HARNESS_DEADLINE_SECS` - Add-liquidity deadline offset (default 600)
    ///
    /// # Errors
    /// * If a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let rpc_url = match env::var("LP_HARNESS_RPC_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Url::parse(raw.trim())
                    .wrap_err_with(|| format!("LP_HARNESS_RPC_URL is not a valid url: {raw}"))?,
            ),
            _ => None,
        };

        Ok(Self {
            rpc_url,
            artifacts_dir: env::var("LP_HARNESS_ARTIFACTS_DIR")
                .map_or(defaults.artifacts_dir, PathBuf::from),
            chain_id: env_or("LP_HARNESS_CHAIN_ID", defaults.chain_id)?,
            allow_unlimited_contract_size: match env::var("LP_HARNESS_UNLIMITED_CONTRACT_SIZE") {
                Ok(raw) => parse_bool(&raw)?,
                Err(_) => defaults.allow_unlimited_contract_size,
            },
            deadline_secs: env_or("LP_HARNESS_DEADLINE_SECS", defaults.deadline_secs)?,
            compilers: defaults.compilers,
            dependency_paths: defaults.dependency_paths,
        })
    }

    /// Artifact names produced by the dependency sources, e.g. `UniswapV2Factory`
    #[must_use]
    pub fn dependency_artifacts(&self) -> Vec<String> {
        self.dependency_paths
            .iter()
            .filter_map(|path| Path::new(path).file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect()
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| eyre!("{name} has an invalid value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(eyre!("expected a boolean, got {other:?}")),
    }
}
