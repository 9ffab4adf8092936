use alloy::primitives::{Address, TxHash, U256};
use eyre::{bail, Result};
use serde::Serialize;

use crate::chain::ChainRuntime;
use crate::models::token::TokenSpec;
use crate::utils::constants::{DEFAULT_DEADLINE_SECS, TOKEN_A_DEPOSIT, TOKEN_B_DEPOSIT};

/// Accounts the fixture transacts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixtureAccounts {
    /// Deploys everything, funds and receives the liquidity
    pub owner: Address,
    /// Secondary account handed to assertions untouched
    pub user1: Address,
}

impl FixtureAccounts {
    /// Create a new account pair
    #[must_use]
    pub const fn new(owner: Address, user1: Address) -> Self {
        Self { owner, user1 }
    }

    /// The first two accounts the runtime exposes.
    ///
    /// # Errors
    /// * If the runtime cannot list accounts or has fewer than two
    pub async fn from_runtime<R: ChainRuntime + ?Sized>(runtime: &R) -> Result<Self> {
        match runtime.accounts().await?.as_slice() {
            [owner, user1, ..] => Ok(Self::new(*owner, *user1)),
            accounts => bail!(
                "fixture needs two unlocked accounts, the node exposes {}",
                accounts.len()
            ),
        }
    }
}

/// Deployment and deposit parameters of the fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureParams {
    /// First mock token
    pub token_a: TokenSpec,
    /// Second mock token
    pub token_b: TokenSpec,
    /// Amount deposited for the canonical token0
    pub deposit_a: U256,
    /// Amount deposited for the canonical token1
    pub deposit_b: U256,
    /// `amountAMin` passed to the router
    pub amount_a_min: U256,
    /// `amountBMin` passed to the router
    pub amount_b_min: U256,
    /// Seconds from now until the add-liquidity deadline
    pub deadline_secs: u64,
}

impl Default for FixtureParams {
    fn default() -> Self {
        Self {
            token_a: TokenSpec::mock_token_a(),
            token_b: TokenSpec::mock_token_b(),
            deposit_a: TOKEN_A_DEPOSIT,
            deposit_b: TOKEN_B_DEPOSIT,
            amount_a_min: U256::ZERO,
            amount_b_min: U256::ZERO,
            deadline_secs: DEFAULT_DEADLINE_SECS,
        }
    }
}

impl FixtureParams {
    /// Override the add-liquidity deadline offset
    #[must_use]
    pub fn with_deadline_secs(mut self, deadline_secs: u64) -> Self {
        self.deadline_secs = deadline_secs;
        self
    }

    /// Override both deposits
    #[must_use]
    pub fn with_deposits(mut self, deposit_a: U256, deposit_b: U256) -> Self {
        self.deposit_a = deposit_a;
        self.deposit_b = deposit_b;
        self
    }
}

/// Named handles produced by a completed fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    /// `UniswapV2Factory`
    pub factory: Address,
    /// `UniswapV2Router02`
    pub router: Address,
    /// `WETH9`
    pub weth: Address,
    /// First mock token, in deployment order
    pub token_a: Address,
    /// Second mock token, in deployment order
    pub token_b: Address,
    /// Canonical token0 of the pair
    pub token0: Address,
    /// Canonical token1 of the pair
    pub token1: Address,
    /// Pair created for the two mock tokens
    pub pair: Address,
    /// Funding and liquidity-receiving account
    pub owner: Address,
    /// Secondary account
    pub user1: Address,
    /// Transaction that added the liquidity
    pub add_liquidity_tx: TxHash,
}
