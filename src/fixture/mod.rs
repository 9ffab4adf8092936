//! # Liquidity Fixture
//!
//! Deploys the Uniswap V2 suite, creates a pair for two mock tokens, approves
//! the router and seeds the pair with liquidity.
//!
//! Each step is a separate method so tests can stop after any of them and
//! inspect the handles produced so far. [`LiquidityFixture::deploy_all`] runs
//! the whole sequence in order.

/// Fixture inputs and outputs
pub mod types;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::{sol_data, SolType, SolValue};
use chrono::Utc;
use eyre::{bail, eyre, Result, WrapErr};
use log::{error, info};

use crate::chain::{call_view, send_call, ChainRuntime};
use crate::contracts::{Contract, IUniswapV2Factory, IUniswapV2Pair, IUniswapV2Router02, IERC20};
use crate::models::pair::sort_tokens;
use crate::models::token::TokenSpec;

pub use types::{Deployment, FixtureAccounts, FixtureParams};

/// Step-by-step builder of a seeded liquidity pool
pub struct LiquidityFixture<'a, R: ChainRuntime + ?Sized> {
    runtime: &'a R,
    accounts: FixtureAccounts,
    params: FixtureParams,
    factory: Option<Address>,
    weth: Option<Address>,
    router: Option<Address>,
    tokens: Option<(Address, Address)>,
    pair: Option<Address>,
    approved: bool,
    add_liquidity_tx: Option<TxHash>,
}

fn require(handle: Option<Address>, name: &str) -> Result<Address> {
    handle.ok_or_else(|| eyre!("fixture: {name} must be deployed before this step"))
}

impl<'a, R: ChainRuntime + ?Sized> LiquidityFixture<'a, R> {
    /// Create a new fixture; nothing is sent until a step runs
    pub fn new(runtime: &'a R, accounts: FixtureAccounts, params: FixtureParams) -> Self {
        Self {
            runtime,
            accounts,
            params,
            factory: None,
            weth: None,
            router: None,
            tokens: None,
            pair: None,
            approved: false,
            add_liquidity_tx: None,
        }
    }

    /// Use already deployed tokens instead of running [`Self::deploy_tokens`]
    #[must_use]
    pub fn with_tokens(mut self, token_a: Address, token_b: Address) -> Self {
        self.tokens = Some((token_a, token_b));
        self
    }

    /// Runs every step in order and returns the handles.
    ///
    /// # Errors
    /// * The first failing step's error, unchanged
    pub async fn deploy_all(mut self) -> Result<Deployment> {
        self.deploy_factory().await?;
        self.deploy_weth().await?;
        self.deploy_router().await?;
        if self.tokens.is_none() {
            self.deploy_tokens().await?;
        }
        self.create_pair().await?;
        self.approve_router().await?;
        self.add_liquidity().await?;
        self.finish()
    }

    /// Deploys `UniswapV2Factory` with the owner as fee setter.
    ///
    /// # Errors
    /// * If the deployment fails
    pub async fn deploy_factory(&mut self) -> Result<Address> {
        let owner = self.accounts.owner;
        let factory = self
            .runtime
            .deploy(owner, Contract::Factory, Bytes::from(owner.abi_encode()))
            .await?;
        info!("fixture::deploy_factory: Factory deployed at: {factory}");
        self.factory = Some(factory);
        Ok(factory)
    }

    /// Deploys `WETH9`.
    ///
    /// # Errors
    /// * If the deployment fails
    pub async fn deploy_weth(&mut self) -> Result<Address> {
        let weth = self
            .runtime
            .deploy(self.accounts.owner, Contract::Weth, Bytes::new())
            .await?;
        info!("fixture::deploy_weth: WETH deployed at: {weth}");
        self.weth = Some(weth);
        Ok(weth)
    }

    /// Deploys `UniswapV2Router02` against the factory and WETH.
    ///
    /// # Errors
    /// * If the factory or WETH is missing
    /// * If the deployment or the `factory()` read fails
    pub async fn deploy_router(&mut self) -> Result<Address> {
        let factory = require(self.factory, "factory")?;
        let weth = require(self.weth, "WETH")?;

        let router = self
            .runtime
            .deploy(
                self.accounts.owner,
                Contract::Router,
                Bytes::from((factory, weth).abi_encode_params()),
            )
            .await?;
        info!("fixture::deploy_router: Router deployed at: {router}");

        let factory_by_router =
            call_view(self.runtime, router, &IUniswapV2Router02::factoryCall {}).await?._0;
        info!("fixture::deploy_router: Factory according to router: {factory_by_router}");

        self.router = Some(router);
        Ok(router)
    }

    /// Deploys the two mock tokens, minting their supply to the owner.
    ///
    /// # Errors
    /// * If either deployment or a balance read fails
    pub async fn deploy_tokens(&mut self) -> Result<(Address, Address)> {
        let token_a = self.deploy_token(&self.params.token_a).await?;
        let token_b = self.deploy_token(&self.params.token_b).await?;
        info!("fixture::deploy_tokens: Tokens deployed at: mockTokenA={token_a}, mockTokenB={token_b}");

        let balance_a = self.balance_of(token_a).await?;
        let balance_b = self.balance_of(token_b).await?;
        info!("fixture::deploy_tokens: Initial token balances: mockTokenA={balance_a}, mockTokenB={balance_b}");

        self.tokens = Some((token_a, token_b));
        Ok((token_a, token_b))
    }

    async fn deploy_token(&self, token: &TokenSpec) -> Result<Address> {
        let args = <(sol_data::String, sol_data::String, sol_data::Uint<8>)>::abi_encode_params(&(
            token.name.clone(),
            token.symbol.clone(),
            token.decimals,
        ));
        self.runtime
            .deploy(self.accounts.owner, Contract::MockErc20, Bytes::from(args))
            .await
            .wrap_err_with(|| format!("deploying {} ({})", token.name, token.symbol))
    }

    async fn balance_of(&self, token: Address) -> Result<U256> {
        let call = IERC20::balanceOfCall {
            account: self.accounts.owner,
        };
        Ok(call_view(self.runtime, token, &call).await?._0)
    }

    /// Creates the pair for the two tokens in canonical order.
    ///
    /// # Errors
    /// * If the factory or tokens are missing, or the tokens are identical
    /// * If `createPair` reverts or the factory reports no pair afterwards
    /// * If the pair orders its tokens differently from [`sort_tokens`]
    pub async fn create_pair(&mut self) -> Result<Address> {
        let factory = require(self.factory, "factory")?;
        let (token_a, token_b) = self
            .tokens
            .ok_or_else(|| eyre!("fixture: tokens must be deployed before this step"))?;
        if token_a == token_b {
            bail!("fixture: cannot create a pair of {token_a} with itself");
        }

        let (token0, token1) = sort_tokens(token_a, token_b);
        let tx = send_call(
            self.runtime,
            self.accounts.owner,
            factory,
            &IUniswapV2Factory::createPairCall {
                tokenA: token0,
                tokenB: token1,
            },
        )
        .await?;
        info!("fixture::create_pair: Create pair tx: {tx}");

        let pair = call_view(
            self.runtime,
            factory,
            &IUniswapV2Factory::getPairCall {
                tokenA: token_a,
                tokenB: token_b,
            },
        )
        .await?
        .pair;
        if pair == Address::ZERO {
            bail!("fixture: factory {factory} has no pair for {token_a} / {token_b}");
        }

        let pair_token0 = call_view(self.runtime, pair, &IUniswapV2Pair::token0Call {}).await?._0;
        let pair_token1 = call_view(self.runtime, pair, &IUniswapV2Pair::token1Call {}).await?._0;
        info!("fixture::create_pair: Pair tokens: token0={pair_token0}, token1={pair_token1}");
        if (pair_token0, pair_token1) != (token0, token1) {
            bail!(
                "fixture: pair {pair} orders its tokens as ({pair_token0}, {pair_token1}), expected ({token0}, {token1})"
            );
        }

        self.pair = Some(pair);
        Ok(pair)
    }

    /// Grants the router an unlimited allowance on both tokens from the owner.
    ///
    /// # Errors
    /// * If the router or tokens are missing
    /// * If either approval or allowance read fails
    pub async fn approve_router(&mut self) -> Result<()> {
        let router = require(self.router, "router")?;
        let (token_a, token_b) = self
            .tokens
            .ok_or_else(|| eyre!("fixture: tokens must be deployed before this step"))?;
        let owner = self.accounts.owner;

        for token in [token_a, token_b] {
            send_call(
                self.runtime,
                owner,
                token,
                &IERC20::approveCall {
                    spender: router,
                    amount: U256::MAX,
                },
            )
            .await?;
        }

        let allowance_a = self.allowance(token_a, router).await?;
        let allowance_b = self.allowance(token_b, router).await?;
        info!("fixture::approve_router: Router allowances: tokenA={allowance_a}, tokenB={allowance_b}");

        self.approved = true;
        Ok(())
    }

    async fn allowance(&self, token: Address, spender: Address) -> Result<U256> {
        let call = IERC20::allowanceCall {
            owner: self.accounts.owner,
            spender,
        };
        Ok(call_view(self.runtime, token, &call).await?._0)
    }

    /// Adds the configured deposits to the pair through the router.
    ///
    /// Deposits are passed for the canonical `(token0, token1)`, with zero
    /// minimum amounts and the owner as recipient. A failure is logged and
    /// returned unchanged.
    ///
    /// # Errors
    /// * If the pair was not created or the router was not approved
    /// * If `addLiquidity` reverts
    pub async fn add_liquidity(&mut self) -> Result<TxHash> {
        let router = require(self.router, "router")?;
        let pair = require(self.pair, "pair")?;
        let (token_a, token_b) = self
            .tokens
            .ok_or_else(|| eyre!("fixture: tokens must be deployed before this step"))?;
        if !self.approved {
            bail!("fixture: the router must be approved before adding liquidity");
        }
        let owner = self.accounts.owner;
        let (token0, token1) = sort_tokens(token_a, token_b);

        info!(
            "fixture::add_liquidity: Deposit amounts: token0={}, token1={}",
            self.params.deposit_a, self.params.deposit_b
        );
        let balance_a = self.balance_of(token_a).await?;
        let balance_b = self.balance_of(token_b).await?;
        info!("fixture::add_liquidity: Token balances before adding liquidity: tokenA={balance_a}, tokenB={balance_b}");

        let call = IUniswapV2Router02::addLiquidityCall {
            tokenA: token0,
            tokenB: token1,
            amountADesired: self.params.deposit_a,
            amountBDesired: self.params.deposit_b,
            amountAMin: self.params.amount_a_min,
            amountBMin: self.params.amount_b_min,
            to: owner,
            deadline: U256::from(deadline(self.params.deadline_secs)?),
        };
        let tx = match send_call(self.runtime, owner, router, &call).await {
            Ok(tx) => tx,
            Err(e) => {
                error!("fixture::add_liquidity: Add liquidity failed: {e:?}");
                return Err(e);
            }
        };
        info!("fixture::add_liquidity: Add liquidity tx: {tx}");

        let lp_balance =
            call_view(self.runtime, pair, &IUniswapV2Pair::balanceOfCall { owner }).await?._0;
        info!("fixture::add_liquidity: Actual LP Balance: {lp_balance}");

        self.add_liquidity_tx = Some(tx);
        Ok(tx)
    }

    /// Handles of a fully run fixture.
    ///
    /// # Errors
    /// * If any step has not run yet
    pub fn finish(self) -> Result<Deployment> {
        let (token_a, token_b) = self
            .tokens
            .ok_or_else(|| eyre!("fixture: tokens were never deployed"))?;
        let (token0, token1) = sort_tokens(token_a, token_b);
        Ok(Deployment {
            factory: require(self.factory, "factory")?,
            router: require(self.router, "router")?,
            weth: require(self.weth, "WETH")?,
            token_a,
            token_b,
            token0,
            token1,
            pair: require(self.pair, "pair")?,
            owner: self.accounts.owner,
            user1: self.accounts.user1,
            add_liquidity_tx: self
                .add_liquidity_tx
                .ok_or_else(|| eyre!("fixture: liquidity was never added"))?,
        })
    }

    /// The accounts the fixture sends from
    pub const fn accounts(&self) -> &FixtureAccounts {
        &self.accounts
    }

    /// The deployment parameters
    pub const fn params(&self) -> &FixtureParams {
        &self.params
    }

    /// Factory, once deployed
    pub const fn factory(&self) -> Option<Address> {
        self.factory
    }

    /// Router, once deployed
    pub const fn router(&self) -> Option<Address> {
        self.router
    }

    /// Mock tokens in deployment order, once deployed
    pub const fn tokens(&self) -> Option<(Address, Address)> {
        self.tokens
    }

    /// Pair, once created
    pub const fn pair(&self) -> Option<Address> {
        self.pair
    }
}

/// Unix timestamp `secs` seconds from now
fn deadline(secs: u64) -> Result<u64> {
    let now = u64::try_from(Utc::now().timestamp()).wrap_err("system clock is before 1970")?;
    now.checked_add(secs)
        .ok_or_else(|| eyre!("deadline offset {secs}s overflows"))
}
