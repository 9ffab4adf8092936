//! Checks run against a completed liquidity fixture.

use alloy::primitives::{Address, U256};
use eyre::{ensure, Result};
use log::info;
use serde::Serialize;

use crate::chain::{call_view, ChainRuntime};
use crate::contracts::IUniswapV2Pair;
use crate::fixture::{Deployment, FixtureParams};
use crate::models::pair::Reserves;

/// Pool state observed after the initial deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiquidityReport {
    /// Pair that was checked
    pub pair: Address,
    /// Reserves in canonical token order
    pub reserves: Reserves,
    /// LP tokens held by the owner
    pub lp_balance: U256,
    /// Total LP supply, including the permanently locked minimum
    pub total_supply: U256,
}

/// Reads the pair's reserves.
///
/// # Errors
/// * If the `getReserves()` call fails
pub async fn read_reserves<R: ChainRuntime + ?Sized>(runtime: &R, pair: Address) -> Result<Reserves> {
    let reserves = call_view(runtime, pair, &IUniswapV2Pair::getReservesCall {}).await?;
    Ok(Reserves {
        reserve0: U256::from(reserves.reserve0),
        reserve1: U256::from(reserves.reserve1),
        block_timestamp_last: reserves.blockTimestampLast,
    })
}

/// Reads `owner`'s LP token balance.
///
/// # Errors
/// * If the `balanceOf()` call fails
pub async fn read_lp_balance<R: ChainRuntime + ?Sized>(
    runtime: &R,
    pair: Address,
    owner: Address,
) -> Result<U256> {
    Ok(call_view(runtime, pair, &IUniswapV2Pair::balanceOfCall { owner }).await?._0)
}

/// "Should create pair and add initial liquidity".
///
/// The fixture deposits `deposit_a` for the canonical token0 and `deposit_b`
/// for token1, so the reserves must equal the deposits in that order and the
/// owner must hold LP tokens.
///
/// # Errors
/// * If a read fails
/// * If the reserves differ from the deposits or the LP balance is zero
pub async fn verify_initial_liquidity<R: ChainRuntime + ?Sized>(
    runtime: &R,
    deployment: &Deployment,
    params: &FixtureParams,
) -> Result<LiquidityReport> {
    let reserves = read_reserves(runtime, deployment.pair).await?;
    info!("scenario: Pair {} reports {reserves}", deployment.pair);

    ensure!(
        reserves.reserve0 == params.deposit_a,
        "reserve0 is {}, expected {}",
        reserves.reserve0,
        params.deposit_a
    );
    ensure!(
        reserves.reserve1 == params.deposit_b,
        "reserve1 is {}, expected {}",
        reserves.reserve1,
        params.deposit_b
    );

    let lp_balance = read_lp_balance(runtime, deployment.pair, deployment.owner).await?;
    ensure!(
        lp_balance > U256::ZERO,
        "owner {} holds no LP tokens",
        deployment.owner
    );
    let total_supply = call_view(runtime, deployment.pair, &IUniswapV2Pair::totalSupplyCall {})
        .await?
        ._0;

    info!("scenario: Owner LP balance {lp_balance} of {total_supply}");
    Ok(LiquidityReport {
        pair: deployment.pair,
        reserves,
        lp_balance,
        total_supply,
    })
}
