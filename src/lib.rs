/*!
 * # lp-harness - Uniswap V2 Liquidity Fixture
 *
 * lp-harness deploys a Uniswap V2 contract suite (factory, router, WETH9 and two
 * mock ERC20 tokens) to a development node, creates a pair for the tokens and
 * seeds it with liquidity, returning named handles for assertions.
 *
 * ## Core Features
 *
 * - **Canonical Ordering**: Orders token addresses the way pairs store them
 * - **Integer Square Root**: Floor square root for arbitrary-precision integers
 * - **Liquidity Fixture**: Step-by-step deployment with inspectable handles
 * - **Scenario Check**: Verifies reserves and LP balance after the deposit
 *
 * ## Module Structure
 *
 * - `chain`: Runtime seam, JSON-RPC runtime, artifacts and local node
 * - `config`: Configuration management for the harness
 * - `contracts`: Solidity interface bindings
 * - `fixture`: Liquidity deployment fixture
 * - `math`: Integer math helpers
 * - `models`: Pair ordering, reserves and token parameters
 * - `scenario`: Post-deployment checks
 * - `utils`: Constants, logging and providers
 */

/// Chain runtime, artifacts and local node
pub mod chain;
/// Configuration management for the harness
pub mod config;
/// Solidity interface bindings
pub mod contracts;
/// Liquidity deployment fixture
pub mod fixture;
/// Integer math helpers
pub mod math;
/// Data models for the application
pub mod models;
/// Post-deployment checks
pub mod scenario;
/// Utility functions and helpers
pub mod utils;
