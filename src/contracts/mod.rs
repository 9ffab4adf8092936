//! Uniswap V2 contract bindings.
//!
//! Only the ABI is generated here. Calls are encoded with `SolCall` and sent
//! through a [`ChainRuntime`](crate::chain::ChainRuntime), which keeps the
//! fixture independent of the transport.

use alloy::sol;
use derive_more::Display;

// Factory interface: pair creation and lookup
sol! {
    #[sol(all_derives)]
    "contracts/src/interfaces/IUniswapV2Factory.sol"
}

// Router02 interface: liquidity provisioning
sol! {
    #[sol(all_derives)]
    "contracts/src/interfaces/IUniswapV2Router02.sol"
}

// Pair interface: reserves and LP token balances
sol! {
    #[sol(all_derives)]
    "contracts/src/interfaces/IUniswapV2Pair.sol"
}

// ERC20 interface shared by the mock tokens and WETH9
sol! {
    #[sol(all_derives)]
    "contracts/src/interfaces/IERC20.sol"
}

// `all_derives` does not reach the generated calls enum in alloy-sol-macro 0.8,
// so spell out the `Debug` a derive would produce.
impl std::fmt::Debug for IERC20::IERC20Calls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::name(c) => f.debug_tuple("name").field(c).finish(),
            Self::symbol(c) => f.debug_tuple("symbol").field(c).finish(),
            Self::decimals(c) => f.debug_tuple("decimals").field(c).finish(),
            Self::totalSupply(c) => f.debug_tuple("totalSupply").field(c).finish(),
            Self::balanceOf(c) => f.debug_tuple("balanceOf").field(c).finish(),
            Self::allowance(c) => f.debug_tuple("allowance").field(c).finish(),
            Self::approve(c) => f.debug_tuple("approve").field(c).finish(),
            Self::transfer(c) => f.debug_tuple("transfer").field(c).finish(),
            Self::transferFrom(c) => f.debug_tuple("transferFrom").field(c).finish(),
        }
    }
}

/// Deployable contracts, displayed as their artifact name
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    /// `UniswapV2Factory(address feeToSetter)`
    #[display("UniswapV2Factory")]
    Factory,
    /// `UniswapV2Router02(address factory, address WETH)`
    #[display("UniswapV2Router02")]
    Router,
    /// `UniswapV2Pair()`, deployed by the factory
    #[display("UniswapV2Pair")]
    Pair,
    /// `WETH9()`
    #[display("WETH9")]
    Weth,
    /// `MockERC20(string name, string symbol, uint8 decimals)`
    #[display("MockERC20")]
    MockErc20,
}

impl Contract {
    /// Artifact name as emitted by the compiler
    #[must_use]
    pub fn artifact_name(self) -> String {
        self.to_string()
    }
}
