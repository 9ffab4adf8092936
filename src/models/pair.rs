use std::fmt::{self, Display};

use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Orders two token addresses the way a Uniswap V2 pair stores them.
///
/// The first element is the address with the smaller lowercase hex form. For
/// typed addresses that is the same as comparing the raw bytes.
#[must_use]
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Orders two address-like strings by their lowercase form.
///
/// The inputs are returned unchanged, only their order differs.
#[must_use]
pub fn sort_token_strs<'a>(token_a: &'a str, token_b: &'a str) -> (&'a str, &'a str) {
    if token_a.to_lowercase() < token_b.to_lowercase() {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Pair reserves as reported by `getReserves()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reserves {
    /// Reserve of token0
    pub reserve0: U256,
    /// Reserve of token1
    pub reserve1: U256,
    /// Timestamp of the last reserve update
    pub block_timestamp_last: u32,
}

impl Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reserves({} / {} @ {})", self.reserve0, self.reserve1, self.block_timestamp_last)
    }
}
