use serde::Serialize;

use crate::utils::constants::{
    MOCK_TOKEN_DECIMALS, TOKEN_A_NAME, TOKEN_A_SYMBOL, TOKEN_B_NAME, TOKEN_B_SYMBOL,
};

/// Constructor arguments of a mock fungible token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSpec {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
}

impl TokenSpec {
    /// Create a new token description
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// `MockTokenA` / `MCKTKA`, 18 decimals
    #[must_use]
    pub fn mock_token_a() -> Self {
        Self::new(TOKEN_A_NAME, TOKEN_A_SYMBOL, MOCK_TOKEN_DECIMALS)
    }

    /// `MockTokenB` / `MCKTKB`, 18 decimals
    #[must_use]
    pub fn mock_token_b() -> Self {
        Self::new(TOKEN_B_NAME, TOKEN_B_SYMBOL, MOCK_TOKEN_DECIMALS)
    }
}
