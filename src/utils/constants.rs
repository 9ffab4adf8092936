use alloy::primitives::U256;

/// Chain id of the local development node
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// Seconds added to the current time to form the add-liquidity deadline
pub const DEFAULT_DEADLINE_SECS: u64 = 60 * 10;

/// Default directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Solidity compiler versions the artifacts are built with
pub const SOLIDITY_COMPILERS: [&str; 3] = ["0.8.28", "0.6.6", "0.5.16"];

/// External contract sources compiled alongside the local ones
pub const DEPENDENCY_PATHS: [&str; 3] = [
    "@uniswap/v2-core/contracts/UniswapV2Factory.sol",
    "@uniswap/v2-periphery/contracts/UniswapV2Router02.sol",
    "@uniswap/v2-periphery/contracts/test/WETH9.sol",
];

/// Mock token A name
pub const TOKEN_A_NAME: &str = "MockTokenA";
/// Mock token A symbol
pub const TOKEN_A_SYMBOL: &str = "MCKTKA";
/// Mock token B name
pub const TOKEN_B_NAME: &str = "MockTokenB";
/// Mock token B symbol
pub const TOKEN_B_SYMBOL: &str = "MCKTKB";
/// Decimals of both mock tokens
pub const MOCK_TOKEN_DECIMALS: u8 = 18;

/// Token A deposited into the pair: 10 * 10^18
pub const TOKEN_A_DEPOSIT: U256 = U256::from_limbs([10 * 10u64.pow(18), 0, 0, 0]);
/// Token B deposited into the pair: 10 * 10^6
pub const TOKEN_B_DEPOSIT: U256 = U256::from_limbs([10 * 10u64.pow(6), 0, 0, 0]);

/// Liquidity permanently locked by the pair on the first mint
pub const MINIMUM_LIQUIDITY: U256 = U256::from_limbs([1000, 0, 0, 0]);
