use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use alloy::primitives::{keccak256, Address, Bytes, TxHash, U256};
use alloy::sol_types::{sol_data, SolInterface, SolType, SolValue};
use async_trait::async_trait;
use chrono::Utc;
use eyre::{bail, eyre, Result};

use super::ChainRuntime;
use crate::contracts::{Contract, IUniswapV2Factory, IUniswapV2Pair, IUniswapV2Router02, IERC20};
use crate::math::isqrt_u256;
use crate::models::pair::sort_tokens;
use crate::utils::constants::MINIMUM_LIQUIDITY;

/// Supply minted to the deployer of a mock token, 10^6 * 2^64
pub const MOCK_SUPPLY: U256 = U256::from_limbs([0, 1_000_000, 0, 0]);

#[derive(Clone, Default)]
struct Erc20 {
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl Erc20 {
    fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn mint(&mut self, to: Address, amount: U256) {
        self.total_supply += amount;
        *self.balances.entry(to).or_default() += amount;
    }

    fn transfer_from(&mut self, spender: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        let allowance = self.allowances.get(&(from, spender)).copied().unwrap_or_default();
        if allowance < amount {
            bail!("execution reverted: ds-math-sub-underflow (allowance)");
        }
        let balance = self.balance_of(from);
        if balance < amount {
            bail!("execution reverted: ds-math-sub-underflow (balance)");
        }
        if allowance != U256::MAX {
            self.allowances.insert((from, spender), allowance - amount);
        }
        self.balances.insert(from, balance - amount);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Pair {
    token0: Address,
    token1: Address,
    reserve0: U256,
    reserve1: U256,
    timestamp: u32,
    lp: Erc20,
}

#[derive(Clone)]
enum Account {
    Factory { pairs: HashMap<(Address, Address), Address>, all: Vec<Address> },
    Router { factory: Address, weth: Address },
    Token(Erc20),
    Pair(Box<Pair>),
}

#[derive(Clone, Default)]
struct State {
    nonce: u64,
    contracts: HashMap<Address, Account>,
    tx_count: u64,
}

impl State {
    fn next_address(&mut self) -> Address {
        self.nonce += 1;
        Address::from_slice(&keccak256(self.nonce.to_be_bytes())[12..])
    }

    fn token_mut(&mut self, address: Address) -> Result<&mut Erc20> {
        match self.contracts.get_mut(&address) {
            Some(Account::Token(token)) => Ok(token),
            _ => Err(eyre!("execution reverted: {address} is not a token")),
        }
    }

    fn pair_mut(&mut self, address: Address) -> Result<&mut Pair> {
        match self.contracts.get_mut(&address) {
            Some(Account::Pair(pair)) => Ok(pair),
            _ => Err(eyre!("execution reverted: {address} is not a pair")),
        }
    }

    fn create_pair(&mut self, factory: Address, token_a: Address, token_b: Address) -> Result<Address> {
        if token_a == token_b {
            bail!("execution reverted: UniswapV2: IDENTICAL_ADDRESSES");
        }
        let (token0, token1) = sort_tokens(token_a, token_b);
        if token0 == Address::ZERO {
            bail!("execution reverted: UniswapV2: ZERO_ADDRESS");
        }
        let pair = self.next_address();
        let Some(Account::Factory { pairs, all }) = self.contracts.get_mut(&factory) else {
            bail!("execution reverted: {factory} is not a factory");
        };
        if pairs.contains_key(&(token0, token1)) {
            bail!("execution reverted: UniswapV2: PAIR_EXISTS");
        }
        pairs.insert((token0, token1), pair);
        pairs.insert((token1, token0), pair);
        all.push(pair);
        self.contracts.insert(
            pair,
            Account::Pair(Box::new(Pair {
                token0,
                token1,
                ..Pair::default()
            })),
        );
        Ok(pair)
    }

    fn get_pair(&self, factory: Address, token_a: Address, token_b: Address) -> Address {
        match self.contracts.get(&factory) {
            Some(Account::Factory { pairs, .. }) => {
                pairs.get(&(token_a, token_b)).copied().unwrap_or_default()
            }
            _ => Address::ZERO,
        }
    }

    /// First-deposit path of `UniswapV2Router02.addLiquidity`
    fn add_liquidity(
        &mut self,
        router: Address,
        sender: Address,
        call: &IUniswapV2Router02::addLiquidityCall,
        now: u64,
    ) -> Result<Bytes> {
        if call.deadline < U256::from(now) {
            bail!("execution reverted: UniswapV2Router: EXPIRED");
        }
        let Some(Account::Router { factory, .. }) = self.contracts.get(&router).cloned() else {
            bail!("execution reverted: {router} is not a router");
        };
        let mut pair_address = self.get_pair(factory, call.tokenA, call.tokenB);
        if pair_address == Address::ZERO {
            pair_address = self.create_pair(factory, call.tokenA, call.tokenB)?;
        }

        let pair = self.pair_mut(pair_address)?;
        if !pair.reserve0.is_zero() || !pair.reserve1.is_zero() {
            bail!("mock router only models the initial deposit");
        }
        let (amount_a, amount_b) = (call.amountADesired, call.amountBDesired);
        if amount_a < call.amountAMin || amount_b < call.amountBMin {
            bail!("execution reverted: UniswapV2Router: INSUFFICIENT_AMOUNT");
        }

        self.token_mut(call.tokenA)?
            .transfer_from(router, sender, pair_address, amount_a)?;
        self.token_mut(call.tokenB)?
            .transfer_from(router, sender, pair_address, amount_b)?;

        let pair = self.pair_mut(pair_address)?;
        let root = isqrt_u256(amount_a * amount_b);
        if root <= MINIMUM_LIQUIDITY {
            bail!("execution reverted: UniswapV2: INSUFFICIENT_LIQUIDITY_MINTED");
        }
        let liquidity = root - MINIMUM_LIQUIDITY;
        pair.lp.mint(Address::ZERO, MINIMUM_LIQUIDITY);
        pair.lp.mint(call.to, liquidity);
        if call.tokenA == pair.token0 {
            (pair.reserve0, pair.reserve1) = (amount_a, amount_b);
        } else {
            (pair.reserve0, pair.reserve1) = (amount_b, amount_a);
        }
        pair.timestamp = u32::try_from(now % (1 << 32))?;

        Ok((amount_a, amount_b, liquidity).abi_encode_params().into())
    }

    fn execute(&mut self, from: Address, to: Address, data: &[u8], now: u64) -> Result<Bytes> {
        let account = self
            .contracts
            .get(&to)
            .cloned()
            .ok_or_else(|| eyre!("no contract at {to}"))?;

        let out: Bytes = match account {
            Account::Factory { all, .. } => {
                match IUniswapV2Factory::IUniswapV2FactoryCalls::abi_decode(data, true)? {
                    IUniswapV2Factory::IUniswapV2FactoryCalls::createPair(c) => {
                        self.create_pair(to, c.tokenA, c.tokenB)?.abi_encode().into()
                    }
                    IUniswapV2Factory::IUniswapV2FactoryCalls::getPair(c) => {
                        self.get_pair(to, c.tokenA, c.tokenB).abi_encode().into()
                    }
                    IUniswapV2Factory::IUniswapV2FactoryCalls::allPairsLength(_) => {
                        U256::from(all.len()).abi_encode().into()
                    }
                    _ => bail!("mock factory does not model this call"),
                }
            }
            Account::Router { factory, weth } => {
                match IUniswapV2Router02::IUniswapV2Router02Calls::abi_decode(data, true)? {
                    IUniswapV2Router02::IUniswapV2Router02Calls::factory(_) => {
                        factory.abi_encode().into()
                    }
                    IUniswapV2Router02::IUniswapV2Router02Calls::WETH(_) => weth.abi_encode().into(),
                    IUniswapV2Router02::IUniswapV2Router02Calls::addLiquidity(c) => {
                        self.add_liquidity(to, from, &c, now)?
                    }
                }
            }
            Account::Token(_) => {
                let token = self.token_mut(to)?;
                match IERC20::IERC20Calls::abi_decode(data, true)? {
                    IERC20::IERC20Calls::balanceOf(c) => token.balance_of(c.account).abi_encode().into(),
                    IERC20::IERC20Calls::totalSupply(_) => token.total_supply.abi_encode().into(),
                    IERC20::IERC20Calls::allowance(c) => token
                        .allowances
                        .get(&(c.owner, c.spender))
                        .copied()
                        .unwrap_or_default()
                        .abi_encode()
                        .into(),
                    IERC20::IERC20Calls::approve(c) => {
                        token.allowances.insert((from, c.spender), c.amount);
                        true.abi_encode().into()
                    }
                    _ => bail!("mock token does not model this call"),
                }
            }
            Account::Pair(pair) => match IUniswapV2Pair::IUniswapV2PairCalls::abi_decode(data, true)? {
                IUniswapV2Pair::IUniswapV2PairCalls::token0(_) => pair.token0.abi_encode().into(),
                IUniswapV2Pair::IUniswapV2PairCalls::token1(_) => pair.token1.abi_encode().into(),
                IUniswapV2Pair::IUniswapV2PairCalls::getReserves(_) => {
                    (pair.reserve0, pair.reserve1, pair.timestamp).abi_encode_params().into()
                }
                IUniswapV2Pair::IUniswapV2PairCalls::balanceOf(c) => {
                    pair.lp.balance_of(c.owner).abi_encode().into()
                }
                IUniswapV2Pair::IUniswapV2PairCalls::totalSupply(_) => {
                    pair.lp.total_supply.abi_encode().into()
                }
                IUniswapV2Pair::IUniswapV2PairCalls::MINIMUM_LIQUIDITY(_) => {
                    MINIMUM_LIQUIDITY.abi_encode().into()
                }
                _ => bail!("mock pair does not model this call"),
            },
        };
        Ok(out)
    }
}

/// In-memory stand-in for a development node running the Uniswap V2 suite.
///
/// Models only what the liquidity fixture touches: deployments, approvals,
/// pair creation and the first `addLiquidity` into an empty pair.
pub struct MockChain {
    accounts: Vec<Address>,
    state: Mutex<State>,
    missing: HashSet<Contract>,
    clock_skew_secs: u64,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// A chain with ten funded accounts `0x..01` to `0x..0a`
    pub fn new() -> Self {
        Self::with_accounts((1..=10).map(Address::with_last_byte).collect())
    }

    /// A chain exposing exactly `accounts`
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            accounts,
            state: Mutex::new(State::default()),
            missing: HashSet::new(),
            clock_skew_secs: 0,
        }
    }

    /// Deployments of `contract` fail as if its artifact were missing
    pub fn without(mut self, contract: Contract) -> Self {
        self.missing.insert(contract);
        self
    }

    /// Block timestamps run `secs` ahead of the wall clock
    pub fn with_clock_skew(mut self, secs: u64) -> Self {
        self.clock_skew_secs = secs;
        self
    }

    /// Number of transactions mined so far, deployments included
    pub fn tx_count(&self) -> u64 {
        self.state.lock().unwrap().tx_count
    }

    fn now(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or_default() + self.clock_skew_secs
    }
}

#[async_trait]
impl ChainRuntime for MockChain {
    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.accounts.clone())
    }

    async fn deploy(&self, from: Address, contract: Contract, constructor_args: Bytes) -> Result<Address> {
        if self.missing.contains(&contract) {
            bail!("artifact {contract} not found");
        }
        let account = match contract {
            Contract::Factory => {
                Address::abi_decode(&constructor_args, true)?;
                Account::Factory { pairs: HashMap::new(), all: Vec::new() }
            }
            Contract::Router => {
                let (factory, weth) = <(Address, Address)>::abi_decode_params(&constructor_args, true)?;
                Account::Router { factory, weth }
            }
            Contract::Weth => Account::Token(Erc20::default()),
            Contract::MockErc20 => {
                <(sol_data::String, sol_data::String, sol_data::Uint<8>)>::abi_decode_params(&constructor_args, true)?;
                let mut token = Erc20::default();
                token.mint(from, MOCK_SUPPLY);
                Account::Token(token)
            }
            Contract::Pair => bail!("pairs are deployed by the factory"),
        };

        let mut state = self.state.lock().unwrap();
        let address = state.next_address();
        state.contracts.insert(address, account);
        state.tx_count += 1;
        Ok(address)
    }

    async fn read(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        // eth_call: run against a copy and throw the changes away
        let mut scratch = self.state.lock().unwrap().clone();
        scratch.execute(Address::ZERO, to, &calldata, self.now())
    }

    async fn write(&self, from: Address, to: Address, calldata: Bytes) -> Result<TxHash> {
        if !self.accounts.contains(&from) {
            bail!("sender {from} is not an unlocked account");
        }
        let now = self.now();
        let mut state = self.state.lock().unwrap();
        let mut next = state.clone();
        next.execute(from, to, &calldata, now)?;
        next.tx_count += 1;
        let hash = keccak256(next.tx_count.to_be_bytes());
        *state = next;
        Ok(hash)
    }
}
