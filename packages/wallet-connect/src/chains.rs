//! Chain identifier classification.
//!
//! Chain ids come straight from the wallet, which can be pointed at any custom
//! network, so every lookup here is total: unknown ids fall back to a generic
//! name and the `ETH` symbol instead of failing.

use std::borrow::Cow;

/// Numeric identifier of an EVM network (EIP-155).
pub type ChainId = u64;

/// Symbol used for chains missing from the registry; most custom networks are
/// EVM-compatible and use ether as their gas token.
pub const DEFAULT_SYMBOL: &str = "ETH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainCategory {
    Mainnet,
    Testnet,
    Development,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub id: ChainId,
    pub name: &'static str,
    pub symbol: &'static str,
    pub category: ChainCategory,
}

/// Display metadata for a chain, registered or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMetadata {
    pub name: Cow<'static, str>,
    pub native_symbol: &'static str,
}

const fn chain(
    id: ChainId,
    name: &'static str,
    symbol: &'static str,
    category: ChainCategory,
) -> ChainInfo {
    ChainInfo { id, name, symbol, category }
}

use ChainCategory::{Development, Mainnet, Testnet};

static CHAINS: &[ChainInfo] = &[
    // Ethereum
    chain(1, "Ethereum Mainnet", "ETH", Mainnet),
    chain(5, "Goerli Testnet", "ETH", Testnet),
    chain(11155111, "Sepolia Testnet", "ETH", Testnet),
    chain(17000, "Holesky Testnet", "ETH", Testnet),
    // Polygon
    chain(137, "Polygon Mainnet", "MATIC", Mainnet),
    chain(80001, "Mumbai Testnet", "MATIC", Testnet),
    chain(80002, "Amoy Testnet", "MATIC", Testnet),
    // BSC
    chain(56, "BSC Mainnet", "BNB", Mainnet),
    chain(97, "BSC Testnet", "BNB", Testnet),
    // Arbitrum
    chain(42161, "Arbitrum One", "ETH", Mainnet),
    chain(42170, "Arbitrum Nova", "ETH", Mainnet),
    chain(421613, "Arbitrum Goerli", "ETH", Testnet),
    chain(421614, "Arbitrum Sepolia", "ETH", Testnet),
    // Optimism
    chain(10, "Optimism", "ETH", Mainnet),
    chain(420, "Optimism Goerli", "ETH", Testnet),
    chain(11155420, "Optimism Sepolia", "ETH", Testnet),
    // Base
    chain(8453, "Base", "ETH", Mainnet),
    chain(84531, "Base Goerli", "ETH", Testnet),
    chain(84532, "Base Sepolia", "ETH", Testnet),
    // Avalanche
    chain(43114, "Avalanche C-Chain", "AVAX", Mainnet),
    chain(43113, "Avalanche Fuji", "AVAX", Testnet),
    // Fantom
    chain(250, "Fantom Opera", "FTM", Mainnet),
    chain(4002, "Fantom Testnet", "FTM", Testnet),
    // zkSync
    chain(324, "zkSync Era", "ETH", Mainnet),
    chain(280, "zkSync Era Testnet", "ETH", Testnet),
    // Linea
    chain(59144, "Linea", "ETH", Mainnet),
    chain(59140, "Linea Testnet", "ETH", Testnet),
    // Scroll
    chain(534352, "Scroll", "ETH", Mainnet),
    chain(534351, "Scroll Sepolia", "ETH", Testnet),
    // Mantle
    chain(5000, "Mantle", "MNT", Mainnet),
    chain(5001, "Mantle Testnet", "MNT", Testnet),
    // Celo
    chain(42220, "Celo", "CELO", Mainnet),
    chain(44787, "Celo Alfajores", "CELO", Testnet),
    // Gnosis
    chain(100, "Gnosis Chain", "xDAI", Mainnet),
    chain(10200, "Gnosis Chiado", "xDAI", Testnet),
    // Moonbeam
    chain(1284, "Moonbeam", "GLMR", Mainnet),
    chain(1287, "Moonbase Alpha", "DEV", Testnet),
    // Sei
    chain(1329, "Sei Mainnet", "SEI", Mainnet),
    chain(713715, "Sei Testnet", "SEI", Testnet),
    // Intuition
    chain(13579, "Intuition Testnet", "TRUST", Testnet),
    // Local
    chain(1337, "Localhost", "ETH", Development),
    chain(31337, "Hardhat Network", "ETH", Development),
];

/// All registered chains.
pub fn chains() -> &'static [ChainInfo] {
    CHAINS
}

pub fn lookup(chain_id: ChainId) -> Option<&'static ChainInfo> {
    CHAINS.iter().find(|chain| chain.id == chain_id)
}

/// Human readable network name, `Unknown Network ({id})` when unregistered.
pub fn name_of(chain_id: ChainId) -> Cow<'static, str> {
    match lookup(chain_id) {
        Some(chain) => Cow::Borrowed(chain.name),
        None => Cow::Owned(format!("Unknown Network ({})", chain_id)),
    }
}

/// Native currency symbol, [`DEFAULT_SYMBOL`] when unregistered.
pub fn symbol_of(chain_id: ChainId) -> &'static str {
    lookup(chain_id).map_or(DEFAULT_SYMBOL, |chain| chain.symbol)
}

pub fn category_of(chain_id: ChainId) -> Option<ChainCategory> {
    lookup(chain_id).map(|chain| chain.category)
}

pub fn metadata(chain_id: ChainId) -> ChainMetadata {
    ChainMetadata { name: name_of(chain_id), native_symbol: symbol_of(chain_id) }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid chain id: {0:?}")]
pub struct ParseChainIdError(String);

/// Parses a chain id as reported by a provider: `0x`-prefixed hex (EIP-1193)
/// or plain decimal (some wallets send numbers).
pub fn parse_chain_id(raw: &str) -> Result<ChainId, ParseChainIdError> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => ChainId::from_str_radix(hex, 16),
        None => raw.parse::<ChainId>(),
    };
    parsed.map_err(|_| ParseChainIdError(raw.to_owned()))
}

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts a chain id some wallets send as a JS number. NaN, negative,
/// fractional and imprecise values are rejected instead of truncated.
pub fn chain_id_from_number(value: f64) -> Result<ChainId, ParseChainIdError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_SAFE_INTEGER {
        Ok(value as ChainId)
    } else {
        Err(ParseChainIdError(value.to_string()))
    }
}
