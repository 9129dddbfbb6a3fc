#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chains;
pub mod config;
pub mod controller;
pub mod error;
pub mod provider;
pub mod state;
pub mod theme;
pub mod units;

#[cfg(test)]
mod mock;

pub use chains::{name_of, symbol_of, ChainId, ChainMetadata};
pub use config::{ChainChangePolicy, ControllerOptions};
pub use controller::ConnectionController;
pub use error::ConnectError;
pub use ethers::types::U256;
pub use provider::{EventListener, ProviderError, ProviderEvent, RpcError, WalletProvider};
pub use state::{ConnectionState, ConnectionStatus};
pub use theme::{Theme, ThemeError, ThemePreference, ThemeStore};
