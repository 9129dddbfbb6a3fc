use crate::chains::{self, ChainId};
use std::borrow::Cow;

/// Coarse connection status derived from [`ConnectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Snapshot of the wallet connection as displayed by the UI.
///
/// Network name and native symbol are derived from `chain_id` on every read so
/// they can never disagree with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub address: Option<String>,
    /// Native balance, already formatted for display.
    pub balance: Option<String>,
    pub chain_id: Option<ChainId>,
    pub is_connecting: bool,
    /// Last connect failure. Background refresh failures never land here.
    pub error: Option<String>,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn status(&self) -> ConnectionStatus {
        if self.is_connecting {
            ConnectionStatus::Connecting
        } else if self.is_connected() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    pub fn network_name(&self) -> Option<Cow<'static, str>> {
        self.chain_id.map(chains::name_of)
    }

    pub fn native_symbol(&self) -> &'static str {
        self.chain_id.map_or(chains::DEFAULT_SYMBOL, chains::symbol_of)
    }

    /// `0x1234...5678`, or the full address when it is too short to elide.
    pub fn short_address(&self) -> Option<String> {
        self.address.as_deref().map(|address| {
            match (address.get(..6), address.get(address.len().saturating_sub(4)..)) {
                (Some(head), Some(tail)) if address.len() > 10 => format!("{}...{}", head, tail),
                _ => address.to_owned(),
            }
        })
    }

    /// Balance followed by the native symbol, e.g. `1.2345 MATIC`.
    pub fn display_balance(&self) -> Option<String> {
        self.balance.as_ref().map(|balance| format!("{} {}", balance, self.native_symbol()))
    }

    pub(crate) fn is_current(&self, address: &str) -> bool {
        self.address.as_deref().map_or(false, |current| current.eq_ignore_ascii_case(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected(chain_id: Option<ChainId>) -> ConnectionState {
        ConnectionState {
            address: Some("0x1234567890123456789012345678901234567890".to_owned()),
            balance: Some("0.5000".to_owned()),
            chain_id,
            ..Default::default()
        }
    }

    #[test]
    fn it_starts_disconnected() {
        let state = ConnectionState::default();
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
        assert!(!state.is_connected());
        assert_eq!(state.network_name(), None);
        assert_eq!(state.native_symbol(), "ETH");
        assert_eq!(state.short_address(), None);
        assert_eq!(state.display_balance(), None);
    }

    #[test]
    fn it_derives_network_from_chain_id() {
        let state = connected(Some(137));
        assert_eq!(state.status(), ConnectionStatus::Connected);
        assert_eq!(state.network_name().as_deref(), Some("Polygon Mainnet"));
        assert_eq!(state.native_symbol(), "MATIC");
        assert_eq!(state.display_balance().as_deref(), Some("0.5000 MATIC"));

        let state = connected(Some(424242));
        assert_eq!(state.network_name().as_deref(), Some("Unknown Network (424242)"));
        assert_eq!(state.native_symbol(), "ETH");
    }

    #[test]
    fn it_reports_connecting_over_connected() {
        let state = ConnectionState { is_connecting: true, ..connected(Some(1)) };
        assert_eq!(state.status(), ConnectionStatus::Connecting);
    }

    #[test]
    fn it_shortens_addresses() {
        assert_eq!(connected(None).short_address().as_deref(), Some("0x1234...7890"));

        let state = ConnectionState { address: Some("0x1234".to_owned()), ..Default::default() };
        assert_eq!(state.short_address().as_deref(), Some("0x1234"));
    }

    #[test]
    fn it_compares_addresses_case_insensitively() {
        let state = ConnectionState { address: Some("0xAbCdEf".to_owned()), ..Default::default() };
        assert!(state.is_current("0xabcdef"));
        assert!(!state.is_current("0xabcde0"));
        assert!(!ConnectionState::default().is_current("0xabcdef"));
    }
}
