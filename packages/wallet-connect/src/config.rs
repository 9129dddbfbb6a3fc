/// What the controller does when the wallet reports a chain switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainChangePolicy {
    /// Drop chain-scoped data (chain id, balance) and fetch it again for the
    /// current account.
    #[default]
    Rederive,
    /// Forget the whole session and resume it from the wallet's authorized
    /// accounts, without prompting.
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub chain_change: ChainChangePolicy,
    /// Fractional digits kept when formatting balances.
    pub balance_decimals: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self { chain_change: ChainChangePolicy::default(), balance_decimals: 4 }
    }
}
