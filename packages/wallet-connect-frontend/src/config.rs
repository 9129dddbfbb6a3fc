use tracing::Level;
use wallet_connect::{ChainChangePolicy, ControllerOptions};

/// `localStorage` key of the theme flag.
pub(crate) const THEME_STORAGE_KEY: &str = "theme";

pub(crate) const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Wallet failures are logged at `warn`; `debug` traces every state change.
pub(crate) const LOG_LEVEL: Level = Level::INFO;

pub(crate) fn controller_options() -> ControllerOptions {
    ControllerOptions { chain_change: ChainChangePolicy::Rederive, balance_decimals: 4 }
}
