use wallet_connect::{ConnectionState, ConnectionStatus};

pub(crate) fn get_status(state: &ConnectionState) -> &'static str {
    match state.status() {
        ConnectionStatus::Disconnected => "not connected",
        ConnectionStatus::Connecting => "connecting...",
        ConnectionStatus::Connected => "connected",
    }
}

pub(crate) fn get_network(state: &ConnectionState) -> String {
    match (state.network_name(), state.chain_id) {
        (Some(name), Some(chain_id)) => format!("{} (chain {})", name, chain_id),
        _ => "loading...".to_owned(),
    }
}

pub(crate) fn get_balance(state: &ConnectionState) -> String {
    state.display_balance().unwrap_or_else(|| "loading...".to_owned())
}
