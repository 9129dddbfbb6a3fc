use crate::provider::{ErrorCode, ProviderError};

/// Why a connect attempt failed. The `Display` output is what the UI shows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("wallet not available")]
    Unavailable,
    #[error("request rejected")]
    Rejected,
    /// Another permission prompt is open; the user has to answer it in the wallet.
    #[error("request already pending")]
    AlreadyPending,
    #[error("no accounts available")]
    NoAccounts,
    #[error("{0}")]
    Provider(String),
    #[error("failed to connect wallet")]
    Failed,
    /// A disconnect landed while the request was in flight.
    #[error("connection attempt superseded")]
    Superseded,
}

impl From<ProviderError> for ConnectError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rpc(rpc) => match rpc.kind() {
                ErrorCode::UserRejectedRequest => Self::Rejected,
                ErrorCode::RequestPending => Self::AlreadyPending,
                _ if rpc.message.trim().is_empty() => Self::Failed,
                _ => Self::Provider(rpc.message),
            },
            other => Self::Provider(other.to_string()),
        }
    }
}
