use crate::chains::ChainId;
use async_trait::async_trait;
use ethers::types::U256;
use serde::Deserialize;
use serde_json::Value;
use std::{fmt, rc::Rc};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("rpc error: {0}")]
    Rpc(RpcError),
    #[error("deserialize error: {0}")]
    Deserialize(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Well-known EIP-1193 and JSON-RPC error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserRejectedRequest,
    Unauthorized,
    UnsupportedMethod,
    Disconnected,
    ChainDisconnected,
    /// MetaMask's `-32002`: a permission prompt is already open.
    RequestPending,
    Other(i64),
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            4001 => Self::UserRejectedRequest,
            4100 => Self::Unauthorized,
            4200 => Self::UnsupportedMethod,
            4900 => Self::Disconnected,
            4901 => Self::ChainDisconnected,
            -32002 => Self::RequestPending,
            other => Self::Other(other),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    pub fn kind(&self) -> ErrorCode {
        ErrorCode::from(self.code)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "error {:?}: {}", self.kind(), self.message)
    }
}

impl From<RpcError> for ProviderError {
    fn from(err: RpcError) -> Self {
        Self::Rpc(err)
    }
}

/// Notifications pushed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    /// Raw chain id payload, usually hex (`"0x89"`).
    ChainChanged(String),
}

pub type EventListener = Rc<dyn Fn(ProviderEvent)>;

/// The wallet capability injected into the page (EIP-1193).
///
/// Futures are not `Send`: browser providers live on the single JS thread.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Handle returned by [`WalletProvider::subscribe`], needed to unsubscribe.
    type Subscription;

    /// `eth_requestAccounts`, may prompt the user.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// `eth_accounts`, never prompts.
    async fn accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// `eth_chainId`
    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    /// `eth_getBalance` at the latest block, in wei.
    async fn balance(&self, address: &str) -> Result<U256, ProviderError>;

    /// Registers `listener` for `accountsChanged` and `chainChanged`.
    fn subscribe(&self, listener: EventListener) -> Result<Self::Subscription, ProviderError>;

    fn unsubscribe(&self, subscription: Self::Subscription) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_error_codes() {
        assert_eq!(RpcError::new(4001, "User rejected").kind(), ErrorCode::UserRejectedRequest);
        assert_eq!(RpcError::new(-32002, "pending").kind(), ErrorCode::RequestPending);
        assert_eq!(RpcError::new(4901, "").kind(), ErrorCode::ChainDisconnected);
        assert_eq!(RpcError::new(-32603, "internal").kind(), ErrorCode::Other(-32603));
    }

    #[test]
    fn it_deserializes_wallet_errors() {
        let err: RpcError =
            serde_json::from_str(r#"{"code":4001,"message":"User denied account authorization"}"#)
                .unwrap();
        assert_eq!(err.kind(), ErrorCode::UserRejectedRequest);
        assert_eq!(err.data, None);

        let err: RpcError = serde_json::from_str(r#"{"code":-32002}"#).unwrap();
        assert_eq!(err.message, "");
    }
}
