#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod console;

pub mod provider;
pub use provider::{Provider, Subscription};
pub use wallet_connect::ProviderError;

#[cfg(feature = "yew")]
pub mod yew;
