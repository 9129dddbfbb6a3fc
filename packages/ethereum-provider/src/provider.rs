use crate::console::console_warn;
use js_sys::{Function, Object};
use serde::Serialize;
use std::vec::Vec;
use wallet_connect::{
    chains::{chain_id_from_number, parse_chain_id, ChainId},
    EventListener, ProviderError, ProviderEvent, WalletProvider, U256,
};
use wasm_bindgen::{closure::Closure, prelude::*, JsValue};
use web_sys::Window;

fn js_error(js: JsValue) -> ProviderError {
    ProviderError::Unsupported(format!("unsupported JS call: {:?}", js))
}

fn deserialize_error(err: serde_wasm_bindgen::Error) -> ProviderError {
    ProviderError::Deserialize(err.to_string())
}

/// `window.ethereum`, as injected by MetaMask and compatible wallets.
#[derive(Debug, PartialEq, Clone)]
pub struct Provider {
    this: JsValue,
    request: Function,
    // EIP-1193 uses EventEmitter instead of EventTarget for some god-forsaken reason
    on: Function,
    remove_listener: Function,
    // non-standards
    pub _is_coinbase_wallet: Option<bool>, // provided by CoinBase Wallet
    pub _is_meta_mask: Option<bool>,       // provided by MetaMask
}

impl Provider {
    pub fn new(win: &Window) -> Result<Self, ProviderError> {
        let provider =
            win.get("ethereum").ok_or(ProviderError::Unsupported("missing provider".to_owned()))?;
        Self::from_object(provider)
    }

    fn from_object(provider: Object) -> Result<Self, ProviderError> {
        let request = js_sys::Reflect::get(&provider, &JsValue::from("request")).map_err(js_error)?;
        let on = js_sys::Reflect::get(&provider, &JsValue::from("on")).map_err(js_error)?;
        let remove_listener =
            js_sys::Reflect::get(&provider, &JsValue::from("removeListener")).map_err(js_error)?;
        if !request.is_function() || !on.is_function() || !remove_listener.is_function() {
            return Err(ProviderError::Unsupported("provider is not EIP-1193 compliant".to_owned()));
        }
        let is_coinbase_wallet =
            js_sys::Reflect::get(&provider, &JsValue::from("isCoinbaseWallet")).ok();
        let is_meta_mask = js_sys::Reflect::get(&provider, &JsValue::from("isMetaMask")).ok();
        Ok(Self {
            this: provider.into(),
            request: request.into(),
            on: on.into(),
            remove_listener: remove_listener.into(),
            _is_coinbase_wallet: is_coinbase_wallet.and_then(|v| v.as_bool()),
            _is_meta_mask: is_meta_mask.and_then(|v| v.as_bool()),
        })
    }

    pub fn wallet_name(&self) -> &'static str {
        if self._is_coinbase_wallet.unwrap_or(false) {
            "CoinBase Wallet"
        } else if self._is_meta_mask.unwrap_or(false) {
            "MetaMask"
        } else {
            "Unknown"
        }
    }
}

fn parse_js<T: for<'de> serde::Deserialize<'de>>(data: JsValue) -> Result<T, ProviderError> {
    serde_wasm_bindgen::from_value(data).map_err(deserialize_error)
}

// chainChanged is sometimes emitted with a number instead of a hex string
fn parse_chain_payload(data: JsValue) -> Result<String, ProviderError> {
    if let Some(raw) = data.as_string() {
        return Ok(raw);
    }
    let number = data
        .as_f64()
        .ok_or_else(|| ProviderError::Deserialize(format!("invalid chain id: {:?}", data)))?;
    chain_id_from_number(number)
        .map(|chain_id| chain_id.to_string())
        .map_err(|err| ProviderError::Deserialize(err.to_string()))
}

pub type Callback = Closure<dyn Fn(JsValue)>;

static CHAIN_CHANGED: &str = "chainChanged";
static ACCOUNTS_CHANGED: &str = "accountsChanged";

impl Provider {
    pub fn on(&self, event: &str, callback: &Callback) -> Result<(), ProviderError> {
        self.on
            .call2(&self.this, &JsValue::from(event), callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(())
    }

    pub fn on_chain_changed(
        &self,
        callback: Box<dyn Fn(Result<String, ProviderError>)>,
    ) -> Result<Callback, ProviderError> {
        let closure = Closure::new(move |data: JsValue| callback(parse_chain_payload(data)));
        self.on(CHAIN_CHANGED, &closure)?;
        Ok(closure)
    }

    pub fn on_accounts_changed(
        &self,
        callback: Box<dyn Fn(Result<Vec<String>, ProviderError>)>,
    ) -> Result<Callback, ProviderError> {
        let closure = Closure::new(move |data: JsValue| callback(parse_js(data)));
        self.on(ACCOUNTS_CHANGED, &closure)?;
        Ok(closure)
    }

    pub fn remove_listener(&self, event: &str, callback: &Callback) -> Result<(), ProviderError> {
        self.remove_listener
            .call2(&self.this, &JsValue::from(event), callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(())
    }

    pub fn remove_chain_changed_listener(&self, callback: &Callback) -> Result<(), ProviderError> {
        self.remove_listener(CHAIN_CHANGED, callback)
    }

    pub fn remove_accounts_changed_listener(
        &self,
        callback: &Callback,
    ) -> Result<(), ProviderError> {
        self.remove_listener(ACCOUNTS_CHANGED, callback)
    }
}

/// Argument of `ethereum.request`. Every method used here takes positional
/// params.
#[derive(Serialize)]
pub struct RequestMethod<'a, T> {
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<T>>,
}

static REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
static ACCOUNTS: &str = "eth_accounts";
static CHAIN_ID: &str = "eth_chainId";
static GET_BALANCE: &str = "eth_getBalance";

impl Provider {
    pub async fn request<T: Serialize>(
        &self,
        method: &str,
        params: Option<Vec<T>>,
    ) -> Result<JsValue, ProviderError> {
        let args = serde_wasm_bindgen::to_value(&RequestMethod { method, params })
            .map_err(deserialize_error)?;
        let promise = self.request.call1(&self.this, &args).map_err(js_error)?;
        wasm_bindgen_futures::JsFuture::from(js_sys::Promise::from(promise)).await.map_err(|e| {
            match serde_wasm_bindgen::from_value(e) {
                Ok(err) => ProviderError::Rpc(err),
                Err(err) => ProviderError::Deserialize(err.to_string()),
            }
        })
    }

    pub async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let data = self.request::<()>(REQUEST_ACCOUNTS, None).await?;
        parse_js(data)
    }

    pub async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        let data = self.request::<()>(ACCOUNTS, None).await?;
        parse_js(data)
    }

    pub async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let data = self.request::<()>(CHAIN_ID, None).await?;
        let raw: String = parse_js(data)?;
        parse_chain_id(&raw).map_err(|err| ProviderError::Deserialize(err.to_string()))
    }

    pub async fn balance(&self, address: &str) -> Result<U256, ProviderError> {
        let data = self
            .request(
                GET_BALANCE,
                Some(vec![address, "latest"]),
            )
            .await?;
        let raw: String = parse_js(data)?;
        U256::from_str_radix(raw.trim_start_matches("0x"), 16)
            .map_err(|err| ProviderError::Deserialize(format!("invalid balance {:?}: {}", raw, err)))
    }
}

/// Listeners registered by [`WalletProvider::subscribe`]; dropping them
/// without unsubscribing leaves dangling callbacks in the wallet.
pub struct Subscription {
    accounts_changed: Callback,
    chain_changed: Callback,
}

#[async_trait::async_trait(?Send)]
impl WalletProvider for Provider {
    type Subscription = Subscription;

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        Provider::request_accounts(self).await
    }

    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        Provider::accounts(self).await
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        Provider::chain_id(self).await
    }

    async fn balance(&self, address: &str) -> Result<U256, ProviderError> {
        Provider::balance(self, address).await
    }

    fn subscribe(&self, listener: EventListener) -> Result<Subscription, ProviderError> {
        let accounts_changed = {
            let listener = listener.clone();
            self.on_accounts_changed(Box::new(move |accounts| match accounts {
                Ok(accounts) => listener(ProviderEvent::AccountsChanged(accounts)),
                Err(err) => console_warn!("ignoring accountsChanged: {}", err),
            }))?
        };
        let chain_changed = self.on_chain_changed(Box::new(move |chain_id| match chain_id {
            Ok(chain_id) => listener(ProviderEvent::ChainChanged(chain_id)),
            Err(err) => console_warn!("ignoring chainChanged: {}", err),
        }));
        let chain_changed = match chain_changed {
            Ok(chain_changed) => chain_changed,
            Err(err) => {
                let _ = self.remove_accounts_changed_listener(&accounts_changed);
                return Err(err);
            }
        };
        Ok(Subscription { accounts_changed, chain_changed })
    }

    fn unsubscribe(&self, subscription: Subscription) -> Result<(), ProviderError> {
        let accounts = self.remove_accounts_changed_listener(&subscription.accounts_changed);
        let chain = self.remove_chain_changed_listener(&subscription.chain_changed);
        accounts.and(chain)
    }
}
