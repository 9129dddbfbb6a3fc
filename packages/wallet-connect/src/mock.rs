//! Scriptable in-memory [`WalletProvider`] used by the controller tests.

use crate::{
    chains::ChainId,
    provider::{EventListener, ProviderError, ProviderEvent, RpcError, WalletProvider},
};
use async_trait::async_trait;
use ethers::types::U256;
use futures_channel::oneshot;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

type Gate = (oneshot::Sender<()>, oneshot::Receiver<()>);

#[derive(Default)]
struct State {
    requested: RefCell<Vec<Result<Vec<String>, ProviderError>>>,
    authorized: RefCell<Vec<String>>,
    authorized_error: RefCell<Option<ProviderError>>,
    chain_id: Cell<ChainId>,
    balances: RefCell<HashMap<String, U256>>,
    balance_error: RefCell<Option<ProviderError>>,
    request_gate: RefCell<Option<Gate>>,
    accounts_gate: RefCell<Option<Gate>>,
    balance_gate: RefCell<Option<Gate>>,
    listeners: RefCell<Vec<(usize, EventListener)>>,
    next_listener: Cell<usize>,
}

/// Cloning shares the underlying state, so tests keep a handle after moving a
/// copy into the controller.
#[derive(Clone, Default)]
pub(crate) struct MockProvider {
    state: Rc<State>,
}

pub(crate) fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::exp10(18)
}

/// Returned by the `hold_*` helpers: resolves once the provider call started,
/// and lets it finish when fired.
pub(crate) struct Hold {
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

fn gate() -> (Gate, Hold) {
    let (started_tx, started_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel();
    ((started_tx, release_rx), Hold { started: started_rx, release: release_tx })
}

async fn pass(gate: Option<Gate>) {
    if let Some((started, release)) = gate {
        let _ = started.send(());
        let _ = release.await;
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer of the next `eth_requestAccounts`. An empty queue
    /// answers with the authorized accounts.
    pub fn on_request(&self, response: Result<Vec<&str>, RpcError>) -> &Self {
        let response = response
            .map(|accounts| accounts.into_iter().map(str::to_owned).collect())
            .map_err(ProviderError::Rpc);
        self.state.requested.borrow_mut().push(response);
        self
    }

    pub fn authorize(&self, accounts: &[&str]) -> &Self {
        *self.state.authorized.borrow_mut() = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn fail_accounts(&self, err: Option<ProviderError>) -> &Self {
        *self.state.authorized_error.borrow_mut() = err;
        self
    }

    pub fn set_chain(&self, chain_id: ChainId) -> &Self {
        self.state.chain_id.set(chain_id);
        self
    }

    pub fn set_balance(&self, address: &str, wei: U256) -> &Self {
        self.state.balances.borrow_mut().insert(address.to_lowercase(), wei);
        self
    }

    pub fn fail_balance(&self, err: Option<ProviderError>) -> &Self {
        *self.state.balance_error.borrow_mut() = err;
        self
    }

    pub fn hold_request(&self) -> Hold {
        let (gate, hold) = gate();
        *self.state.request_gate.borrow_mut() = Some(gate);
        hold
    }

    pub fn hold_accounts(&self) -> Hold {
        let (gate, hold) = gate();
        *self.state.accounts_gate.borrow_mut() = Some(gate);
        hold
    }

    pub fn hold_balance(&self) -> Hold {
        let (gate, hold) = gate();
        *self.state.balance_gate.borrow_mut() = Some(gate);
        hold
    }

    pub fn emit(&self, event: ProviderEvent) {
        let listeners: Vec<_> =
            self.state.listeners.borrow().iter().map(|(_, listener)| listener.clone()).collect();
        for listener in listeners {
            listener(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    type Subscription = usize;

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let gate = self.state.request_gate.borrow_mut().take();
        pass(gate).await;
        let mut requested = self.state.requested.borrow_mut();
        if requested.is_empty() {
            return Ok(self.state.authorized.borrow().clone());
        }
        requested.remove(0)
    }

    async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
        let gate = self.state.accounts_gate.borrow_mut().take();
        pass(gate).await;
        if let Some(err) = self.state.authorized_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.state.authorized.borrow().clone())
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        Ok(self.state.chain_id.get())
    }

    async fn balance(&self, address: &str) -> Result<U256, ProviderError> {
        let gate = self.state.balance_gate.borrow_mut().take();
        pass(gate).await;
        if let Some(err) = self.state.balance_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.state.balances.borrow().get(&address.to_lowercase()).copied().unwrap_or_default())
    }

    fn subscribe(&self, listener: EventListener) -> Result<usize, ProviderError> {
        let id = self.state.next_listener.get();
        self.state.next_listener.set(id + 1);
        self.state.listeners.borrow_mut().push((id, listener));
        Ok(id)
    }

    fn unsubscribe(&self, subscription: usize) -> Result<(), ProviderError> {
        let mut listeners = self.state.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        if listeners.len() == before {
            return Err(ProviderError::Unsupported(format!("unknown listener {}", subscription)));
        }
        Ok(())
    }
}
