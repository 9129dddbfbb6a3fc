//! Wallet connection lifecycle.
//!
//! [`ConnectionController`] is the single writer of [`ConnectionState`]. The UI
//! reads snapshots (or observes changes) and calls the operations below; the
//! wallet pushes account and chain events which are applied in arrival order by
//! [`ConnectionController::run`].
//!
//! Everything runs on one thread. Provider calls suspend without holding any
//! borrow of the state, so a disconnect or an account switch can land while a
//! request is in flight. Results are therefore checked against two counters
//! before being applied:
//!
//! * `session` changes on every reset (explicit disconnect, empty account list,
//!   restart), and guards connect requests;
//! * `epoch` changes on every reset, account switch and chain switch, and
//!   guards balance/network refreshes.

use crate::{
    chains::{self, parse_chain_id},
    config::{ChainChangePolicy, ControllerOptions},
    error::ConnectError,
    provider::{EventListener, ProviderError, ProviderEvent, WalletProvider},
    state::ConnectionState,
    units::format_balance,
};
use futures_channel::mpsc::{self, UnboundedSender};
use futures_util::StreamExt;
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};
use tracing::{debug, instrument, warn};

pub type ObserverId = usize;

type Observer = Rc<dyn Fn(&ConnectionState)>;

struct Inner<P> {
    provider: Option<P>,
    options: ControllerOptions,
    state: RefCell<ConnectionState>,
    session: Cell<u64>,
    epoch: Cell<u64>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
    next_observer: Cell<ObserverId>,
    events: RefCell<Option<UnboundedSender<ProviderEvent>>>,
    stopped: Cell<bool>,
}

/// Cheap to clone; clones share the same state.
pub struct ConnectionController<P: WalletProvider> {
    inner: Rc<Inner<P>>,
}

impl<P: WalletProvider> Clone for ConnectionController<P> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<P: WalletProvider> PartialEq for ConnectionController<P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P: WalletProvider> fmt::Debug for ConnectionController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionController")
            .field("has_provider", &self.inner.provider.is_some())
            .field("state", &self.inner.state.borrow())
            .finish()
    }
}

impl<P: WalletProvider> ConnectionController<P> {
    /// `provider` is `None` when no wallet is injected in the page.
    pub fn new(provider: Option<P>, options: ControllerOptions) -> Self {
        Self {
            inner: Rc::new(Inner {
                provider,
                options,
                state: RefCell::new(ConnectionState::default()),
                session: Cell::new(0),
                epoch: Cell::new(0),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
                events: RefCell::new(None),
                stopped: Cell::new(false),
            }),
        }
    }

    pub fn provider(&self) -> Option<&P> {
        self.inner.provider.as_ref()
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.inner.options
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    /// Calls `observer` with the new state after every change.
    pub fn observe(&self, observer: impl Fn(&ConnectionState) + 'static) -> ObserverId {
        let id = self.inner.next_observer.get();
        self.inner.next_observer.set(id + 1);
        self.inner.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unobserve(&self, id: ObserverId) {
        self.inner.observers.borrow_mut().retain(|(observer, _)| *observer != id);
    }

    fn update<T>(&self, f: impl FnOnce(&mut ConnectionState) -> T) -> T {
        let (result, snapshot) = {
            let mut state = self.inner.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        let observers: Vec<Observer> =
            self.inner.observers.borrow().iter().map(|(_, observer)| observer.clone()).collect();
        for observer in observers {
            observer(&snapshot);
        }
        result
    }

    fn bump_epoch(&self) {
        self.inner.epoch.set(self.inner.epoch.get().wrapping_add(1));
    }

    fn reset(&self, error: Option<String>) {
        self.inner.session.set(self.inner.session.get().wrapping_add(1));
        self.bump_epoch();
        self.update(|state| *state = ConnectionState { error, ..Default::default() });
    }

    /// Makes `address` the active account. Chain-scoped data belonging to a
    /// previous account is dropped so it is never displayed for the new one.
    /// Returns whether the account actually changed.
    fn adopt_account(&self, state: &mut ConnectionState, address: &str) -> bool {
        if state.is_current(address) {
            return false;
        }
        self.bump_epoch();
        state.address = Some(address.to_owned());
        state.balance = None;
        state.chain_id = None;
        true
    }

    /// Asks the wallet for account access, prompting the user if needed.
    ///
    /// The outcome is always reflected in the state: failures land in
    /// [`ConnectionState::error`] and `is_connecting` is cleared. A result
    /// superseded by a disconnect writes nothing.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<String, ConnectError> {
        let Some(provider) = self.inner.provider.as_ref() else {
            warn!("no wallet provider available");
            self.reset(Some(ConnectError::Unavailable.to_string()));
            return Err(ConnectError::Unavailable);
        };

        let session = self.inner.session.get();
        self.update(|state| {
            state.is_connecting = true;
            state.error = None;
        });

        let result = match provider.request_accounts().await {
            Ok(accounts) => accounts.into_iter().next().ok_or(ConnectError::NoAccounts),
            Err(err) => {
                debug!("account request failed: {}", err);
                Err(ConnectError::from(err))
            }
        };

        // the reset that superseded us already cleared is_connecting, and a
        // newer connect may have set it again since
        if self.inner.session.get() != session {
            debug!("discarding connect result from a superseded session");
            return Err(ConnectError::Superseded);
        }

        match result {
            Ok(address) => {
                let changed = self.update(|state| {
                    state.is_connecting = false;
                    state.error = None;
                    self.adopt_account(state, &address)
                });
                debug!(%address, changed, "wallet connected");
                let _ = self.refresh_balance_and_network(&address).await;
                Ok(address)
            }
            Err(err) => {
                warn!("failed to connect wallet: {}", err);
                self.update(|state| {
                    state.is_connecting = false;
                    state.error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Forgets the connection locally. The wallet itself is not notified.
    pub fn disconnect(&self) {
        debug!("disconnecting");
        self.reset(None);
    }

    /// Fetches the chain id and native balance of `address`.
    ///
    /// Failures are logged and returned but never touch the state: a connection
    /// stays valid even if its metadata cannot be refreshed.
    #[instrument(skip(self))]
    pub async fn refresh_balance_and_network(&self, address: &str) -> Result<(), ProviderError> {
        let Some(provider) = self.inner.provider.as_ref() else {
            return Err(ProviderError::Unsupported("missing provider".to_owned()));
        };

        let epoch = self.inner.epoch.get();
        let fetched = async {
            let chain_id = provider.chain_id().await?;
            let balance = provider.balance(address).await?;
            Ok::<_, ProviderError>((chain_id, balance))
        }
        .await;

        let (chain_id, balance) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(%address, "failed to refresh balance and network: {}", err);
                return Err(err);
            }
        };

        if self.inner.epoch.get() != epoch || !self.inner.state.borrow().is_current(address) {
            debug!(%address, "discarding stale balance and network");
            return Ok(());
        }

        let balance = format_balance(balance, self.inner.options.balance_decimals);
        debug!(
            chain_id,
            network = %chains::name_of(chain_id),
            symbol = chains::symbol_of(chain_id),
            %balance,
            "refreshed balance and network"
        );
        self.update(|state| {
            state.chain_id = Some(chain_id);
            state.balance = Some(balance);
        });
        Ok(())
    }

    /// Adopts an account the wallet already authorized, without prompting.
    /// Meant to run once at startup; [`ConnectionController::run`] does it.
    #[instrument(skip(self))]
    pub async fn resume_session(&self) -> Option<String> {
        let provider = self.inner.provider.as_ref()?;
        let session = self.inner.session.get();

        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!("failed to check for an existing connection: {}", err);
                return None;
            }
        };

        if self.inner.session.get() != session {
            debug!("discarding resumed session superseded by a disconnect");
            return None;
        }

        let Some(address) = accounts.into_iter().next() else {
            debug!("no previously authorized account");
            return None;
        };

        let changed = self.update(|state| self.adopt_account(state, &address));
        debug!(%address, changed, "resumed session");
        if changed {
            let _ = self.refresh_balance_and_network(&address).await;
        }
        Some(address)
    }

    /// Applies a wallet notification.
    pub async fn handle_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts).await,
            ProviderEvent::ChainChanged(chain_id) => self.on_chain_changed(&chain_id).await,
        }
    }

    async fn on_accounts_changed(&self, accounts: Vec<String>) {
        let Some(address) = accounts.into_iter().next() else {
            debug!("wallet reported no accounts");
            self.disconnect();
            return;
        };

        let changed = self.update(|state| self.adopt_account(state, &address));
        if changed {
            debug!(%address, "account changed");
            let _ = self.refresh_balance_and_network(&address).await;
        }
    }

    async fn on_chain_changed(&self, raw: &str) {
        let Some(address) = self.snapshot().address else {
            debug!(chain_id = raw, "ignoring chain change while disconnected");
            return;
        };

        match self.inner.options.chain_change {
            ChainChangePolicy::Rederive => {
                let chain_id = match parse_chain_id(raw) {
                    Ok(chain_id) => Some(chain_id),
                    Err(err) => {
                        warn!("{}", err);
                        None
                    }
                };
                debug!(?chain_id, "chain changed");
                self.bump_epoch();
                self.update(|state| {
                    state.chain_id = chain_id;
                    state.balance = None;
                });
                let _ = self.refresh_balance_and_network(&address).await;
            }
            ChainChangePolicy::Restart => {
                debug!(chain_id = raw, "chain changed, restarting session");
                self.reset(None);
                self.resume_session().await;
            }
        }
    }

    /// Subscribes to the wallet, resumes any existing session, then applies
    /// wallet events in arrival order until [`ConnectionController::stop`].
    ///
    /// The subscription is always released before returning. A stopped
    /// controller cannot be run again.
    pub async fn run(&self) -> Result<(), ProviderError> {
        let Some(provider) = self.inner.provider.as_ref() else {
            return Err(ProviderError::Unsupported("missing provider".to_owned()));
        };
        if self.inner.stopped.get() {
            return Ok(());
        }

        let (tx, mut rx) = mpsc::unbounded();
        let listener: EventListener = {
            let tx = tx.clone();
            Rc::new(move |event| {
                if tx.unbounded_send(event).is_err() {
                    debug!("dropping wallet event received after stop");
                }
            })
        };
        let subscription = provider.subscribe(listener)?;
        self.inner.events.replace(Some(tx));
        debug!("listening to wallet events");

        self.resume_session().await;
        while let Some(event) = rx.next().await {
            debug!(?event, "wallet event");
            self.handle_event(event).await;
        }

        self.inner.events.take();
        debug!("stopped listening to wallet events");
        provider.unsubscribe(subscription)
    }

    /// Makes [`ConnectionController::run`] return once the events already
    /// received are applied.
    pub fn stop(&self) {
        self.inner.stopped.set(true);
        if let Some(tx) = self.inner.events.borrow_mut().take() {
            tx.close_channel();
        }
    }
}
