use crate::console::console_error;

use super::provider::Provider;
use std::rc::Rc;
use wallet_connect::{
    ConnectError, ConnectionController, ConnectionState, ControllerOptions, ProviderError,
};
use web_sys::{window, Window};
use yew::prelude::*;

fn get_provider(window: &Option<Window>) -> Result<Provider, ProviderError> {
    let window: &Window =
        window.as_ref().ok_or(ProviderError::Unsupported("no window available".to_owned()))?;
    Provider::new(window)
}

/// What [`use_wallet`] hands to components: the latest state plus the
/// operations of the underlying controller.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletHandle {
    pub state: ConnectionState,
    controller: Rc<ConnectionController<Provider>>,
}

impl WalletHandle {
    /// Name of the injected wallet, `None` when there is none.
    pub fn wallet_name(&self) -> Option<&'static str> {
        self.controller.provider().map(Provider::wallet_name)
    }

    pub fn has_provider(&self) -> bool {
        self.controller.provider().is_some()
    }

    pub fn connect(&self) {
        let controller = ConnectionController::clone(&self.controller);
        wasm_bindgen_futures::spawn_local(async move {
            match controller.connect().await {
                Ok(_) | Err(ConnectError::Superseded) => {}
                Err(err) => console_error!("failed to connect wallet: {}", err),
            }
        });
    }

    pub fn disconnect(&self) {
        self.controller.disconnect();
    }

    pub fn refresh(&self) {
        let Some(address) = self.state.address.clone() else {
            return;
        };
        let controller = ConnectionController::clone(&self.controller);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = controller.refresh_balance_and_network(&address).await {
                console_error!("failed to refresh balance and network: {}", err);
            }
        });
    }
}

/// Connects the component tree to the injected wallet.
///
/// The controller is created once, listens to wallet events while the
/// component is mounted and stops when it unmounts.
#[hook]
pub fn use_wallet(options: ControllerOptions) -> WalletHandle {
    let controller = use_memo(
        move |_| {
            let provider = match get_provider(&window()) {
                Ok(provider) => Some(provider),
                Err(err) => {
                    console_error!("no wallet provider: {}", err);
                    None
                }
            };
            ConnectionController::new(provider, options)
        },
        (),
    );
    let state = use_state(ConnectionState::default);

    {
        let controller = controller.clone();
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                let observer = {
                    let state = state.clone();
                    controller.observe(move |snapshot| state.set(snapshot.clone()))
                };
                state.set(controller.snapshot());

                if controller.provider().is_some() {
                    let controller = ConnectionController::clone(&controller);
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(err) = controller.run().await {
                            console_error!("wallet events: {}", err);
                        }
                    });
                }

                move || {
                    controller.stop();
                    controller.unobserve(observer);
                }
            },
            (),
        );
    }

    WalletHandle { state: (*state).clone(), controller }
}
