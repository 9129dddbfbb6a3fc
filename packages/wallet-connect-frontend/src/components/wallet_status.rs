use crate::{components::label::Label, helpers::wallet};
use ethereum_provider::yew::WalletHandle;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct WalletStatusProps {
    pub wallet: WalletHandle,
}

#[function_component(WalletStatus)]
pub(crate) fn wallet_status(props: &WalletStatusProps) -> Html {
    let wallet = &props.wallet;
    let state = &wallet.state;

    let connect = {
        let wallet = wallet.clone();
        Callback::from(move |_: MouseEvent| wallet.connect())
    };
    let disconnect = {
        let wallet = wallet.clone();
        Callback::from(move |_: MouseEvent| wallet.disconnect())
    };
    let refresh = {
        let wallet = wallet.clone();
        Callback::from(move |_: MouseEvent| wallet.refresh())
    };

    html! {
      <>
        <Label name="Status" value={wallet::get_status(state)} />
        if let Some(err) = state.error.clone() {
          <Label name="Error" value={err} />
        }
        if state.is_connected() {
          <Label name="Wallet" value={wallet.wallet_name().unwrap_or("Unknown")} />
          <Label name="Network" value={wallet::get_network(state)} />
          <Label name="Address" value={state.short_address().unwrap_or_default()} title={state.address.clone()} />
          <Label name="Balance" value={wallet::get_balance(state)} />
          <div>
            <button onclick={refresh}><code>{ "Refresh" }</code></button>
            {" "}
            <button onclick={disconnect}><code>{ "Disconnect Wallet" }</code></button>
          </div>
        } else {
          if !wallet.has_provider() {
            <pre>{ "You do not have a browser wallet, please install one to continue" }</pre>
          }
          <button onclick={connect} disabled={state.is_connecting}>
            <code>{ if state.is_connecting { "Connecting..." } else { "Connect Wallet" } }</code>
          </button>
        }
      </>
    }
}
