use self::components::{theme_toggle::ThemeToggle, wallet_status::WalletStatus};
use ethereum_provider::yew::use_wallet;
use tracing::info;
use yew::prelude::*;

mod components;
mod config;
mod console;
mod helpers;
mod logging;

#[function_component]
fn App() -> Html {
    let wallet = use_wallet(config::controller_options());
    let theme = helpers::theme::use_theme();

    html! {
      <>
        <header style="display: flex; align-items: center; flex-direction: column;">
          <h1><pre>{ "wallet-connect" }</pre></h1>
          <ThemeToggle theme={theme.theme} onclick={theme.toggle} />
        </header>
        <section>
          <WalletStatus wallet={wallet} />
        </section>
      </>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::LOG_LEVEL);
    info!("starting wallet-connect frontend");
    yew::Renderer::<App>::new().render();
}
