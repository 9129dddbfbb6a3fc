use wallet_connect::Theme;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ThemeToggleProps {
    pub theme: Theme,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(ThemeToggle)]
pub(crate) fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let label = match props.theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    html! {
      <button onclick={props.onclick.clone()} title={format!("current theme: {}", props.theme)}>
        <code>{ label }</code>
      </button>
    }
}
