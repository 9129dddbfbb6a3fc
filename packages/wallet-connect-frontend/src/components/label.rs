use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LabelProps {
    pub name: String,
    pub value: String,
    /// Shown on hover, e.g. the full address behind a shortened one.
    #[prop_or_default]
    pub title: Option<String>,
}

#[function_component(Label)]
pub(crate) fn label(props: &LabelProps) -> Html {
    html! {
        <pre>
          <strong>{props.name.clone()}</strong>
          {": "}
          <span style="text-wrap: wrap;" title={props.title.clone()}>{props.value.clone()}</span>
        </pre>
    }
}
