use scratch_reveal_core::ResultSet;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ResultProps {
    pub results: ResultSet,
}

/// What sits under the mask: one big label, or a grid when several cards were drawn.
#[function_component]
pub(crate) fn ResultView(props: &ResultProps) -> Html {
    let results = &props.results;

    if let Some(label) = results.single() {
        return html! {
            <div class="result single">
                <strong>{label}</strong>
                <p>{congratulation(label)}</p>
            </div>
        };
    }

    html! {
        <div class="result multiple">
            <p>{drawn_summary(results.len())}</p>
            <ul>
                { for results.iter().map(|label| html! { <li>{label}</li> }) }
            </ul>
        </div>
    }
}

pub(crate) fn congratulation(label: &str) -> String {
    format!("恭喜你获得「{}」！", label)
}

pub(crate) fn drawn_summary(count: usize) -> String {
    format!("共刮开 {} 张：", count)
}
