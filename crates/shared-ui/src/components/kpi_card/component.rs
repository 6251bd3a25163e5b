use dioxus::prelude::*;
use shared_types::Tone;

/// Headline number on a dashboard, e.g. "Open Complaints 4".
#[component]
pub fn KpiCard(
    #[props(into)] title: String,
    #[props(into)] value: String,
    #[props(default = Tone::Info)] tone: Tone,
    #[props(default)] hint: Option<String>,
    #[props(default)] icon: Option<Element>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "kpi-card", "data-tone": tone.as_str(),
            div { class: "kpi-body",
                span { class: "kpi-title", "{title}" }
                span { class: "kpi-value", "{value}" }
                if let Some(text) = hint {
                    span { class: "kpi-hint", "{text}" }
                }
            }
            if let Some(icon) = icon {
                div { class: "kpi-icon", {icon} }
            }
        }
    }
}

/// Responsive grid for a row of KPI cards.
#[component]
pub fn KpiGrid(children: Element) -> Element {
    rsx! {
        div { class: "kpi-grid", {children} }
    }
}
