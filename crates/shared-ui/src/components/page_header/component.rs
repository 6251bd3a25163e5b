use dioxus::prelude::*;

/// Page title with an optional subtitle. Children render as the action bar.
#[component]
pub fn PageHeader(
    #[props(into)] title: String,
    #[props(default)] subtitle: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "page-header",
            div { class: "page-heading",
                h1 { class: "page-title", "{title}" }
                if let Some(text) = subtitle {
                    p { class: "page-subtitle", "{text}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}

/// Row of filter controls above a table.
#[component]
pub fn FilterBar(children: Element) -> Element {
    rsx! {
        div { class: "filter-bar", {children} }
    }
}
