use dioxus::prelude::*;

/// Row of mutually exclusive buttons, e.g. "Current | History" or
/// "Upcoming | Past". The selected option is highlighted.
#[component]
pub fn Segmented(options: Vec<String>, selected: String, on_select: EventHandler<String>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "segmented", role: "tablist",
            for option in options {
                button {
                    key: "{option}",
                    class: "segmented-option",
                    r#type: "button",
                    role: "tab",
                    "aria-selected": if option == selected { "true" } else { "false" },
                    onclick: {
                        let value = option.clone();
                        move |_| on_select.call(value.clone())
                    },
                    "{option}"
                }
            }
        }
    }
}
