use dioxus::prelude::*;
use dioxus_primitives::switch as prim;

/// On/off toggle. Pair with a `SwitchThumb` child.
#[component]
pub fn Switch(mut props: prim::SwitchProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "switch", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Switch { ..props }
    }
}

#[component]
pub fn SwitchThumb(mut props: prim::SwitchThumbProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "switch-thumb", None, false));

    rsx! {
        prim::SwitchThumb { ..props }
    }
}

/// Labelled settings row with a switch on the right.
#[component]
pub fn ToggleRow(
    label: String,
    description: String,
    checked: bool,
    on_change: EventHandler<bool>,
) -> Element {
    rsx! {
        div { class: "toggle-row",
            div { class: "toggle-row-text",
                span { class: "toggle-row-label", "{label}" }
                span { class: "toggle-row-description", "{description}" }
            }
            Switch {
                checked: Some(checked),
                on_checked_change: move |val: bool| on_change.call(val),
                SwitchThumb {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_row_shows_label_and_state() {
        let html = dioxus_ssr::render_element(rsx! {
            ToggleRow {
                label: "Push Notifications",
                description: "Receive push notifications in your browser.",
                checked: true,
                on_change: |_| {},
            }
        });
        assert!(html.contains("Push Notifications"));
        assert!(html.contains("Receive push notifications in your browser."));
        assert!(html.contains(r#"data-state="checked""#));
    }
}
