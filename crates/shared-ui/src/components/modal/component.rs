use dioxus::prelude::*;

/// Width of a modal panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ModalSize {
    fn class(&self) -> &'static str {
        match self {
            ModalSize::Small => "sm",
            ModalSize::Medium => "md",
            ModalSize::Large => "lg",
        }
    }
}

/// Centered dialog over a dimmed backdrop. Clicking the backdrop or the
/// close button calls `on_close`; nothing renders while `open` is false.
#[component]
pub fn Modal(
    open: bool,
    on_close: EventHandler<()>,
    #[props(into)] title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] size: ModalSize,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-panel",
                role: "dialog",
                "aria-modal": "true",
                "data-size": size.class(),
                onclick: move |evt| evt.stop_propagation(),
                header { class: "modal-header",
                    div {
                        h2 { class: "modal-title", "{title}" }
                        if let Some(text) = description {
                            p { class: "modal-description", "{text}" }
                        }
                    }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        "aria-label": "Close",
                        onclick: move |_| on_close.call(()),
                        "\u{2715}"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

/// Right-aligned button row at the bottom of a modal form.
#[component]
pub fn ModalFooter(children: Element) -> Element {
    rsx! {
        div { class: "modal-footer", {children} }
    }
}

/// Yes/no confirmation for destructive actions such as deleting a record.
#[component]
pub fn ConfirmModal(
    open: bool,
    #[props(into)] title: String,
    #[props(into)] message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Modal {
            open,
            title,
            size: ModalSize::Small,
            on_close: move |_| on_cancel.call(()),
            p { class: "modal-message", "{message}" }
            ModalFooter {
                button {
                    class: "button",
                    "data-style": "secondary",
                    "data-size": "md",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "button",
                    "data-style": "danger",
                    "data-size": "md",
                    r#type: "button",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
