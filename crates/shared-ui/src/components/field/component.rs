use dioxus::prelude::*;
use shared_types::Attachment;

/// Form wrapper that stops the browser's own submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// Two-column grid for short fields inside a form.
#[component]
pub fn FieldRow(children: Element) -> Element {
    rsx! {
        div { class: "field-row", {children} }
    }
}

/// Label, control and inline error shared by every field type.
#[component]
fn FieldShell(label: String, required: bool, error: Option<String>, children: Element) -> Element {
    rsx! {
        label { class: "field",
            if !label.is_empty() {
                span { class: "field-label",
                    "{label}"
                    if required {
                        span { class: "field-required", " *" }
                    }
                }
            }
            {children}
            if let Some(message) = error {
                span { class: "field-error", "{message}" }
            }
        }
    }
}

/// Single-line input. `input_type` covers text, email, number, date, password.
#[component]
pub fn TextField(
    #[props(default)] label: String,
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<String>,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] required: bool,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
    /// Lower bound for date and number inputs.
    #[props(default)] min: Option<String>,
) -> Element {
    rsx! {
        FieldShell { label, required, error,
            input {
                class: "field-control",
                r#type: "{input_type}",
                min,
                value,
                placeholder,
                disabled,
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

#[component]
pub fn TextAreaField(
    #[props(default)] label: String,
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<String>,
    #[props(default)] placeholder: String,
    #[props(default = 4)] rows: u32,
    #[props(default = false)] required: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    rsx! {
        FieldShell { label, required, error,
            textarea {
                class: "field-control",
                rows: "{rows}",
                value,
                placeholder,
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

/// Native `<select>`. Options are `(value, label)` pairs.
#[component]
pub fn SelectField(
    #[props(default)] label: String,
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] on_change: EventHandler<String>,
    #[props(default = false)] required: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    rsx! {
        FieldShell { label, required, error,
            select {
                class: "field-control",
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
                for (key, text) in options {
                    option { value: "{key}", selected: key == value, "{text}" }
                }
            }
        }
    }
}

/// Build select options where each label is also the value.
pub fn label_options<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(String, String)> {
    labels
        .into_iter()
        .map(|l| (l.to_string(), l.to_string()))
        .collect()
}

/// File picker that only records the chosen file's name and size; the
/// contents never leave the browser.
#[component]
pub fn FileField(
    #[props(default)] label: String,
    #[props(default)] accept: String,
    #[props(default)] current: Option<String>,
    on_pick: EventHandler<Attachment>,
    #[props(default = false)] required: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    let handle_change = move |evt: FormEvent| async move {
        let files = evt.files();
        if let Some(f) = files.first() {
            let name = f.name();
            let size = match f.read_bytes().await {
                Ok(bytes) => bytes.len() as u64,
                Err(_) => 0,
            };
            on_pick.call(Attachment::new(name, size));
        }
    };

    rsx! {
        FieldShell { label, required, error,
            input {
                class: "field-control field-file",
                r#type: "file",
                accept: "{accept}",
                onchange: handle_change,
            }
            if let Some(name) = current {
                span { class: "field-hint", "Current: {name}" }
            }
        }
    }
}

/// Search box used in filter bars.
#[component]
pub fn SearchInput(
    value: String,
    on_input: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        input {
            class: "field-control search-input",
            r#type: "search",
            value,
            placeholder,
            oninput: move |evt| on_input.call(evt.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn label_options_use_label_as_value() {
        assert_eq!(
            label_options(["All", "Paid"]),
            vec![
                ("All".to_string(), "All".to_string()),
                ("Paid".to_string(), "Paid".to_string())
            ]
        );
    }

    #[test]
    fn required_fields_are_marked() {
        let html = dioxus_ssr::render_element(rsx! {
            TextField { label: "Payee", required: true, error: "Payee is required" }
        });
        assert!(html.contains("field-required"));
        assert!(html.contains("Payee is required"));
    }

    #[test]
    fn date_field_carries_lower_bound() {
        let html = dioxus_ssr::render_element(rsx! {
            TextField { label: "Date", input_type: "date", min: "2024-08-10" }
        });
        assert!(html.contains(r#"min="2024-08-10""#));
    }
}
