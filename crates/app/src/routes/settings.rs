use dioxus::prelude::*;
use shared_types::{ChangePasswordRequest, MIN_PASSWORD_LEN};
use shared_ui::theme::{use_theme, ThemeMode};
use shared_ui::{
    use_toast, Button, Card, CardContent, CardHeader, Form, PageHeader, Segmented, TextField,
    ToastExt, ToggleRow,
};
use std::collections::HashMap;

use crate::form::{field_error, report_error, FieldErrors};

const LIGHT: &str = "Light";
const DARK: &str = "Dark";

/// Appearance, notification and password settings.
#[component]
pub fn Settings(section: String) -> Element {
    let mut theme = use_theme();
    let current = if theme.mode.read().is_dark() { DARK } else { LIGHT };

    rsx! {
        PageHeader {
            title: "Settings",
            Link { class: "link-button", to: format!("/{section}/profile"), "My profile" }
        }
        div { class: "grid-2",
            Card {
                CardHeader { title: "Appearance", description: "Saved in this browser for 30 days.".to_string() }
                CardContent {
                    Segmented {
                        options: vec![LIGHT.to_string(), DARK.to_string()],
                        selected: current.to_string(),
                        on_select: move |choice: String| {
                            theme.set(if choice == DARK { ThemeMode::Dark } else { ThemeMode::Light });
                        },
                    }
                }
            }
            NotificationsCard {}
            ChangePasswordCard {}
        }
    }
}

/// Delivery preferences. Kept in the page only; nothing is sent yet.
#[component]
fn NotificationsCard() -> Element {
    let mut email = use_signal(|| true);
    let mut push = use_signal(|| true);

    rsx! {
        Card {
            CardHeader {
                title: "Notification Settings",
                description: "Manage how you receive notifications from AuraLiva.".to_string(),
            }
            CardContent {
                ToggleRow {
                    label: "Email Notifications",
                    description: "Get notified via email for important updates.",
                    checked: email(),
                    on_change: move |on| email.set(on),
                }
                ToggleRow {
                    label: "Push Notifications",
                    description: "Receive push notifications in your browser.",
                    checked: push(),
                    on_change: move |on| push.set(on),
                }
            }
        }
    }
}

#[component]
fn ChangePasswordCard() -> Element {
    let toast = use_toast();
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let req = ChangePasswordRequest {
            current_password: current(),
            new_password: new_password(),
            confirm_password: confirm(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::change_password(req).await {
                Ok(resp) => {
                    toast.ok(resp.message);
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm.set(String::new());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader {
                title: "Change Password",
                description: format!("At least {MIN_PASSWORD_LEN} characters."),
            }
            CardContent {
                Form { onsubmit: handle_submit,
                    TextField {
                        label: "Current Password",
                        input_type: "password",
                        value: current(),
                        required: true,
                        error: field_error(errors, "current_password"),
                        on_input: move |v| current.set(v),
                    }
                    TextField {
                        label: "New Password",
                        input_type: "password",
                        value: new_password(),
                        required: true,
                        error: field_error(errors, "new_password"),
                        on_input: move |v| new_password.set(v),
                    }
                    TextField {
                        label: "Confirm New Password",
                        input_type: "password",
                        value: confirm(),
                        required: true,
                        error: field_error(errors, "confirm_password"),
                        on_input: move |v| confirm.set(v),
                    }
                    Button { r#type: "submit", busy: saving(), busy_label: "Updating...", "Update Password" }
                }
            }
        }
    }
}
