use crate::auth::use_auth;
use crate::routes::go_to;
use dioxus::prelude::*;
use shared_types::{guard, GuardDecision, Role, ALL_ROLES, LOGIN_PATH};
use shared_ui::{
    Button, Card, CardContent, CardHeader, Form, Segmented, TextField,
};
use std::collections::HashMap;

/// Email/password sign-in with a role picker. A live session skips the form.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut role = use_signal(|| Role::Admin);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let session = use_server_future(move || async move { server::api::current_user().await })?;

    if let Some(Ok(Some(user))) = session.read().as_ref() {
        if !auth.is_authenticated() {
            auth.set_user(user.clone());
        }
    }
    if let GuardDecision::Redirect(home) = guard(LOGIN_PATH, auth.role()) {
        go_to(home);
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(email(), password(), role()).await {
            Ok(user) => {
                let home = user.role.home_path();
                auth.set_user(user);
                go_to(home);
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = shared_types::AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(shared_types::AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    let role_names: Vec<String> = ALL_ROLES.iter().map(|r| r.to_string()).collect();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            div { class: "auth-brand",
                span { class: "auth-brand-mark", "A" }
                h1 { "AuraLiva" }
                p { "Society management, simplified." }
            }

            Card { class: "auth-card",
                CardHeader {
                    title: "Sign In",
                    description: "Choose your role and enter your credentials.".to_string(),
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", "{err}" }
                    }

                    Form { onsubmit: handle_login,
                        Segmented {
                            options: role_names,
                            selected: role().to_string(),
                            on_select: move |name: String| {
                                if let Some(r) = Role::parse(&name) {
                                    role.set(r);
                                }
                            },
                        }
                        TextField {
                            label: "Email",
                            input_type: "email",
                            value: email(),
                            placeholder: "you@auraliva.com",
                            required: true,
                            error: field_errors.read().get("email").cloned(),
                            on_input: move |v| email.set(v),
                        }
                        TextField {
                            label: "Password",
                            input_type: "password",
                            value: password(),
                            required: true,
                            error: field_errors.read().get("password").cloned(),
                            on_input: move |v| password.set(v),
                        }
                        Button {
                            r#type: "submit",
                            class: "auth-submit",
                            busy: loading(),
                            busy_label: "Signing in...",
                            "Sign In as {role}"
                        }
                    }
                }
            }
        }
    }
}
