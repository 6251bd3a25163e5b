use dioxus::prelude::*;
use shared_types::{UpdateProfileRequest, User};
use shared_ui::{
    use_toast, Avatar, Button, ButtonVariant, Card, CardContent, CardHeader, Form, PageHeader,
    TextField, ToastExt,
};
use std::collections::HashMap;

use crate::auth::use_auth;
use crate::form::{field_error, non_blank, report_error, FieldErrors};

/// The signed-in user's details with an inline edit form.
#[component]
pub fn Profile(section: String) -> Element {
    let auth = use_auth();
    let mut editing = use_signal(|| false);

    let Some(user) = auth.user() else {
        return rsx! {};
    };

    rsx! {
        PageHeader {
            title: "My Profile",
            Link { class: "link-button", to: format!("/{section}/settings"), "Settings" }
        }
        div { class: "grid-2",
            Card {
                CardContent {
                    div { class: "profile-head",
                        Avatar { name: user.name.clone(), src: Some(user.avatar.clone()).filter(|a| !a.is_empty()), size: 72 }
                        div {
                            h2 { "{user.name}" }
                            p { class: "muted", "{user.role}" }
                        }
                    }
                    dl { class: "detail-list",
                        for (label, value) in user.profile_details() {
                            dt { key: "{label}", "{label}" }
                            dd { "{value}" }
                        }
                    }
                    if !editing() {
                        Button { variant: ButtonVariant::Secondary, onclick: move |_| editing.set(true), "Edit Profile" }
                    }
                }
            }
            if editing() {
                ProfileForm { user, on_done: move |_| editing.set(false) }
            }
        }
    }
}

#[component]
fn ProfileForm(user: User, on_done: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut auth = use_auth();
    let mut name = use_signal(|| user.name.clone());
    let mut contact = use_signal(|| user.contact.clone().unwrap_or_default());
    let mut avatar = use_signal(|| user.avatar.clone());
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let req = UpdateProfileRequest {
            name: name(),
            contact: non_blank(&contact()),
            avatar: non_blank(&avatar()),
        };
        saving.set(true);
        spawn(async move {
            match server::api::update_profile(req).await {
                Ok(updated) => {
                    auth.set_user(updated);
                    toast.ok("Profile updated.");
                    on_done.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Edit Profile" }
            CardContent {
                Form { onsubmit: handle_submit,
                    TextField {
                        label: "Name",
                        value: name(),
                        required: true,
                        error: field_error(errors, "name"),
                        on_input: move |v| name.set(v),
                    }
                    TextField {
                        label: "Contact",
                        input_type: "tel",
                        value: contact(),
                        error: field_error(errors, "contact"),
                        on_input: move |v| contact.set(v),
                    }
                    TextField {
                        label: "Avatar URL",
                        input_type: "url",
                        value: avatar(),
                        error: field_error(errors, "avatar"),
                        on_input: move |v| avatar.set(v),
                    }
                    div { class: "row-actions",
                        Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_done.call(()), "Cancel" }
                        Button { r#type: "submit", busy: saving(), busy_label: "Saving...", "Save" }
                    }
                }
            }
        }
    }
}
