use dioxus::prelude::*;
use shared_types::{Tenant, TenantDocuments, TenantInput};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, ConfirmModal, FieldRow,
    FileField, Form, PageHeader, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, parse_date, report_error, FieldErrors};

/// The resident's own flat and its tenant, if any.
#[component]
pub fn MyTenant() -> Element {
    let toast = use_toast();
    let mut residence = use_resource(move || async move { server::api::my_residence().await });
    let mut editing = use_signal(|| false);
    let mut confirm_remove = use_signal(|| false);

    let handle_remove = move |_| {
        confirm_remove.set(false);
        spawn(async move {
            match server::api::remove_tenant().await {
                Ok(()) => {
                    toast.ok("Tenant removed.");
                    residence.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader { title: "Tenant Management", subtitle: "Register the tenant living in your flat.".to_string() }

        match &*residence.read() {
            None => rsx! { div { class: "loading", "Loading..." } },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            Some(Ok(resident)) => {
                let tenant = resident.tenant.clone();
                rsx! {
                    p { class: "muted", "Flat {resident.wing}-{resident.flat_no} · {resident.name}" }
                    match (editing(), tenant) {
                        (false, Some(t)) => rsx! {
                            TenantCard {
                                tenant: t,
                                on_edit: move |_| editing.set(true),
                                on_remove: move |_| confirm_remove.set(true),
                            }
                        },
                        (_, existing) => rsx! {
                            TenantForm {
                                existing,
                                on_cancel: move |_| editing.set(false),
                                on_saved: move |_| {
                                    editing.set(false);
                                    residence.restart();
                                },
                            }
                        },
                    }
                }
            }
        }

        ConfirmModal {
            open: confirm_remove(),
            title: "Remove tenant?",
            message: "The tenant record and its documents will be removed from your flat.",
            confirm_label: "Remove".to_string(),
            on_confirm: handle_remove,
            on_cancel: move |_| confirm_remove.set(false),
        }
    }
}

#[component]
fn TenantCard(tenant: Tenant, on_edit: EventHandler<()>, on_remove: EventHandler<()>) -> Element {
    rsx! {
        Card {
            CardHeader { title: tenant.name.clone(), description: format!("Contact: {}", tenant.contact),
                div { class: "row-actions",
                    Button { variant: ButtonVariant::Secondary, small: true, onclick: move |_| on_edit.call(()), "Edit" }
                    Button { variant: ButtonVariant::Danger, small: true, onclick: move |_| on_remove.call(()), "Remove" }
                }
            }
            CardContent {
                dl { class: "detail-list",
                    dt { "Move-in date" }
                    dd { "{tenant.move_in_date}" }
                    dt { "Move-out date" }
                    dd {
                        match tenant.move_out_date {
                            Some(d) => rsx! { "{d}" },
                            None => rsx! { "N/A" },
                        }
                    }
                }
                ul { class: "document-list",
                    for (label, file) in tenant.documents() {
                        li { key: "{label}",
                            span { "{label}" }
                            span { class: "muted", "{file}" }
                        }
                    }
                }
            }
        }
    }
}

/// Add or edit form. New tenants must upload every document; on edit,
/// documents left unpicked keep their current file.
#[component]
fn TenantForm(existing: Option<Tenant>, on_cancel: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let toast = use_toast();
    let is_edit = existing.is_some();
    let heading = if is_edit { "Edit Tenant" } else { "Add Tenant" };
    let on_file = existing
        .as_ref()
        .map(|t| TenantDocuments {
            agreement_doc: Some(t.agreement_doc.clone()),
            aadhaar_doc: Some(t.aadhaar_doc.clone()),
            pan_doc: Some(t.pan_doc.clone()),
            photo: Some(t.photo.clone()),
            police_verification_doc: Some(t.police_verification_doc.clone()),
        })
        .unwrap_or_default();

    let mut name = use_signal(|| existing.as_ref().map(|t| t.name.clone()).unwrap_or_default());
    let mut contact = use_signal(|| existing.as_ref().map(|t| t.contact.clone()).unwrap_or_default());
    let mut move_in = use_signal(|| existing.as_ref().map(|t| t.move_in_date.to_string()).unwrap_or_default());
    let mut move_out = use_signal(|| {
        existing
            .as_ref()
            .and_then(|t| t.move_out_date)
            .map(|d| d.to_string())
            .unwrap_or_default()
    });
    let mut docs = use_signal(TenantDocuments::default);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let input = TenantInput {
            name: name(),
            contact: contact(),
            move_in_date: parse_date(&move_in()),
            move_out_date: parse_date(&move_out()),
            documents: docs(),
        };
        saving.set(true);
        spawn(async move {
            let result = if is_edit {
                server::api::update_tenant(input).await
            } else {
                server::api::add_tenant(input).await
            };
            match result {
                Ok(t) => {
                    toast.ok(if is_edit {
                        format!("Tenant {} updated.", t.name)
                    } else {
                        format!("Tenant {} added.", t.name)
                    });
                    on_saved.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let picked = docs.read().clone();

    rsx! {
        Card {
            CardHeader { title: heading }
            CardContent {
                Form { onsubmit: handle_submit,
                    FieldRow {
                        TextField {
                            label: "Tenant Name",
                            value: name(),
                            required: true,
                            error: field_error(errors, "name"),
                            on_input: move |v| name.set(v),
                        }
                        TextField {
                            label: "Contact",
                            value: contact(),
                            required: true,
                            error: field_error(errors, "contact"),
                            on_input: move |v| contact.set(v),
                        }
                    }
                    FieldRow {
                        TextField {
                            label: "Move-in Date",
                            input_type: "date",
                            value: move_in(),
                            required: true,
                            error: field_error(errors, "move_in_date"),
                            on_input: move |v| move_in.set(v),
                        }
                        TextField {
                            label: "Move-out Date",
                            input_type: "date",
                            value: move_out(),
                            on_input: move |v| move_out.set(v),
                        }
                    }
                    if let Some(msg) = field_error(errors, "documents") {
                        p { class: "field-error", "{msg}" }
                    }
                    FieldRow {
                        FileField {
                            label: "Rental Agreement",
                            required: !is_edit,
                            current: picked.agreement_doc.clone().or(on_file.agreement_doc.clone()),
                            on_pick: move |a: shared_types::Attachment| docs.write().agreement_doc = Some(a.file_name),
                        }
                        FileField {
                            label: "Aadhaar Card",
                            required: !is_edit,
                            current: picked.aadhaar_doc.clone().or(on_file.aadhaar_doc.clone()),
                            on_pick: move |a: shared_types::Attachment| docs.write().aadhaar_doc = Some(a.file_name),
                        }
                    }
                    FieldRow {
                        FileField {
                            label: "PAN Card",
                            required: !is_edit,
                            current: picked.pan_doc.clone().or(on_file.pan_doc.clone()),
                            on_pick: move |a: shared_types::Attachment| docs.write().pan_doc = Some(a.file_name),
                        }
                        FileField {
                            label: "Photo",
                            accept: ".jpg,.jpeg,.png",
                            required: !is_edit,
                            current: picked.photo.clone().or(on_file.photo.clone()),
                            on_pick: move |a: shared_types::Attachment| docs.write().photo = Some(a.file_name),
                        }
                    }
                    FileField {
                        label: "Police Verification",
                        required: !is_edit,
                        current: picked.police_verification_doc.clone().or(on_file.police_verification_doc.clone()),
                        on_pick: move |a: shared_types::Attachment| docs.write().police_verification_doc = Some(a.file_name),
                    }
                    div { class: "row-actions",
                        if is_edit {
                            Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_cancel.call(()), "Cancel" }
                        }
                        Button { r#type: "submit", busy: saving(), busy_label: "Saving...",
                            if is_edit { "Save Changes" } else { "Add Tenant" }
                        }
                    }
                }
            }
        }
    }
}
