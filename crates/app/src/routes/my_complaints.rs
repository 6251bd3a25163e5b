use dioxus::prelude::*;
use shared_types::{ComplaintPriority, Labeled, RaiseComplaintRequest};
use shared_ui::{
    label_options, use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, ConfirmModal,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, Form, PageHeader, SelectField, StatusBadge, TextAreaField, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, report_error, FieldErrors};

/// A resident's own complaints plus the form to raise a new one.
#[component]
pub fn MyComplaints() -> Element {
    let toast = use_toast();
    let mut complaints = use_resource(move || async move { server::api::my_complaints().await });
    let mut pending_delete = use_signal(|| Option::<String>::None);

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut priority = use_signal(|| ComplaintPriority::default().label().to_string());
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let req = RaiseComplaintRequest {
            title: title(),
            description: description(),
            priority: ComplaintPriority::from_label(&priority()).unwrap_or_default(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::raise_complaint(req).await {
                Ok(_) => {
                    toast.ok("Complaint submitted. The office will follow up.");
                    title.set(String::new());
                    description.set(String::new());
                    complaints.restart();
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = pending_delete() else { return };
        pending_delete.set(None);
        spawn(async move {
            match server::api::delete_my_complaint(id).await {
                Ok(()) => {
                    toast.ok("Complaint withdrawn.");
                    complaints.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader { title: "My Complaints", subtitle: "Report issues and follow their progress.".to_string() }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Raise a Complaint" }
                CardContent {
                    Form { onsubmit: handle_submit,
                        TextField {
                            label: "Title",
                            value: title(),
                            required: true,
                            error: field_error(errors, "title"),
                            on_input: move |v| title.set(v),
                        }
                        TextAreaField {
                            label: "Description",
                            value: description(),
                            required: true,
                            error: field_error(errors, "description"),
                            on_input: move |v| description.set(v),
                        }
                        SelectField {
                            label: "Priority",
                            value: priority(),
                            options: label_options(ComplaintPriority::ALL.iter().map(|p| p.label())),
                            on_change: move |v| priority.set(v),
                        }
                        Button { r#type: "submit", busy: saving(), busy_label: "Submitting...", "Submit Complaint" }
                    }
                }
            }

            Card {
                CardHeader { title: "Complaint History" }
                CardContent {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Title" }
                            DataTableColumn { "Date" }
                            DataTableColumn { "Priority" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "" }
                        }
                        DataTableBody {
                            match &*complaints.read() {
                                None => rsx! { DataTableEmpty { columns: 5, message: "Loading complaints..." } },
                                Some(Err(e)) => rsx! {
                                    DataTableEmpty { columns: 5, message: shared_types::AppError::friendly_message(&e.to_string()) }
                                },
                                Some(Ok(list)) if list.is_empty() => rsx! {
                                    DataTableEmpty { columns: 5, message: "You have not raised any complaints." }
                                },
                                Some(Ok(list)) => rsx! {
                                    for c in list.iter() {
                                        DataTableRow { key: "{c.id}",
                                            DataTableCell {
                                                strong { "{c.title}" }
                                                div { class: "muted", "{c.description}" }
                                            }
                                            DataTableCell { "{c.date}" }
                                            DataTableCell { StatusBadge { tone: c.priority.tone(), label: c.priority.label() } }
                                            DataTableCell { StatusBadge { tone: c.status.tone(), label: c.status.label() } }
                                            DataTableCell {
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    small: true,
                                                    onclick: {
                                                        let id = c.id.clone();
                                                        move |_| pending_delete.set(Some(id.clone()))
                                                    },
                                                    "Delete"
                                                }
                                            }
                                        }
                                    }
                                },
                            }
                        }
                    }
                }
            }
        }

        ConfirmModal {
            open: pending_delete().is_some(),
            title: "Delete complaint?",
            message: "The complaint will be withdrawn and removed from the board.",
            on_confirm: confirm_delete,
            on_cancel: move |_| pending_delete.set(None),
        }
    }
}
