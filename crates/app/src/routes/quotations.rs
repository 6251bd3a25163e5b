use dioxus::prelude::*;
use shared_types::{
    available_actions, format_inr, Attachment, Labeled, QuotationAction, QuotationRequest,
    QuotationTransitionRequest, RaiseQuotationRequest, Role,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FieldRow, FileField, Form,
    Modal, ModalFooter, PageHeader, StatusBadge, TextAreaField, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::auth::use_role;
use crate::form::{field_error, non_blank, parse_amount, report_error, FieldErrors};

/// Quotation requests moving through treasurer and committee approval.
#[component]
pub fn Quotations() -> Element {
    let toast = use_toast();
    let role = use_role();
    let mut quotations = use_resource(move || async move { server::api::list_quotations().await });
    let mut show_raise = use_signal(|| false);
    let mut commencing = use_signal(|| Option::<QuotationRequest>::None);

    let transition = move |id: String, action: QuotationAction| {
        spawn(async move {
            let req = QuotationTransitionRequest { action, notes: None };
            match server::api::transition_quotation(id, req).await {
                Ok(q) => {
                    toast.ok(format!("\"{}\" is now {}.", q.title, q.status.label()));
                    quotations.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader {
            title: "Quotation Requests",
            subtitle: "Vendor quotations awaiting approval before work starts.".to_string(),
            if role == Role::Secretary {
                Button { onclick: move |_| show_raise.set(true), "Raise Request" }
            }
        }

        Card {
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Title" }
                        DataTableColumn { "Vendor" }
                        DataTableColumn { numeric: true, "Amount" }
                        DataTableColumn { "Raised" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "Actions" }
                    }
                    DataTableBody {
                        match &*quotations.read() {
                            None => rsx! { DataTableEmpty { columns: 6, message: "Loading requests..." } },
                            Some(Err(e)) => rsx! {
                                DataTableEmpty { columns: 6, message: shared_types::AppError::friendly_message(&e.to_string()) }
                            },
                            Some(Ok(list)) if list.is_empty() => rsx! {
                                DataTableEmpty { columns: 6, message: "No quotation requests yet." }
                            },
                            Some(Ok(list)) => rsx! {
                                for q in list.iter().cloned() {
                                    DataTableRow { key: "{q.id}",
                                        DataTableCell {
                                            strong { "{q.title}" }
                                            if !q.description.is_empty() {
                                                div { class: "muted", "{q.description}" }
                                            }
                                            div { class: "muted", "File: {q.quotation_file}" }
                                            if let Some(notes) = &q.work_commence_notes {
                                                div { class: "muted", "Work notes: {notes}" }
                                            }
                                        }
                                        DataTableCell { "{q.vendor_name}" }
                                        DataTableCell { numeric: true, {format_inr(q.amount)} }
                                        DataTableCell {
                                            "{q.date_raised}"
                                            div { class: "muted", "by {q.raised_by}" }
                                        }
                                        DataTableCell {
                                            StatusBadge { tone: q.status.tone(), label: q.status.label() }
                                            if let Some(date) = q.work_commence_date {
                                                div { class: "muted", "Started {date}" }
                                            }
                                        }
                                        DataTableCell {
                                            div { class: "row-actions",
                                                for action in available_actions(role, q.status) {
                                                    Button {
                                                        key: "{action:?}",
                                                        small: true,
                                                        variant: action_variant(action),
                                                        onclick: {
                                                            let q = q.clone();
                                                            move |_| {
                                                                if action == QuotationAction::CommenceWork {
                                                                    commencing.set(Some(q.clone()));
                                                                } else {
                                                                    transition(q.id.clone(), action);
                                                                }
                                                            }
                                                        },
                                                        {action.button_label()}
                                                    }
                                                }
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

        RaiseQuotationModal {
            open: show_raise(),
            on_close: move |_| show_raise.set(false),
            on_raised: move |_| {
                show_raise.set(false);
                quotations.restart();
            },
        }

        if let Some(q) = commencing() {
            CommenceWorkModal {
                quotation: q,
                on_close: move |_| commencing.set(None),
                on_done: move |_| {
                    commencing.set(None);
                    quotations.restart();
                },
            }
        }
    }
}

fn action_variant(action: QuotationAction) -> ButtonVariant {
    match action {
        QuotationAction::TreasurerReject => ButtonVariant::Danger,
        _ => ButtonVariant::Primary,
    }
}

#[component]
fn RaiseQuotationModal(open: bool, on_close: EventHandler<()>, on_raised: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut vendor = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut file = use_signal(|| Option::<Attachment>::None);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let req = RaiseQuotationRequest {
            title: title(),
            description: description(),
            vendor_name: vendor(),
            amount: parse_amount(&amount()),
            quotation_file: file(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::raise_quotation(req).await {
                Ok(q) => {
                    toast.ok(format!("\"{}\" sent for treasurer approval.", q.title));
                    title.set(String::new());
                    description.set(String::new());
                    vendor.set(String::new());
                    amount.set(String::new());
                    file.set(None);
                    on_raised.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Modal { open, on_close, title: "Raise Quotation Request",
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
                    rows: 3,
                    on_input: move |v| description.set(v),
                }
                FieldRow {
                    TextField {
                        label: "Vendor",
                        value: vendor(),
                        required: true,
                        error: field_error(errors, "vendor_name"),
                        on_input: move |v| vendor.set(v),
                    }
                    TextField {
                        label: "Amount (INR)",
                        input_type: "number",
                        value: amount(),
                        required: true,
                        error: field_error(errors, "amount"),
                        on_input: move |v| amount.set(v),
                    }
                }
                FileField {
                    label: "Quotation File",
                    accept: ".pdf,.jpg,.jpeg,.png",
                    required: true,
                    current: file().map(|f| f.file_name),
                    error: field_error(errors, "quotation_file"),
                    on_pick: move |a| file.set(Some(a)),
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: saving(), "Submit Request" }
                }
            }
        }
    }
}

/// Notes for residents are required before work can be marked as started.
#[component]
fn CommenceWorkModal(quotation: QuotationRequest, on_close: EventHandler<()>, on_done: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut notes = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);
    let id = quotation.id.clone();

    let handle_submit = move |_: FormEvent| {
        let id = id.clone();
        let req = QuotationTransitionRequest {
            action: QuotationAction::CommenceWork,
            notes: non_blank(&notes()),
        };
        saving.set(true);
        spawn(async move {
            match server::api::transition_quotation(id, req).await {
                Ok(q) => {
                    toast.ok(format!("Work on \"{}\" has commenced.", q.title));
                    on_done.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Modal {
            open: true,
            on_close,
            title: "Commence Work",
            description: format!("{} by {}", quotation.title, quotation.vendor_name),
            Form { onsubmit: handle_submit,
                TextAreaField {
                    label: "Notes for residents",
                    value: notes(),
                    required: true,
                    rows: 4,
                    placeholder: "Schedule, areas affected, contact person...".to_string(),
                    error: field_error(errors, "notes"),
                    on_input: move |v| notes.set(v),
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: saving(), "Commence Work" }
                }
            }
        }
    }
}
