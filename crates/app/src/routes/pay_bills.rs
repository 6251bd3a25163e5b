use dioxus::prelude::*;
use shared_types::{
    format_inr, selection_total, Attachment, Invoice, InvoiceStatus, Labeled, SubmitPaymentRequest,
    Tone,
};
use shared_ui::{
    use_toast, Button, Card, CardContent, CardHeader, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FileField, Form, KpiCard,
    KpiGrid, PageHeader, StatusBadge, ToastExt,
};
use std::collections::HashMap;

use crate::download;
use crate::form::{field_error, report_error, FieldErrors};

/// Resident invoices: pick the payable ones, attach a payment screenshot and
/// send them for verification. Paid invoices get a receipt download.
#[component]
pub fn PayBills() -> Element {
    let toast = use_toast();
    let mut invoices = use_resource(move || async move { server::api::my_invoices().await });
    let mut selected = use_signal(Vec::<String>::new);
    let mut screenshot = use_signal(|| Option::<Attachment>::None);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut paying = use_signal(|| false);

    let list: Vec<Invoice> = match &*invoices.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let outstanding: f64 = list
        .iter()
        .filter(|i| i.status.is_payable())
        .map(Invoice::total)
        .sum();
    let awaiting = list
        .iter()
        .filter(|i| i.status == InvoiceStatus::PendingVerification)
        .count();
    let total = selection_total(&list, &selected.read());

    let handle_pay = move |_: FormEvent| {
        let req = SubmitPaymentRequest {
            invoice_ids: selected(),
            screenshot: screenshot(),
        };
        paying.set(true);
        spawn(async move {
            match server::api::submit_payment(req).await {
                Ok(updated) => {
                    toast.ok(format!(
                        "Payment for {} invoice(s) submitted for verification.",
                        updated.len()
                    ));
                    selected.set(Vec::new());
                    screenshot.set(None);
                    invoices.restart();
                }
                Err(e) => report_error(toast, errors, &e),
            }
            paying.set(false);
        });
    };

    rsx! {
        PageHeader { title: "Pay Bills", subtitle: "Maintenance invoices for your flat.".to_string() }

        KpiGrid {
            KpiCard { title: "Outstanding", value: format_inr(outstanding), tone: Tone::Warning }
            KpiCard { title: "Awaiting Verification", value: awaiting.to_string(), tone: Tone::Info }
        }

        Card {
            CardHeader { title: "My Invoices" }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "" }
                        DataTableColumn { "Invoice" }
                        DataTableColumn { "Due Date" }
                        DataTableColumn { numeric: true, "Amount" }
                        DataTableColumn { numeric: true, "Fine" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if invoices.read().is_none() {
                            DataTableEmpty { columns: 7, message: "Loading invoices..." }
                        } else if list.is_empty() {
                            DataTableEmpty { columns: 7, message: "No invoices for your flat." }
                        }
                        for inv in list.iter().cloned() {
                            DataTableRow { key: "{inv.id}", selected: selected.read().contains(&inv.id),
                                DataTableCell {
                                    if inv.status.is_payable() {
                                        input {
                                            r#type: "checkbox",
                                            aria_label: "Select {inv.invoice_number}",
                                            checked: selected.read().contains(&inv.id),
                                            onchange: {
                                                let id = inv.id.clone();
                                                move |_| {
                                                    let mut ids = selected.write();
                                                    match ids.iter().position(|s| *s == id) {
                                                        Some(pos) => {
                                                            ids.remove(pos);
                                                        }
                                                        None => ids.push(id.clone()),
                                                    }
                                                }
                                            },
                                        }
                                    }
                                }
                                DataTableCell { "{inv.invoice_number}" }
                                DataTableCell { "{inv.due_date}" }
                                DataTableCell { numeric: true, {format_inr(inv.amount)} }
                                DataTableCell { numeric: true,
                                    if inv.fine_amount() > 0.0 { {format_inr(inv.fine_amount())} } else { "-" }
                                }
                                DataTableCell { StatusBadge { tone: inv.status.tone(), label: inv.status.label() } }
                                DataTableCell {
                                    if inv.status == InvoiceStatus::Paid {
                                        a {
                                            class: "link-button",
                                            href: download::invoice_receipt(&inv.id),
                                            download: "",
                                            "Receipt"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        Card {
            CardHeader {
                title: "Make a Payment",
                description: "Pay by UPI or bank transfer, then upload the confirmation screenshot.".to_string(),
            }
            CardContent {
                Form { onsubmit: handle_pay,
                    p { class: "pay-total",
                        "Selected total: "
                        strong { {format_inr(total)} }
                    }
                    if let Some(msg) = field_error(errors, "invoice_ids") {
                        p { class: "field-error", "{msg}" }
                    }
                    FileField {
                        label: "Payment Screenshot",
                        accept: ".jpg,.jpeg,.png,.pdf",
                        required: true,
                        current: screenshot().map(|s| s.file_name),
                        error: field_error(errors, "screenshot"),
                        on_pick: move |a| screenshot.set(Some(a)),
                    }
                    Button {
                        r#type: "submit",
                        disabled: selected.read().is_empty(),
                        busy: paying(),
                        busy_label: "Submitting...",
                        "Submit Payment"
                    }
                }
            }
        }
    }
}
