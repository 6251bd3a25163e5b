use dioxus::prelude::*;
use shared_types::{
    format_inr, GenerateInvoiceRequest, Invoice, InvoiceStatus, Labeled, MaintenanceConfig,
    VerifyAction, Tone,
};
use shared_ui::{
    label_options, use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    FieldRow, Form, KpiCard, KpiGrid, Modal, ModalFooter, PageHeader, Segmented, SelectField,
    StatusBadge, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, parse_amount, parse_date, report_error, FieldErrors};

const TABS: [&str; 3] = ["Invoices", "Payments", "Maintenance"];

/// Invoices, payments and maintenance settings for Admin and Treasurer.
#[component]
pub fn Finances() -> Element {
    let mut tab = use_signal(|| TABS[0].to_string());
    let mut invoices = use_resource(move || async move { server::api::list_invoices().await });
    let mut summary = use_resource(move || async move { server::api::invoice_summary().await });

    let refresh = move |_| {
        invoices.restart();
        summary.restart();
    };

    rsx! {
        PageHeader {
            title: "Finances",
            subtitle: "Track maintenance invoices and payments.".to_string(),
        }

        if let Some(Ok(s)) = &*summary.read() {
            KpiGrid {
                KpiCard { title: "Paid", value: format_inr(s.paid_total), tone: Tone::Success, hint: format!("{} invoices", s.paid_count) }
                KpiCard { title: "Pending", value: format_inr(s.pending_total), tone: Tone::Warning, hint: format!("{} invoices", s.pending_count) }
                KpiCard { title: "Overdue", value: format_inr(s.overdue_total), tone: Tone::Error, hint: format!("{} invoices incl. fines", s.overdue_count) }
            }
        }

        Segmented {
            options: TABS.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            selected: tab(),
            on_select: move |t| tab.set(t),
        }

        match tab().as_str() {
            "Payments" => rsx! { PaymentsTab {} },
            "Maintenance" => rsx! { MaintenanceTab {} },
            _ => rsx! {
                InvoicesTab {
                    invoices: match &*invoices.read() {
                        Some(Ok(list)) => list.clone(),
                        _ => Vec::new(),
                    },
                    loading: invoices.read().is_none(),
                    on_change: refresh,
                }
            },
        }
    }
}

#[component]
fn InvoicesTab(invoices: Vec<Invoice>, loading: bool, on_change: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut show_generate = use_signal(|| false);

    let set_status = move |id: String, label: String| {
        let Some(status) = InvoiceStatus::from_label(&label) else { return };
        spawn(async move {
            match server::api::set_invoice_status(id, status).await {
                Ok(inv) => {
                    toast.ok(format!("{} marked {}.", inv.invoice_number, inv.status.label()));
                    on_change.call(());
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let verify = move |id: String, action: VerifyAction| {
        spawn(async move {
            match server::api::verify_payment(id, action).await {
                Ok(inv) => {
                    toast.ok(format!("Payment for {} {}.", inv.invoice_number, action.past_tense()));
                    on_change.call(());
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let remind = move |id: String| {
        spawn(async move {
            match server::api::send_reminder(id).await {
                Ok(resp) => toast.ok(resp.message),
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let status_options = label_options(InvoiceStatus::ALL.iter().map(|s| s.label()));

    rsx! {
        Card {
            CardHeader { title: "Invoices",
                Button { onclick: move |_| show_generate.set(true), "Generate Invoice" }
            }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Invoice" }
                        DataTableColumn { "Resident" }
                        DataTableColumn { numeric: true, "Amount" }
                        DataTableColumn { "Due Date" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "Actions" }
                    }
                    DataTableBody {
                        if loading {
                            DataTableEmpty { columns: 6, message: "Loading invoices..." }
                        } else if invoices.is_empty() {
                            DataTableEmpty { columns: 6, message: "No invoices yet." }
                        }
                        for inv in invoices {
                            DataTableRow { key: "{inv.id}",
                                DataTableCell { "{inv.invoice_number}" }
                                DataTableCell { "{inv.resident_name}" }
                                DataTableCell { numeric: true,
                                    {format_inr(inv.amount)}
                                    if inv.fine_amount() > 0.0 {
                                        span { class: "muted", " + {format_inr(inv.fine_amount())} fine" }
                                    }
                                }
                                DataTableCell { "{inv.due_date}" }
                                DataTableCell {
                                    div { class: "status-cell",
                                        StatusBadge { tone: inv.status.tone(), label: inv.status.label() }
                                        SelectField {
                                            value: inv.status.label().to_string(),
                                            options: status_options.clone(),
                                            on_change: {
                                                let id = inv.id.clone();
                                                move |v| set_status(id.clone(), v)
                                            },
                                        }
                                    }
                                }
                                DataTableCell {
                                    div { class: "row-actions",
                                        if inv.status == InvoiceStatus::PendingVerification {
                                            if let Some(shot) = inv.payment_screenshot.clone() {
                                                span { class: "muted", title: "Payment screenshot", "{shot}" }
                                            }
                                            Button {
                                                variant: ButtonVariant::Success,
                                                small: true,
                                                onclick: {
                                                    let id = inv.id.clone();
                                                    move |_| verify(id.clone(), VerifyAction::Approve)
                                                },
                                                "Approve"
                                            }
                                            Button {
                                                variant: ButtonVariant::Danger,
                                                small: true,
                                                onclick: {
                                                    let id = inv.id.clone();
                                                    move |_| verify(id.clone(), VerifyAction::Reject)
                                                },
                                                "Reject"
                                            }
                                        }
                                        if inv.status.is_payable() {
                                            Button {
                                                variant: ButtonVariant::Ghost,
                                                small: true,
                                                onclick: {
                                                    let id = inv.id.clone();
                                                    move |_| remind(id.clone())
                                                },
                                                "Send Reminder"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        GenerateInvoiceModal {
            open: show_generate(),
            on_close: move |_| show_generate.set(false),
            on_created: move |_| {
                show_generate.set(false);
                on_change.call(());
            },
        }
    }
}

#[component]
fn GenerateInvoiceModal(open: bool, on_close: EventHandler<()>, on_created: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut resident = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut due = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let residents = use_resource(move || async move { server::api::list_residents().await.unwrap_or_default() });

    let handle_submit = move |_: FormEvent| {
        let name = resident();
        let amount_value = parse_amount(&amount());
        let Some(due_date) = parse_date(&due()) else {
            toast.fail("Please fill all fields with valid data.");
            return;
        };
        if name.trim().is_empty() || amount_value <= 0.0 {
            toast.fail("Please fill all fields with valid data.");
            return;
        }
        saving.set(true);
        spawn(async move {
            let req = GenerateInvoiceRequest {
                resident_name: name,
                amount: amount_value,
                due_date,
            };
            match server::api::generate_invoice(req).await {
                Ok(inv) => {
                    toast.ok(format!("Invoice {} generated.", inv.invoice_number));
                    resident.set(String::new());
                    amount.set(String::new());
                    due.set(String::new());
                    on_created.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let mut options = vec![(String::new(), "Select resident".to_string())];
    if let Some(list) = &*residents.read() {
        options.extend(
            list.iter()
                .map(|r| (r.name.clone(), format!("{} ({})", r.name, r.flat_no))),
        );
    }

    rsx! {
        Modal { open, on_close, title: "Generate Invoice",
            Form { onsubmit: handle_submit,
                SelectField {
                    label: "Resident",
                    value: resident(),
                    options,
                    required: true,
                    error: field_error(errors, "resident_name"),
                    on_change: move |v| resident.set(v),
                }
                FieldRow {
                    TextField {
                        label: "Amount (INR)",
                        input_type: "number",
                        value: amount(),
                        required: true,
                        error: field_error(errors, "amount"),
                        on_input: move |v| amount.set(v),
                    }
                    TextField {
                        label: "Due Date",
                        input_type: "date",
                        value: due(),
                        required: true,
                        error: field_error(errors, "due_date"),
                        on_input: move |v| due.set(v),
                    }
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: saving(), "Generate" }
                }
            }
        }
    }
}

#[component]
fn PaymentsTab() -> Element {
    let payments = use_resource(move || async move { server::api::list_payments().await });

    rsx! {
        Card {
            CardHeader { title: "Payment History" }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Resident" }
                        DataTableColumn { "Invoice" }
                        DataTableColumn { "Date" }
                        DataTableColumn { "Method" }
                        DataTableColumn { numeric: true, "Amount" }
                    }
                    DataTableBody {
                        match &*payments.read() {
                            Some(Ok(list)) if list.is_empty() => rsx! {
                                DataTableEmpty { columns: 5, message: "No payments recorded." }
                            },
                            Some(Ok(list)) => rsx! {
                                for p in list.iter() {
                                    DataTableRow { key: "{p.id}",
                                        DataTableCell { "{p.resident_name}" }
                                        DataTableCell { "{p.invoice_number}" }
                                        DataTableCell { "{p.payment_date}" }
                                        DataTableCell { {p.payment_method.label()} }
                                        DataTableCell { numeric: true, {format_inr(p.amount)} }
                                    }
                                }
                            },
                            Some(Err(e)) => rsx! {
                                DataTableEmpty { columns: 5, message: shared_types::AppError::friendly_message(&e.to_string()) }
                            },
                            None => rsx! { DataTableEmpty { columns: 5, message: "Loading payments..." } },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MaintenanceTab() -> Element {
    let config = use_resource(move || async move { server::api::get_maintenance().await });

    rsx! {
        match &*config.read() {
            Some(Ok(cfg)) => rsx! { MaintenanceForm { initial: cfg.clone() } },
            Some(Err(e)) => rsx! {
                Card { CardContent { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } } }
            },
            None => rsx! { div { class: "loading", "Loading settings..." } },
        }
    }
}

#[component]
fn MaintenanceForm(initial: MaintenanceConfig) -> Element {
    let toast = use_toast();
    let mut monthly = use_signal(|| initial.monthly_amount.to_string());
    let mut due_day = use_signal(|| initial.due_date_day.to_string());
    let mut late_fee = use_signal(|| initial.late_fee.to_string());
    let mut late_after = use_signal(|| initial.late_fee_after_day.to_string());
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_save = move |_: FormEvent| {
        let config = MaintenanceConfig {
            monthly_amount: parse_amount(&monthly()),
            due_date_day: due_day().trim().parse().unwrap_or(0),
            late_fee: parse_amount(&late_fee()),
            late_fee_after_day: late_after().trim().parse().unwrap_or(0),
        };
        saving.set(true);
        spawn(async move {
            match server::api::update_maintenance(config).await {
                Ok(_) => toast.ok("Maintenance settings saved."),
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader {
                title: "Maintenance Settings",
                description: "Monthly charge, due day and late fee applied to new invoices.".to_string(),
            }
            CardContent {
                Form { onsubmit: handle_save,
                    FieldRow {
                        TextField {
                            label: "Monthly Amount (INR)",
                            input_type: "number",
                            value: monthly(),
                            error: field_error(errors, "monthly_amount"),
                            on_input: move |v| monthly.set(v),
                        }
                        TextField {
                            label: "Due Day of Month",
                            input_type: "number",
                            value: due_day(),
                            error: field_error(errors, "due_date_day"),
                            on_input: move |v| due_day.set(v),
                        }
                    }
                    FieldRow {
                        TextField {
                            label: "Late Fee (INR)",
                            input_type: "number",
                            value: late_fee(),
                            error: field_error(errors, "late_fee"),
                            on_input: move |v| late_fee.set(v),
                        }
                        TextField {
                            label: "Late Fee After Day",
                            input_type: "number",
                            value: late_after(),
                            error: field_error(errors, "late_fee_after_day"),
                            on_input: move |v| late_after.set(v),
                        }
                    }
                    Button { r#type: "submit", busy: saving(), busy_label: "Saving...", "Save Settings" }
                }
            }
        }
    }
}
