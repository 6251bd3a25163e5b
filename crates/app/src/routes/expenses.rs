use chrono::Datelike;
use dioxus::prelude::*;
use shared_types::{
    format_inr, Attachment, BulkAction, Expense, ExpenseCategory, ExpenseFilter, ExpenseStatus, ExpenseSummary,
    FeatureFlags, Labeled, LogExpenseRequest, Tone, ALL_FILTER,
};
use shared_ui::{
    label_options, use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, ConfirmModal,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader,
    DataTableRow, FieldRow, FileField, FilterBar, Form, KpiCard, KpiGrid, Modal, ModalFooter,
    PageHeader, ProgressBar, SearchInput, SelectField, StatusBadge, TextAreaField, TextField,
    ToastExt,
};
use std::collections::{HashMap, HashSet};

use crate::download;
use crate::form::{field_error, non_blank, parse_amount, parse_date, report_error, FieldErrors};

fn with_all<T: Labeled>() -> Vec<(String, String)> {
    label_options(std::iter::once(ALL_FILTER).chain(T::ALL.iter().map(|v| v.label())))
}

/// Expense log with filters, bulk decisions and exports.
#[component]
pub fn Expenses() -> Element {
    let toast = use_toast();
    let flags = use_context::<FeatureFlags>();

    let mut category = use_signal(|| ALL_FILTER.to_string());
    let mut status = use_signal(|| ALL_FILTER.to_string());
    let mut start = use_signal(String::new);
    let mut end = use_signal(String::new);
    let mut search = use_signal(String::new);
    let mut selected = use_signal(HashSet::<String>::new);
    let mut show_log = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<String>::None);

    let filter = use_memo(move || ExpenseFilter {
        category: Some(category()),
        status: Some(status()),
        start_date: parse_date(&start()),
        end_date: parse_date(&end()),
        search: non_blank(&search()),
    });

    let mut expenses = use_resource(move || async move { server::api::list_expenses(filter()).await });
    let year = use_signal(|| chrono::Local::now().year());
    let mut summary = use_resource(move || async move { server::api::expense_summary(year()).await });
    let mut years = use_resource(move || async move { server::api::expense_years().await.unwrap_or_default() });

    let mut reload = move || {
        expenses.restart();
        summary.restart();
        years.restart();
        selected.write().clear();
    };

    let decide = move |id: String, approve: bool| {
        spawn(async move {
            match server::api::decide_expense(id, approve).await {
                Ok(e) => {
                    toast.ok(format!("Expense to {} {}.", e.payee, e.status.label().to_lowercase()));
                    reload();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let bulk = move |action: BulkAction| {
        let ids: Vec<String> = selected.read().iter().cloned().collect();
        if ids.is_empty() {
            toast.fail("Select at least one expense.");
            return;
        }
        spawn(async move {
            match server::api::bulk_expenses(ids, action).await {
                Ok(outcome) => {
                    toast.ok(format!("{} expenses {}.", outcome.affected, outcome.action.past_tense()));
                    reload();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let confirm_delete = move |_| {
        let Some(id) = pending_delete() else { return };
        pending_delete.set(None);
        spawn(async move {
            match server::api::delete_expense(id).await {
                Ok(()) => {
                    toast.ok("Expense deleted.");
                    reload();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let rows: Vec<Expense> = match &*expenses.read() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let all_ids: Vec<String> = rows.iter().map(|e| e.id.clone()).collect();
    let all_selected = !all_ids.is_empty() && all_ids.iter().all(|id| selected.read().contains(id));
    let selection_count = selected.read().len();

    rsx! {
        PageHeader {
            title: "Expenses",
            subtitle: "Log society spending and approve pending payouts.".to_string(),
            Button { onclick: move |_| show_log.set(true), "Log Expense" }
        }

        match &*summary.read() {
            Some(Ok(s)) => rsx! {
                ExpenseOverview {
                    summary: s.clone(),
                    years: years.read().clone().unwrap_or_default(),
                    year,
                }
            },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            None => rsx! { div { class: "loading", "Loading summary..." } },
        }

        Card {
            CardContent {
                FilterBar {
                    SelectField {
                        label: "Category",
                        value: category(),
                        options: with_all::<ExpenseCategory>(),
                        on_change: move |v| category.set(v),
                    }
                    SelectField {
                        label: "Status",
                        value: status(),
                        options: with_all::<ExpenseStatus>(),
                        on_change: move |v| status.set(v),
                    }
                    TextField { label: "From", input_type: "date", value: start(), on_input: move |v| start.set(v) }
                    TextField { label: "To", input_type: "date", value: end(), on_input: move |v| end.set(v) }
                    SearchInput {
                        value: search(),
                        placeholder: "Search payee or description...".to_string(),
                        on_input: move |v| search.set(v),
                    }
                }

                div { class: "table-toolbar",
                    div { class: "row-actions",
                        span { class: "muted", "{selection_count} selected" }
                        Button {
                            variant: ButtonVariant::Success,
                            small: true,
                            disabled: selection_count == 0,
                            onclick: move |_| bulk(BulkAction::Approve),
                            "Approve"
                        }
                        Button {
                            variant: ButtonVariant::Secondary,
                            small: true,
                            disabled: selection_count == 0,
                            onclick: move |_| bulk(BulkAction::Reject),
                            "Reject"
                        }
                        Button {
                            variant: ButtonVariant::Danger,
                            small: true,
                            disabled: selection_count == 0,
                            onclick: move |_| bulk(BulkAction::Delete),
                            "Delete"
                        }
                    }
                    div { class: "row-actions",
                        for format in flags.export_formats() {
                            a {
                                key: "{format.extension()}",
                                class: "button",
                                "data-style": "secondary",
                                "data-size": "sm",
                                href: download::expense_export(format, &filter()),
                                download: "",
                                {format.label()}
                            }
                        }
                    }
                }

                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            input {
                                r#type: "checkbox",
                                aria_label: "Select all",
                                checked: all_selected,
                                onchange: {
                                    let all_ids = all_ids.clone();
                                    move |_| {
                                        if all_selected {
                                            selected.write().clear();
                                        } else {
                                            selected.set(all_ids.iter().cloned().collect());
                                        }
                                    }
                                },
                            }
                        }
                        DataTableColumn { "Date" }
                        DataTableColumn { "Category" }
                        DataTableColumn { "Payee" }
                        DataTableColumn { "Description" }
                        DataTableColumn { numeric: true, "Amount" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "Actions" }
                    }
                    DataTableBody {
                        if expenses.read().is_none() {
                            DataTableEmpty { columns: 8, message: "Loading expenses..." }
                        } else if rows.is_empty() {
                            DataTableEmpty { columns: 8, message: "No expenses match the current filters." }
                        }
                        for e in rows {
                            DataTableRow { key: "{e.id}", selected: selected.read().contains(&e.id),
                                DataTableCell {
                                    input {
                                        r#type: "checkbox",
                                        checked: selected.read().contains(&e.id),
                                        onchange: {
                                            let id = e.id.clone();
                                            move |_| {
                                                let mut set = selected.write();
                                                if !set.remove(&id) {
                                                    set.insert(id.clone());
                                                }
                                            }
                                        },
                                    }
                                }
                                DataTableCell { "{e.date}" }
                                DataTableCell { {e.category.label()} }
                                DataTableCell { "{e.payee}" }
                                DataTableCell {
                                    "{e.description}"
                                    if let Some(receipt) = &e.receipt {
                                        div { class: "muted", "Receipt: {receipt}" }
                                    }
                                }
                                DataTableCell { numeric: true, {format_inr(e.amount)} }
                                DataTableCell { StatusBadge { tone: e.status.tone(), label: e.status.label() } }
                                DataTableCell {
                                    div { class: "row-actions",
                                        if e.status == ExpenseStatus::PendingApproval {
                                            Button {
                                                variant: ButtonVariant::Success,
                                                small: true,
                                                onclick: {
                                                    let id = e.id.clone();
                                                    move |_| decide(id.clone(), true)
                                                },
                                                "Approve"
                                            }
                                            Button {
                                                variant: ButtonVariant::Secondary,
                                                small: true,
                                                onclick: {
                                                    let id = e.id.clone();
                                                    move |_| decide(id.clone(), false)
                                                },
                                                "Reject"
                                            }
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            small: true,
                                            onclick: {
                                                let id = e.id.clone();
                                                move |_| pending_delete.set(Some(id.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        LogExpenseModal {
            open: show_log(),
            on_close: move |_| show_log.set(false),
            on_logged: move |_| {
                show_log.set(false);
                reload();
            },
        }

        ConfirmModal {
            open: pending_delete().is_some(),
            title: "Delete expense?",
            message: "This expense will be removed from the log.",
            on_confirm: confirm_delete,
            on_cancel: move |_| pending_delete.set(None),
        }
    }
}

/// Summary cards and the monthly spending chart for the chosen year.
#[component]
fn ExpenseOverview(summary: ExpenseSummary, years: Vec<i32>, mut year: Signal<i32>) -> Element {
    let mut year_options = years;
    if !year_options.contains(&year()) {
        year_options.insert(0, year());
    }
    let peak = summary.monthly.iter().map(|m| m.total).fold(0.0_f64, f64::max);

    rsx! {
        KpiGrid {
            KpiCard { title: "Total This Month", value: format_inr(summary.total_this_month), tone: Tone::Info }
            KpiCard {
                title: "Pending Approval",
                value: format_inr(summary.pending_approval_total),
                tone: Tone::Warning,
                hint: format!("{} expenses", summary.pending_approval_count),
            }
        }
        Card {
            CardHeader { title: "Monthly Expenses",
                SelectField {
                    value: year().to_string(),
                    options: year_options.iter().map(|y| (y.to_string(), y.to_string())).collect::<Vec<_>>(),
                    on_change: move |v: String| {
                        if let Ok(y) = v.parse() {
                            year.set(y);
                        }
                    },
                }
            }
            CardContent {
                div { class: "stack-list",
                    for m in summary.monthly.iter() {
                        ProgressBar {
                            key: "{m.month}",
                            percent: bar_percent(m.total, peak),
                            label: m.month.clone(),
                            caption: format_inr(m.total),
                        }
                    }
                }
            }
        }
    }
}

fn bar_percent(value: f64, peak: f64) -> u32 {
    if peak <= 0.0 {
        0
    } else {
        ((value / peak) * 100.0).round() as u32
    }
}

#[component]
fn LogExpenseModal(open: bool, on_close: EventHandler<()>, on_logged: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut date = use_signal(String::new);
    let mut category = use_signal(|| ExpenseCategory::default().label().to_string());
    let mut payee = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut receipt = use_signal(|| Option::<Attachment>::None);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let req = LogExpenseRequest {
            date: parse_date(&date()),
            category: ExpenseCategory::from_label(&category()).unwrap_or_default(),
            payee: payee(),
            amount: parse_amount(&amount()),
            description: description(),
            receipt: receipt(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::log_expense(req).await {
                Ok(e) => {
                    toast.ok(format!("Expense to {} logged for approval.", e.payee));
                    date.set(String::new());
                    payee.set(String::new());
                    amount.set(String::new());
                    description.set(String::new());
                    receipt.set(None);
                    on_logged.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Modal { open, on_close, title: "Log Expense",
            Form { onsubmit: handle_submit,
                FieldRow {
                    TextField {
                        label: "Date",
                        input_type: "date",
                        value: date(),
                        error: field_error(errors, "date"),
                        on_input: move |v| date.set(v),
                    }
                    SelectField {
                        label: "Category",
                        value: category(),
                        options: label_options(ExpenseCategory::ALL.iter().map(|c| c.label())),
                        on_change: move |v| category.set(v),
                    }
                }
                FieldRow {
                    TextField {
                        label: "Payee",
                        value: payee(),
                        required: true,
                        error: field_error(errors, "payee"),
                        on_input: move |v| payee.set(v),
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
                TextAreaField {
                    label: "Description",
                    value: description(),
                    required: true,
                    rows: 3,
                    error: field_error(errors, "description"),
                    on_input: move |v| description.set(v),
                }
                FileField {
                    label: "Receipt",
                    accept: ".pdf,.jpg,.jpeg,.png",
                    current: receipt().map(|r| r.file_name),
                    error: field_error(errors, "receipt"),
                    on_pick: move |a| receipt.set(Some(a)),
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: saving(), busy_label: "Saving...", "Log Expense" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_busiest_month() {
        assert_eq!(bar_percent(50.0, 200.0), 25);
        assert_eq!(bar_percent(200.0, 200.0), 100);
        assert_eq!(bar_percent(0.0, 0.0), 0);
    }

    #[test]
    fn filter_options_start_with_all() {
        let options = with_all::<ExpenseStatus>();
        assert_eq!(options[0].0, ALL_FILTER);
        assert_eq!(options.len(), ExpenseStatus::ALL.len() + 1);
    }
}
