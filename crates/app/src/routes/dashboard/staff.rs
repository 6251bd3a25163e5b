use dioxus::prelude::*;
use shared_types::{format_inr, Labeled, StaffDashboard, StatusCount};
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardHeader, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, KpiCard,
    KpiGrid, PageHeader, StatusBadge,
};

use super::pie_gradient;
use crate::auth::use_auth;
use crate::routes::go_to;

/// Landing page for Admin, Secretary and Treasurer.
#[component]
pub fn AdminDashboard() -> Element {
    let auth = use_auth();
    let name = auth.display_name();

    let data = use_resource(move || async move { server::api::staff_dashboard().await });

    rsx! {
        PageHeader {
            title: "Welcome back, {name}",
            subtitle: "Here is what is happening in your society today.".to_string(),
        }

        match &*data.read() {
            Some(Ok(dash)) => rsx! { StaffDashboardView { dash: dash.clone() } },
            Some(Err(e)) => rsx! {
                Card { CardContent { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } } }
            },
            None => rsx! { div { class: "loading", "Loading dashboard..." } },
        }
    }
}

#[component]
fn StaffDashboardView(dash: StaffDashboard) -> Element {
    rsx! {
        KpiGrid {
            for kpi in dash.kpis.iter() {
                KpiCard {
                    key: "{kpi.title}",
                    title: kpi.title.clone(),
                    value: kpi.value.clone(),
                    tone: kpi.tone,
                }
            }
        }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Recent Complaints" }
                CardContent {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Title" }
                            DataTableColumn { "Raised By" }
                            DataTableColumn { "Priority" }
                            DataTableColumn { "Status" }
                        }
                        DataTableBody {
                            if dash.recent_complaints.is_empty() {
                                DataTableEmpty { columns: 4, message: "No complaints yet." }
                            }
                            for c in dash.recent_complaints.iter() {
                                DataTableRow { key: "{c.id}",
                                    DataTableCell { "{c.title}" }
                                    DataTableCell { "{c.raised_by}" }
                                    DataTableCell { StatusBadge { tone: c.priority.tone(), label: c.priority.label() } }
                                    DataTableCell { StatusBadge { tone: c.status.tone(), label: c.status.label() } }
                                }
                            }
                        }
                    }
                }
            }

            Card {
                CardHeader { title: "Recent Payments" }
                CardContent {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Resident" }
                            DataTableColumn { "Invoice" }
                            DataTableColumn { "Date" }
                            DataTableColumn { numeric: true, "Amount" }
                        }
                        DataTableBody {
                            if dash.recent_payments.is_empty() {
                                DataTableEmpty { columns: 4, message: "No payments recorded." }
                            }
                            for p in dash.recent_payments.iter() {
                                DataTableRow { key: "{p.id}",
                                    DataTableCell { "{p.resident_name}" }
                                    DataTableCell { "{p.invoice_number}" }
                                    DataTableCell { "{p.payment_date}" }
                                    DataTableCell { numeric: true, {format_inr(p.amount)} }
                                }
                            }
                        }
                    }
                }
            }
        }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Quick Actions" }
                CardContent {
                    div { class: "quick-actions",
                        for action in dash.quick_actions.iter() {
                            Button {
                                key: "{action.label}",
                                variant: ButtonVariant::Secondary,
                                onclick: {
                                    let path = action.path.clone();
                                    move |_| go_to(&path)
                                },
                                "{action.label}"
                            }
                        }
                    }
                }
            }

            if let Some(breakdown) = dash.complaint_breakdown.clone() {
                ComplaintPie { slices: breakdown }
            }
        }
    }
}

#[component]
fn ComplaintPie(slices: Vec<StatusCount>) -> Element {
    let stops: Vec<_> = slices.iter().map(|s| (s.count, s.tone)).collect();
    let background = pie_gradient(&stops);

    rsx! {
        Card {
            CardHeader { title: "Complaint Status" }
            CardContent {
                div { class: "pie-wrap",
                    div { class: "pie", style: "background: {background};" }
                    ul { class: "pie-legend",
                        for s in slices.iter() {
                            li { key: "{s.label}",
                                span { class: "pie-swatch", "data-tone": s.tone.as_str() }
                                "{s.label}"
                                strong { " {s.count}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
