use dioxus::prelude::*;
use shared_types::{Labeled, SecurityDashboard, Tone};
use shared_ui::{
    Card, CardContent, CardHeader, KpiCard, KpiGrid, PageHeader, StatusBadge,
};

/// Gate overview for the Security role.
#[component]
pub fn SecurityHome() -> Element {
    let data = use_resource(move || async move { server::api::security_dashboard().await });

    rsx! {
        PageHeader {
            title: "Security Overview",
            subtitle: "Live status of the gate, patrols and incidents.".to_string(),
        }
        match &*data.read() {
            Some(Ok(dash)) => rsx! { SecurityDashboardView { dash: dash.clone() } },
            Some(Err(e)) => rsx! {
                Card { CardContent { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } } }
            },
            None => rsx! { div { class: "loading", "Loading..." } },
        }
    }
}

#[component]
fn SecurityDashboardView(dash: SecurityDashboard) -> Element {
    rsx! {
        KpiGrid {
            KpiCard { title: "Visitors Inside", value: dash.visitors_inside.to_string(), tone: Tone::Info }
            KpiCard { title: "Active Patrols", value: dash.patrols_in_progress.to_string(), tone: Tone::Warning }
            KpiCard { title: "Open Incidents", value: dash.open_incidents.to_string(), tone: Tone::Error }
            KpiCard { title: "Vehicles Inside", value: dash.vehicles_inside.to_string(), tone: Tone::Success }
        }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Patrols In Progress" }
                CardContent {
                    if dash.active_patrols.is_empty() {
                        p { class: "muted", "No patrols in progress." }
                    }
                    ul { class: "stack-list",
                        for p in dash.active_patrols.iter() {
                            li { key: "{p.id}",
                                div {
                                    strong { "{p.route_name}" }
                                    p { class: "muted", "{p.guard_name} · started {p.start_time.clone().unwrap_or_default()}" }
                                }
                                StatusBadge { tone: p.status.tone(), label: p.status.label() }
                            }
                        }
                    }
                }
            }
            Card {
                CardHeader { title: "Recent Incidents" }
                CardContent {
                    if dash.recent_incidents.is_empty() {
                        p { class: "muted", "No incidents reported." }
                    }
                    ul { class: "stack-list",
                        for i in dash.recent_incidents.iter() {
                            li { key: "{i.id}",
                                div {
                                    strong { "{i.title}" }
                                    p { class: "muted", "{i.date} {i.time} · {i.reported_by}" }
                                }
                                StatusBadge { tone: i.severity.tone(), label: i.severity.label() }
                            }
                        }
                    }
                }
            }
        }
    }
}
