use dioxus::prelude::*;
use shared_types::{Labeled, PatrolStatus, SchedulePatrolRequest};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form,
    PageHeader, StatusBadge, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, report_error, FieldErrors};

/// Patrol rounds: schedule, start and complete.
#[component]
pub fn Patrols() -> Element {
    let toast = use_toast();
    let mut patrols = use_resource(move || async move { server::api::list_patrols().await });

    let mut route_name = use_signal(String::new);
    let mut guard_name = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_schedule = move |_: FormEvent| {
        let req = SchedulePatrolRequest {
            route_name: route_name(),
            guard_name: guard_name(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::schedule_patrol(req).await {
                Ok(p) => {
                    toast.ok(format!("{} scheduled for {}.", p.route_name, p.guard_name));
                    route_name.set(String::new());
                    guard_name.set(String::new());
                    patrols.restart();
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let advance = move |id: String, status: PatrolStatus| {
        spawn(async move {
            let result = match status {
                PatrolStatus::Scheduled => server::api::start_patrol(id).await,
                _ => server::api::end_patrol(id).await,
            };
            match result {
                Ok(p) => {
                    toast.ok(format!("{} is now {}.", p.route_name, p.status.label().to_lowercase()));
                    patrols.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader { title: "Patrol Management", subtitle: "Schedule rounds and log when they start and finish.".to_string() }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Schedule Patrol" }
                CardContent {
                    Form { onsubmit: handle_schedule,
                        TextField {
                            label: "Route",
                            value: route_name(),
                            required: true,
                            placeholder: "Perimeter, Tower B basement...".to_string(),
                            error: field_error(errors, "route_name"),
                            on_input: move |v| route_name.set(v),
                        }
                        TextField {
                            label: "Guard",
                            value: guard_name(),
                            required: true,
                            error: field_error(errors, "guard_name"),
                            on_input: move |v| guard_name.set(v),
                        }
                        Button { r#type: "submit", busy: saving(), "Schedule" }
                    }
                }
            }

            Card {
                CardHeader { title: "Patrol Log" }
                CardContent {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Route" }
                            DataTableColumn { "Guard" }
                            DataTableColumn { "Start" }
                            DataTableColumn { "End" }
                            DataTableColumn { "Status" }
                            DataTableColumn { "" }
                        }
                        DataTableBody {
                            match &*patrols.read() {
                                None => rsx! { DataTableEmpty { columns: 6, message: "Loading patrols..." } },
                                Some(Err(e)) => rsx! {
                                    DataTableEmpty { columns: 6, message: shared_types::AppError::friendly_message(&e.to_string()) }
                                },
                                Some(Ok(list)) if list.is_empty() => rsx! {
                                    DataTableEmpty { columns: 6, message: "No patrols scheduled." }
                                },
                                Some(Ok(list)) => rsx! {
                                    for p in list.iter() {
                                        DataTableRow { key: "{p.id}",
                                            DataTableCell { "{p.route_name}" }
                                            DataTableCell { "{p.guard_name}" }
                                            DataTableCell { {p.start_time.clone().unwrap_or_else(|| "-".into())} }
                                            DataTableCell { {p.end_time.clone().unwrap_or_else(|| "-".into())} }
                                            DataTableCell { StatusBadge { tone: p.status.tone(), label: p.status.label() } }
                                            DataTableCell {
                                                match p.status {
                                                    PatrolStatus::Completed => rsx! {},
                                                    status => rsx! {
                                                        Button {
                                                            variant: ButtonVariant::Secondary,
                                                            small: true,
                                                            onclick: {
                                                                let id = p.id.clone();
                                                                move |_| advance(id.clone(), status)
                                                            },
                                                            if status == PatrolStatus::Scheduled { "Start" } else { "End" }
                                                        }
                                                    },
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
    }
}
