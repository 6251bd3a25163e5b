use dioxus::prelude::*;
use shared_types::{IncidentSeverity, IncidentStatus, Labeled, ReportIncidentRequest};
use shared_ui::{
    label_options, use_toast, Button, Card, CardContent, CardHeader, Form, PageHeader,
    SelectField, StatusBadge, TextAreaField, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, report_error, FieldErrors};

/// Incident reports and their investigation status.
#[component]
pub fn Incidents() -> Element {
    let toast = use_toast();
    let mut incidents = use_resource(move || async move { server::api::list_incidents().await });

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut severity = use_signal(|| IncidentSeverity::default().label().to_string());
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_report = move |_: FormEvent| {
        let req = ReportIncidentRequest {
            title: title(),
            description: description(),
            severity: IncidentSeverity::from_label(&severity()).unwrap_or_default(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::report_incident(req).await {
                Ok(i) => {
                    toast.ok(format!("Incident \"{}\" reported.", i.title));
                    title.set(String::new());
                    description.set(String::new());
                    incidents.restart();
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let set_status = move |id: String, label: String| {
        let Some(status) = IncidentStatus::from_label(&label) else { return };
        spawn(async move {
            match server::api::set_incident_status(id, status).await {
                Ok(i) => {
                    toast.ok(format!("\"{}\" marked {}.", i.title, i.status.label()));
                    incidents.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let statuses = label_options(IncidentStatus::ALL.iter().map(|s| s.label()));

    rsx! {
        PageHeader { title: "Incident Reports", subtitle: "Log what happened and track follow-up.".to_string() }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Report Incident" }
                CardContent {
                    Form { onsubmit: handle_report,
                        TextField {
                            label: "Title",
                            value: title(),
                            required: true,
                            error: field_error(errors, "title"),
                            on_input: move |v| title.set(v),
                        }
                        SelectField {
                            label: "Severity",
                            value: severity(),
                            options: label_options(IncidentSeverity::ALL.iter().map(|s| s.label())),
                            on_change: move |v| severity.set(v),
                        }
                        TextAreaField {
                            label: "Description",
                            value: description(),
                            required: true,
                            error: field_error(errors, "description"),
                            on_input: move |v| description.set(v),
                        }
                        Button { r#type: "submit", busy: saving(), busy_label: "Reporting...", "Report" }
                    }
                }
            }

            div { class: "stack-list",
                match &*incidents.read() {
                    None => rsx! { div { class: "loading", "Loading incidents..." } },
                    Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
                    Some(Ok(list)) if list.is_empty() => rsx! { p { class: "muted", "No incidents reported." } },
                    Some(Ok(list)) => rsx! {
                        for i in list.iter() {
                            Card { key: "{i.id}",
                                CardHeader {
                                    title: i.title.clone(),
                                    description: format!("{} at {} · {}", i.date, i.time, i.reported_by),
                                    StatusBadge { tone: i.severity.tone(), label: i.severity.label() }
                                }
                                CardContent {
                                    p { "{i.description}" }
                                    div { class: "row-actions",
                                        StatusBadge { tone: i.status.tone(), label: i.status.label() }
                                        SelectField {
                                            value: i.status.label().to_string(),
                                            options: statuses.clone(),
                                            on_change: {
                                                let id = i.id.clone();
                                                move |v| set_status(id.clone(), v)
                                            },
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
