use dioxus::prelude::*;
use shared_types::{
    Complaint, ComplaintCommentRequest, ComplaintFilter, ComplaintPriority, ComplaintStatus,
    Labeled, ALL_FILTER,
};
use shared_ui::{
    label_options, use_toast, Button, ButtonVariant, FilterBar, Form, Modal, ModalFooter,
    PageHeader, SelectField, StatusBadge, TextAreaField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, report_error, FieldErrors};

/// Kanban board of resident complaints, one column per status.
#[component]
pub fn ComplaintBoard() -> Element {
    let toast = use_toast();
    let mut priority = use_signal(|| ALL_FILTER.to_string());
    let mut board = use_resource(move || async move {
        server::api::complaint_board(ComplaintFilter {
            priority: Some(priority()),
        })
        .await
    });
    let mut commenting = use_signal(|| Option::<Complaint>::None);

    let move_to = move |id: String, label: String| {
        let Some(status) = ComplaintStatus::from_label(&label) else { return };
        spawn(async move {
            match server::api::set_complaint_status(id, status).await {
                Ok(c) => {
                    toast.ok(format!("\"{}\" moved to {}.", c.title, c.status.label()));
                    board.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let priorities = label_options(
        std::iter::once(ALL_FILTER).chain(ComplaintPriority::ALL.iter().map(|p| p.label())),
    );
    let statuses = label_options(ComplaintStatus::ALL.iter().map(|s| s.label()));

    rsx! {
        PageHeader {
            title: "Complaints",
            subtitle: "Track resident complaints from open to resolved.".to_string(),
        }
        FilterBar {
            SelectField {
                label: "Priority",
                value: priority(),
                options: priorities,
                on_change: move |v| priority.set(v),
            }
        }

        match &*board.read() {
            None => rsx! { div { class: "loading", "Loading complaints..." } },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            Some(Ok(columns)) => rsx! {
                div { class: "kanban",
                    for column in columns.iter() {
                        section { class: "kanban-column", key: "{column.status.label()}",
                            header { class: "kanban-column-head",
                                StatusBadge { tone: column.status.tone(), label: column.status.label() }
                                span { class: "muted", "{column.complaints.len()}" }
                            }
                            if column.complaints.is_empty() {
                                p { class: "muted kanban-empty", "Nothing here." }
                            }
                            for c in column.complaints.iter().cloned() {
                                article { class: "kanban-card", key: "{c.id}",
                                    div { class: "kanban-card-head",
                                        strong { "{c.title}" }
                                        StatusBadge { tone: c.priority.tone(), label: c.priority.label() }
                                    }
                                    p { "{c.description}" }
                                    p { class: "muted", "{c.raised_by} · {c.date}" }
                                    div { class: "row-actions",
                                        SelectField {
                                            value: c.status.label().to_string(),
                                            options: statuses.clone(),
                                            on_change: {
                                                let id = c.id.clone();
                                                move |v| move_to(id.clone(), v)
                                            },
                                        }
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            small: true,
                                            onclick: {
                                                let c = c.clone();
                                                move |_| commenting.set(Some(c.clone()))
                                            },
                                            "Comment"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
        }

        if let Some(c) = commenting() {
            CommentModal { complaint: c, on_close: move |_| commenting.set(None) }
        }
    }
}

#[component]
fn CommentModal(complaint: Complaint, on_close: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut comment = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut sending = use_signal(|| false);
    let id = complaint.id.clone();

    let handle_submit = move |_: FormEvent| {
        let id = id.clone();
        let req = ComplaintCommentRequest { comment: comment() };
        sending.set(true);
        spawn(async move {
            match server::api::comment_on_complaint(id, req).await {
                Ok(resp) => {
                    toast.ok(resp.message);
                    on_close.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            sending.set(false);
        });
    };

    rsx! {
        Modal {
            open: true,
            on_close,
            title: "Add Comment",
            description: format!("{} ({})", complaint.title, complaint.raised_by),
            Form { onsubmit: handle_submit,
                TextAreaField {
                    label: "Comment",
                    value: comment(),
                    required: true,
                    rows: 4,
                    error: field_error(errors, "comment"),
                    on_input: move |v| comment.set(v),
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: sending(), "Send" }
                }
            }
        }
    }
}
