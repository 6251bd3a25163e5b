use dioxus::prelude::*;
use shared_types::ReadFilter;
use shared_ui::{use_toast, Button, ButtonVariant, Card, CardContent, PageHeader, Segmented, ToastExt};

use super::BellRefresh;

const ALL_LABEL: &str = "All";
const UNREAD_LABEL: &str = "Unread";

fn read_filter(label: &str) -> ReadFilter {
    if label == UNREAD_LABEL {
        ReadFilter::Unread
    } else {
        ReadFilter::All
    }
}

fn card_class(read: bool) -> &'static str {
    if read {
        "notification-card"
    } else {
        "notification-card unread"
    }
}

/// Notifications addressed to the signed-in role.
#[component]
pub fn Notifications(section: String) -> Element {
    let toast = use_toast();
    let bell = use_context::<BellRefresh>();
    let mut tab = use_signal(|| ALL_LABEL.to_string());
    // Follows the bell so marks made from the header dropdown show here too.
    let list = use_resource(move || {
        let _ = (bell.0)();
        async move { server::api::list_notifications(read_filter(&tab())).await }
    });

    let mark_read = move |id: String| {
        spawn(async move {
            match server::api::mark_notification_read(id).await {
                Ok(_) => bell.bump(),
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let mark_all = move |_| {
        spawn(async move {
            match server::api::mark_all_notifications_read().await {
                Ok(0) => toast.ok("You're all caught up."),
                Ok(n) => {
                    toast.ok(format!("{n} notifications marked as read."));
                    bell.bump();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader {
            title: "Notifications",
            Link { class: "link-button", to: format!("/{section}/dashboard"), "Back to dashboard" }
            Button { variant: ButtonVariant::Secondary, onclick: mark_all, "Mark all as read" }
        }

        Segmented {
            options: vec![ALL_LABEL.to_string(), UNREAD_LABEL.to_string()],
            selected: tab(),
            on_select: move |t| tab.set(t),
        }

        match &*list.read() {
            None => rsx! { div { class: "loading", "Loading notifications..." } },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            Some(Ok(items)) if items.is_empty() => rsx! {
                p { class: "muted", "No notifications here." }
            },
            Some(Ok(items)) => rsx! {
                div { class: "stack-list",
                    for n in items.iter() {
                        Card { key: "{n.id}", class: card_class(n.read),
                            CardContent {
                                div { class: "notification-head",
                                    strong { "{n.title}" }
                                    span { class: "muted", "{n.date}" }
                                }
                                p { "{n.message}" }
                                if !n.read {
                                    Button {
                                        variant: ButtonVariant::Ghost,
                                        small: true,
                                        onclick: {
                                            let id = n.id.clone();
                                            move |_| mark_read(id.clone())
                                        },
                                        "Mark as read"
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
