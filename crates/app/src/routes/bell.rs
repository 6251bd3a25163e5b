use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBell, LdCheck};
use dioxus_free_icons::Icon;
use shared_types::{unread_preview, ReadFilter, BELL_PREVIEW};
use shared_ui::{use_toast, ToastExt};

use super::BellRefresh;

/// Header bell: unread badge plus a dropdown of the newest unread items.
#[component]
pub fn BellMenu(section: String) -> Element {
    let toast = use_toast();
    let bell = use_context::<BellRefresh>();
    let mut open = use_signal(|| false);

    let unread = use_resource(move || {
        let _ = (bell.0)();
        async move { server::api::unread_notifications().await.unwrap_or(0) }
    });
    let recent = use_resource(move || {
        let _ = (bell.0)();
        async move {
            server::api::list_notifications(ReadFilter::Unread)
                .await
                .map(|list| unread_preview(&list, BELL_PREVIEW))
                .unwrap_or_default()
        }
    });

    let mark_read = move |id: String| {
        spawn(async move {
            match server::api::mark_notification_read(id).await {
                Ok(_) => bell.bump(),
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let unread_count = unread().unwrap_or(0);
    let items = recent().unwrap_or_default();

    rsx! {
        div { class: "bell-menu",
            button {
                class: "topbar-icon topbar-bell",
                r#type: "button",
                "aria-label": "Notifications",
                "aria-expanded": if open() { "true" } else { "false" },
                onclick: move |_| open.toggle(),
                Icon::<LdBell> { icon: LdBell, width: 18, height: 18 }
                if unread_count > 0 {
                    span { class: "topbar-bell-count", "{unread_count}" }
                }
            }
            if open() {
                div { class: "bell-dropdown",
                    div { class: "bell-dropdown-head",
                        strong { "Notifications" }
                        span { class: "muted", "{unread_count} unread notifications" }
                    }
                    div { class: "bell-dropdown-list",
                        if items.is_empty() {
                            p { class: "bell-dropdown-empty muted", "No unread notifications" }
                        }
                        for n in items {
                            div { key: "{n.id}", class: "bell-item",
                                div { class: "bell-item-text",
                                    strong { "{n.title}" }
                                    p { "{n.message}" }
                                    span { class: "muted", "{n.date}" }
                                }
                                button {
                                    class: "bell-item-read",
                                    r#type: "button",
                                    title: "Mark as read",
                                    onclick: {
                                        let id = n.id.clone();
                                        move |_| mark_read(id.clone())
                                    },
                                    Icon::<LdCheck> { icon: LdCheck, width: 16, height: 16 }
                                }
                            }
                        }
                    }
                    Link {
                        class: "bell-dropdown-all",
                        to: format!("{section}/notifications"),
                        onclick: move |_| open.set(false),
                        "View all notifications"
                    }
                }
            }
        }
    }
}
