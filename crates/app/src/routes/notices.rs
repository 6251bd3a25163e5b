use dioxus::prelude::*;
use shared_types::{
    can_post_notice, Labeled, NoticeCategory, NoticeFilter, PostNoticeRequest, ALL_FILTER,
};
use shared_ui::{
    label_options, use_toast, Button, Card, CardContent, CardHeader, FilterBar, Form, PageHeader,
    SearchInput, SelectField, StatusBadge, TextAreaField, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::auth::use_role;
use crate::form::{field_error, non_blank, parse_date, report_error, FieldErrors};

/// Society notice board. Admin and Secretary can also publish.
#[component]
pub fn Notices(section: String) -> Element {
    let role = use_role();
    let mut search = use_signal(String::new);
    let mut category = use_signal(|| ALL_FILTER.to_string());
    let mut date = use_signal(String::new);

    let filter = use_memo(move || NoticeFilter {
        search: non_blank(&search()),
        category: Some(category()),
        date: parse_date(&date()),
    });
    let mut notices = use_resource(move || async move { server::api::list_notices(filter()).await });

    rsx! {
        PageHeader {
            title: "Notice Board",
            subtitle: "Announcements from the society office.".to_string(),
            Link { class: "link-button", to: format!("/{section}/dashboard"), "Back to dashboard" }
        }

        div { class: if can_post_notice(role) { "grid-2" } else { "" },
            if can_post_notice(role) {
                PostNoticeCard { on_posted: move |_| notices.restart() }
            }

            div {
                FilterBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search notices...".to_string(),
                        on_input: move |v| search.set(v),
                    }
                    SelectField {
                        value: category(),
                        options: label_options(
                            std::iter::once(ALL_FILTER).chain(NoticeCategory::ALL.iter().map(|c| c.label())),
                        ),
                        on_change: move |v| category.set(v),
                    }
                    TextField { input_type: "date", value: date(), on_input: move |v| date.set(v) }
                    if filter().is_active() {
                        button {
                            class: "link-button",
                            r#type: "button",
                            onclick: move |_| {
                                search.set(String::new());
                                category.set(ALL_FILTER.to_string());
                                date.set(String::new());
                            },
                            "Clear filters"
                        }
                    }
                }

                match &*notices.read() {
                    None => rsx! { div { class: "loading", "Loading notices..." } },
                    Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
                    Some(Ok(list)) if list.is_empty() => rsx! { p { class: "muted", "No notices found." } },
                    Some(Ok(list)) => rsx! {
                        div { class: "stack-list",
                            for n in list.iter() {
                                Card { key: "{n.id}",
                                    CardHeader { title: n.title.clone(), description: format!("{} · {}", n.date, n.published_by),
                                        StatusBadge { tone: n.category.tone(), label: n.category.label() }
                                    }
                                    CardContent { p { class: "notice-content", "{n.content}" } }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn PostNoticeCard(on_posted: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut title = use_signal(String::new);
    let mut category = use_signal(|| NoticeCategory::default().label().to_string());
    let mut content = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut posting = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let req = PostNoticeRequest {
            title: title(),
            category: NoticeCategory::from_label(&category()).unwrap_or_default(),
            content: content(),
        };
        posting.set(true);
        spawn(async move {
            match server::api::post_notice(req).await {
                Ok(n) => {
                    toast.ok(format!("\"{}\" published.", n.title));
                    title.set(String::new());
                    content.set(String::new());
                    on_posted.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            posting.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Post a Notice" }
            CardContent {
                Form { onsubmit: handle_submit,
                    TextField {
                        label: "Title",
                        value: title(),
                        required: true,
                        error: field_error(errors, "title"),
                        on_input: move |v| title.set(v),
                    }
                    SelectField {
                        label: "Category",
                        value: category(),
                        options: label_options(NoticeCategory::ALL.iter().map(|c| c.label())),
                        on_change: move |v| category.set(v),
                    }
                    TextAreaField {
                        label: "Content",
                        value: content(),
                        required: true,
                        rows: 6,
                        error: field_error(errors, "content"),
                        on_input: move |v| content.set(v),
                    }
                    Button { r#type: "submit", busy: posting(), busy_label: "Publishing...", "Publish" }
                }
            }
        }
    }
}
