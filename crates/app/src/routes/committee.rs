use dioxus::prelude::*;
use shared_types::CommitteeMember;
use shared_ui::{Avatar, PageHeader};

/// Managing committee as an org chart.
#[component]
pub fn Committee(section: String) -> Element {
    let tree = use_resource(move || async move { server::api::committee_tree().await });

    rsx! {
        PageHeader {
            title: "Managing Committee",
            subtitle: "Who to contact for what.".to_string(),
            Link { class: "link-button", to: format!("/{section}/dashboard"), "Back to dashboard" }
        }
        match &*tree.read() {
            None => rsx! { div { class: "loading", "Loading committee..." } },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            Some(Ok(roots)) => rsx! {
                ul { class: "org-tree",
                    for member in roots.iter().cloned() {
                        MemberNode { key: "{member.id}", member }
                    }
                }
            },
        }
    }
}

#[component]
fn MemberNode(member: CommitteeMember) -> Element {
    rsx! {
        li { class: "org-node",
            div { class: "org-card",
                Avatar { name: member.name.clone(), src: Some(member.avatar.clone()).filter(|a| !a.is_empty()), size: 48 }
                div {
                    strong { "{member.name}" }
                    div { class: "muted", "{member.role}" }
                    div { class: "muted", "{member.contact}" }
                }
            }
            if member.has_children() {
                ul { class: "org-tree",
                    for child in member.children.iter().cloned() {
                        MemberNode { key: "{child.id}", member: child }
                    }
                }
            }
        }
    }
}
