use dioxus::prelude::*;
use shared_types::{format_inr, Labeled, ResidentDashboard, Tone};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, KpiCard, KpiGrid,
    PageHeader, ProgressBar, StatusBadge, ToastExt,
};

use crate::routes::go_to;

/// Landing page for residents: dues, complaints, bookings, notices and the
/// community poll.
#[component]
pub fn ResidentHome() -> Element {
    let mut data = use_resource(move || async move { server::api::resident_dashboard().await });

    rsx! {
        match &*data.read() {
            Some(Ok(dash)) => rsx! {
                ResidentDashboardView { dash: dash.clone(), on_voted: move |_| data.restart() }
            },
            Some(Err(e)) => rsx! {
                Card { CardContent { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } } }
            },
            None => rsx! { div { class: "loading", "Loading dashboard..." } },
        }
    }
}

#[component]
fn ResidentDashboardView(dash: ResidentDashboard, on_voted: EventHandler<()>) -> Element {
    let due = dash
        .latest_unpaid
        .as_ref()
        .map(|i| format_inr(i.total()))
        .unwrap_or_else(|| "All paid".to_string());
    let due_hint = dash
        .latest_unpaid
        .as_ref()
        .map(|i| format!("{} due {}", i.invoice_number, i.due_date));
    let booking = dash
        .upcoming_booking
        .as_ref()
        .map(|b| b.amenity_name.clone())
        .unwrap_or_else(|| "None".to_string());
    let booking_hint = dash
        .upcoming_booking
        .as_ref()
        .map(|b| format!("{} · {}", b.date, b.time_slot));

    rsx! {
        PageHeader {
            title: "{dash.greeting}, {dash.first_name}!",
            subtitle: "Welcome to your AuraLiva home.".to_string(),
        }

        KpiGrid {
            KpiCard { title: "Amount Due", value: due, tone: Tone::Warning, hint: due_hint }
            KpiCard { title: "Open Complaints", value: dash.open_complaints.to_string(), tone: Tone::Error }
            KpiCard { title: "Next Booking", value: booking, tone: Tone::Success, hint: booking_hint }
        }

        if let Some(invoice) = dash.latest_unpaid.clone() {
            Card { class: "due-banner",
                CardHeader {
                    title: "Maintenance due",
                    description: format!("{} of {} is {}.", invoice.invoice_number, format_inr(invoice.total()), invoice.status.label()),
                    Button { onclick: move |_| go_to("/resident/finances"), "Pay Now" }
                }
            }
        }

        div { class: "grid-2",
            Card {
                CardHeader { title: "Latest Notices" }
                CardContent {
                    if dash.latest_notices.is_empty() {
                        p { class: "muted", "No notices yet." }
                    }
                    ul { class: "notice-list",
                        for n in dash.latest_notices.iter() {
                            li { key: "{n.id}",
                                div { class: "notice-list-head",
                                    strong { "{n.title}" }
                                    StatusBadge { tone: n.category.tone(), label: n.category.label() }
                                }
                                span { class: "muted", "{n.date}" }
                            }
                        }
                    }
                }
            }

            PollCard { dash: dash.clone(), on_voted }
        }

        Card {
            CardHeader { title: "Quick Links" }
            CardContent {
                div { class: "quick-actions",
                    for link in dash.quick_links.iter() {
                        Button {
                            key: "{link.label}",
                            variant: ButtonVariant::Secondary,
                            onclick: {
                                let path = link.path.clone();
                                move |_| go_to(&path)
                            },
                            "{link.label}"
                        }
                    }
                }
            }
        }
    }
}

/// Radio list until the resident votes, then the results.
#[component]
fn PollCard(dash: ResidentDashboard, on_voted: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut choice = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let poll = dash.poll.clone();

    let handle_vote = move |_| {
        let option = choice();
        if option.is_empty() {
            toast.fail("Please select an option to vote.");
            return;
        }
        busy.set(true);
        spawn(async move {
            match server::api::vote_in_poll(option).await {
                Ok(_) => {
                    toast.ok("Thank you for voting!");
                    on_voted.call(());
                }
                Err(e) => toast.server_error(&e),
            }
            busy.set(false);
        });
    };

    rsx! {
        Card {
            CardHeader { title: "Community Poll", description: poll.question.clone() }
            CardContent {
                if dash.has_voted {
                    for (label, pct) in poll.percentages() {
                        ProgressBar { key: "{label}", percent: pct, label: label.clone(), caption: format!("{pct}%") }
                    }
                    p { class: "muted", "{poll.total_votes()} votes" }
                } else {
                    div { class: "poll-options",
                        for option in poll.options.iter() {
                            label { key: "{option.label}", class: "poll-option",
                                input {
                                    r#type: "radio",
                                    name: "poll",
                                    value: "{option.label}",
                                    checked: choice() == option.label,
                                    onchange: {
                                        let label = option.label.clone();
                                        move |_| choice.set(label.clone())
                                    },
                                }
                                "{option.label}"
                            }
                        }
                    }
                    Button { busy: busy(), onclick: handle_vote, "Vote" }
                }
            }
        }
    }
}
