use dioxus::prelude::*;
use shared_types::{Amenity, BookAmenityRequest, Booking, TIME_SLOTS};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, Modal,
    ModalFooter, PageHeader, SelectField, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, parse_date, report_error, FieldErrors};

/// Amenity catalogue with slot booking and the resident's bookings.
#[component]
pub fn Amenities() -> Element {
    let toast = use_toast();
    let amenities = use_resource(move || async move { server::api::list_amenities().await });
    let mut bookings = use_resource(move || async move { server::api::my_bookings().await });
    let mut booking_for = use_signal(|| Option::<Amenity>::None);

    let cancel = move |id: String| {
        spawn(async move {
            match server::api::cancel_booking(id).await {
                Ok(()) => {
                    toast.ok("Booking cancelled.");
                    bookings.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader { title: "Book an Amenity", subtitle: "Reserve society facilities in two-hour slots.".to_string() }

        match &*amenities.read() {
            None => rsx! { div { class: "loading", "Loading amenities..." } },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            Some(Ok(list)) => rsx! {
                div { class: "amenity-grid",
                    for a in list.iter().cloned() {
                        Card { key: "{a.id}", class: "amenity-card",
                            img { class: "amenity-image", src: "{a.image}", alt: "{a.name}" }
                            CardContent {
                                h3 { "{a.name}" }
                                p { class: "muted", "{a.description}" }
                                Button {
                                    onclick: {
                                        let a = a.clone();
                                        move |_| booking_for.set(Some(a.clone()))
                                    },
                                    "Book Now"
                                }
                            }
                        }
                    }
                }
            },
        }

        match &*bookings.read() {
            Some(Ok(split)) => rsx! {
                div { class: "grid-2",
                    BookingTable {
                        title: "Upcoming Bookings",
                        rows: split.upcoming.clone(),
                        empty: "No upcoming bookings.",
                        on_cancel: move |id| cancel(id),
                    }
                    BookingTable {
                        title: "Past Bookings",
                        rows: split.past.clone(),
                        empty: "No past bookings.",
                    }
                }
            },
            Some(Err(e)) => rsx! { p { class: "muted", {shared_types::AppError::friendly_message(&e.to_string())} } },
            None => rsx! {},
        }

        if let Some(amenity) = booking_for() {
            BookingModal {
                amenity,
                on_close: move |_| booking_for.set(None),
                on_booked: move |_| {
                    booking_for.set(None);
                    bookings.restart();
                },
            }
        }
    }
}

#[component]
fn BookingTable(
    #[props(into)] title: String,
    rows: Vec<Booking>,
    #[props(into)] empty: String,
    #[props(default)] on_cancel: Option<EventHandler<String>>,
) -> Element {
    let columns = if on_cancel.is_some() { 4 } else { 3 };
    rsx! {
        Card {
            CardHeader { title }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Amenity" }
                        DataTableColumn { "Date" }
                        DataTableColumn { "Slot" }
                        if on_cancel.is_some() {
                            DataTableColumn { "" }
                        }
                    }
                    DataTableBody {
                        if rows.is_empty() {
                            DataTableEmpty { columns, message: empty }
                        }
                        for b in rows {
                            DataTableRow { key: "{b.id}",
                                DataTableCell { "{b.amenity_name}" }
                                DataTableCell { "{b.date}" }
                                DataTableCell { "{b.time_slot}" }
                                if let Some(handler) = on_cancel {
                                    DataTableCell {
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            small: true,
                                            onclick: {
                                                let id = b.id.clone();
                                                move |_| handler.call(id.clone())
                                            },
                                            "Cancel"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BookingModal(amenity: Amenity, on_close: EventHandler<()>, on_booked: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut date = use_signal(String::new);
    let mut slot = use_signal(String::new);
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);
    let amenity_id = amenity.id.clone();

    let handle_submit = move |_: FormEvent| {
        let amenity_id = amenity_id.clone();
        let req = BookAmenityRequest {
            date: parse_date(&date()),
            time_slot: slot(),
        };
        saving.set(true);
        spawn(async move {
            match server::api::book_amenity(amenity_id, req).await {
                Ok(b) => {
                    toast.ok(format!("{} booked for {} ({}).", b.amenity_name, b.date, b.time_slot));
                    on_booked.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let mut slots = vec![(String::new(), "Select a slot".to_string())];
    slots.extend(TIME_SLOTS.iter().map(|s| (s.to_string(), s.to_string())));

    rsx! {
        Modal { open: true, on_close, title: format!("Book {}", amenity.name),
            Form { onsubmit: handle_submit,
                TextField {
                    label: "Date",
                    input_type: "date",
                    min: chrono::Local::now().date_naive().to_string(),
                    value: date(),
                    required: true,
                    error: field_error(errors, "date"),
                    on_input: move |v| date.set(v),
                }
                SelectField {
                    label: "Time Slot",
                    value: slot(),
                    options: slots,
                    required: true,
                    error: field_error(errors, "time_slot"),
                    on_change: move |v| slot.set(v),
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: saving(), "Confirm Booking" }
                }
            }
        }
    }
}
