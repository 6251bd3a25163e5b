use dioxus::prelude::*;
use shared_types::{FeatureFlags, Labeled, PresenceStatus, Visitor, VisitorFilter, VisitorInput};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FieldRow, FilterBar, Form,
    Modal, ModalFooter, PageHeader, SearchInput, Segmented, StatusBadge, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::download;
use crate::form::{field_error, non_blank, report_error, FieldErrors};

const CURRENT: &str = "Currently Inside";
const HISTORY: &str = "History";

/// Gate register: who is inside now, and everyone who has left.
#[component]
pub fn VisitorLog() -> Element {
    let toast = use_toast();
    let flags = use_context::<FeatureFlags>();
    let mut tab = use_signal(|| CURRENT.to_string());
    let mut search = use_signal(String::new);
    // None = closed, Some(None) = adding, Some(Some(v)) = editing v.
    let mut form = use_signal(|| Option::<Option<Visitor>>::None);

    let filter = use_memo(move || VisitorFilter {
        history: tab() == HISTORY,
        search: non_blank(&search()),
    });
    let mut visitors = use_resource(move || async move { server::api::list_visitors(filter()).await });

    let exit = move |id: String| {
        spawn(async move {
            match server::api::exit_visitor(id).await {
                Ok(v) => {
                    toast.ok(format!("{} checked out at {}.", v.name, v.out_time_or_na()));
                    visitors.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    let qr_exit = move |_| {
        spawn(async move {
            match server::api::qr_exit_visitor().await {
                Ok(v) => {
                    toast.ok(format!("QR scan: {} checked out.", v.name));
                    visitors.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    // The scanner only reads a visitor pass; the guard confirms the details.
    let qr_entry = move |_| {
        form.set(Some(None));
        toast.ok("QR scanned: please confirm visitor details.");
    };

    let history = filter().history;
    let columns = if history { 7 } else { 6 };
    let empty_message = if history { "No past visitors found." } else { "Nobody is checked in." };

    rsx! {
        PageHeader {
            title: "Visitor Log",
            subtitle: "Check visitors in and out at the gate.".to_string(),
            Button { variant: ButtonVariant::Secondary, onclick: qr_entry, "Scan QR Entry" }
            Button { variant: ButtonVariant::Secondary, onclick: qr_exit, "Scan QR Exit" }
            Button { onclick: move |_| form.set(Some(None)), "Add Visitor" }
        }

        Card {
            CardContent {
                FilterBar {
                    Segmented {
                        options: vec![CURRENT.to_string(), HISTORY.to_string()],
                        selected: tab(),
                        on_select: move |t| tab.set(t),
                    }
                    SearchInput {
                        value: search(),
                        placeholder: "Search name, flat or vehicle...".to_string(),
                        on_input: move |v| search.set(v),
                    }
                    for format in flags.export_formats() {
                        a {
                            key: "{format.extension()}",
                            class: "button",
                            "data-style": "secondary",
                            "data-size": "sm",
                            href: download::visitor_export(format, &filter()),
                            download: "",
                            {format.label()}
                        }
                    }
                }

                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Visitor" }
                        DataTableColumn { "Flat" }
                        DataTableColumn { "Purpose" }
                        DataTableColumn { "Vehicle" }
                        DataTableColumn { "In" }
                        if history {
                            DataTableColumn { "Out" }
                        }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        match &*visitors.read() {
                            None => rsx! { DataTableEmpty { columns, message: "Loading visitors..." } },
                            Some(Err(e)) => rsx! {
                                DataTableEmpty { columns, message: shared_types::AppError::friendly_message(&e.to_string()) }
                            },
                            Some(Ok(list)) if list.is_empty() => rsx! {
                                DataTableEmpty { columns, message: empty_message }
                            },
                            Some(Ok(list)) => rsx! {
                                for v in list.iter().cloned() {
                                    DataTableRow { key: "{v.id}",
                                        DataTableCell {
                                            strong { "{v.name}" }
                                            div { class: "muted", "{v.contact}" }
                                        }
                                        DataTableCell { "{v.visiting_flat}" }
                                        DataTableCell { {v.purpose_or_na()} }
                                        DataTableCell { "{v.vehicle_no}" }
                                        DataTableCell { "{v.in_time}" }
                                        if history {
                                            DataTableCell { {v.out_time_or_na()} }
                                        }
                                        DataTableCell {
                                            div { class: "row-actions",
                                                if v.status == PresenceStatus::Inside {
                                                    Button {
                                                        variant: ButtonVariant::Ghost,
                                                        small: true,
                                                        onclick: {
                                                            let v = v.clone();
                                                            move |_| form.set(Some(Some(v.clone())))
                                                        },
                                                        "Edit"
                                                    }
                                                    Button {
                                                        variant: ButtonVariant::Secondary,
                                                        small: true,
                                                        onclick: {
                                                            let id = v.id.clone();
                                                            move |_| exit(id.clone())
                                                        },
                                                        "Mark Exit"
                                                    }
                                                } else {
                                                    StatusBadge { tone: v.status.tone(), label: v.status.label() }
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

        if let Some(existing) = form() {
            VisitorModal {
                existing,
                on_close: move |_| form.set(None),
                on_saved: move |_| {
                    form.set(None);
                    visitors.restart();
                },
            }
        }
    }
}

#[component]
fn VisitorModal(existing: Option<Visitor>, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let toast = use_toast();
    let editing_id = existing.as_ref().map(|v| v.id.clone());
    let title = if editing_id.is_some() { "Edit Visitor" } else { "Add Visitor" };

    let mut name = use_signal(|| existing.as_ref().map(|v| v.name.clone()).unwrap_or_default());
    let mut contact = use_signal(|| existing.as_ref().map(|v| v.contact.clone()).unwrap_or_default());
    let mut vehicle = use_signal(|| {
        existing
            .as_ref()
            .map(|v| v.vehicle_no.clone())
            .filter(|n| n != "N/A")
            .unwrap_or_default()
    });
    let mut flat = use_signal(|| existing.as_ref().map(|v| v.visiting_flat.clone()).unwrap_or_default());
    let mut purpose = use_signal(|| existing.as_ref().and_then(|v| v.purpose.clone()).unwrap_or_default());
    let errors: FieldErrors = use_signal(HashMap::new);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_: FormEvent| {
        let input = VisitorInput {
            name: name(),
            contact: contact(),
            vehicle_no: non_blank(&vehicle()),
            visiting_flat: flat(),
            purpose: non_blank(&purpose()),
        };
        let editing_id = editing_id.clone();
        saving.set(true);
        spawn(async move {
            let result = match editing_id {
                Some(id) => server::api::update_visitor(id, input).await,
                None => server::api::add_visitor(input).await,
            };
            match result {
                Ok(v) => {
                    toast.ok(format!("{} saved. In at {}.", v.name, v.in_time));
                    on_saved.call(());
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        Modal { open: true, on_close, title,
            Form { onsubmit: handle_submit,
                FieldRow {
                    TextField {
                        label: "Name",
                        value: name(),
                        required: true,
                        error: field_error(errors, "name"),
                        on_input: move |v| name.set(v),
                    }
                    TextField {
                        label: "Contact",
                        input_type: "tel",
                        value: contact(),
                        required: true,
                        error: field_error(errors, "contact"),
                        on_input: move |v| contact.set(v),
                    }
                }
                FieldRow {
                    TextField {
                        label: "Visiting Flat",
                        value: flat(),
                        required: true,
                        placeholder: "A-101".to_string(),
                        error: field_error(errors, "visiting_flat"),
                        on_input: move |v| flat.set(v),
                    }
                    TextField {
                        label: "Vehicle No",
                        value: vehicle(),
                        on_input: move |v| vehicle.set(v),
                    }
                }
                TextField {
                    label: "Purpose",
                    value: purpose(),
                    placeholder: "Delivery, guest, service...".to_string(),
                    on_input: move |v| purpose.set(v),
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    Button { r#type: "submit", busy: saving(), "Save" }
                }
            }
        }
    }
}
