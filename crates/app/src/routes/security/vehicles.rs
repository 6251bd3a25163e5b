use dioxus::prelude::*;
use shared_types::{Labeled, PresenceStatus, VehicleFilter};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, FilterBar, PageHeader,
    SearchInput, StatusBadge, ToastExt,
};

use crate::form::non_blank;

/// Vehicles logged at the gate.
#[component]
pub fn Vehicles() -> Element {
    let toast = use_toast();
    let mut search = use_signal(String::new);
    let mut vehicles = use_resource(move || async move {
        server::api::list_vehicles(VehicleFilter {
            search: non_blank(&search()),
        })
        .await
    });

    let exit = move |id: String| {
        spawn(async move {
            match server::api::exit_vehicle(id).await {
                Ok(v) => {
                    toast.ok(format!("{} marked as exited.", v.vehicle_no));
                    vehicles.restart();
                }
                Err(e) => toast.server_error(&e),
            }
        });
    };

    rsx! {
        PageHeader { title: "Vehicle Log", subtitle: "Resident and visitor vehicles at the gate.".to_string() }
        Card {
            CardContent {
                FilterBar {
                    SearchInput {
                        value: search(),
                        placeholder: "Search number, owner or flat...".to_string(),
                        on_input: move |v| search.set(v),
                    }
                }
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Vehicle No" }
                        DataTableColumn { "Owner" }
                        DataTableColumn { "Type" }
                        DataTableColumn { "Flat" }
                        DataTableColumn { "In" }
                        DataTableColumn { "Out" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        match &*vehicles.read() {
                            None => rsx! { DataTableEmpty { columns: 8, message: "Loading vehicles..." } },
                            Some(Err(e)) => rsx! {
                                DataTableEmpty { columns: 8, message: shared_types::AppError::friendly_message(&e.to_string()) }
                            },
                            Some(Ok(list)) if list.is_empty() => rsx! {
                                DataTableEmpty { columns: 8, message: "No vehicles match your search." }
                            },
                            Some(Ok(list)) => rsx! {
                                for v in list.iter() {
                                    DataTableRow { key: "{v.id}",
                                        DataTableCell { strong { "{v.vehicle_no}" } }
                                        DataTableCell { "{v.owner_name}" }
                                        DataTableCell { {v.owner_type.label()} }
                                        DataTableCell { {v.flat_no.clone().unwrap_or_else(|| "-".into())} }
                                        DataTableCell { "{v.in_time}" }
                                        DataTableCell { {v.out_time.clone().unwrap_or_else(|| "-".into())} }
                                        DataTableCell { StatusBadge { tone: v.status.tone(), label: v.status.label() } }
                                        DataTableCell {
                                            if v.status == PresenceStatus::Inside {
                                                Button {
                                                    variant: ButtonVariant::Secondary,
                                                    small: true,
                                                    onclick: {
                                                        let id = v.id.clone();
                                                        move |_| exit(id.clone())
                                                    },
                                                    "Mark Exit"
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
    }
}
