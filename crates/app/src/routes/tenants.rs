use dioxus::prelude::*;
use shared_types::{TenantFilter, TenantRow, ALL_FILTER};
use shared_ui::{
    Card, CardContent, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, FilterBar, Modal, PageHeader, SearchInput, SelectField,
};

/// Every resident's tenant in one directory, filterable by wing.
#[component]
pub fn Tenants() -> Element {
    let mut wing = use_signal(|| ALL_FILTER.to_string());
    let mut search = use_signal(String::new);
    let mut viewing = use_signal(|| Option::<TenantRow>::None);

    let wings = use_resource(move || async move {
        server::api::list_residents()
            .await
            .map(|list| shared_types::wings(&list))
            .unwrap_or_default()
    });

    let data = use_resource(move || {
        let filter = TenantFilter {
            wing: Some(wing()),
            search: Some(search()),
        };
        async move { server::api::list_tenants(filter).await }
    });

    let mut wing_options = vec![(ALL_FILTER.to_string(), "All Wings".to_string())];
    if let Some(list) = &*wings.read() {
        wing_options.extend(list.iter().map(|w| (w.clone(), format!("Wing {w}"))));
    }

    rsx! {
        PageHeader {
            title: "Tenants",
            subtitle: "Tenants currently living in the society.".to_string(),
        }

        FilterBar {
            SearchInput {
                value: search(),
                placeholder: "Search tenant, flat or owner...",
                on_input: move |v| search.set(v),
            }
            SelectField {
                value: wing(),
                options: wing_options,
                on_change: move |v| wing.set(v),
            }
        }

        Card {
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Tenant" }
                        DataTableColumn { "Contact" }
                        DataTableColumn { "Flat" }
                        DataTableColumn { "Owner" }
                        DataTableColumn { "Move-in" }
                        DataTableColumn { "Documents" }
                    }
                    DataTableBody {
                        match &*data.read() {
                            Some(Ok(rows)) if rows.is_empty() => rsx! {
                                DataTableEmpty { columns: 6, message: "No tenants match the filters." }
                            },
                            Some(Ok(rows)) => rsx! {
                                for row in rows.iter().cloned() {
                                    DataTableRow { key: "{row.tenant.id}",
                                        DataTableCell { "{row.tenant.name}" }
                                        DataTableCell { "{row.tenant.contact}" }
                                        DataTableCell { "{row.wing} / {row.flat_no}" }
                                        DataTableCell { "{row.owner_name}" }
                                        DataTableCell { "{row.tenant.move_in_date}" }
                                        DataTableCell {
                                            button {
                                                class: "link-button",
                                                r#type: "button",
                                                onclick: {
                                                    let row = row.clone();
                                                    move |_| viewing.set(Some(row.clone()))
                                                },
                                                "View"
                                            }
                                        }
                                    }
                                }
                            },
                            Some(Err(e)) => rsx! {
                                DataTableEmpty { columns: 6, message: shared_types::AppError::friendly_message(&e.to_string()) }
                            },
                            None => rsx! {
                                DataTableEmpty { columns: 6, message: "Loading tenants..." }
                            },
                        }
                    }
                }
            }
        }

        if let Some(row) = viewing() {
            Modal {
                open: true,
                on_close: move |_| viewing.set(None),
                title: "Tenant Documents",
                description: format!("{} in {}", row.tenant.name, row.flat_no),
                ul { class: "document-list",
                    for (label, file) in row.tenant.documents() {
                        li { key: "{label}",
                            span { class: "muted", "{label}" }
                            strong { "{file}" }
                        }
                    }
                }
            }
        }
    }
}
