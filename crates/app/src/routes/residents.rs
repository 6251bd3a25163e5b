use dioxus::prelude::*;
use shared_types::{matches_search, Labeled, Resident, ResidentInput, ResidentStatus, DEFAULT_WING};
use shared_ui::{
    label_options, use_toast, Button, ButtonVariant, Card, CardContent, ConfirmModal, DataTable,
    DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow,
    FieldRow, FilterBar, Form, Modal, ModalFooter, PageHeader, SearchInput, SelectField,
    StatusBadge, TextField, ToastExt,
};
use std::collections::HashMap;

use crate::form::{field_error, report_error};

/// Editable copy of a resident while the modal is open.
#[derive(Clone, Default, PartialEq)]
struct ResidentDraft {
    name: String,
    wing: String,
    flat_no: String,
    contact: String,
    status: String,
}

impl ResidentDraft {
    fn blank() -> Self {
        Self {
            wing: DEFAULT_WING.to_string(),
            status: ResidentStatus::Active.label().to_string(),
            ..Default::default()
        }
    }

    fn from_resident(r: &Resident) -> Self {
        Self {
            name: r.name.clone(),
            wing: r.wing.clone(),
            flat_no: r.flat_no.clone(),
            contact: r.contact.clone(),
            status: r.status.label().to_string(),
        }
    }

    fn to_input(&self) -> ResidentInput {
        ResidentInput {
            name: self.name.clone(),
            wing: Some(self.wing.clone()),
            flat_no: self.flat_no.clone(),
            contact: self.contact.clone(),
            status: ResidentStatus::from_label(&self.status),
        }
    }
}

/// Resident directory for Admin and Secretary.
#[component]
pub fn Residents() -> Element {
    let toast = use_toast();
    let mut search = use_signal(String::new);
    let mut editing = use_signal(|| Option::<Option<String>>::None);
    let mut draft = use_signal(ResidentDraft::blank);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let mut deleting = use_signal(|| Option::<Resident>::None);

    let mut data = use_resource(move || async move { server::api::list_residents().await });

    let open_create = move |_| {
        draft.set(ResidentDraft::blank());
        errors.set(HashMap::new());
        editing.set(Some(None));
    };

    let handle_save = move |_: FormEvent| {
        let Some(target) = editing() else { return };
        let input = draft.read().to_input();
        saving.set(true);
        spawn(async move {
            let result = match target.clone() {
                Some(id) => server::api::update_resident(id, input).await,
                None => server::api::create_resident(input).await,
            };
            match result {
                Ok(_) => {
                    data.restart();
                    editing.set(None);
                    toast.ok(if target.is_some() { "Resident updated successfully!" } else { "Resident added successfully!" });
                }
                Err(e) => report_error(toast, errors, &e),
            }
            saving.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(resident) = deleting() else { return };
        spawn(async move {
            match server::api::delete_resident(resident.id.clone()).await {
                Ok(()) => {
                    data.restart();
                    toast.ok("Resident deleted.");
                }
                Err(e) => toast.server_error(&e),
            }
            deleting.set(None);
        });
    };

    let rows: Vec<Resident> = match &*data.read() {
        Some(Ok(list)) => list
            .iter()
            .filter(|r| matches_search(&[&r.name, &r.flat_no, &r.contact], &search.read()))
            .cloned()
            .collect(),
        _ => Vec::new(),
    };
    let loading = data.read().is_none();
    let is_edit = matches!(editing(), Some(Some(_)));

    rsx! {
        PageHeader {
            title: "Residents",
            subtitle: "Manage society members and their flats.".to_string(),
            Button { onclick: open_create, "Add Resident" }
        }

        FilterBar {
            SearchInput {
                value: search(),
                placeholder: "Search by name, flat or contact...",
                on_input: move |v| search.set(v),
            }
        }

        Card {
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "Name" }
                        DataTableColumn { "Wing" }
                        DataTableColumn { "Flat No" }
                        DataTableColumn { "Contact" }
                        DataTableColumn { "Tenant" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "Actions" }
                    }
                    DataTableBody {
                        if loading {
                            DataTableEmpty { columns: 7, message: "Loading residents..." }
                        } else if rows.is_empty() {
                            DataTableEmpty { columns: 7, message: "No residents found." }
                        }
                        for r in rows {
                            DataTableRow { key: "{r.id}",
                                DataTableCell { "{r.name}" }
                                DataTableCell { "{r.wing}" }
                                DataTableCell { "{r.flat_no}" }
                                DataTableCell { "{r.contact}" }
                                DataTableCell {
                                    {r.tenant.as_ref().map(|t| t.name.clone()).unwrap_or_else(|| "-".to_string())}
                                }
                                DataTableCell { StatusBadge { tone: r.status.tone(), label: r.status.label() } }
                                DataTableCell {
                                    div { class: "row-actions",
                                        Button {
                                            variant: ButtonVariant::Ghost,
                                            small: true,
                                            onclick: {
                                                let r = r.clone();
                                                move |_| {
                                                    draft.set(ResidentDraft::from_resident(&r));
                                                    errors.set(HashMap::new());
                                                    editing.set(Some(Some(r.id.clone())));
                                                }
                                            },
                                            "Edit"
                                        }
                                        Button {
                                            variant: ButtonVariant::Danger,
                                            small: true,
                                            onclick: {
                                                let r = r.clone();
                                                move |_| deleting.set(Some(r.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        Modal {
            open: editing().is_some(),
            on_close: move |_| editing.set(None),
            title: if is_edit { "Edit Resident" } else { "Add Resident" },
            Form { onsubmit: handle_save,
                TextField {
                    label: "Full Name",
                    value: draft.read().name.clone(),
                    required: true,
                    error: field_error(errors, "name"),
                    on_input: move |v| draft.write().name = v,
                }
                FieldRow {
                    TextField {
                        label: "Wing",
                        value: draft.read().wing.clone(),
                        on_input: move |v| draft.write().wing = v,
                    }
                    TextField {
                        label: "Flat No",
                        value: draft.read().flat_no.clone(),
                        required: true,
                        error: field_error(errors, "flat_no"),
                        on_input: move |v| draft.write().flat_no = v,
                    }
                }
                FieldRow {
                    TextField {
                        label: "Contact",
                        value: draft.read().contact.clone(),
                        required: true,
                        error: field_error(errors, "contact"),
                        on_input: move |v| draft.write().contact = v,
                    }
                    SelectField {
                        label: "Status",
                        value: draft.read().status.clone(),
                        options: label_options(ResidentStatus::ALL.iter().map(|s| s.label())),
                        on_change: move |v| draft.write().status = v,
                    }
                }
                ModalFooter {
                    Button { variant: ButtonVariant::Secondary, r#type: "button", onclick: move |_| editing.set(None), "Cancel" }
                    Button { r#type: "submit", busy: saving(), busy_label: "Saving...", "Save" }
                }
            }
        }

        ConfirmModal {
            open: deleting().is_some(),
            title: "Delete Resident",
            message: format!(
                "Delete {}? This cannot be undone.",
                deleting().map(|r| r.name).unwrap_or_default()
            ),
            on_confirm: confirm_delete,
            on_cancel: move |_| deleting.set(None),
        }
    }
}
