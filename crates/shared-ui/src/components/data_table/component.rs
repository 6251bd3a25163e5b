use dioxus::prelude::*;

/// Scrollable table wrapper with co-located styles.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                {children}
            }
        }
    }
}

/// Header row. Children are `DataTableColumn`s.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

#[component]
pub fn DataTableColumn(#[props(default = false)] numeric: bool, children: Element) -> Element {
    rsx! {
        th { class: if numeric { "numeric" }, {children} }
    }
}

/// Body row. `selected` highlights rows picked for a bulk action.
#[component]
pub fn DataTableRow(
    #[props(default = false)] selected: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let clickable = onclick.is_some();
    rsx! {
        tr {
            class: "data-table-row",
            "data-selected": if selected { "true" } else { "false" },
            "data-clickable": if clickable { "true" } else { "false" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(#[props(default = false)] numeric: bool, children: Element) -> Element {
    rsx! {
        td { class: if numeric { "numeric" }, {children} }
    }
}

/// Single full-width row shown when a filtered list has no records.
#[component]
pub fn DataTableEmpty(columns: usize, #[props(into)] message: String) -> Element {
    rsx! {
        tr { class: "data-table-empty",
            td { colspan: "{columns}", "{message}" }
        }
    }
}
