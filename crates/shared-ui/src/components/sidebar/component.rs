use dioxus::prelude::*;

// ─── Context ───────────────────────────────────────────────────────────

/// Whether the sidebar is expanded. On narrow screens a closed sidebar is
/// hidden entirely; on wide screens it collapses to icons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarState {
    pub open: bool,
}

/// Provides sidebar state to the layout below it.
#[component]
pub fn SidebarProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let state = use_signal(|| SidebarState { open: default_open });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sidebar-provider",
            "data-sidebar-open": if (state)().open { "true" } else { "false" },
            {children}
        }
    }
}

fn use_sidebar() -> Signal<SidebarState> {
    use_context::<Signal<SidebarState>>()
}

// ─── Layout ────────────────────────────────────────────────────────────

/// The navigation column: brand on top, links in the middle, footer below.
#[component]
pub fn Sidebar(brand: Element, footer: Element, children: Element) -> Element {
    let mut state = use_sidebar();
    let is_open = (state)().open;

    rsx! {
        if is_open {
            div {
                class: "sidebar-backdrop",
                onclick: move |_| state.set(SidebarState { open: false }),
            }
        }
        aside { class: "sidebar", "data-state": if is_open { "open" } else { "closed" },
            div { class: "sidebar-header", {brand} }
            nav { class: "sidebar-content", {children} }
            div { class: "sidebar-footer", {footer} }
        }
    }
}

/// One navigation entry. `to` is an absolute app path.
#[component]
pub fn SidebarLink(to: String, label: String, active: bool, icon: Element) -> Element {
    rsx! {
        Link {
            to,
            class: "sidebar-link",
            "data-active": if active { "true" } else { "false" },
            span { class: "sidebar-link-icon", {icon} }
            span { class: "sidebar-link-label", "{label}" }
        }
    }
}

/// Main column next to the sidebar.
#[component]
pub fn SidebarInset(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-inset", {children} }
    }
}

/// Hamburger button that toggles the sidebar.
#[component]
pub fn SidebarTrigger() -> Element {
    let mut state = use_sidebar();
    rsx! {
        button {
            class: "sidebar-trigger",
            r#type: "button",
            "aria-label": "Toggle sidebar",
            onclick: move |_| {
                let open = (state)().open;
                state.set(SidebarState { open: !open });
            },
            "\u{2630}"
        }
    }
}
