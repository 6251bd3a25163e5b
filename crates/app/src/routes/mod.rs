pub mod amenities;
pub mod bell;
pub mod committee;
pub mod complaints;
pub mod dashboard;
pub mod expenses;
pub mod finances;
pub mod login;
pub mod my_complaints;
pub mod my_tenant;
pub mod not_found;
pub mod notices;
pub mod notifications;
pub mod pay_bills;
pub mod profile;
pub mod quotations;
pub mod residents;
pub mod security;
pub mod settings;
pub mod tenants;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBell, LdBuilding, LdCar, LdClipboardList, LdClock, LdCreditCard, LdFileText,
    LdLayoutDashboard, LdLogOut, LdMoon, LdNetwork, LdSettings, LdShieldAlert, LdShieldCheck,
    LdSiren, LdSun, LdUserCheck, LdUsers, LdWallet,
};
use dioxus_free_icons::Icon;
use shared_types::{guard, nav_is_active, nav_items, GuardDecision, NavIcon};
use shared_ui::theme::use_theme;
use shared_ui::{
    Avatar, Sidebar, SidebarInset, SidebarLink, SidebarProvider, SidebarTrigger, ToastExt,
};

use amenities::Amenities;
use bell::BellMenu;
use committee::Committee;
use complaints::ComplaintBoard;
use dashboard::{AdminDashboard, ResidentHome, SecurityHome};
use expenses::Expenses;
use finances::Finances;
use login::Login;
use my_complaints::MyComplaints;
use my_tenant::MyTenant;
use not_found::NotFound;
use notices::Notices;
use notifications::Notifications;
use pay_bills::PayBills;
use profile::Profile;
use quotations::Quotations;
use residents::Residents;
use security::{Incidents, Patrols, Vehicles, VisitorLog};
use settings::Settings;
use tenants::Tenants;

/// Application routes. Pages shared by several sections take the section
/// prefix as a segment; the guard rejects prefixes outside the route table.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    // ── Staff ──
    #[route("/admin/dashboard")]
    AdminDashboard {},
    #[route("/admin/residents")]
    Residents {},
    #[route("/admin/tenants")]
    Tenants {},
    #[route("/admin/finances")]
    Finances {},
    #[route("/admin/expenses")]
    Expenses {},
    #[route("/admin/quotations")]
    Quotations {},
    #[route("/admin/complaints")]
    ComplaintBoard {},
    // ── Resident ──
    #[route("/resident/dashboard")]
    ResidentHome {},
    #[route("/resident/finances")]
    PayBills {},
    #[route("/resident/complaints")]
    MyComplaints {},
    #[route("/resident/amenities")]
    Amenities {},
    #[route("/resident/tenant-management")]
    MyTenant {},
    // ── Security ──
    #[route("/security/dashboard")]
    SecurityHome {},
    #[route("/security/visitor-log")]
    VisitorLog {},
    #[route("/security/patrols")]
    Patrols {},
    #[route("/security/incidents")]
    Incidents {},
    #[route("/security/vehicles")]
    Vehicles {},
    // ── Shared ──
    #[route("/:section/notices")]
    Notices { section: String },
    #[route("/:section/committee")]
    Committee { section: String },
    #[route("/:section/notifications")]
    Notifications { section: String },
    #[route("/:section/profile")]
    Profile { section: String },
    #[route("/:section/settings")]
    Settings { section: String },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Heading shown in the top bar.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login {} | Route::NotFound { .. } => "AuraLiva",
            Route::AdminDashboard {} | Route::ResidentHome {} | Route::SecurityHome {} => {
                "Dashboard"
            }
            Route::Residents {} => "Residents",
            Route::Tenants {} => "Tenants",
            Route::Finances {} => "Finances",
            Route::Expenses {} => "Expenses",
            Route::Quotations {} => "Quotations",
            Route::ComplaintBoard {} => "Complaints",
            Route::PayBills {} => "Pay Bills",
            Route::MyComplaints {} => "My Complaints",
            Route::Amenities {} => "Book Amenity",
            Route::MyTenant {} => "My Tenant",
            Route::VisitorLog {} => "Visitor Log",
            Route::Patrols {} => "Patrols",
            Route::Incidents {} => "Incidents",
            Route::Vehicles {} => "Vehicles",
            Route::Notices { .. } => "Notice Board",
            Route::Committee { .. } => "Committee",
            Route::Notifications { .. } => "Notifications",
            Route::Profile { .. } => "Profile",
            Route::Settings { .. } => "Settings",
        }
    }
}

/// Bumped after notifications change so the header bell refetches its count.
#[derive(Clone, Copy)]
pub struct BellRefresh(pub Signal<u32>);

impl BellRefresh {
    pub fn new() -> Self {
        Self(Signal::new(0))
    }

    pub fn bump(mut self) {
        let next = (self.0)().wrapping_add(1);
        self.0.set(next);
    }
}

/// Navigate to an absolute path produced by the role helpers.
pub fn go_to(path: &str) {
    navigator().replace(path.to_string());
}

/// Auth guard layout. Resolves the session once per mount, then checks
/// every navigation against the route table.
#[component]
fn AuthGuard() -> Element {
    let mut auth = use_auth();
    let route: Route = use_route();

    // `?` propagates RenderError during suspension so Dioxus knows to
    // re-render this component when the server future resolves.
    let resource = use_server_future(move || async move { server::api::current_user().await })?;

    let result = resource.read().as_ref().cloned();
    match result {
        Some(Ok(Some(user))) => {
            if !auth.is_authenticated() {
                auth.set_user(user);
            }
        }
        Some(Ok(None)) | Some(Err(_)) => auth.clear_auth(),
        None => {
            return rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            };
        }
    }

    match guard(&route.to_string(), auth.role()) {
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::RedirectToLogin => {
            navigator().replace(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        GuardDecision::Redirect(home) => {
            go_to(home);
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
    }
}

fn nav_icon(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Dashboard => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        NavIcon::Users => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
        NavIcon::UserCheck => rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 18, height: 18 } },
        NavIcon::CreditCard => rsx! { Icon::<LdCreditCard> { icon: LdCreditCard, width: 18, height: 18 } },
        NavIcon::Wallet => rsx! { Icon::<LdWallet> { icon: LdWallet, width: 18, height: 18 } },
        NavIcon::FileSignature => rsx! { Icon::<LdClipboardList> { icon: LdClipboardList, width: 18, height: 18 } },
        NavIcon::ShieldAlert => rsx! { Icon::<LdShieldAlert> { icon: LdShieldAlert, width: 18, height: 18 } },
        NavIcon::FileText => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 18, height: 18 } },
        NavIcon::Network => rsx! { Icon::<LdNetwork> { icon: LdNetwork, width: 18, height: 18 } },
        NavIcon::Bell => rsx! { Icon::<LdBell> { icon: LdBell, width: 18, height: 18 } },
        NavIcon::Settings => rsx! { Icon::<LdSettings> { icon: LdSettings, width: 18, height: 18 } },
        NavIcon::Building => rsx! { Icon::<LdBuilding> { icon: LdBuilding, width: 18, height: 18 } },
        NavIcon::ShieldCheck => rsx! { Icon::<LdShieldCheck> { icon: LdShieldCheck, width: 18, height: 18 } },
        NavIcon::Clock => rsx! { Icon::<LdClock> { icon: LdClock, width: 18, height: 18 } },
        NavIcon::Siren => rsx! { Icon::<LdSiren> { icon: LdSiren, width: 18, height: 18 } },
        NavIcon::Car => rsx! { Icon::<LdCar> { icon: LdCar, width: 18, height: 18 } },
    }
}

/// Sidebar plus top bar around every signed-in page.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let mut auth = use_auth();
    let mut theme = use_theme();
    let toast = shared_ui::use_toast();

    let Some(user) = auth.user() else {
        return rsx! {};
    };

    let path = route.to_string();
    let section = user.role.section();
    let is_dark = theme.mode.read().is_dark();

    let handle_logout = move |_| {
        spawn(async move {
            if let Err(e) = server::api::logout().await {
                toast.server_error(&e);
            }
            auth.clear_auth();
            navigator().replace(Route::Login {});
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        SidebarProvider {
            Sidebar {
                brand: rsx! {
                    div { class: "sidebar-brand",
                        span { class: "sidebar-brand-mark", "A" }
                        span { class: "sidebar-brand-name", "AuraLiva" }
                    }
                },
                footer: rsx! {
                    button { class: "sidebar-logout", r#type: "button", onclick: handle_logout,
                        Icon::<LdLogOut> { icon: LdLogOut, width: 18, height: 18 }
                        span { class: "sidebar-link-label", "Logout" }
                    }
                },
                for item in nav_items(user.role) {
                    SidebarLink {
                        key: "{item.path}",
                        to: item.path.to_string(),
                        label: item.label.to_string(),
                        active: nav_is_active(&item, &path),
                        icon: nav_icon(item.icon),
                    }
                }
            }

            SidebarInset {
                header { class: "topbar",
                    div { class: "topbar-left",
                        SidebarTrigger {}
                        h1 { class: "topbar-title", {route.title()} }
                    }
                    div { class: "topbar-right",
                        button {
                            class: "topbar-icon",
                            r#type: "button",
                            "aria-label": "Toggle theme",
                            onclick: move |_| theme.toggle(),
                            if is_dark {
                                Icon::<LdSun> { icon: LdSun, width: 18, height: 18 }
                            } else {
                                Icon::<LdMoon> { icon: LdMoon, width: 18, height: 18 }
                            }
                        }
                        BellMenu { section: section.to_string() }
                        Link { class: "topbar-user", to: format!("{section}/profile"),
                            Avatar { name: user.name.clone(), src: Some(user.avatar.clone()), size: 32 }
                            div { class: "topbar-user-text",
                                span { class: "topbar-user-name", "{user.name}" }
                                span { class: "topbar-user-role", "{user.role}" }
                            }
                        }
                    }
                }
                main { class: "page-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ROUTE_TABLE;

    #[test]
    fn every_guarded_path_has_a_page() {
        for rule in ROUTE_TABLE {
            let route: Route = rule.path.parse().unwrap();
            assert!(
                !matches!(route, Route::NotFound { .. }),
                "{} has no page",
                rule.path
            );
            assert_eq!(route.to_string(), rule.path);
        }
    }

    #[test]
    fn shared_pages_keep_their_section() {
        let route: Route = "/security/committee".parse().unwrap();
        assert_eq!(
            route,
            Route::Committee {
                section: "security".to_string()
            }
        );
        assert_eq!(route.title(), "Committee");
    }

    #[test]
    fn unknown_paths_fall_through() {
        let route: Route = "/nowhere/at/all".parse().unwrap();
        assert!(matches!(route, Route::NotFound { .. }));
    }
}
