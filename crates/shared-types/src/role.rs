use serde::{Deserialize, Serialize};
use std::fmt;

/// The five society roles. Serialized with their display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    Admin,
    Secretary,
    Treasurer,
    Security,
    Resident,
}

/// All roles in login-picker order.
pub const ALL_ROLES: &[Role] = &[
    Role::Admin,
    Role::Secretary,
    Role::Treasurer,
    Role::Security,
    Role::Resident,
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Secretary => "Secretary",
            Role::Treasurer => "Treasurer",
            Role::Security => "Security",
            Role::Resident => "Resident",
        }
    }

    /// Case-insensitive parse. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        ALL_ROLES
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub const fn bit(self) -> u8 {
        match self {
            Role::Admin => access::ADMIN,
            Role::Secretary => access::SECRETARY,
            Role::Treasurer => access::TREASURER,
            Role::Security => access::SECURITY,
            Role::Resident => access::RESIDENT,
        }
    }

    /// Admin, Secretary and Treasurer share the `/admin` section.
    pub fn is_staff(self) -> bool {
        RoleSet(access::STAFF).contains(self)
    }

    /// Default landing page after login or on a role mismatch.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin | Role::Secretary | Role::Treasurer => "/admin/dashboard",
            Role::Security => "/security/dashboard",
            Role::Resident => "/resident/dashboard",
        }
    }

    /// Path prefix of the section this role navigates in.
    pub fn section(self) -> &'static str {
        match self {
            Role::Admin | Role::Secretary | Role::Treasurer => "/admin",
            Role::Security => "/security",
            Role::Resident => "/resident",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role bits usable as const generic arguments (see the server's `RoleRequired`).
pub mod access {
    pub const ADMIN: u8 = 1 << 0;
    pub const SECRETARY: u8 = 1 << 1;
    pub const TREASURER: u8 = 1 << 2;
    pub const SECURITY: u8 = 1 << 3;
    pub const RESIDENT: u8 = 1 << 4;

    pub const STAFF: u8 = ADMIN | SECRETARY | TREASURER;
    pub const OFFICE: u8 = ADMIN | SECRETARY;
    pub const FINANCE: u8 = ADMIN | TREASURER;
    pub const ANY: u8 = STAFF | SECURITY | RESIDENT;
}

/// A set of roles encoded as a bitmask of [`access`] bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(pub u8);

impl RoleSet {
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn roles(self) -> Vec<Role> {
        ALL_ROLES
            .iter()
            .copied()
            .filter(|r| self.contains(*r))
            .collect()
    }

    /// Human-readable list, e.g. "Admin or Treasurer".
    pub fn describe(self) -> String {
        let names: Vec<&str> = self.roles().iter().map(|r| r.as_str()).collect();
        match names.len() {
            0 => "no role".to_string(),
            1 => names[0].to_string(),
            n => format!("{} or {}", names[..n - 1].join(", "), names[n - 1]),
        }
    }
}

// ── Route table ────────────────────────────────────────────────────────

pub const LOGIN_PATH: &str = "/";

/// One guarded page and the roles allowed to render it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRule {
    pub path: &'static str,
    pub allowed: RoleSet,
}

const fn rule(path: &'static str, allowed: u8) -> RouteRule {
    RouteRule {
        path,
        allowed: RoleSet(allowed),
    }
}

pub const ROUTE_TABLE: &[RouteRule] = &[
    rule("/admin/dashboard", access::STAFF),
    rule("/admin/residents", access::OFFICE),
    rule("/admin/tenants", access::OFFICE),
    rule("/admin/finances", access::FINANCE),
    rule("/admin/expenses", access::FINANCE),
    rule("/admin/quotations", access::STAFF),
    rule("/admin/complaints", access::OFFICE),
    rule("/admin/notices", access::OFFICE),
    rule("/admin/committee", access::STAFF),
    rule("/admin/profile", access::STAFF),
    rule("/admin/settings", access::STAFF),
    rule("/admin/notifications", access::STAFF),
    rule("/resident/dashboard", access::RESIDENT),
    rule("/resident/amenities", access::RESIDENT),
    rule("/resident/complaints", access::RESIDENT),
    rule("/resident/finances", access::RESIDENT),
    rule("/resident/tenant-management", access::RESIDENT),
    rule("/resident/notices", access::RESIDENT),
    rule("/resident/committee", access::RESIDENT),
    rule("/resident/profile", access::RESIDENT),
    rule("/resident/settings", access::RESIDENT),
    rule("/resident/notifications", access::RESIDENT),
    rule("/security/dashboard", access::SECURITY),
    rule("/security/visitor-log", access::SECURITY),
    rule("/security/patrols", access::SECURITY),
    rule("/security/incidents", access::SECURITY),
    rule("/security/vehicles", access::SECURITY),
    rule("/security/committee", access::SECURITY),
    rule("/security/profile", access::SECURITY),
    rule("/security/settings", access::SECURITY),
    rule("/security/notifications", access::SECURITY),
];

/// Strip query/fragment and trailing slashes; "" becomes "/".
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        LOGIN_PATH
    } else {
        trimmed
    }
}

/// Allowed roles for a guarded path, or `None` when the path is not in the table.
pub fn allowed_roles(path: &str) -> Option<RoleSet> {
    let path = normalize(path);
    ROUTE_TABLE
        .iter()
        .find(|r| r.path == path)
        .map(|r| r.allowed)
}

/// Outcome of checking a navigation against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToLogin,
    Redirect(&'static str),
}

/// Decide whether `session` may render `path`.
///
/// The login page redirects authenticated users home. Unknown paths fall
/// through to the login page, which in turn forwards a live session home.
pub fn guard(path: &str, session: Option<Role>) -> GuardDecision {
    let path = normalize(path);
    if path == LOGIN_PATH {
        return match session {
            Some(role) => GuardDecision::Redirect(role.home_path()),
            None => GuardDecision::Render,
        };
    }

    match (allowed_roles(path), session) {
        (None, _) | (Some(_), None) => GuardDecision::RedirectToLogin,
        (Some(allowed), Some(role)) if allowed.contains(role) => GuardDecision::Render,
        (Some(_), Some(role)) => GuardDecision::Redirect(role.home_path()),
    }
}

// ── Sidebar navigation ─────────────────────────────────────────────────

/// Icon key for a sidebar entry; the UI maps it to a concrete icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Users,
    UserCheck,
    CreditCard,
    Wallet,
    FileSignature,
    ShieldAlert,
    FileText,
    Network,
    Bell,
    Settings,
    Building,
    ShieldCheck,
    Clock,
    Siren,
    Car,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
}

const fn nav(label: &'static str, path: &'static str, icon: NavIcon) -> NavItem {
    NavItem { label, path, icon }
}

const STAFF_NAV: &[NavItem] = &[
    nav("Dashboard", "/admin/dashboard", NavIcon::Dashboard),
    nav("Residents", "/admin/residents", NavIcon::Users),
    nav("Tenants", "/admin/tenants", NavIcon::UserCheck),
    nav("Finances", "/admin/finances", NavIcon::CreditCard),
    nav("Expenses", "/admin/expenses", NavIcon::Wallet),
    nav("Quotations", "/admin/quotations", NavIcon::FileSignature),
    nav("Complaints", "/admin/complaints", NavIcon::ShieldAlert),
    nav("Notices", "/admin/notices", NavIcon::FileText),
    nav("Committee", "/admin/committee", NavIcon::Network),
    nav("Notifications", "/admin/notifications", NavIcon::Bell),
    nav("Settings", "/admin/settings", NavIcon::Settings),
];

const RESIDENT_NAV: &[NavItem] = &[
    nav("Dashboard", "/resident/dashboard", NavIcon::Dashboard),
    nav("Pay Bills", "/resident/finances", NavIcon::CreditCard),
    nav("My Complaints", "/resident/complaints", NavIcon::ShieldAlert),
    nav("Book Amenity", "/resident/amenities", NavIcon::Building),
    nav("My Tenant", "/resident/tenant-management", NavIcon::UserCheck),
    nav("Notices", "/resident/notices", NavIcon::FileText),
    nav("Committee", "/resident/committee", NavIcon::Network),
    nav("Notifications", "/resident/notifications", NavIcon::Bell),
    nav("Settings", "/resident/settings", NavIcon::Settings),
];

const SECURITY_NAV: &[NavItem] = &[
    nav("Dashboard", "/security/dashboard", NavIcon::Dashboard),
    nav("Visitor Log", "/security/visitor-log", NavIcon::ShieldCheck),
    nav("Patrols", "/security/patrols", NavIcon::Clock),
    nav("Incidents", "/security/incidents", NavIcon::Siren),
    nav("Vehicles", "/security/vehicles", NavIcon::Car),
    nav("Committee", "/security/committee", NavIcon::Network),
    nav("Notifications", "/security/notifications", NavIcon::Bell),
    nav("Settings", "/security/settings", NavIcon::Settings),
];

/// Sidebar entries for a role. Staff entries are filtered by the route table
/// so the sidebar never links to a page the guard would bounce.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    let items = match role {
        Role::Admin | Role::Secretary | Role::Treasurer => STAFF_NAV,
        Role::Resident => RESIDENT_NAV,
        Role::Security => SECURITY_NAV,
    };
    items
        .iter()
        .copied()
        .filter(|item| allowed_roles(item.path).is_some_and(|set| set.contains(role)))
        .collect()
}

/// Active when the current path starts with the entry's path.
pub fn nav_is_active(item: &NavItem, current_path: &str) -> bool {
    normalize(current_path).starts_with(item.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn home_paths_by_role() {
        assert_eq!(Role::Admin.home_path(), "/admin/dashboard");
        assert_eq!(Role::Secretary.home_path(), "/admin/dashboard");
        assert_eq!(Role::Treasurer.home_path(), "/admin/dashboard");
        assert_eq!(Role::Security.home_path(), "/security/dashboard");
        assert_eq!(Role::Resident.home_path(), "/resident/dashboard");
    }

    #[test]
    fn every_excluded_role_is_redirected_home() {
        for rule in ROUTE_TABLE {
            for role in ALL_ROLES {
                let decision = guard(rule.path, Some(*role));
                if rule.allowed.contains(*role) {
                    assert_eq!(decision, GuardDecision::Render, "{} as {}", rule.path, role);
                } else {
                    assert_eq!(
                        decision,
                        GuardDecision::Redirect(role.home_path()),
                        "{} as {}",
                        rule.path,
                        role
                    );
                }
            }
        }
    }

    #[test]
    fn every_role_can_render_its_home() {
        for role in ALL_ROLES {
            assert_eq!(guard(role.home_path(), Some(*role)), GuardDecision::Render);
        }
    }

    #[test]
    fn no_session_goes_to_login() {
        assert_eq!(guard("/admin/dashboard", None), GuardDecision::RedirectToLogin);
        assert_eq!(guard("/resident/finances", None), GuardDecision::RedirectToLogin);
        assert_eq!(guard("/", None), GuardDecision::Render);
    }

    #[test]
    fn unknown_path_falls_through_to_login() {
        assert_eq!(guard("/nowhere", Some(Role::Admin)), GuardDecision::RedirectToLogin);
        assert_eq!(guard("/admin/unknown", None), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn login_page_forwards_session_home() {
        assert_eq!(
            guard("/", Some(Role::Security)),
            GuardDecision::Redirect("/security/dashboard")
        );
    }

    #[test]
    fn treasurer_cannot_open_residents() {
        assert_eq!(
            guard("/admin/residents", Some(Role::Treasurer)),
            GuardDecision::Redirect("/admin/dashboard")
        );
        assert_eq!(guard("/admin/finances", Some(Role::Treasurer)), GuardDecision::Render);
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(guard("/admin/finances/", Some(Role::Admin)), GuardDecision::Render);
        assert_eq!(guard("/admin/finances?tab=1", Some(Role::Admin)), GuardDecision::Render);
    }

    #[test]
    fn staff_nav_is_filtered_by_route_table() {
        let labels: Vec<&str> = nav_items(Role::Treasurer).iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec![
                "Dashboard",
                "Finances",
                "Expenses",
                "Quotations",
                "Committee",
                "Notifications",
                "Settings"
            ]
        );

        let secretary: Vec<&str> = nav_items(Role::Secretary).iter().map(|i| i.label).collect();
        assert!(secretary.contains(&"Residents"));
        assert!(!secretary.contains(&"Finances"));
    }

    #[test]
    fn every_nav_item_renders_for_its_role() {
        for role in ALL_ROLES {
            for item in nav_items(*role) {
                assert_eq!(guard(item.path, Some(*role)), GuardDecision::Render);
            }
        }
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("treasurer"), Some(Role::Treasurer));
        assert_eq!(Role::parse(" RESIDENT "), Some(Role::Resident));
        assert_eq!(Role::parse("janitor"), None);
    }

    #[test]
    fn role_set_describe() {
        assert_eq!(RoleSet(access::FINANCE).describe(), "Admin or Treasurer");
        assert_eq!(
            RoleSet(access::STAFF).describe(),
            "Admin, Secretary or Treasurer"
        );
        assert_eq!(RoleSet(access::SECURITY).describe(), "Security");
    }

    #[test]
    fn active_nav_matches_prefix() {
        let item = nav("Finances", "/admin/finances", NavIcon::CreditCard);
        assert!(nav_is_active(&item, "/admin/finances"));
        assert!(!nav_is_active(&item, "/admin/expenses"));
    }
}
