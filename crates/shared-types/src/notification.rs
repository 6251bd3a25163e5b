use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Role, ALL_ROLES};

/// Who a notification is addressed to: one role, or everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Audience {
    All,
    Admin,
    Secretary,
    Treasurer,
    Security,
    Resident,
}

impl Audience {
    pub fn includes(self, role: Role) -> bool {
        match self {
            Audience::All => true,
            Audience::Admin => role == Role::Admin,
            Audience::Secretary => role == Role::Secretary,
            Audience::Treasurer => role == Role::Treasurer,
            Audience::Security => role == Role::Security,
            Audience::Resident => role == Role::Resident,
        }
    }
}

impl From<Role> for Audience {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Audience::Admin,
            Role::Secretary => Audience::Secretary,
            Role::Treasurer => Audience::Treasurer,
            Role::Security => Audience::Security,
            Role::Resident => Audience::Resident,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub date: NaiveDate,
    /// Read state as seen by the role that fetched it.
    pub read: bool,
    pub audience: Audience,
    /// Roles that have read it. Broadcasts are tracked per role, so one
    /// role marking a notice read leaves it unread for the rest.
    #[serde(skip)]
    pub read_by: HashSet<Role>,
}

impl Notification {
    /// Stored form: `read` seeds every addressed role.
    pub fn stored(mut self) -> Self {
        if self.read {
            self.read_by = ALL_ROLES
                .iter()
                .copied()
                .filter(|r| self.audience.includes(*r))
                .collect();
        }
        self.read = false;
        self
    }

    pub fn is_read_by(&self, role: Role) -> bool {
        self.read_by.contains(&role)
    }

    /// Returns true when this call changed the state.
    pub fn mark_read_by(&mut self, role: Role) -> bool {
        self.read_by.insert(role)
    }

    /// Copy for `role`'s inbox.
    pub fn viewed_by(&self, role: Role) -> Self {
        Self {
            read: self.is_read_by(role),
            read_by: HashSet::new(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct NotificationParams {
    #[serde(default)]
    pub filter: ReadFilter,
}

/// Notifications addressed to `role`, newest first.
pub fn visible_to(notifications: &[Notification], role: Role) -> Vec<Notification> {
    let mut list: Vec<Notification> = notifications
        .iter()
        .filter(|n| n.audience.includes(role))
        .map(|n| n.viewed_by(role))
        .collect();
    list.sort_by(|a, b| b.date.cmp(&a.date));
    list
}

pub fn apply_read_filter(list: Vec<Notification>, filter: ReadFilter) -> Vec<Notification> {
    match filter {
        ReadFilter::All => list,
        ReadFilter::Unread => list.into_iter().filter(|n| !n.read).collect(),
    }
}

/// How many unread items the header bell lists before "View all".
pub const BELL_PREVIEW: usize = 4;

/// The newest unread items from an already sorted list.
pub fn unread_preview(list: &[Notification], limit: usize) -> Vec<Notification> {
    list.iter().filter(|n| !n.read).take(limit).cloned().collect()
}

pub fn unread_count(notifications: &[Notification], role: Role) -> usize {
    notifications
        .iter()
        .filter(|n| n.audience.includes(role) && !n.is_read_by(role))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(id: &str, day: u32, read: bool, audience: Audience) -> Notification {
        Notification {
            id: id.into(),
            title: id.into(),
            message: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            read,
            audience,
            read_by: HashSet::new(),
        }
        .stored()
    }

    fn sample() -> Vec<Notification> {
        vec![
            n("a", 29, true, Audience::All),
            n("r1", 28, false, Audience::Resident),
            n("r2", 31, false, Audience::Resident),
            n("s", 31, false, Audience::Security),
        ]
    }

    #[test]
    fn resident_sees_own_and_all_newest_first() {
        let ids: Vec<String> = visible_to(&sample(), Role::Resident)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["r2", "a", "r1"]);
    }

    #[test]
    fn unread_filter_and_count() {
        let list = apply_read_filter(visible_to(&sample(), Role::Resident), ReadFilter::Unread);
        assert_eq!(list.len(), 2);
        assert_eq!(unread_count(&sample(), Role::Security), 1);
        assert_eq!(unread_count(&sample(), Role::Admin), 0);
    }

    #[test]
    fn bell_preview_keeps_newest_unread() {
        let mut all = sample();
        for day in 1..=5 {
            all.push(n(&format!("old{day}"), day, false, Audience::Resident));
        }
        let list = visible_to(&all, Role::Resident);
        let ids: Vec<String> = unread_preview(&list, BELL_PREVIEW).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["r2", "r1", "old5", "old4"]);
        assert!(unread_preview(&visible_to(&all, Role::Admin), BELL_PREVIEW).is_empty());
    }

    #[test]
    fn audience_serde_uses_role_names() {
        assert_eq!(serde_json::to_string(&Audience::All).unwrap(), "\"All\"");
        assert_eq!(Audience::from(Role::Treasurer), Audience::Treasurer);
    }

    #[test]
    fn broadcast_read_state_is_per_role() {
        let mut all = sample();
        let r1 = all.iter_mut().find(|n| n.id == "r1").unwrap();
        assert!(r1.mark_read_by(Role::Resident));
        assert!(!r1.mark_read_by(Role::Resident));

        let mut broadcast = n("b", 30, false, Audience::All);
        broadcast.mark_read_by(Role::Resident);
        all.push(broadcast);
        assert_eq!(unread_count(&all, Role::Resident), 1);
        let security = visible_to(&all, Role::Security);
        assert!(!security.iter().find(|n| n.id == "b").unwrap().read);
        assert_eq!(unread_count(&all, Role::Security), 2);
    }
}
