use shared_types::{apply_read_filter, unread_count, visible_to, AppError, Notification, ReadFilter, Role};

use crate::db::SharedStore;

pub async fn list(store: &SharedStore, role: Role, filter: ReadFilter) -> Vec<Notification> {
    apply_read_filter(visible_to(&store.read().await.notifications, role), filter)
}

pub async fn unread(store: &SharedStore, role: Role) -> usize {
    unread_count(&store.read().await.notifications, role)
}

/// Mark one notification read. Notifications addressed to other roles are
/// reported as missing.
pub async fn mark_read(store: &SharedStore, role: Role, id: &str) -> Result<Notification, AppError> {
    let mut store = store.write().await;
    let n = store
        .notifications
        .iter_mut()
        .find(|n| n.id == id && n.audience.includes(role))
        .ok_or_else(|| super::not_found::<Notification>(id))?;
    n.mark_read_by(role);
    Ok(n.viewed_by(role))
}

/// Mark everything visible to `role` read. Returns how many changed.
pub async fn mark_all_read(store: &SharedStore, role: Role) -> usize {
    let mut store = store.write().await;
    let mut changed = 0;
    for n in store.notifications.iter_mut().filter(|n| n.audience.includes(role)) {
        if n.mark_read_by(role) {
            changed += 1;
        }
    }
    tracing::info!(role = role.as_str(), changed, "Notifications marked read");
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::store;
    use shared_types::AppErrorKind;

    #[tokio::test]
    async fn resident_sees_own_and_broadcast() {
        let store = store();
        let ids: Vec<String> = list(&store, Role::Resident, ReadFilter::All)
            .await
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["notif-4", "notif-6", "notif-7"]);
        assert_eq!(unread(&store, Role::Resident).await, 2);
    }

    #[tokio::test]
    async fn cannot_mark_other_roles_notification() {
        let err = mark_read(&store(), Role::Resident, "notif-1").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    #[tokio::test]
    async fn mark_all_only_touches_visible() {
        let store = store();
        assert_eq!(mark_all_read(&store, Role::Resident).await, 2);
        assert!(list(&store, Role::Resident, ReadFilter::Unread).await.is_empty());
        assert_eq!(unread(&store, Role::Admin).await, 1);
    }

    #[tokio::test]
    async fn broadcast_stays_unread_for_other_roles() {
        let store = store();
        // notif-6 goes to everyone and starts read; post a fresh broadcast.
        store.write().await.notifications.push(
            Notification {
                id: "notif-8".into(),
                title: "Fire drill".into(),
                message: "Assemble at the main gate at 10 AM.".into(),
                date: crate::repo::test_support::day(2024, 8, 5),
                read: false,
                audience: shared_types::Audience::All,
                read_by: Default::default(),
            }
            .stored(),
        );
        let marked = mark_read(&store, Role::Resident, "notif-8").await.unwrap();
        assert!(marked.read);
        assert_eq!(unread(&store, Role::Resident).await, 2);
        assert_eq!(unread(&store, Role::Security).await, 2);
        let security = list(&store, Role::Security, ReadFilter::Unread).await;
        assert!(security.iter().any(|n| n.id == "notif-8"));
    }
}
