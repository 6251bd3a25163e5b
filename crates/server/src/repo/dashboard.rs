use chrono::NaiveDate;
use shared_types::{
    resident_dashboard, staff_dashboard, AppError, CommitteeMember, Poll, ResidentDashboard,
    ResidentSources, Role, StaffDashboard, StaffSources, User,
};

use crate::db::SharedStore;

pub async fn staff(store: &SharedStore, role: Role, today: NaiveDate) -> StaffDashboard {
    let s = store.read().await;
    let src = StaffSources {
        residents: &s.residents,
        invoices: &s.invoices,
        complaints: &s.complaints,
        notices: &s.notices,
        bookings: &s.bookings,
        payments: &s.payments,
    };
    staff_dashboard(role, &src, today)
}

pub async fn resident(store: &SharedStore, user: &User, today: NaiveDate, hour: u32) -> ResidentDashboard {
    let s = store.read().await;
    let own_bookings: Vec<_> = s
        .bookings
        .iter()
        .filter(|b| b.booked_by == user.id)
        .cloned()
        .collect();
    let src = ResidentSources {
        user_name: &user.name,
        invoices: &s.invoices,
        complaints: &s.complaints,
        notices: &s.notices,
        bookings: &own_bookings,
        poll: &s.poll,
        has_voted: s.poll_voters.contains(&user.id),
    };
    resident_dashboard(&src, today, hour)
}

/// Cast the user's single vote in the community poll.
pub async fn vote(store: &SharedStore, user_id: &str, option: &str) -> Result<Poll, AppError> {
    let mut s = store.write().await;
    if s.poll_voters.contains(user_id) {
        return Err(AppError::conflict("You have already voted in this poll."));
    }
    s.poll.vote(option)?;
    s.poll_voters.insert(user_id.to_string());
    tracing::info!(user = user_id, option, "Poll vote recorded");
    Ok(s.poll.clone())
}

pub async fn committee(store: &SharedStore) -> Vec<CommitteeMember> {
    store.read().await.committee.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::AppErrorKind;

    #[tokio::test]
    async fn treasurer_kpis() {
        let d = staff(&store(), Role::Treasurer, day(2024, 8, 10)).await;
        let titles: Vec<&str> = d.kpis.iter().map(|k| k.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Pending Payments", "Collection", "Overdue Invoices", "Total Residents"]
        );
    }

    #[tokio::test]
    async fn one_vote_per_user() {
        let store = store();
        let poll = vote(&store, "user-5", "Warm Beige").await.unwrap();
        assert_eq!(poll.total_votes(), 101);
        let err = vote(&store, "user-5", "Ocean Blue").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[tokio::test]
    async fn unknown_option_is_not_counted() {
        let store = store();
        let err = vote(&store, "user-5", "Neon Pink").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        vote(&store, "user-5", "Ocean Blue").await.unwrap();
    }

    #[tokio::test]
    async fn resident_dashboard_reflects_vote() {
        let store = store();
        let john = crate::repo::account::find_user(&store, "user-5").await.unwrap();
        assert!(!resident(&store, &john, day(2024, 8, 10), 9).await.has_voted);
        vote(&store, "user-5", "Ocean Blue").await.unwrap();
        let d = resident(&store, &john, day(2024, 8, 10), 9).await;
        assert!(d.has_voted);
        assert_eq!(d.greeting, "Good Morning");
        assert_eq!(d.first_name, "John");
    }
}
