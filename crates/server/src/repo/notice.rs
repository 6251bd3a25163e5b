use chrono::NaiveDate;
use shared_types::{filter_notices, new_id, AppError, Notice, NoticeFilter, PostNoticeRequest, Role};

use crate::db::SharedStore;
use crate::error_convert::ValidateRequest;

pub async fn list(store: &SharedStore, filter: &NoticeFilter) -> Vec<Notice> {
    filter_notices(&store.read().await.notices, filter)
}

pub async fn post(
    store: &SharedStore,
    publisher: Role,
    req: PostNoticeRequest,
    today: NaiveDate,
) -> Result<Notice, AppError> {
    req.validate_request()?;
    let notice = req.into_notice(new_id("not"), publisher, today);
    store.write().await.notices.insert(0, notice.clone());
    tracing::info!(id = %notice.id, by = %notice.published_by, "Notice posted");
    Ok(notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::test_support::{day, store};
    use shared_types::NoticeCategory;

    #[tokio::test]
    async fn posted_notice_leads_the_board() {
        let store = store();
        let n = post(
            &store,
            Role::Secretary,
            PostNoticeRequest {
                title: "Diwali Mela".into(),
                category: NoticeCategory::Event,
                content: "Stalls open at 6 PM.".into(),
            },
            day(2024, 8, 10),
        )
        .await
        .unwrap();
        assert_eq!(n.published_by, "Secretary");
        let all = list(&store, &NoticeFilter::default()).await;
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, n.id);
    }

    #[tokio::test]
    async fn blank_content_rejected() {
        let store = store();
        let res = post(
            &store,
            Role::Admin,
            PostNoticeRequest {
                title: "Hello".into(),
                category: NoticeCategory::General,
                content: String::new(),
            },
            day(2024, 8, 10),
        )
        .await;
        assert!(res.is_err());
        assert_eq!(list(&store, &NoticeFilter::default()).await.len(), 3);
    }
}
