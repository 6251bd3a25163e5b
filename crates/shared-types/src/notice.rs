use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{matches_search, Labeled, Tone};
use crate::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum NoticeCategory {
    #[default]
    General,
    Event,
    Maintenance,
    Urgent,
}

impl Labeled for NoticeCategory {
    const ALL: &'static [Self] = &[
        NoticeCategory::General,
        NoticeCategory::Event,
        NoticeCategory::Maintenance,
        NoticeCategory::Urgent,
    ];

    fn label(self) -> &'static str {
        match self {
            NoticeCategory::General => "General",
            NoticeCategory::Event => "Event",
            NoticeCategory::Maintenance => "Maintenance",
            NoticeCategory::Urgent => "Urgent",
        }
    }
}

impl NoticeCategory {
    pub fn tone(self) -> Tone {
        match self {
            NoticeCategory::General => Tone::Neutral,
            NoticeCategory::Event => Tone::Info,
            NoticeCategory::Maintenance => Tone::Warning,
            NoticeCategory::Urgent => Tone::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub category: NoticeCategory,
    pub content: String,
    /// Role name of the publisher.
    pub published_by: String,
}

/// Staff roles allowed to post notices.
pub fn can_post_notice(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Secretary)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct NoticeFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Category label or "All".
    #[serde(default)]
    pub category: Option<String>,
    /// Exact publication date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NoticeFilter {
    pub fn matches(&self, n: &Notice) -> bool {
        let category = self
            .category
            .as_deref()
            .and_then(NoticeCategory::filter_value);
        matches_search(
            &[&n.title, &n.content],
            self.search.as_deref().unwrap_or_default(),
        ) && category.is_none_or(|c| n.category == c)
            && self.date.is_none_or(|d| n.date == d)
    }

    pub fn is_active(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.category.as_deref().and_then(NoticeCategory::filter_value).is_some()
            || self.date.is_some()
    }
}

pub fn filter_notices(notices: &[Notice], filter: &NoticeFilter) -> Vec<Notice> {
    notices
        .iter()
        .filter(|n| filter.matches(n))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct PostNoticeRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Title and content cannot be empty."
        ))
    )]
    pub title: String,
    #[serde(default)]
    pub category: NoticeCategory,
    #[cfg_attr(
        feature = "validation",
        validate(custom(
            function = "crate::common::not_blank",
            message = "Title and content cannot be empty."
        ))
    )]
    pub content: String,
}

impl PostNoticeRequest {
    pub fn into_notice(self, id: String, publisher: Role, today: NaiveDate) -> Notice {
        Notice {
            id,
            title: self.title.trim().to_string(),
            date: today,
            category: self.category,
            content: self.content.trim().to_string(),
            published_by: publisher.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Vec<Notice> {
        vec![
            Notice {
                id: "not-1".into(),
                title: "Monthly Maintenance Bill".into(),
                date: date(8, 1),
                category: NoticeCategory::General,
                content: "Please pay before the 10th.".into(),
                published_by: "Admin".into(),
            },
            Notice {
                id: "not-2".into(),
                title: "Independence Day Celebration".into(),
                date: date(7, 30),
                category: NoticeCategory::Event,
                content: "Flag hoisting in the society garden.".into(),
                published_by: "Secretary".into(),
            },
        ]
    }

    #[test]
    fn search_covers_title_and_content() {
        let f = NoticeFilter {
            search: Some("GARDEN".into()),
            ..Default::default()
        };
        let ids: Vec<String> = filter_notices(&sample(), &f).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["not-2"]);
    }

    #[test]
    fn category_and_date_filters() {
        let f = NoticeFilter {
            category: Some("General".into()),
            date: Some(date(8, 1)),
            ..Default::default()
        };
        assert_eq!(filter_notices(&sample(), &f).len(), 1);
        let f = NoticeFilter {
            category: Some("Urgent".into()),
            ..Default::default()
        };
        assert!(filter_notices(&sample(), &f).is_empty());
        assert!(f.is_active());
        assert!(!NoticeFilter::default().is_active());
    }

    #[test]
    fn posted_notice_records_role() {
        let req = PostNoticeRequest {
            title: " Water cut ".into(),
            category: NoticeCategory::Urgent,
            content: "Tomorrow 10-5".into(),
        };
        let n = req.into_notice("not-x".into(), Role::Secretary, date(8, 2));
        assert_eq!(n.published_by, "Secretary");
        assert_eq!(n.title, "Water cut");
        assert!(can_post_notice(Role::Admin));
        assert!(!can_post_notice(Role::Treasurer));
    }
}
