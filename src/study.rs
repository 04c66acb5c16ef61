use chrono::{DateTime, Utc};
use serde::Serialize;

/// Catalog entry describing a kind of practice (flashcards, typing, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyActivity {
    pub id: i64,
    pub name: String,
    pub thumbnail_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One practice run of a group with an activity, as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySession {
    pub id: i64,
    pub group_id: i64,
    pub study_activity_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Session enriched with names and the fields derived from its review items.
///
/// `end_time` is the latest review timestamp and is absent for a session
/// without reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySessionDetail {
    pub id: i64,
    pub activity_name: String,
    pub group_name: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub review_items_count: i64,
    #[serde(skip)]
    pub group_id: i64,
    #[serde(skip)]
    pub study_activity_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordReviewItem {
    pub id: i64,
    pub study_session_id: i64,
    pub word_id: i64,
    pub correct: bool,
    pub created_at: DateTime<Utc>,
}
