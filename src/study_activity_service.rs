use crate::database::Database;
use crate::error::Result;
use crate::pagination::{PageRequest, PaginatedResponse};
use crate::study::{StudyActivity, StudySession, StudySessionDetail, WordReviewItem};
use crate::word::WordWithStats;
use log::info;
use std::sync::Arc;

/// Service layer for study activities, the sessions run with them and the answers recorded
pub struct StudyActivityService {
    db: Arc<Database>,
}

impl StudyActivityService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create_study_activity(
        &self,
        name: &str,
        thumbnail_url: &str,
        description: &str,
    ) -> Result<StudyActivity> {
        self.db
            .create_study_activity(name, thumbnail_url, description)
    }

    pub fn get_study_activity(&self, activity_id: i64) -> Result<Option<StudyActivity>> {
        self.db.get_study_activity(activity_id)
    }

    pub fn list_study_activities(&self) -> Result<Vec<StudyActivity>> {
        self.db.list_study_activities()
    }

    /// Sessions run with one activity, most recent first
    pub fn get_study_activity_sessions(
        &self,
        activity_id: i64,
        page: PageRequest,
    ) -> Result<PaginatedResponse<StudySessionDetail>> {
        let total = self.db.count_study_activity_sessions(activity_id)?;
        let sessions =
            self.db
                .list_study_activity_sessions(activity_id, page.offset(), page.limit())?;
        Ok(page.respond(sessions, total))
    }

    /// Starts a session now; both ids must exist
    pub fn create_study_session(&self, group_id: i64, activity_id: i64) -> Result<StudySession> {
        let session = self.db.create_study_session(group_id, activity_id)?;
        info!(
            "Started study session id={} (group id={}, activity id={})",
            session.id, group_id, activity_id
        );
        Ok(session)
    }

    /// Global session feed, most recent first
    pub fn list_study_sessions(
        &self,
        page: PageRequest,
    ) -> Result<PaginatedResponse<StudySessionDetail>> {
        let total = self.db.count_study_sessions()?;
        let sessions = self.db.list_study_sessions(page.offset(), page.limit())?;
        Ok(page.respond(sessions, total))
    }

    pub fn get_study_session(&self, session_id: i64) -> Result<Option<StudySessionDetail>> {
        self.db.get_study_session(session_id)
    }

    pub fn get_study_session_words(
        &self,
        session_id: i64,
        page: PageRequest,
    ) -> Result<PaginatedResponse<WordWithStats>> {
        let total = self.db.count_study_session_words(session_id)?;
        let words = self
            .db
            .list_study_session_words(session_id, page.offset(), page.limit())?;
        Ok(page.respond(words, total))
    }

    pub fn record_review(
        &self,
        session_id: i64,
        word_id: i64,
        correct: bool,
    ) -> Result<WordReviewItem> {
        self.db.record_review(session_id, word_id, correct)
    }
}
