pub mod analytics;
pub mod connection;
pub mod groups;
pub mod review_items;
pub mod study_activities;
pub mod study_sessions;
pub mod words;

use crate::date_provider::{DateProvider, SystemDateProvider};
use crate::error::Result;
use crate::group::{Group, GroupWithStats};
use crate::pagination::PageRequest;
use crate::study::{StudyActivity, StudySession, StudySessionDetail, WordReviewItem};
use crate::word::{Word, WordGroup, WordWithStats};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use rusqlite::Connection;
use std::sync::Arc;

pub use analytics::Analytics;
pub use groups::GroupsRepository;
pub use review_items::ReviewItemsRepository;
pub use study_activities::StudyActivitiesRepository;
pub use study_sessions::StudySessionsRepository;
pub use words::WordsRepository;

/// Main Database struct providing access to all repositories.
///
/// Owns a single SQLite connection, so a handle serves one thread at a time;
/// parallel request handlers each open their own handle on the same file.
pub struct Database {
    pub(crate) conn: Connection,
    date_provider: Arc<dyn DateProvider>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        Self::init(db_path, Arc::new(SystemDateProvider))
    }

    pub fn with_date_provider(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self> {
        Self::init(db_path, date_provider)
    }

    fn init(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database {
            conn,
            date_provider,
        })
    }

    /// Current time at the precision timestamps are stored with
    pub fn get_current_time(&self) -> DateTime<Utc> {
        self.date_provider.get_current_time().trunc_subsecs(6)
    }

    pub fn today(&self) -> NaiveDate {
        self.date_provider.today()
    }

    // ===== Words Repository Access =====

    pub fn create_word(&self, portuguese: &str, english: &str) -> Result<Word> {
        let created_at = self.get_current_time();
        let id = WordsRepository::new(&self.conn).insert(portuguese, english, created_at)?;
        Ok(Word {
            id,
            portuguese: portuguese.to_string(),
            english: english.to_string(),
            created_at,
        })
    }

    pub fn get_word(&self, word_id: i64) -> Result<Option<Word>> {
        WordsRepository::new(&self.conn).get(word_id)
    }

    pub fn get_word_with_stats(&self, word_id: i64) -> Result<Option<WordWithStats>> {
        WordsRepository::new(&self.conn).get_with_stats(word_id)
    }

    pub fn list_words_with_stats(&self, page: PageRequest) -> Result<(Vec<WordWithStats>, i64)> {
        WordsRepository::new(&self.conn).list_with_stats(page)
    }

    pub fn update_word(
        &self,
        word_id: i64,
        portuguese: &str,
        english: &str,
    ) -> Result<Option<Word>> {
        WordsRepository::new(&self.conn).update(word_id, portuguese, english)
    }

    pub fn delete_word(&self, word_id: i64) -> Result<()> {
        WordsRepository::new(&self.conn).delete(word_id)
    }

    pub fn count_words(&self) -> Result<i64> {
        WordsRepository::new(&self.conn).count()
    }

    pub fn get_word_groups(&self, word_id: i64) -> Result<Vec<WordGroup>> {
        WordsRepository::new(&self.conn).groups(word_id)
    }

    // ===== Groups Repository Access =====

    pub fn create_group(&self, name: &str) -> Result<Group> {
        let created_at = self.get_current_time();
        let id = GroupsRepository::new(&self.conn).insert(name, created_at)?;
        Ok(Group {
            id,
            name: name.to_string(),
            created_at,
        })
    }

    pub fn get_group(&self, group_id: i64) -> Result<Option<Group>> {
        GroupsRepository::new(&self.conn).get(group_id)
    }

    pub fn get_group_with_stats(&self, group_id: i64) -> Result<Option<GroupWithStats>> {
        GroupsRepository::new(&self.conn).get_with_stats(group_id)
    }

    pub fn list_groups_paginated(&self, page: PageRequest) -> Result<(Vec<Group>, i64)> {
        GroupsRepository::new(&self.conn).list_paginated(page)
    }

    pub fn list_group_words(
        &self,
        group_id: i64,
        page: PageRequest,
    ) -> Result<(Vec<WordWithStats>, i64)> {
        GroupsRepository::new(&self.conn).words_paginated(group_id, page)
    }

    pub fn update_group(&self, group_id: i64, name: &str) -> Result<Option<Group>> {
        GroupsRepository::new(&self.conn).update(group_id, name)
    }

    pub fn delete_group(&self, group_id: i64) -> Result<()> {
        GroupsRepository::new(&self.conn).delete(group_id)
    }

    pub fn add_words_to_group(&self, group_id: i64, word_ids: &[i64]) -> Result<()> {
        GroupsRepository::new(&self.conn).add_words(group_id, word_ids)
    }

    pub fn remove_word_from_group(&self, group_id: i64, word_id: i64) -> Result<()> {
        GroupsRepository::new(&self.conn).remove_word(group_id, word_id)
    }

    pub fn count_groups(&self) -> Result<i64> {
        GroupsRepository::new(&self.conn).count()
    }

    pub fn count_group_words(&self, group_id: i64) -> Result<i64> {
        GroupsRepository::new(&self.conn).count_words(group_id)
    }

    // ===== Study Activities Repository Access =====

    pub fn create_study_activity(
        &self,
        name: &str,
        thumbnail_url: &str,
        description: &str,
    ) -> Result<StudyActivity> {
        let created_at = self.get_current_time();
        let id = StudyActivitiesRepository::new(&self.conn).insert(
            name,
            thumbnail_url,
            description,
            created_at,
        )?;
        Ok(StudyActivity {
            id,
            name: name.to_string(),
            thumbnail_url: thumbnail_url.to_string(),
            description: description.to_string(),
            created_at,
        })
    }

    pub fn get_study_activity(&self, activity_id: i64) -> Result<Option<StudyActivity>> {
        StudyActivitiesRepository::new(&self.conn).get(activity_id)
    }

    pub fn list_study_activities(&self) -> Result<Vec<StudyActivity>> {
        StudyActivitiesRepository::new(&self.conn).list()
    }

    // ===== Study Sessions Repository Access =====

    pub fn create_study_session(&self, group_id: i64, activity_id: i64) -> Result<StudySession> {
        let created_at = self.get_current_time();
        StudySessionsRepository::new(&self.conn).insert(group_id, activity_id, created_at)
    }

    /// Stores a session with an explicit start time, for imported or backfilled history
    pub fn import_study_session(
        &self,
        group_id: i64,
        activity_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<StudySession> {
        StudySessionsRepository::new(&self.conn).insert(
            group_id,
            activity_id,
            created_at.trunc_subsecs(6),
        )
    }

    pub fn get_study_session(&self, session_id: i64) -> Result<Option<StudySessionDetail>> {
        StudySessionsRepository::new(&self.conn).get(session_id)
    }

    pub fn get_last_study_session(&self) -> Result<Option<StudySessionDetail>> {
        StudySessionsRepository::new(&self.conn).last()
    }

    pub fn list_study_sessions(&self, offset: i64, limit: i64) -> Result<Vec<StudySessionDetail>> {
        StudySessionsRepository::new(&self.conn).list(offset, limit)
    }

    pub fn list_study_activity_sessions(
        &self,
        activity_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudySessionDetail>> {
        StudySessionsRepository::new(&self.conn).list_for_activity(activity_id, offset, limit)
    }

    pub fn list_group_study_sessions(
        &self,
        group_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudySessionDetail>> {
        StudySessionsRepository::new(&self.conn).list_for_group(group_id, offset, limit)
    }

    pub fn count_study_sessions(&self) -> Result<i64> {
        StudySessionsRepository::new(&self.conn).count()
    }

    pub fn count_study_activity_sessions(&self, activity_id: i64) -> Result<i64> {
        StudySessionsRepository::new(&self.conn).count_for_activity(activity_id)
    }

    pub fn count_group_study_sessions(&self, group_id: i64) -> Result<i64> {
        StudySessionsRepository::new(&self.conn).count_for_group(group_id)
    }

    pub fn list_study_session_words(
        &self,
        session_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WordWithStats>> {
        StudySessionsRepository::new(&self.conn).words(session_id, offset, limit)
    }

    pub fn count_study_session_words(&self, session_id: i64) -> Result<i64> {
        StudySessionsRepository::new(&self.conn).count_words(session_id)
    }

    // ===== Review Items Repository Access =====

    pub fn record_review(
        &self,
        session_id: i64,
        word_id: i64,
        correct: bool,
    ) -> Result<WordReviewItem> {
        let created_at = self.get_current_time();
        let id =
            ReviewItemsRepository::new(&self.conn).insert(session_id, word_id, correct, created_at)?;
        Ok(WordReviewItem {
            id,
            study_session_id: session_id,
            word_id,
            correct,
            created_at,
        })
    }

    pub fn get_review_item(&self, review_item_id: i64) -> Result<Option<WordReviewItem>> {
        ReviewItemsRepository::new(&self.conn).get(review_item_id)
    }

    pub fn count_review_items(&self) -> Result<i64> {
        ReviewItemsRepository::new(&self.conn).count()
    }

    // ===== Analytics Access =====

    pub fn review_totals(&self) -> Result<(i64, i64)> {
        Analytics::new(&self.conn).accuracy().review_totals()
    }

    pub fn count_distinct_words_studied(&self) -> Result<i64> {
        Analytics::new(&self.conn).progress().distinct_words_studied()
    }

    pub fn count_active_groups(&self) -> Result<i64> {
        Analytics::new(&self.conn).progress().active_groups()
    }

    /// Consecutive days with sessions ending on the provider's today
    pub fn calculate_study_streak(&self) -> Result<i64> {
        Analytics::new(&self.conn)
            .streak()
            .calculate_consecutive_days(self.today())
    }

    pub fn get_days_with_sessions(&self, window: i64) -> Result<Vec<NaiveDate>> {
        Analytics::new(&self.conn)
            .streak()
            .days_with_sessions(self.today(), window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_factory::{DatabaseConfig, DatabaseFactory};

    fn create_test_db() -> Database {
        Database::new(":memory:").expect("Failed to create test database")
    }

    #[test]
    fn test_database_creation() {
        let db = create_test_db();
        assert_eq!(db.count_words().unwrap(), 0);
        assert_eq!(db.count_groups().unwrap(), 0);
        assert_eq!(db.count_study_sessions().unwrap(), 0);
        assert_eq!(db.count_review_items().unwrap(), 0);
    }

    #[test]
    fn test_create_word_matches_stored_row() {
        let db = create_test_db();
        let word = db.create_word("gato", "cat").unwrap();
        assert_eq!(word.id, 1);

        let stored = db.get_word(word.id).unwrap().unwrap();
        assert_eq!(stored, word);
    }

    #[test]
    fn test_create_group_and_activity() {
        let db = create_test_db();
        let group = db.create_group("Animals").unwrap();
        assert_eq!(db.get_group(group.id).unwrap().unwrap(), group);

        let activity = db
            .create_study_activity("Flashcards", "thumb.png", "Flip cards")
            .unwrap();
        assert_eq!(db.get_study_activity(activity.id).unwrap().unwrap(), activity);
    }

    #[test]
    fn test_record_review_matches_stored_row() {
        let db = create_test_db();
        let group = db.create_group("Animals").unwrap();
        let activity = db.create_study_activity("Flashcards", "", "").unwrap();
        let session = db.create_study_session(group.id, activity.id).unwrap();
        let word = db.create_word("gato", "cat").unwrap();

        let review = db.record_review(session.id, word.id, true).unwrap();
        assert_eq!(db.get_review_item(review.id).unwrap().unwrap(), review);
        assert_eq!(db.review_totals().unwrap(), (1, 1));
    }

    #[test]
    fn test_days_with_sessions_for_given_day() {
        let db_config = DatabaseConfig::builder()
            .test_mode()
            .date_ymd(2025, 11, 12)
            .build();
        let db = DatabaseFactory::create(db_config).unwrap();
        let group = db.create_group("Animals").unwrap();
        let activity = db.create_study_activity("Flashcards", "", "").unwrap();
        db.create_study_session(group.id, activity.id).unwrap();

        db.import_study_session(
            group.id,
            activity.id,
            db.get_current_time() - chrono::Duration::days(3),
        )
        .unwrap();

        let days = db.get_days_with_sessions(10).unwrap();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 11, 9).unwrap()
            ]
        );
        assert_eq!(db.calculate_study_streak().unwrap(), 1);
    }
}
