use crate::error::Result;
use crate::row_factories::{WordReviewItemRowFactory, to_db_timestamp};
use crate::study::WordReviewItem;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, params};

/// Append-only store of answers given during study sessions
pub struct ReviewItemsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ReviewItemsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        ReviewItemsRepository { conn }
    }

    pub fn insert(
        &self,
        study_session_id: i64,
        word_id: i64,
        correct: bool,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        debug!(
            "Recording review for session id={}, word id={}: correct={}",
            study_session_id, word_id, correct
        );
        self.conn.execute(
            "INSERT INTO word_review_items (study_session_id, word_id, correct, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![study_session_id, word_id, correct, to_db_timestamp(created_at)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, id: i64) -> Result<Option<WordReviewItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, study_session_id, word_id, correct, created_at
             FROM word_review_items
             WHERE id = ?1",
        )?;

        let mut rows = stmt.query([id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(WordReviewItemRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM word_review_items", [], |row| {
                    row.get(0)
                })?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::init_connection;
    use crate::database::groups::GroupsRepository;
    use crate::database::study_activities::StudyActivitiesRepository;
    use crate::database::study_sessions::StudySessionsRepository;
    use crate::database::words::WordsRepository;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn setup() -> (Connection, i64, i64) {
        let conn = init_connection(":memory:").unwrap();
        let group_id = GroupsRepository::new(&conn)
            .insert("Basics", fixed_date())
            .unwrap();
        let activity_id = StudyActivitiesRepository::new(&conn)
            .insert("Flashcards", "", "", fixed_date())
            .unwrap();
        let session = StudySessionsRepository::new(&conn)
            .insert(group_id, activity_id, fixed_date())
            .unwrap();
        let word_id = WordsRepository::new(&conn)
            .insert("gato", "cat", fixed_date())
            .unwrap();
        (conn, session.id, word_id)
    }

    #[test]
    fn test_insert_and_get_review_item() {
        let (conn, session_id, word_id) = setup();
        let repo = ReviewItemsRepository::new(&conn);

        let id = repo.insert(session_id, word_id, false, fixed_date()).unwrap();
        let item = repo.get(id).unwrap().unwrap();

        assert_eq!(item.study_session_id, session_id);
        assert_eq!(item.word_id, word_id);
        assert!(!item.correct);
        assert_eq!(item.created_at, fixed_date());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_unknown_session_is_rejected() {
        let (conn, _, word_id) = setup();
        let repo = ReviewItemsRepository::new(&conn);

        let err = repo.insert(999, word_id, true, fixed_date()).unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_unknown_word_is_rejected() {
        let (conn, session_id, _) = setup();
        let repo = ReviewItemsRepository::new(&conn);

        let err = repo.insert(session_id, 999, true, fixed_date()).unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_deleting_a_word_keeps_its_reviews() {
        let (conn, session_id, word_id) = setup();
        let repo = ReviewItemsRepository::new(&conn);
        let id = repo.insert(session_id, word_id, true, fixed_date()).unwrap();

        WordsRepository::new(&conn).delete(word_id).unwrap();

        assert!(repo.get(id).unwrap().is_some());
    }

    #[test]
    fn test_get_missing_review_item() {
        let (conn, _, _) = setup();
        assert!(ReviewItemsRepository::new(&conn).get(5).unwrap().is_none());
    }
}
