use crate::dashboard::success_rate;
use crate::error::Result;
use rusqlite::Connection;

pub struct AccuracyRepository<'a> {
    conn: &'a Connection,
}

impl<'a> AccuracyRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        AccuracyRepository { conn }
    }

    /// (correct reviews, total reviews) over every recorded review item
    pub fn review_totals(&self) -> Result<(i64, i64)> {
        let totals = self.conn.query_row(
            r#"SELECT
                COUNT(CASE WHEN wri.correct = 1 THEN 1 END) as correct_count,
                COUNT(wri.id) as total_count
            FROM word_review_items wri"#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(totals)
    }

    /// Percentage of correct reviews in [0, 100]; 0.0 when nothing was reviewed yet
    pub fn success_rate(&self) -> Result<f64> {
        let (correct, total) = self.review_totals()?;
        Ok(success_rate(correct, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::init_connection;
    use crate::database::groups::GroupsRepository;
    use crate::database::review_items::ReviewItemsRepository;
    use crate::database::study_activities::StudyActivitiesRepository;
    use crate::database::study_sessions::StudySessionsRepository;
    use crate::database::words::WordsRepository;
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn record(conn: &Connection, answers: &[bool]) {
        let group_id = GroupsRepository::new(conn)
            .insert("Basics", fixed_date())
            .unwrap();
        let activity_id = StudyActivitiesRepository::new(conn)
            .insert("Flashcards", "", "", fixed_date())
            .unwrap();
        let session = StudySessionsRepository::new(conn)
            .insert(group_id, activity_id, fixed_date())
            .unwrap();
        let word_id = WordsRepository::new(conn)
            .insert("gato", "cat", fixed_date())
            .unwrap();
        let reviews = ReviewItemsRepository::new(conn);
        for correct in answers {
            reviews
                .insert(session.id, word_id, *correct, fixed_date())
                .unwrap();
        }
    }

    #[test]
    fn test_review_totals_empty_database() {
        let conn = init_connection(":memory:").unwrap();
        let repo = AccuracyRepository::new(&conn);
        assert_eq!(repo.review_totals().unwrap(), (0, 0));
        assert_eq!(repo.success_rate().unwrap(), 0.0);
    }

    #[test]
    fn test_review_totals_mixed_answers() {
        let conn = init_connection(":memory:").unwrap();
        record(&conn, &[true, true, true, false]);

        let repo = AccuracyRepository::new(&conn);
        assert_eq!(repo.review_totals().unwrap(), (3, 4));
        assert!((repo.success_rate().unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_wrong_is_zero_percent() {
        let conn = init_connection(":memory:").unwrap();
        record(&conn, &[false, false]);

        let repo = AccuracyRepository::new(&conn);
        assert_eq!(repo.success_rate().unwrap(), 0.0);
    }
}
