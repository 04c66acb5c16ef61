use crate::group::{Group, GroupWithStats};
use crate::study::{StudyActivity, StudySession, StudySessionDetail, WordReviewItem};
use crate::word::{Word, WordGroup, WordWithStats};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

/// Fixed-width RFC 3339 in UTC so that text order is chronological order
pub fn to_db_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(idx, &raw)
}

pub fn optional_timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| parse_timestamp(idx, &raw))
        .transpose()
}

/// Parses the `YYYY-MM-DD` text produced by SQLite's `DATE()`
pub fn date_at(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Expected columns: id, portuguese, english, created_at
pub struct WordRowFactory;

impl WordRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<Word> {
        Ok(Word {
            id: row.get(0)?,
            portuguese: row.get(1)?,
            english: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
        })
    }
}

/// Expected columns: id, portuguese, english, created_at, correct_count, wrong_count
pub struct WordWithStatsRowFactory;

impl WordWithStatsRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<WordWithStats> {
        Ok(WordWithStats {
            id: row.get(0)?,
            portuguese: row.get(1)?,
            english: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
            correct_count: row.get(4)?,
            wrong_count: row.get(5)?,
        })
    }
}

/// Expected columns: id, name
pub struct WordGroupRowFactory;

impl WordGroupRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<WordGroup> {
        Ok(WordGroup {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// Expected columns: id, name, created_at
pub struct GroupRowFactory;

impl GroupRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<Group> {
        Ok(Group {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: timestamp_at(row, 2)?,
        })
    }
}

/// Expected columns: id, name, created_at, word_count
pub struct GroupWithStatsRowFactory;

impl GroupWithStatsRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<GroupWithStats> {
        Ok(GroupWithStats {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: timestamp_at(row, 2)?,
            word_count: row.get(3)?,
        })
    }
}

/// Expected columns: id, name, thumbnail_url, description, created_at
pub struct StudyActivityRowFactory;

impl StudyActivityRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<StudyActivity> {
        Ok(StudyActivity {
            id: row.get(0)?,
            name: row.get(1)?,
            thumbnail_url: row.get(2)?,
            description: row.get(3)?,
            created_at: timestamp_at(row, 4)?,
        })
    }
}

/// Expected columns: id, group_id, study_activity_id, created_at
pub struct StudySessionRowFactory;

impl StudySessionRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<StudySession> {
        Ok(StudySession {
            id: row.get(0)?,
            group_id: row.get(1)?,
            study_activity_id: row.get(2)?,
            created_at: timestamp_at(row, 3)?,
        })
    }
}

/// Expected columns: id, group_id, study_activity_id, created_at, activity_name,
///                   group_name, review_items_count, end_time
pub struct StudySessionDetailRowFactory;

impl StudySessionDetailRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<StudySessionDetail> {
        Ok(StudySessionDetail {
            id: row.get(0)?,
            group_id: row.get(1)?,
            study_activity_id: row.get(2)?,
            start_time: timestamp_at(row, 3)?,
            activity_name: row.get(4)?,
            group_name: row.get(5)?,
            review_items_count: row.get(6)?,
            end_time: optional_timestamp_at(row, 7)?,
        })
    }
}

/// Expected columns: id, study_session_id, word_id, correct, created_at
pub struct WordReviewItemRowFactory;

impl WordReviewItemRowFactory {
    pub fn from_row(row: &Row) -> rusqlite::Result<WordReviewItem> {
        Ok(WordReviewItem {
            id: row.get(0)?,
            study_session_id: row.get(1)?,
            word_id: row.get(2)?,
            correct: row.get(3)?,
            created_at: timestamp_at(row, 4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_timestamp_is_fixed_width_utc() {
        let time = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
            .and_utc();
        assert_eq!(to_db_timestamp(time), "2026-01-05T07:08:09.000000Z");
    }

    #[test]
    fn test_timestamp_survives_a_round_trip_through_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let time = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_micro_opt(7, 8, 9, 123_456)
            .unwrap()
            .and_utc();
        let parsed = conn
            .query_row("SELECT ?1", [to_db_timestamp(time)], |row| timestamp_at(row, 0))
            .unwrap();
        assert_eq!(parsed, time);

        let day = conn
            .query_row("SELECT DATE(?1)", [to_db_timestamp(time)], |row| date_at(row, 0))
            .unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn test_malformed_timestamp_is_an_error_not_a_panic() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result = conn.query_row("SELECT 'yesterday'", [], |row| timestamp_at(row, 0));
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
        ));
    }

    #[test]
    fn test_null_end_time_is_none() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result = conn
            .query_row("SELECT NULL", [], |row| optional_timestamp_at(row, 0))
            .unwrap();
        assert!(result.is_none());
    }
}
