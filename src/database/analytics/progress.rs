use crate::error::Result;
use rusqlite::Connection;

pub struct ProgressRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ProgressRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        ProgressRepository { conn }
    }

    /// Distinct words with at least one review item, whatever the outcome
    pub fn distinct_words_studied(&self) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT word_id) FROM word_review_items",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Distinct groups that have been practiced in at least one session
    pub fn active_groups(&self) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT group_id) FROM study_sessions",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
