use crate::error::Result;
use crate::pagination::PageRequest;
use crate::row_factories::{
    WordGroupRowFactory, WordRowFactory, WordWithStatsRowFactory, to_db_timestamp,
};
use crate::word::{Word, WordGroup, WordWithStats};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, params};

pub struct WordsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> WordsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        WordsRepository { conn }
    }

    pub fn insert(&self, portuguese: &str, english: &str, created_at: DateTime<Utc>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO words (portuguese, english, created_at) VALUES (?1, ?2, ?3)",
            params![portuguese, english, to_db_timestamp(created_at)],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Created word id={} ({} / {})", id, portuguese, english);
        Ok(id)
    }

    pub fn get(&self, word_id: i64) -> Result<Option<Word>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, portuguese, english, created_at FROM words WHERE id = ?1")?;

        let mut rows = stmt.query([word_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(WordRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_with_stats(&self, word_id: i64) -> Result<Option<WordWithStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                w.id, w.portuguese, w.english, w.created_at,
                COUNT(CASE WHEN wri.correct = 1 THEN 1 END) AS correct_count,
                COUNT(CASE WHEN wri.correct = 0 THEN 1 END) AS wrong_count
             FROM words w
             LEFT JOIN word_review_items wri ON w.id = wri.word_id
             WHERE w.id = ?1
             GROUP BY w.id",
        )?;

        let mut rows = stmt.query([word_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(WordWithStatsRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// One page of words in id order with their review counts, plus the total word count.
    /// Words that were never reviewed report 0/0.
    pub fn list_with_stats(&self, page: PageRequest) -> Result<(Vec<WordWithStats>, i64)> {
        let total = self.count()?;

        let mut stmt = self.conn.prepare(
            "SELECT
                w.id, w.portuguese, w.english, w.created_at,
                COUNT(CASE WHEN wri.correct = 1 THEN 1 END) AS correct_count,
                COUNT(CASE WHEN wri.correct = 0 THEN 1 END) AS wrong_count
             FROM words w
             LEFT JOIN word_review_items wri ON w.id = wri.word_id
             GROUP BY w.id
             ORDER BY w.id
             LIMIT ?1 OFFSET ?2",
        )?;

        let words = stmt
            .query_map(
                params![page.limit(), page.offset()],
                WordWithStatsRowFactory::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(
            "Retrieved {} words for page {} (total {})",
            words.len(),
            page.page(),
            total
        );
        Ok((words, total))
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Replaces both text fields. Returns `None` when the word does not exist.
    pub fn update(&self, word_id: i64, portuguese: &str, english: &str) -> Result<Option<Word>> {
        let changed = self.conn.execute(
            "UPDATE words SET portuguese = ?1, english = ?2 WHERE id = ?3",
            params![portuguese, english, word_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get(word_id)
    }

    /// Memberships go with the word; review items are left in place.
    pub fn delete(&self, word_id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM words WHERE id = ?1", [word_id])?;
        debug!("Deleted word id={} ({} row)", word_id, deleted);
        Ok(())
    }

    /// Groups the word belongs to, in group id order
    pub fn groups(&self, word_id: i64) -> Result<Vec<WordGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.id, g.name
             FROM groups g
             JOIN words_groups wg ON g.id = wg.group_id
             WHERE wg.word_id = ?1
             ORDER BY g.id",
        )?;

        let groups = stmt
            .query_map([word_id], WordGroupRowFactory::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(groups)
    }
}
