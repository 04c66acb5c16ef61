use crate::error::Result;
use crate::group::{Group, GroupWithStats};
use crate::pagination::PageRequest;
use crate::row_factories::{
    GroupRowFactory, GroupWithStatsRowFactory, WordWithStatsRowFactory, to_db_timestamp,
};
use crate::word::WordWithStats;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, params};

pub struct GroupsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> GroupsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        GroupsRepository { conn }
    }

    pub fn insert(&self, name: &str, created_at: DateTime<Utc>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO groups (name, created_at) VALUES (?1, ?2)",
            params![name, to_db_timestamp(created_at)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, group_id: i64) -> Result<Option<Group>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM groups WHERE id = ?1")?;

        let mut rows = stmt.query([group_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(GroupRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_with_stats(&self, group_id: i64) -> Result<Option<GroupWithStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.id, g.name, g.created_at, COUNT(DISTINCT wg.word_id) AS word_count
             FROM groups g
             LEFT JOIN words_groups wg ON g.id = wg.group_id
             WHERE g.id = ?1
             GROUP BY g.id",
        )?;

        let mut rows = stmt.query([group_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(GroupWithStatsRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn list_paginated(&self, page: PageRequest) -> Result<(Vec<Group>, i64)> {
        let total = self.count()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at
             FROM groups
             ORDER BY id
             LIMIT ?1 OFFSET ?2",
        )?;

        let groups = stmt
            .query_map(params![page.limit(), page.offset()], GroupRowFactory::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((groups, total))
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM groups", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_words(&self, group_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM words_groups WHERE group_id = ?1",
            [group_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Member words of a group with review counts, in word id order, plus the member count
    pub fn words_paginated(
        &self,
        group_id: i64,
        page: PageRequest,
    ) -> Result<(Vec<WordWithStats>, i64)> {
        let total = self.count_words(group_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT
                w.id, w.portuguese, w.english, w.created_at,
                COUNT(CASE WHEN wri.correct = 1 THEN 1 END) AS correct_count,
                COUNT(CASE WHEN wri.correct = 0 THEN 1 END) AS wrong_count
             FROM words_groups wg
             JOIN words w ON w.id = wg.word_id
             LEFT JOIN word_review_items wri ON w.id = wri.word_id
             WHERE wg.group_id = ?1
             GROUP BY w.id
             ORDER BY w.id
             LIMIT ?2 OFFSET ?3",
        )?;

        let words = stmt
            .query_map(
                params![group_id, page.limit(), page.offset()],
                WordWithStatsRowFactory::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(
            "Retrieved {} words of group id={} for page {} (total {})",
            words.len(),
            group_id,
            page.page(),
            total
        );
        Ok((words, total))
    }

    /// Renames a group. Returns `None` when the group does not exist.
    pub fn update(&self, group_id: i64, name: &str) -> Result<Option<Group>> {
        let changed = self.conn.execute(
            "UPDATE groups SET name = ?1 WHERE id = ?2",
            params![name, group_id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get(group_id)
    }

    /// Removes the memberships and then the group row in one transaction.
    /// Either both statements take effect or neither does.
    pub fn delete(&self, group_id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let memberships = tx.execute("DELETE FROM words_groups WHERE group_id = ?1", [group_id])?;
        tx.execute("DELETE FROM groups WHERE id = ?1", [group_id])?;
        tx.commit()?;

        debug!(
            "Deleted group id={} and {} memberships",
            group_id, memberships
        );
        Ok(())
    }

    /// Adds all words or none of them
    pub fn add_words(&self, group_id: i64, word_ids: &[i64]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO words_groups (word_id, group_id) VALUES (?1, ?2)")?;
            for word_id in word_ids {
                stmt.execute(params![word_id, group_id])?;
            }
        }
        tx.commit()?;

        debug!("Added {} words to group id={}", word_ids.len(), group_id);
        Ok(())
    }

    /// Removing a membership that does not exist is a no-op
    pub fn remove_word(&self, group_id: i64, word_id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM words_groups WHERE group_id = ?1 AND word_id = ?2",
            params![group_id, word_id],
        )?;
        Ok(())
    }
}
