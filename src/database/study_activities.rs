use crate::error::Result;
use crate::row_factories::{StudyActivityRowFactory, to_db_timestamp};
use crate::study::StudyActivity;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

pub struct StudyActivitiesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StudyActivitiesRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        StudyActivitiesRepository { conn }
    }

    pub fn insert(
        &self,
        name: &str,
        thumbnail_url: &str,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO study_activities (name, thumbnail_url, description, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![name, thumbnail_url, description, to_db_timestamp(created_at)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, activity_id: i64) -> Result<Option<StudyActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, thumbnail_url, description, created_at
             FROM study_activities
             WHERE id = ?1",
        )?;

        let mut rows = stmt.query([activity_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(StudyActivityRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn list(&self) -> Result<Vec<StudyActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, thumbnail_url, description, created_at
             FROM study_activities
             ORDER BY id",
        )?;

        let activities = stmt
            .query_map([], StudyActivityRowFactory::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }
}
