use crate::error::Result;
use crate::row_factories::{
    StudySessionDetailRowFactory, StudySessionRowFactory, WordWithStatsRowFactory,
    to_db_timestamp,
};
use crate::study::{StudySession, StudySessionDetail};
use crate::word::WordWithStats;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, Params, params};

// Columns line up with StudySessionDetailRowFactory.
// Sessions of a deleted group keep showing up with an empty group name.
const SESSION_DETAIL_QUERY: &str = r#"SELECT
        ss.id,
        ss.group_id,
        ss.study_activity_id,
        ss.created_at,
        sa.name AS activity_name,
        COALESCE(g.name, '') AS group_name,
        COUNT(wri.id) AS review_items_count,
        MAX(wri.created_at) AS end_time
    FROM study_sessions ss
    JOIN study_activities sa ON sa.id = ss.study_activity_id
    LEFT JOIN groups g ON g.id = ss.group_id
    LEFT JOIN word_review_items wri ON wri.study_session_id = ss.id"#;

const MOST_RECENT_FIRST: &str = "ORDER BY ss.created_at DESC, ss.id DESC";

pub struct StudySessionsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StudySessionsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        StudySessionsRepository { conn }
    }

    /// Template method for session detail queries: filter, then group per session, then order/limit
    fn query_details_template<P: Params>(
        &self,
        where_clause: &str,
        tail: &str,
        params: P,
    ) -> Result<Vec<StudySessionDetail>> {
        let mut query = SESSION_DETAIL_QUERY.to_string();

        if !where_clause.is_empty() {
            query.push_str("\n    WHERE ");
            query.push_str(where_clause);
        }

        query.push_str("\n    GROUP BY ss.id\n    ");
        query.push_str(tail);

        let mut stmt = self.conn.prepare(&query)?;
        let sessions = stmt
            .query_map(params, StudySessionDetailRowFactory::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sessions)
    }

    /// Both ids must reference existing rows, otherwise the insert fails with a constraint error
    pub fn insert(
        &self,
        group_id: i64,
        study_activity_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<StudySession> {
        let created_at_str = to_db_timestamp(created_at);
        let mut stmt = self.conn.prepare(
            "INSERT INTO study_sessions (group_id, study_activity_id, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING id, group_id, study_activity_id, created_at",
        )?;
        let session = stmt.query_row(
            params![group_id, study_activity_id, created_at_str],
            StudySessionRowFactory::from_row,
        )?;

        debug!(
            "Created study session id={} for group id={} with activity id={}",
            session.id, group_id, study_activity_id
        );
        Ok(session)
    }

    pub fn get(&self, session_id: i64) -> Result<Option<StudySessionDetail>> {
        let mut sessions =
            self.query_details_template("ss.id = ?1", "", params![session_id])?;
        Ok(sessions.pop())
    }

    /// Most recently created session, `None` when there are no sessions at all
    pub fn last(&self) -> Result<Option<StudySessionDetail>> {
        let tail = format!("{} LIMIT 1", MOST_RECENT_FIRST);
        let mut sessions = self.query_details_template("", &tail, params![])?;
        Ok(sessions.pop())
    }

    pub fn list(&self, offset: i64, limit: i64) -> Result<Vec<StudySessionDetail>> {
        let tail = format!("{} LIMIT ?1 OFFSET ?2", MOST_RECENT_FIRST);
        self.query_details_template("", &tail, params![limit, offset])
    }

    pub fn list_for_activity(
        &self,
        study_activity_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudySessionDetail>> {
        let tail = format!("{} LIMIT ?2 OFFSET ?3", MOST_RECENT_FIRST);
        self.query_details_template(
            "ss.study_activity_id = ?1",
            &tail,
            params![study_activity_id, limit, offset],
        )
    }

    pub fn list_for_group(
        &self,
        group_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudySessionDetail>> {
        let tail = format!("{} LIMIT ?2 OFFSET ?3", MOST_RECENT_FIRST);
        self.query_details_template("ss.group_id = ?1", &tail, params![group_id, limit, offset])
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM study_sessions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_for_activity(&self, study_activity_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM study_sessions WHERE study_activity_id = ?1",
            [study_activity_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn count_for_group(&self, group_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM study_sessions WHERE group_id = ?1",
            [group_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Words reviewed in a session; the counts only include that session's reviews
    pub fn words(&self, session_id: i64, offset: i64, limit: i64) -> Result<Vec<WordWithStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                w.id, w.portuguese, w.english, w.created_at,
                COUNT(CASE WHEN wri.correct = 1 THEN 1 END) AS correct_count,
                COUNT(CASE WHEN wri.correct = 0 THEN 1 END) AS wrong_count
             FROM word_review_items wri
             JOIN words w ON w.id = wri.word_id
             WHERE wri.study_session_id = ?1
             GROUP BY w.id
             ORDER BY w.id
             LIMIT ?2 OFFSET ?3",
        )?;

        let words = stmt
            .query_map(
                params![session_id, limit, offset],
                WordWithStatsRowFactory::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
    }

    pub fn count_words(&self, session_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT wri.word_id)
             FROM word_review_items wri
             JOIN words w ON w.id = wri.word_id
             WHERE wri.study_session_id = ?1",
            [session_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
