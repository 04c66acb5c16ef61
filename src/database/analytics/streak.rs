use crate::error::Result;
use crate::row_factories::date_at;
use chrono::{Days, NaiveDate};
use rusqlite::Connection;

/// Length of the run of consecutive days ending at `today`.
///
/// `days` must be distinct and sorted newest first. Days after `today` are
/// ignored; a missing `today` means no streak.
pub fn consecutive_days_ending(today: NaiveDate, days: &[NaiveDate]) -> i64 {
    let mut expected = today;
    let mut streak = 0;

    for day in days.iter().skip_while(|day| **day > today) {
        if *day != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }

    streak
}

pub struct StreakRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StreakRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        StreakRepository { conn }
    }

    /// Every calendar day with at least one session, newest first
    pub fn session_days(&self) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT DISTINCT DATE(ss.created_at) as session_date
            FROM study_sessions ss
            ORDER BY session_date DESC"#,
        )?;

        let days = stmt
            .query_map([], |row| date_at(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(days)
    }

    /// Number of consecutive days with sessions ending today (0 without a session today)
    pub fn calculate_consecutive_days(&self, today: NaiveDate) -> Result<i64> {
        let days = self.session_days()?;
        Ok(consecutive_days_ending(today, &days))
    }

    /// Days with sessions among the last `window` days (today included), newest first.
    /// Example: window 10 on 2025-01-15 looks at 2025-01-06 ..= 2025-01-15.
    pub fn days_with_sessions(&self, today: NaiveDate, window: i64) -> Result<Vec<NaiveDate>> {
        if window <= 0 {
            return Ok(Vec::new());
        }
        let first_day = today
            .checked_sub_days(Days::new((window - 1) as u64))
            .unwrap_or(NaiveDate::MIN);

        let mut stmt = self.conn.prepare(
            r#"SELECT DISTINCT DATE(ss.created_at) as session_date
            FROM study_sessions ss
            WHERE DATE(ss.created_at) >= ?1 AND DATE(ss.created_at) <= ?2
            ORDER BY session_date DESC"#,
        )?;

        let days = stmt
            .query_map([first_day.to_string(), today.to_string()], |row| {
                date_at(row, 0)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(days)
    }
}
