pub mod accuracy;
pub mod progress;
pub mod streak;

use rusqlite::Connection;

pub use accuracy::AccuracyRepository;
pub use progress::ProgressRepository;
pub use streak::StreakRepository;

/// Analytics facade grouping the dashboard aggregate queries
pub struct Analytics<'a> {
    pub conn: &'a Connection,
}

impl<'a> Analytics<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Analytics { conn }
    }

    pub fn accuracy(&self) -> AccuracyRepository<'a> {
        AccuracyRepository::new(self.conn)
    }

    pub fn streak(&self) -> StreakRepository<'a> {
        StreakRepository::new(self.conn)
    }

    pub fn progress(&self) -> ProgressRepository<'a> {
        ProgressRepository::new(self.conn)
    }
}
