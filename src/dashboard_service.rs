use crate::dashboard::{QuickStats, StudyProgress, success_rate};
use crate::database::Database;
use crate::error::Result;
use crate::study::StudySessionDetail;
use log::debug;
use std::sync::Arc;

/// Read-only composition of the dashboard aggregates
pub struct DashboardService {
    db: Arc<Database>,
}

impl DashboardService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// `None` when no session was ever recorded
    pub fn get_last_study_session(&self) -> Result<Option<StudySessionDetail>> {
        self.db.get_last_study_session()
    }

    pub fn get_study_progress(&self) -> Result<StudyProgress> {
        Ok(StudyProgress {
            total_words_studied: self.db.count_distinct_words_studied()?,
            total_available_words: self.db.count_words()?,
        })
    }

    pub fn get_quick_stats(&self) -> Result<QuickStats> {
        let (correct, total) = self.db.review_totals()?;
        let stats = QuickStats {
            success_rate: success_rate(correct, total),
            total_study_sessions: self.db.count_study_sessions()?,
            total_active_groups: self.db.count_active_groups()?,
            study_streak_days: self.db.calculate_study_streak()?,
        };
        debug!("Quick stats for {}: {:?}", self.db.today(), stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_provider::FixedDateProvider;
    use chrono::{Duration, TimeZone, Utc};

    fn create_service() -> (Arc<Database>, DashboardService) {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 18, 0, 0).unwrap();
        let db = Arc::new(
            Database::with_date_provider(":memory:", Arc::new(FixedDateProvider::new(now)))
                .unwrap(),
        );
        (db.clone(), DashboardService::new(db))
    }

    #[test]
    fn test_empty_dashboard() {
        let (_, service) = create_service();
        assert!(service.get_last_study_session().unwrap().is_none());
        assert_eq!(
            service.get_study_progress().unwrap(),
            StudyProgress {
                total_words_studied: 0,
                total_available_words: 0
            }
        );
        let stats = service.get_quick_stats().unwrap();
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.total_study_sessions, 0);
        assert_eq!(stats.total_active_groups, 0);
        assert_eq!(stats.study_streak_days, 0);
    }

    #[test]
    fn test_quick_stats_after_practice() {
        let (db, service) = create_service();
        let animals = db.create_group("Animals").unwrap();
        let food = db.create_group("Food").unwrap();
        let activity = db.create_study_activity("Flashcards", "", "").unwrap();
        let gato = db.create_word("gato", "cat").unwrap();
        db.create_word("pão", "bread").unwrap();

        let first = db.create_study_session(animals.id, activity.id).unwrap();
        db.create_study_session(animals.id, activity.id).unwrap();
        db.create_study_session(food.id, activity.id).unwrap();
        db.record_review(first.id, gato.id, true).unwrap();
        db.record_review(first.id, gato.id, true).unwrap();
        db.record_review(first.id, gato.id, true).unwrap();
        db.record_review(first.id, gato.id, false).unwrap();

        let stats = service.get_quick_stats().unwrap();
        assert!((stats.success_rate - 75.0).abs() < 1e-9);
        assert_eq!(stats.total_study_sessions, 3);
        assert_eq!(stats.total_active_groups, 2);
        assert_eq!(stats.study_streak_days, 1);

        let progress = service.get_study_progress().unwrap();
        assert_eq!(progress.total_words_studied, 1);
        assert_eq!(progress.total_available_words, 2);
    }

    #[test]
    fn test_last_session_is_most_recent_by_creation_time() {
        let (db, service) = create_service();
        let group = db.create_group("Animals").unwrap();
        let activity = db.create_study_activity("Typing", "", "").unwrap();

        let base = db.get_current_time();
        let newest = db
            .import_study_session(group.id, activity.id, base - Duration::hours(1))
            .unwrap();
        db.import_study_session(group.id, activity.id, base - Duration::days(2))
            .unwrap();

        let last = service.get_last_study_session().unwrap().unwrap();
        assert_eq!(last.id, newest.id);
        assert_eq!(last.activity_name, "Typing");
        assert_eq!(last.group_name, "Animals");
        assert_eq!(last.review_items_count, 0);
        assert!(last.end_time.is_none());
    }
}
