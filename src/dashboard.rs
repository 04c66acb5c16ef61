use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudyProgress {
    pub total_words_studied: i64,
    pub total_available_words: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuickStats {
    pub success_rate: f64,
    pub total_study_sessions: i64,
    pub total_active_groups: i64,
    pub study_streak_days: i64,
}

/// Percentage of correct reviews, 0.0 when nothing has been reviewed
pub fn success_rate(correct_reviews: i64, total_reviews: i64) -> f64 {
    if total_reviews <= 0 {
        return 0.0;
    }
    let correct = correct_reviews.clamp(0, total_reviews);
    correct as f64 * 100.0 / total_reviews as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate_without_reviews_is_zero() {
        assert_eq!(success_rate(0, 0), 0.0);
        assert!(!success_rate(0, 0).is_nan());
    }

    #[test]
    fn test_success_rate_percentages() {
        assert!((success_rate(1, 2) - 50.0).abs() < 1e-9);
        assert!((success_rate(3, 3) - 100.0).abs() < 1e-9);
        assert!((success_rate(1, 3) - 33.333_333).abs() < 1e-4);
        assert_eq!(success_rate(0, 7), 0.0);
    }

    #[test]
    fn test_success_rate_stays_in_range() {
        for total in 0..50 {
            for correct in 0..=total {
                let rate = success_rate(correct, total);
                assert!((0.0..=100.0).contains(&rate));
            }
        }
    }
}
