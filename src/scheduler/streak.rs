//! Consecutive-day study streak.
//!
//! Days are compared as local calendar dates formatted `YYYY-MM-DD`, so answering at 23:59
//! and again at 00:01 counts as two different days.
use crate::models::UserProgress;
use chrono::{DateTime, Local, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local calendar day of an instant.
pub fn local_day(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Advances the streak for a study session on `today`.
///
/// Studying again on the same day changes nothing. Studying the day after the last
/// session extends the streak, any longer gap (or a first session) restarts it at 1.
pub fn update_streak(progress: &UserProgress, today: NaiveDate) -> UserProgress {
    let today_str = format_day(today);
    if progress.last_study_date == today_str {
        return progress.clone();
    }

    let yesterday = today.pred_opt().map(format_day);
    let streak_days = if yesterday.as_deref() == Some(progress.last_study_date.as_str()) {
        progress.streak_days.saturating_add(1)
    } else {
        1
    };

    UserProgress {
        streak_days,
        last_study_date: today_str,
        ..progress.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn studied_on(date: &str, streak_days: u32) -> UserProgress {
        UserProgress {
            streak_days,
            last_study_date: date.to_string(),
            ..UserProgress::default()
        }
    }

    #[test]
    fn test_first_study_starts_streak() {
        let next = update_streak(&UserProgress::default(), day(2025, 1, 10));

        assert_eq!(next.streak_days, 1);
        assert_eq!(next.last_study_date, "2025-01-10");
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let today = day(2025, 1, 10);
        let once = update_streak(&studied_on("2025-01-09", 4), today);
        let twice = update_streak(&once, today);

        assert_eq!(once.streak_days, 5);
        assert_eq!(twice.streak_days, 5);
        assert_eq!(twice.last_study_date, "2025-01-10");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_consecutive_day_extends() {
        // Month and year boundaries
        let next = update_streak(&studied_on("2024-12-31", 7), day(2025, 1, 1));
        assert_eq!(next.streak_days, 8);

        let next = update_streak(&studied_on("2024-02-29", 2), day(2024, 3, 1));
        assert_eq!(next.streak_days, 3);
    }

    #[test]
    fn test_gap_resets() {
        let next = update_streak(&studied_on("2025-01-08", 12), day(2025, 1, 10));

        assert_eq!(next.streak_days, 1);
        assert_eq!(next.last_study_date, "2025-01-10");
    }

    #[test]
    fn test_unparseable_date_resets() {
        let next = update_streak(&studied_on("yesterday", 3), day(2025, 1, 10));
        assert_eq!(next.streak_days, 1);
    }
}
