//! Consecutive-day workout streak tracking
//!
//! Calendar-day arithmetic only; callers derive `today` from UTC
//! (`Utc::now().date_naive()`) so the day boundary is reproducible regardless
//! of the device timezone.

use chrono::NaiveDate;

/// Compute the new streak after a completed workout.
///
/// - first-ever workout (no previous date): streak starts at 1
/// - exactly one day since the last workout: streak extends
/// - a gap of more than one day: streak restarts at 1
/// - same day: unchanged (the service's completion gate means this is only
///   reachable if the caller re-runs the computation)
///
/// Pure; the caller records `last_workout_date = today` after the award.
pub fn compute_streak(
    previous_streak: u32,
    last_workout_date: Option<NaiveDate>,
    today: NaiveDate,
) -> u32 {
    let Some(last) = last_workout_date else {
        return 1;
    };

    match today.signed_duration_since(last).num_days() {
        0 => previous_streak,
        1 => previous_streak + 1,
        // Gap, or a date ordering violation (clock moved backwards): restart
        _ => 1,
    }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_workout_starts_streak() {
        assert_eq!(compute_streak(0, None, date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_consecutive_day_extends() {
        assert_eq!(
            compute_streak(5, Some(date(2024, 1, 1)), date(2024, 1, 2)),
            6
        );
    }

    #[test]
    fn test_gap_restarts() {
        assert_eq!(
            compute_streak(5, Some(date(2024, 1, 1)), date(2024, 1, 4)),
            1
        );
    }

    #[test]
    fn test_same_day_is_no_op() {
        assert_eq!(
            compute_streak(5, Some(date(2024, 1, 1)), date(2024, 1, 1)),
            5
        );
    }

    #[test]
    fn test_extends_across_month_boundary() {
        assert_eq!(
            compute_streak(12, Some(date(2024, 1, 31)), date(2024, 2, 1)),
            13
        );
    }

    #[test]
    fn test_extends_across_year_boundary() {
        assert_eq!(
            compute_streak(30, Some(date(2023, 12, 31)), date(2024, 1, 1)),
            31
        );
    }

    #[test]
    fn test_backwards_date_restarts() {
        assert_eq!(
            compute_streak(5, Some(date(2024, 1, 10)), date(2024, 1, 8)),
            1
        );
    }
}
