//! Streak calculation over completed check-in dates.
//!
//! Pure functions over the sorted, de-duplicated list of calendar dates on
//! which the user has a completed routine. "Today" is always an explicit
//! parameter so callers control the day boundary and tests are deterministic.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

/// Whole calendar days strictly between `last_completed` and `today`.
///
/// Zero if the user already checked in today or yesterday.
pub fn days_missed(last_completed: NaiveDate, today: NaiveDate) -> u32 {
    let gap = (today - last_completed).num_days() - 1;
    gap.max(0) as u32
}

/// Consecutive completed days ending at `today` or yesterday.
///
/// Walks backward from today (or from yesterday when today has no entry)
/// while each prior day is present. Returns 0 when neither today nor
/// yesterday has a completed entry.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let set: HashSet<NaiveDate> = dates.iter().copied().collect();

    let anchor = if set.contains(&today) {
        today
    } else if set.contains(&(today - Duration::days(1))) {
        today - Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 0u32;
    let mut cursor = anchor;
    while set.contains(&cursor) {
        streak += 1;
        cursor = cursor - Duration::days(1);
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
///
/// Single O(n) pass over the sorted unique date list; a run continues when
/// adjacent entries differ by exactly one calendar day.
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in sorted {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn days(specs: &[&str]) -> Vec<NaiveDate> {
        specs.iter().map(|s| day(s)).collect()
    }

    #[test]
    fn test_days_missed() {
        // Checked in today or yesterday: nothing missed.
        assert_eq!(days_missed(day("2024-01-06"), day("2024-01-06")), 0);
        assert_eq!(days_missed(day("2024-01-05"), day("2024-01-06")), 0);
        // One full day between.
        assert_eq!(days_missed(day("2024-01-04"), day("2024-01-06")), 1);
        // Scenario from the reset rule: last on the 1st, evaluated on the 6th.
        assert_eq!(days_missed(day("2024-01-01"), day("2024-01-06")), 4);
    }

    #[test]
    fn test_current_streak_consecutive_run() {
        let dates = days(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(current_streak(&dates, day("2024-01-03")), 3);
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn test_current_streak_anchors_on_yesterday() {
        let dates = days(&["2024-01-01", "2024-01-02"]);
        assert_eq!(current_streak(&dates, day("2024-01-03")), 2);
    }

    #[test]
    fn test_current_streak_zero_after_gap() {
        let dates = days(&["2024-01-01", "2024-01-02"]);
        assert_eq!(current_streak(&dates, day("2024-01-05")), 0);
    }

    #[test]
    fn test_current_streak_stops_at_first_gap() {
        let dates = days(&["2024-01-01", "2024-01-03", "2024-01-04"]);
        assert_eq!(current_streak(&dates, day("2024-01-04")), 2);
    }

    #[test]
    fn test_empty_and_single_entry() {
        assert_eq!(current_streak(&[], day("2024-01-01")), 0);
        assert_eq!(longest_streak(&[]), 0);

        let single = days(&["2024-01-01"]);
        assert_eq!(longest_streak(&single), 1);
        assert_eq!(current_streak(&single, day("2024-01-01")), 1);
        assert_eq!(current_streak(&single, day("2024-01-09")), 0);
    }

    #[test]
    fn test_longest_streak_ignores_order_and_duplicates() {
        let dates = days(&[
            "2024-01-05",
            "2024-01-01",
            "2024-01-02",
            "2024-01-02",
            "2024-01-04",
        ]);
        assert_eq!(longest_streak(&dates), 2);
    }

    #[test]
    fn test_longest_streak_tracks_maximum_run() {
        let dates = days(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-10",
            "2024-01-11",
            "2024-01-12",
            "2024-01-13",
            "2024-01-20",
        ]);
        assert_eq!(longest_streak(&dates), 4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn date_set() -> impl Strategy<Value = Vec<NaiveDate>> {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            proptest::collection::vec(0i64..120, 0..60).prop_map(move |offsets| {
                offsets
                    .into_iter()
                    .map(|o| base + Duration::days(o))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn longest_never_below_current(dates in date_set(), today_offset in 0i64..130) {
                let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + Duration::days(today_offset);
                prop_assert!(longest_streak(&dates) >= current_streak(&dates, today));
            }

            #[test]
            fn current_streak_days_are_all_present(dates in date_set(), today_offset in 0i64..130) {
                let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + Duration::days(today_offset);
                let streak = current_streak(&dates, today);
                if streak > 0 {
                    let set: HashSet<NaiveDate> = dates.iter().copied().collect();
                    let anchor = if set.contains(&today) { today } else { today - Duration::days(1) };
                    for back in 0..streak {
                        prop_assert!(set.contains(&(anchor - Duration::days(back as i64))));
                    }
                }
            }
        }
    }
}
