//! Per-user derived analytics.
//!
//! The check-in store is the source of truth; this row is a cache. Counters
//! are always recomputed from completed check-ins at or after the baseline
//! date, never incremented in place, so a missed update path cannot make the
//! row drift permanently.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time progress measurement, appended by the product's insight
/// features and unrelated to streak math. Cleared wholesale on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMetric {
    pub recorded_at: DateTime<Utc>,
    pub metric: String,
    pub value: f64,
}

/// A recorded verdict about a skincare product. Cleared wholesale on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEvaluation {
    pub recorded_at: DateTime<Utc>,
    pub product: String,
    pub verdict: String,
    pub notes: Option<String>,
}

/// Derived per-user counters, one row per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub user_id: String,

    /// Date from which `total_days_tracked` is counted; advances only on reset
    pub baseline_date: NaiveDate,

    /// Completed check-ins with `date >= baseline_date`
    pub total_days_tracked: u32,

    /// Consecutive missed days as of the last evaluation
    pub skipped_days: u32,

    /// Set when a reset fires; cleared by the next completed check-in
    pub is_reset: bool,

    /// When the last reset ran; the continuity policy's idempotence guard
    pub last_reset_at: Option<DateTime<Utc>>,

    pub progress_metrics: Vec<ProgressMetric>,
    pub product_evaluations: Vec<ProductEvaluation>,
}

impl Analytics {
    /// A fresh row for lazy creation on first access.
    pub fn new(user_id: &str, baseline_date: NaiveDate) -> Self {
        Self {
            user_id: user_id.to_string(),
            baseline_date,
            total_days_tracked: 0,
            skipped_days: 0,
            is_reset: false,
            last_reset_at: None,
            progress_metrics: Vec::new(),
            product_evaluations: Vec::new(),
        }
    }

    /// Apply a reset: re-baseline to `today` and wipe derived state.
    /// Idempotent; re-running lands on the same end state.
    pub fn apply_reset(&mut self, today: NaiveDate, now: DateTime<Utc>) {
        self.baseline_date = today;
        self.total_days_tracked = 0;
        self.skipped_days = 0;
        self.is_reset = true;
        self.last_reset_at = Some(now);
        self.progress_metrics.clear();
        self.product_evaluations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_apply_reset_wipes_derived_state() {
        let mut analytics = Analytics::new("u1", day("2024-01-01"));
        analytics.total_days_tracked = 12;
        analytics.skipped_days = 4;
        analytics.progress_metrics.push(ProgressMetric {
            recorded_at: Utc::now(),
            metric: "hydration".to_string(),
            value: 0.6,
        });

        let now = Utc::now();
        analytics.apply_reset(day("2024-01-20"), now);

        assert_eq!(analytics.baseline_date, day("2024-01-20"));
        assert_eq!(analytics.total_days_tracked, 0);
        assert_eq!(analytics.skipped_days, 0);
        assert!(analytics.is_reset);
        assert_eq!(analytics.last_reset_at, Some(now));
        assert!(analytics.progress_metrics.is_empty());
    }

    #[test]
    fn test_apply_reset_twice_converges() {
        let mut once = Analytics::new("u1", day("2024-01-01"));
        once.total_days_tracked = 5;
        let now = Utc::now();
        once.apply_reset(day("2024-01-20"), now);

        let mut twice = once.clone();
        twice.apply_reset(day("2024-01-20"), now);
        assert_eq!(once, twice);
    }
}
