//! The continuity engine facade.
//!
//! Wires the data flow: check-in store -> streak calculator -> continuity
//! policy -> (no-op | reset executor) -> analytics aggregate -> milestone
//! tracker. Analytics and milestone rows are caches; every evaluation
//! recomputes them from the check-in store, so any drift self-heals on the
//! next read.
//!
//! The engine is constructed explicitly with its store and media
//! collaborator; there are no global singletons. "Today" and "now" are
//! explicit parameters on every operation so callers own the day boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{Analytics, ProductEvaluation, ProgressMetric};
use crate::checkin::{CheckIn, CheckInPatch, PhotoSlot};
use crate::continuity::{self, ResetDecision, WarningLevel};
use crate::error::{Result, ValidationError};
use crate::media::{FsMediaStore, MediaStore};
use crate::milestone::{GestureRecord, Milestone, MilestoneThreshold};
use crate::reset::{ResetExecutor, ResetSummary};
use crate::storage::{Config, Database};
use crate::streak;

/// Continuity view returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuityStatus {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_days_tracked: u32,
    pub skipped_days: u32,
    pub is_reset: bool,
    pub warning_level: WarningLevel,
}

/// Milestone view returned to the caller.
///
/// `newly_unlocked` lists thresholds that crossed to unlocked during this
/// call; the caller reacts once (celebration, reward gating) and the flags
/// themselves prevent re-emission on later calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneStatus {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub unlocked: BTreeMap<MilestoneThreshold, DateTime<Utc>>,
    pub newly_unlocked: Vec<MilestoneThreshold>,
    pub next_milestone: Option<MilestoneThreshold>,
}

/// Full result of one evaluation pass, including any reset that fired.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub analytics: Analytics,
    pub milestone: Milestone,
    pub newly_unlocked: Vec<MilestoneThreshold>,
    pub reset: Option<ResetSummary>,
}

/// The habit continuity and reset engine.
pub struct ContinuityEngine {
    db: Database,
    media: Box<dyn MediaStore>,
    media_retry_limit: u32,
}

impl ContinuityEngine {
    pub fn new(db: Database, media: Box<dyn MediaStore>) -> Self {
        Self {
            db,
            media,
            media_retry_limit: 2,
        }
    }

    pub fn with_media_retry_limit(mut self, limit: u32) -> Self {
        self.media_retry_limit = limit;
        self
    }

    /// Open the engine over the default database and a filesystem media
    /// store, per the loaded configuration.
    pub fn open(config: &Config) -> Result<Self> {
        let db = Database::open()?;
        let media = FsMediaStore::new(config.media_root()?)?;
        Ok(Self::new(db, Box::new(media)).with_media_retry_limit(config.media_retry_limit))
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    // --- external operations --------------------------------------------

    /// Record (create or merge) a check-in for a calendar date.
    ///
    /// An overdue reset is evaluated and applied BEFORE the patch, so a
    /// fresh check-in is never destroyed by a reset that was already due.
    /// A completed routine at or after the baseline clears the reset flag.
    pub fn record_check_in(
        &self,
        user_id: &str,
        date: NaiveDate,
        patch: &CheckInPatch,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CheckIn> {
        validate_user_id(user_id)?;
        patch.validate()?;

        self.evaluate(user_id, today, now)?;
        let checkin = self.db.upsert_check_in(user_id, date, patch, now)?;
        self.refresh_analytics(user_id, today)?;
        Ok(checkin)
    }

    /// Store photo bytes with the media collaborator and record them into
    /// the given slot for the date.
    pub fn upload_photo(
        &self,
        user_id: &str,
        date: NaiveDate,
        slot: PhotoSlot,
        bytes: &[u8],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CheckIn> {
        validate_user_id(user_id)?;
        let url = self.media.put(bytes)?;
        self.record_check_in(user_id, date, &CheckInPatch::photo(slot, url), today, now)
    }

    /// Current continuity view, self-healing derived state on the way.
    pub fn continuity_status(
        &self,
        user_id: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<ContinuityStatus> {
        validate_user_id(user_id)?;
        let eval = self.evaluate(user_id, today, now)?;
        Ok(ContinuityStatus {
            current_streak: eval.milestone.current_streak,
            longest_streak: eval.milestone.longest_streak,
            total_days_tracked: eval.analytics.total_days_tracked,
            skipped_days: eval.analytics.skipped_days,
            is_reset: eval.analytics.is_reset,
            warning_level: WarningLevel::from_skipped(
                eval.analytics.skipped_days,
                eval.analytics.is_reset,
            ),
        })
    }

    /// Current milestone view, including this call's newly unlocked flags.
    pub fn milestone_status(
        &self,
        user_id: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<MilestoneStatus> {
        validate_user_id(user_id)?;
        let eval = self.evaluate(user_id, today, now)?;
        Ok(MilestoneStatus {
            current_streak: eval.milestone.current_streak,
            longest_streak: eval.milestone.longest_streak,
            next_milestone: eval.milestone.next_milestone(),
            unlocked: eval.milestone.unlocked,
            newly_unlocked: eval.newly_unlocked,
        })
    }

    /// Fetch one check-in; absent records are an error on this read path.
    pub fn get_check_in(&self, user_id: &str, date: NaiveDate) -> Result<CheckIn> {
        validate_user_id(user_id)?;
        self.db
            .get_check_in(user_id, date)?
            .ok_or_else(|| crate::error::EngineError::NotFound {
                kind: "Check-in",
                user_id: user_id.to_string(),
            })
    }

    /// Record a real-world gesture tied to a milestone. Idempotent per
    /// (gesture_type, milestone): the second completion is rejected.
    pub fn record_gesture(
        &self,
        user_id: &str,
        gesture_type: &str,
        milestone: MilestoneThreshold,
        now: DateTime<Utc>,
    ) -> Result<GestureRecord> {
        validate_user_id(user_id)?;
        if gesture_type.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "gesture_type".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        let gesture = GestureRecord {
            gesture_type: gesture_type.to_string(),
            milestone,
            completed_at: now,
        };
        self.db.record_gesture(user_id, &gesture)?;
        Ok(gesture)
    }

    pub fn list_gestures(&self, user_id: &str) -> Result<Vec<GestureRecord>> {
        validate_user_id(user_id)?;
        Ok(self.db.list_gestures(user_id)?)
    }

    /// Append to the progress-metric side log.
    pub fn append_progress_metric(
        &self,
        user_id: &str,
        metric: ProgressMetric,
        today: NaiveDate,
    ) -> Result<()> {
        validate_user_id(user_id)?;
        let mut analytics = self.db.ensure_analytics(user_id, today)?;
        analytics.progress_metrics.push(metric);
        self.db.save_analytics(&analytics)?;
        Ok(())
    }

    /// Append to the product-evaluation side log.
    pub fn append_product_evaluation(
        &self,
        user_id: &str,
        evaluation: ProductEvaluation,
        today: NaiveDate,
    ) -> Result<()> {
        validate_user_id(user_id)?;
        let mut analytics = self.db.ensure_analytics(user_id, today)?;
        analytics.product_evaluations.push(evaluation);
        self.db.save_analytics(&analytics)?;
        Ok(())
    }

    // --- evaluation ------------------------------------------------------

    /// One full evaluation pass: decide on a reset, apply it if due, then
    /// recompute all derived state.
    pub fn evaluate(
        &self,
        user_id: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let analytics = self.db.ensure_analytics(user_id, today)?;

        let last = self
            .db
            .last_completed_since(user_id, analytics.baseline_date)?;
        let days_missed = match &last {
            Some((date, _)) => streak::days_missed(*date, today),
            None => streak::days_missed(analytics.baseline_date, today),
        };

        let decision = continuity::evaluate(
            days_missed,
            last.map(|(_, at)| at),
            analytics.last_reset_at,
        );
        let reset = match decision {
            ResetDecision::Fire => {
                let executor =
                    ResetExecutor::new(&self.db, self.media.as_ref(), self.media_retry_limit);
                Some(executor.run(user_id, today, now)?)
            }
            ResetDecision::Keep | ResetDecision::AlreadyApplied => None,
        };

        let (analytics, dates) = self.refresh_analytics(user_id, today)?;
        let (milestone, newly_unlocked) = self.run_tracker(user_id, &dates, today, now)?;
        Ok(Evaluation {
            analytics,
            milestone,
            newly_unlocked,
            reset,
        })
    }

    /// Recompute the analytics aggregate from the check-in store. No reset
    /// decision here: the write path calls this after applying a patch, and
    /// a just-recorded check-in must never be judged by the pre-patch gap.
    fn refresh_analytics(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<(Analytics, Vec<NaiveDate>)> {
        let stored = self.db.ensure_analytics(user_id, today)?;
        let dates = self
            .db
            .completed_dates_since(user_id, stored.baseline_date)?;

        let mut analytics = stored.clone();
        analytics.total_days_tracked = dates.len() as u32;
        analytics.skipped_days = match dates.last() {
            Some(latest) => streak::days_missed(*latest, today),
            None => streak::days_missed(analytics.baseline_date, today),
        };
        // The reset flag holds until the user produces a completed check-in.
        if analytics.is_reset && !dates.is_empty() {
            analytics.is_reset = false;
        }
        if analytics != stored {
            self.db.save_analytics(&analytics)?;
        }

        Ok((analytics, dates))
    }

    /// Milestone tracker: recompute streaks, unlock crossed thresholds, and
    /// persist only when something actually moved. Runs on read paths, so
    /// the unlock events surface to the caller doing the reading.
    fn run_tracker(
        &self,
        user_id: &str,
        dates: &[NaiveDate],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(Milestone, Vec<MilestoneThreshold>)> {
        let stored = self.db.ensure_milestone(user_id)?;
        let mut milestone = stored.clone();
        milestone.longest_streak = milestone.longest_streak.max(streak::longest_streak(dates));
        let newly_unlocked = milestone.apply_streak(streak::current_streak(dates, today), now);
        if milestone != stored {
            self.db.save_milestone(&milestone)?;
        }
        Ok((milestone, newly_unlocked))
    }
}

fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::EmptyUserId);
    }
    Ok(())
}
