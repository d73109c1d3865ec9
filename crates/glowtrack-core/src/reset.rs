//! Reset execution: the destructive re-baseline after a long lapse.
//!
//! Every step is idempotent, so a crash between steps is repaired by simply
//! running the whole executor again: deleting already-deleted rows, clearing
//! already-empty logs, and overwriting fields with the same target values all
//! converge on the same end state. Media cleanup is best-effort; its failures
//! are recorded on the summary and never block the reset.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::media::MediaStore;
use crate::storage::Database;

/// What a reset run did, for observability and for surfacing warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSummary {
    /// The new baseline date (the evaluation day)
    pub new_baseline: NaiveDate,

    /// Check-in rows purged (strictly before the new baseline)
    pub purged_check_ins: usize,

    /// Stored media successfully deleted
    pub media_deleted: usize,

    /// Stored media left orphaned after retries; cleanable later
    pub media_failures: usize,

    /// Human-readable warnings for non-fatal failures
    pub warnings: Vec<String>,

    pub reset_at: DateTime<Utc>,
}

/// Runs the reset steps in order against the store and media collaborator.
pub struct ResetExecutor<'a> {
    db: &'a Database,
    media: &'a dyn MediaStore,
    media_retry_limit: u32,
}

impl<'a> ResetExecutor<'a> {
    pub fn new(db: &'a Database, media: &'a dyn MediaStore, media_retry_limit: u32) -> Self {
        Self {
            db,
            media,
            media_retry_limit,
        }
    }

    /// Wipe tracking history and re-baseline to `today`.
    ///
    /// Order: purge old check-ins, best-effort media cleanup, clear side
    /// logs and overwrite the analytics fields (the authoritative "reset
    /// happened" signal; an error here fails the call), then give milestones
    /// a fresh start. `longest_streak` is deliberately kept as the
    /// historical best.
    pub fn run(
        &self,
        user_id: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<ResetSummary> {
        // Step 1: purge history before the new baseline. Media references
        // are collected first or they are gone with the rows.
        let urls = self.db.photo_urls_before(user_id, today)?;
        let purged_check_ins = self.db.purge_check_ins_before(user_id, today)?;

        // Step 2: best-effort media cleanup with a bounded retry budget.
        // Orphaned media is acceptable; a purge must never hang on storage.
        let mut media_deleted = 0usize;
        let mut media_failures = 0usize;
        let mut warnings = Vec::new();
        for url in &urls {
            match self.delete_with_retries(url) {
                Ok(()) => media_deleted += 1,
                Err(message) => {
                    media_failures += 1;
                    warnings.push(message);
                }
            }
        }

        // Steps 3-4: clear side logs and overwrite the analytics fields.
        let mut analytics = self.db.ensure_analytics(user_id, today)?;
        analytics.apply_reset(today, now);
        self.db.save_analytics(&analytics)?;

        // Step 5: milestone fresh start; gesture log goes with it.
        let mut milestone = self.db.ensure_milestone(user_id)?;
        milestone.fresh_start();
        self.db.save_milestone(&milestone)?;
        self.db.clear_gestures(user_id)?;

        Ok(ResetSummary {
            new_baseline: today,
            purged_check_ins,
            media_deleted,
            media_failures,
            warnings,
            reset_at: now,
        })
    }

    fn delete_with_retries(&self, url: &str) -> std::result::Result<(), String> {
        let mut last_error = String::new();
        for _ in 0..=self.media_retry_limit {
            match self.media.delete(url) {
                Ok(()) => return Ok(()),
                Err(e) => last_error = e.to_string(),
            }
        }
        Err(format!("media cleanup left '{url}' orphaned: {last_error}"))
    }
}
