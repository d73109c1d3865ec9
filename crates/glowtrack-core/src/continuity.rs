//! Continuity policy: when a lapse forces a tracking reset.
//!
//! Days-missed is re-derived on every read, so the policy must not re-fire
//! the reset executor for a gap that has already been handled. The guard
//! compares the stored last-reset timestamp against the timestamp of the last
//! completed check-in: a reset newer than the last check-in means this gap
//! was already applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Missed days at which a reset fires: three full missed days plus the
/// evaluation day. Product constant, not user-configurable.
pub const RESET_THRESHOLD_DAYS: u32 = 4;

/// Outcome of evaluating the continuity policy for one gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetDecision {
    /// Gap below threshold; nothing to do
    Keep,
    /// Gap at threshold, but a reset already ran for it; skip
    AlreadyApplied,
    /// Gap at threshold and unhandled; run the reset executor
    Fire,
}

/// Decide whether a reset must run for the current gap.
///
/// `last_completed_at` is the update timestamp of the most recent completed
/// check-in; `None` means no completed check-in exists, in which case there
/// is no history to wipe and a reset never fires.
pub fn evaluate(
    days_missed: u32,
    last_completed_at: Option<DateTime<Utc>>,
    last_reset_at: Option<DateTime<Utc>>,
) -> ResetDecision {
    if days_missed < RESET_THRESHOLD_DAYS {
        return ResetDecision::Keep;
    }
    let last_completed_at = match last_completed_at {
        Some(at) => at,
        None => return ResetDecision::Keep,
    };
    match last_reset_at {
        Some(reset_at) if reset_at > last_completed_at => ResetDecision::AlreadyApplied,
        _ => ResetDecision::Fire,
    }
}

/// Escalation tier shown to the user, derived purely from skipped days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    None,
    OneMissed,
    TwoMissed,
    ThreeMissed,
    Reset,
}

impl WarningLevel {
    pub fn from_skipped(skipped_days: u32, is_reset: bool) -> Self {
        if is_reset {
            return WarningLevel::Reset;
        }
        match skipped_days {
            0 => WarningLevel::None,
            1 => WarningLevel::OneMissed,
            2 => WarningLevel::TwoMissed,
            _ => WarningLevel::ThreeMissed,
        }
    }
}
