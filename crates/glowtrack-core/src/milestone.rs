//! Streak milestones and one-way unlocks.
//!
//! Unlocks are monotonic: once a threshold is reached its flag stays set no
//! matter how far the streak later falls. Only an explicit reset (a fresh
//! start) clears the set.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Streak-length thresholds that unlock, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneThreshold {
    ThreeDay,
    SevenDay,
    FourteenDay,
    ThirtyDay,
}

impl MilestoneThreshold {
    pub const ALL: [MilestoneThreshold; 4] = [
        MilestoneThreshold::ThreeDay,
        MilestoneThreshold::SevenDay,
        MilestoneThreshold::FourteenDay,
        MilestoneThreshold::ThirtyDay,
    ];

    /// Streak length required to unlock.
    pub fn days(&self) -> u32 {
        match self {
            MilestoneThreshold::ThreeDay => 3,
            MilestoneThreshold::SevenDay => 7,
            MilestoneThreshold::FourteenDay => 14,
            MilestoneThreshold::ThirtyDay => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MilestoneThreshold::ThreeDay => "3-day",
            MilestoneThreshold::SevenDay => "7-day",
            MilestoneThreshold::FourteenDay => "14-day",
            MilestoneThreshold::ThirtyDay => "30-day",
        }
    }

    /// Parse the stored label form.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == value)
    }
}

impl fmt::Display for MilestoneThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-user milestone state, one row per user, created lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub user_id: String,
    pub current_streak: u32,

    /// Historical best; never below `current_streak` and preserved across
    /// resets
    pub longest_streak: u32,

    /// Unlock timestamps by threshold; one-way
    pub unlocked: BTreeMap<MilestoneThreshold, DateTime<Utc>>,
}

impl Milestone {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            current_streak: 0,
            longest_streak: 0,
            unlocked: BTreeMap::new(),
        }
    }

    /// Record a freshly recomputed streak.
    ///
    /// Returns the thresholds that crossed from locked to unlocked in this
    /// call, for the caller's one-time celebration. Already-unlocked flags
    /// are never re-emitted and never re-locked.
    pub fn apply_streak(&mut self, streak: u32, now: DateTime<Utc>) -> Vec<MilestoneThreshold> {
        self.current_streak = streak;
        self.longest_streak = self.longest_streak.max(streak);

        let mut newly_unlocked = Vec::new();
        for threshold in MilestoneThreshold::ALL {
            if streak >= threshold.days() && !self.unlocked.contains_key(&threshold) {
                self.unlocked.insert(threshold, now);
                newly_unlocked.push(threshold);
            }
        }
        newly_unlocked
    }

    /// The smallest threshold not yet unlocked.
    pub fn next_milestone(&self) -> Option<MilestoneThreshold> {
        MilestoneThreshold::ALL
            .into_iter()
            .find(|t| !self.unlocked.contains_key(t))
    }

    /// Fresh start after a reset: streak and unlocks cleared, historical
    /// best kept.
    pub fn fresh_start(&mut self) {
        self.current_streak = 0;
        self.unlocked.clear();
    }
}

/// A completed real-world gesture tied to a milestone. Idempotent per
/// (gesture_type, milestone) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureRecord {
    pub gesture_type: String,
    pub milestone: MilestoneThreshold,
    pub completed_at: DateTime<Utc>,
}
