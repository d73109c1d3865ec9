//! Per-day check-in records.
//!
//! One `CheckIn` exists per (user, calendar date). It is created on the first
//! photo upload or step toggle for that date and updated in place afterwards;
//! the merge is field-level so a photo upload and a routine toggle arriving
//! close together both survive.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConflictError, ValidationError};

/// A named photo view on a check-in.
///
/// `Legacy` is the single unnamed slot from before multi-view capture; a day
/// whose legacy slot is filled is treated as already photographed and rejects
/// re-uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSlot {
    Front,
    Right,
    Left,
    Legacy,
}

impl PhotoSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoSlot::Front => "front",
            PhotoSlot::Right => "right",
            PhotoSlot::Left => "left",
            PhotoSlot::Legacy => "legacy",
        }
    }

    /// Parse a slot name as it appears on the wire.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "front" => Ok(PhotoSlot::Front),
            "right" => Ok(PhotoSlot::Right),
            "left" => Ok(PhotoSlot::Left),
            "legacy" => Ok(PhotoSlot::Legacy),
            other => Err(ValidationError::InvalidValue {
                field: "photo_slot".to_string(),
                message: format!("unknown slot '{other}'"),
            }),
        }
    }
}

impl fmt::Display for PhotoSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routine-step state for one day.
///
/// A fixed-shape map of `step_id -> completed` plus derived counters, so
/// completion math stays type-checked instead of living in a free-form
/// document. Counters are recomputed from the map on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineSteps {
    /// Step completion by step id
    pub steps: BTreeMap<String, bool>,

    /// Number of steps defined for this date
    pub total_steps: u32,

    /// Number of steps marked complete
    pub completed_steps: u32,
}

impl RoutineSteps {
    /// Set one step's completion, defining the step if it is new.
    pub fn set(&mut self, step_id: &str, completed: bool) {
        self.steps.insert(step_id.to_string(), completed);
        self.recount();
    }

    /// True iff every defined step is complete and at least one step exists.
    /// Partial completion never counts as a completed routine.
    pub fn all_complete(&self) -> bool {
        self.total_steps > 0 && self.completed_steps == self.total_steps
    }

    fn recount(&mut self) {
        self.total_steps = self.steps.len() as u32;
        self.completed_steps = self.steps.values().filter(|done| **done).count() as u32;
    }
}

/// One check-in record per (user, calendar date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    /// Opaque stable user identifier
    pub user_id: String,

    /// Calendar date, no time component; uniqueness key with `user_id`
    pub date: NaiveDate,

    /// Filled photo slots, mapping to stored-media references
    pub photos: BTreeMap<PhotoSlot, String>,

    /// Routine-step state for the day
    pub routine: RoutineSteps,

    /// True iff all routine steps recorded for the day are complete
    pub routine_completed: bool,

    /// Free-text note for the day
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckIn {
    /// An empty record for the first write of the day.
    pub fn new(user_id: &str, date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            date,
            photos: BTreeMap::new(),
            routine: RoutineSteps::default(),
            routine_completed: false,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch into this record.
    ///
    /// Conflicts are checked before any field is touched, so a rejected patch
    /// leaves the record unchanged. Distinct photo slots merge; re-filling an
    /// already-filled slot (including the legacy single slot) is a conflict,
    /// never a silent overwrite.
    pub fn apply(&mut self, patch: &CheckInPatch, now: DateTime<Utc>) -> Result<(), ConflictError> {
        for slot in patch.photos.keys() {
            if self.photos.contains_key(slot) {
                return Err(ConflictError::SlotAlreadyFilled {
                    slot: *slot,
                    date: self.date,
                });
            }
        }

        for (slot, url) in &patch.photos {
            self.photos.insert(*slot, url.clone());
        }
        for (step_id, completed) in &patch.steps {
            self.routine.set(step_id, *completed);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }

        self.routine_completed = self.routine.all_complete();
        self.updated_at = now;
        Ok(())
    }
}

/// A field-level update to a check-in.
///
/// Only the fields present participate in the merge; absent fields are left
/// alone on the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInPatch {
    /// Photo slots to fill, mapping to stored-media references
    #[serde(default)]
    pub photos: BTreeMap<PhotoSlot, String>,

    /// Step toggles to apply
    #[serde(default)]
    pub steps: BTreeMap<String, bool>,

    /// Replacement note, if any
    #[serde(default)]
    pub notes: Option<String>,
}

impl CheckInPatch {
    /// A patch filling a single photo slot.
    pub fn photo(slot: PhotoSlot, url: impl Into<String>) -> Self {
        let mut patch = Self::default();
        patch.photos.insert(slot, url.into());
        patch
    }

    /// A patch toggling a single routine step.
    pub fn step(step_id: impl Into<String>, completed: bool) -> Self {
        let mut patch = Self::default();
        patch.steps.insert(step_id.into(), completed);
        patch
    }

    pub fn with_step(mut self, step_id: impl Into<String>, completed: bool) -> Self {
        self.steps.insert(step_id.into(), completed);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty() && self.steps.is_empty() && self.notes.is_none()
    }

    /// Reject patches that would be a no-op write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` wire date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}
