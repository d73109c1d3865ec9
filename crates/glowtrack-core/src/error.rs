//! Core error types for glowtrack-core.
//!
//! This module defines the error hierarchy using thiserror. The taxonomy
//! matters for callers: validation and conflict errors carry no state change,
//! not-found on read paths is handled by lazy creation inside the engine, and
//! transient media failures never surface here at all (they are reported as
//! warnings on the reset summary instead).

use std::path::PathBuf;
use thiserror::Error;

use crate::checkin::PhotoSlot;
use crate::milestone::MilestoneThreshold;

/// Top-level error type for glowtrack-core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input validation errors; the request changed no state
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Conflicts with already-recorded state; the request changed no state
    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// A record that must already exist is missing
    #[error("{kind} not found for user '{user_id}'")]
    NotFound { kind: &'static str, user_id: String },

    /// Media store failure on the write path (uploads); reset-time media
    /// cleanup failures never take this route
    #[error("Media store error: {0}")]
    Media(#[from] crate::media::MediaError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to access the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Validation errors. Surfaced to the caller before any state change.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A check-in date string that does not parse as `YYYY-MM-DD`
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Empty user identifier
    #[error("User id must not be empty")]
    EmptyUserId,

    /// A patch with nothing in it
    #[error("Check-in patch must set at least one field")]
    EmptyPatch,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Conflict errors. The stored record wins; the caller's write is rejected.
#[derive(Error, Debug)]
pub enum ConflictError {
    /// Photo slot for this calendar day is already filled
    #[error("Photo slot '{slot}' is already filled for {date}")]
    SlotAlreadyFilled {
        slot: PhotoSlot,
        date: chrono::NaiveDate,
    },

    /// Gesture already recorded for this (gesture, milestone) pair
    #[error("Gesture '{gesture_type}' already completed for milestone {milestone}")]
    DuplicateGesture {
        gesture_type: String,
        milestone: MilestoneThreshold,
    },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(err: rusqlite::Error) -> Self {
        EngineError::Database(DatabaseError::from(err))
    }
}

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
