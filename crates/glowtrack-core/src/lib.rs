//! # Glowtrack Core Library
//!
//! Core business logic for Glowtrack, a daily skincare habit tracker. The
//! CLI binary is a thin layer over this library; any future surface (HTTP,
//! desktop) wraps the same engine.
//!
//! ## Architecture
//!
//! - **Check-In Store**: one record per (user, calendar date), merged field
//!   by field so concurrent photo uploads and routine toggles both survive
//! - **Streak Calculator**: pure functions over completed check-in dates
//! - **Continuity Policy**: decides when a lapse forces a tracking reset,
//!   with an idempotence guard so a gap is only handled once
//! - **Reset Executor**: the destructive re-baseline; every step idempotent,
//!   media cleanup best-effort
//! - **Analytics / Milestones**: derived caches recomputed on read
//! - **Storage**: SQLite check-in/analytics/milestone rows and TOML config
//!
//! ## Key Components
//!
//! - [`ContinuityEngine`]: the facade exposing record/status operations
//! - [`Database`]: persistence for check-ins and derived rows
//! - [`MediaStore`]: external photo storage collaborator
//! - [`Config`]: application configuration management

pub mod analytics;
pub mod checkin;
pub mod continuity;
pub mod engine;
pub mod error;
pub mod media;
pub mod milestone;
pub mod reset;
pub mod storage;
pub mod streak;

pub use analytics::{Analytics, ProductEvaluation, ProgressMetric};
pub use checkin::{CheckIn, CheckInPatch, PhotoSlot, RoutineSteps};
pub use continuity::{ResetDecision, WarningLevel, RESET_THRESHOLD_DAYS};
pub use engine::{ContinuityEngine, ContinuityStatus, Evaluation, MilestoneStatus};
pub use error::{ConfigError, ConflictError, DatabaseError, EngineError, ValidationError};
pub use media::{FsMediaStore, MediaStore, MemoryMediaStore};
pub use milestone::{GestureRecord, Milestone, MilestoneThreshold};
pub use reset::{ResetExecutor, ResetSummary};
pub use storage::{Config, Database};
