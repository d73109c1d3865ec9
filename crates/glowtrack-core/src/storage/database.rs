//! SQLite-based check-in, analytics, and milestone storage.
//!
//! The check-in table is the single source of truth; analytics and milestone
//! rows are derived caches. Calendar dates are stored as `YYYY-MM-DD` TEXT
//! and timestamps as RFC3339 TEXT. Check-in upserts run inside an immediate
//! transaction so field-level merges from racing writers serialize instead of
//! clobbering each other.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use crate::analytics::{Analytics, ProductEvaluation, ProgressMetric};
use crate::checkin::{CheckIn, CheckInPatch, RoutineSteps};
use crate::error::{ConflictError, DatabaseError, EngineError};
use crate::milestone::{GestureRecord, Milestone, MilestoneThreshold};

use super::data_dir;

/// SQLite database for the continuity engine.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/glowtrack/glowtrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, EngineError> {
        let path = data_dir()?.join("glowtrack.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn =
            Connection::open_in_memory().map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS check_ins (
                user_id           TEXT NOT NULL,
                date              TEXT NOT NULL,
                photos            TEXT NOT NULL DEFAULT '{}',
                steps             TEXT NOT NULL DEFAULT '{}',
                total_steps       INTEGER NOT NULL DEFAULT 0,
                completed_steps   INTEGER NOT NULL DEFAULT 0,
                routine_completed INTEGER NOT NULL DEFAULT 0,
                notes             TEXT,
                created_at        TEXT NOT NULL,
                updated_at        TEXT NOT NULL,
                PRIMARY KEY (user_id, date)
            );

            CREATE TABLE IF NOT EXISTS analytics (
                user_id             TEXT PRIMARY KEY,
                baseline_date       TEXT NOT NULL,
                total_days_tracked  INTEGER NOT NULL DEFAULT 0,
                skipped_days        INTEGER NOT NULL DEFAULT 0,
                is_reset            INTEGER NOT NULL DEFAULT 0,
                last_reset_at       TEXT,
                progress_metrics    TEXT NOT NULL DEFAULT '[]',
                product_evaluations TEXT NOT NULL DEFAULT '[]'
            );

            CREATE TABLE IF NOT EXISTS milestones (
                user_id        TEXT PRIMARY KEY,
                current_streak INTEGER NOT NULL DEFAULT 0,
                longest_streak INTEGER NOT NULL DEFAULT 0,
                unlocked       TEXT NOT NULL DEFAULT '{}'
            );

            CREATE TABLE IF NOT EXISTS gestures (
                user_id      TEXT NOT NULL,
                gesture_type TEXT NOT NULL,
                milestone    TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                PRIMARY KEY (user_id, gesture_type, milestone)
            );

            -- Streak queries scan completed check-ins per user by date.
            CREATE INDEX IF NOT EXISTS idx_check_ins_user_completed
                ON check_ins(user_id, routine_completed, date);",
        )?;
        Ok(())
    }

    // --- check-ins -------------------------------------------------------

    /// Fetch one check-in, if present.
    pub fn get_check_in(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, date, photos, steps, notes, created_at, updated_at
             FROM check_ins WHERE user_id = ?1 AND date = ?2",
        )?;
        let result = stmt.query_row(params![user_id, date.to_string()], row_to_check_in);
        match result {
            Ok(checkin) => Ok(Some(checkin)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create-or-merge a check-in for (user, date) inside one transaction.
    ///
    /// The stored record and the patch merge field by field; a conflict
    /// (already-filled photo slot) rolls back and leaves the row untouched.
    pub fn upsert_check_in(
        &self,
        user_id: &str,
        date: NaiveDate,
        patch: &CheckInPatch,
        now: DateTime<Utc>,
    ) -> Result<CheckIn, EngineError> {
        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let result: Result<CheckIn, EngineError> = (|| {
            let mut checkin = self
                .get_check_in(user_id, date)?
                .unwrap_or_else(|| CheckIn::new(user_id, date, now));
            checkin.apply(patch, now)?;
            self.write_check_in(&checkin)?;
            Ok(checkin)
        })();

        match result {
            Ok(checkin) => {
                self.conn.execute_batch("COMMIT;")?;
                Ok(checkin)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err)
            }
        }
    }

    fn write_check_in(&self, checkin: &CheckIn) -> Result<(), EngineError> {
        let photos = serde_json::to_string(&checkin.photos)?;
        let steps = serde_json::to_string(&checkin.routine.steps)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO check_ins
             (user_id, date, photos, steps, total_steps, completed_steps,
              routine_completed, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                checkin.user_id,
                checkin.date.to_string(),
                photos,
                steps,
                checkin.routine.total_steps,
                checkin.routine.completed_steps,
                checkin.routine_completed,
                checkin.notes,
                checkin.created_at.to_rfc3339(),
                checkin.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Dates with a completed routine at or after `since`, ascending.
    pub fn completed_dates_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<NaiveDate>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT date FROM check_ins
             WHERE user_id = ?1 AND routine_completed = 1 AND date >= ?2
             ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![user_id, since.to_string()], |row| {
            let raw: String = row.get(0)?;
            date_col(0, &raw)
        })?;
        rows.collect()
    }

    /// Most recent completed check-in at or after `since`: its date and
    /// update timestamp. Records before the baseline may physically exist
    /// (a backfill racing a reset) and are deliberately invisible here.
    pub fn last_completed_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Option<(NaiveDate, DateTime<Utc>)>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT date, updated_at FROM check_ins
             WHERE user_id = ?1 AND routine_completed = 1 AND date >= ?2
             ORDER BY date DESC LIMIT 1",
        )?;
        let result = stmt.query_row(params![user_id, since.to_string()], |row| {
            let date: String = row.get(0)?;
            let at: String = row.get(1)?;
            Ok((date_col(0, &date)?, datetime_col(1, &at)?))
        });
        match result {
            Ok(pair) => Ok(Some(pair)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Count of completed check-ins at or after `since`.
    pub fn count_completed_since(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<u32, rusqlite::Error> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM check_ins
             WHERE user_id = ?1 AND routine_completed = 1 AND date >= ?2",
            params![user_id, since.to_string()],
            |row| row.get(0),
        )
    }

    /// Stored-media references on check-ins strictly before `before`.
    pub fn photo_urls_before(
        &self,
        user_id: &str,
        before: NaiveDate,
    ) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT photos FROM check_ins WHERE user_id = ?1 AND date < ?2",
        )?;
        let rows = stmt.query_map(params![user_id, before.to_string()], |row| {
            let raw: String = row.get(0)?;
            let photos: BTreeMap<crate::checkin::PhotoSlot, String> = json_col(0, &raw)?;
            Ok(photos.into_values().collect::<Vec<String>>())
        })?;

        let mut urls = Vec::new();
        for row in rows {
            urls.extend(row?);
        }
        Ok(urls)
    }

    /// Delete check-ins strictly before `before`. Returns rows deleted;
    /// deleting already-deleted rows is a no-op, so retries converge.
    pub fn purge_check_ins_before(
        &self,
        user_id: &str,
        before: NaiveDate,
    ) -> Result<usize, rusqlite::Error> {
        self.conn.execute(
            "DELETE FROM check_ins WHERE user_id = ?1 AND date < ?2",
            params![user_id, before.to_string()],
        )
    }

    // --- analytics -------------------------------------------------------

    /// Fetch the analytics row, creating it with `baseline_date = today` on
    /// first access. `INSERT OR IGNORE` makes a losing concurrent creation
    /// fall through to the winner's row instead of erroring.
    pub fn ensure_analytics(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Analytics, rusqlite::Error> {
        self.conn.execute(
            "INSERT OR IGNORE INTO analytics (user_id, baseline_date) VALUES (?1, ?2)",
            params![user_id, today.to_string()],
        )?;
        self.conn.query_row(
            "SELECT user_id, baseline_date, total_days_tracked, skipped_days,
                    is_reset, last_reset_at, progress_metrics, product_evaluations
             FROM analytics WHERE user_id = ?1",
            params![user_id],
            row_to_analytics,
        )
    }

    /// Overwrite the analytics row with recomputed state.
    pub fn save_analytics(&self, analytics: &Analytics) -> Result<(), EngineError> {
        let metrics = serde_json::to_string(&analytics.progress_metrics)?;
        let evaluations = serde_json::to_string(&analytics.product_evaluations)?;
        self.conn.execute(
            "UPDATE analytics SET baseline_date = ?2, total_days_tracked = ?3,
                    skipped_days = ?4, is_reset = ?5, last_reset_at = ?6,
                    progress_metrics = ?7, product_evaluations = ?8
             WHERE user_id = ?1",
            params![
                analytics.user_id,
                analytics.baseline_date.to_string(),
                analytics.total_days_tracked,
                analytics.skipped_days,
                analytics.is_reset,
                analytics.last_reset_at.map(|at| at.to_rfc3339()),
                metrics,
                evaluations,
            ],
        )?;
        Ok(())
    }

    // --- milestones ------------------------------------------------------

    /// Fetch the milestone row, creating it on first access.
    pub fn ensure_milestone(&self, user_id: &str) -> Result<Milestone, rusqlite::Error> {
        self.conn.execute(
            "INSERT OR IGNORE INTO milestones (user_id) VALUES (?1)",
            params![user_id],
        )?;
        self.conn.query_row(
            "SELECT user_id, current_streak, longest_streak, unlocked
             FROM milestones WHERE user_id = ?1",
            params![user_id],
            row_to_milestone,
        )
    }

    pub fn save_milestone(&self, milestone: &Milestone) -> Result<(), EngineError> {
        let unlocked = serde_json::to_string(&milestone.unlocked)?;
        self.conn.execute(
            "UPDATE milestones SET current_streak = ?2, longest_streak = ?3, unlocked = ?4
             WHERE user_id = ?1",
            params![
                milestone.user_id,
                milestone.current_streak,
                milestone.longest_streak,
                unlocked,
            ],
        )?;
        Ok(())
    }

    // --- gestures --------------------------------------------------------

    /// Record a gesture completion. A repeat of the same
    /// (gesture_type, milestone) pair is a conflict, not a double count.
    pub fn record_gesture(
        &self,
        user_id: &str,
        gesture: &GestureRecord,
    ) -> Result<(), EngineError> {
        let result = self.conn.execute(
            "INSERT INTO gestures (user_id, gesture_type, milestone, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                gesture.gesture_type,
                gesture.milestone.label(),
                gesture.completed_at.to_rfc3339(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(ConflictError::DuplicateGesture {
                    gesture_type: gesture.gesture_type.clone(),
                    milestone: gesture.milestone,
                }
                .into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_gestures(&self, user_id: &str) -> Result<Vec<GestureRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT gesture_type, milestone, completed_at FROM gestures
             WHERE user_id = ?1 ORDER BY completed_at ASC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            let gesture_type: String = row.get(0)?;
            let milestone_label: String = row.get(1)?;
            let completed_at: String = row.get(2)?;
            let milestone = MilestoneThreshold::parse(&milestone_label).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    format!("unknown milestone '{milestone_label}'").into(),
                )
            })?;
            Ok(GestureRecord {
                gesture_type,
                milestone,
                completed_at: datetime_col(2, &completed_at)?,
            })
        })?;
        rows.collect()
    }

    pub fn clear_gestures(&self, user_id: &str) -> Result<usize, rusqlite::Error> {
        self.conn
            .execute("DELETE FROM gestures WHERE user_id = ?1", params![user_id])
    }
}

// --- row mapping ---------------------------------------------------------

fn row_to_check_in(row: &rusqlite::Row<'_>) -> rusqlite::Result<CheckIn> {
    let date: String = row.get(1)?;
    let photos_raw: String = row.get(2)?;
    let steps_raw: String = row.get(3)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    let mut routine = RoutineSteps {
        steps: json_col(3, &steps_raw)?,
        total_steps: 0,
        completed_steps: 0,
    };
    routine.total_steps = routine.steps.len() as u32;
    routine.completed_steps = routine.steps.values().filter(|done| **done).count() as u32;
    let routine_completed = routine.all_complete();

    Ok(CheckIn {
        user_id: row.get(0)?,
        date: date_col(1, &date)?,
        photos: json_col(2, &photos_raw)?,
        routine,
        routine_completed,
        notes: row.get(4)?,
        created_at: datetime_col(5, &created_at)?,
        updated_at: datetime_col(6, &updated_at)?,
    })
}

fn row_to_analytics(row: &rusqlite::Row<'_>) -> rusqlite::Result<Analytics> {
    let baseline: String = row.get(1)?;
    let last_reset_at: Option<String> = row.get(5)?;
    let metrics_raw: String = row.get(6)?;
    let evaluations_raw: String = row.get(7)?;

    let last_reset_at = match last_reset_at {
        Some(raw) => Some(datetime_col(5, &raw)?),
        None => None,
    };
    let progress_metrics: Vec<ProgressMetric> = json_col(6, &metrics_raw)?;
    let product_evaluations: Vec<ProductEvaluation> = json_col(7, &evaluations_raw)?;

    Ok(Analytics {
        user_id: row.get(0)?,
        baseline_date: date_col(1, &baseline)?,
        total_days_tracked: row.get(2)?,
        skipped_days: row.get(3)?,
        is_reset: row.get(4)?,
        last_reset_at,
        progress_metrics,
        product_evaluations,
    })
}

fn row_to_milestone(row: &rusqlite::Row<'_>) -> rusqlite::Result<Milestone> {
    let unlocked_raw: String = row.get(3)?;
    Ok(Milestone {
        user_id: row.get(0)?,
        current_streak: row.get(1)?,
        longest_streak: row.get(2)?,
        unlocked: json_col(3, &unlocked_raw)?,
    })
}

fn json_col<T: serde::de::DeserializeOwned>(idx: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn date_col(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn datetime_col(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkin::PhotoSlot;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn upsert_creates_then_merges() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();

        let first = db
            .upsert_check_in(
                "u1",
                day("2024-01-03"),
                &CheckInPatch::photo(PhotoSlot::Front, "mem://a"),
                now,
            )
            .unwrap();
        assert!(!first.routine_completed);

        let second = db
            .upsert_check_in("u1", day("2024-01-03"), &CheckInPatch::step("cleanse", true), now)
            .unwrap();
        assert_eq!(second.photos.get(&PhotoSlot::Front).unwrap(), "mem://a");
        assert!(second.routine_completed);

        // Same key updated in place, never duplicated.
        let count: u32 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM check_ins", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn upsert_conflict_rolls_back() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.upsert_check_in(
            "u1",
            day("2024-01-03"),
            &CheckInPatch::photo(PhotoSlot::Legacy, "mem://a"),
            now,
        )
        .unwrap();

        let mut patch = CheckInPatch::photo(PhotoSlot::Legacy, "mem://b");
        patch.steps.insert("cleanse".to_string(), true);
        let err = db
            .upsert_check_in("u1", day("2024-01-03"), &patch, now)
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));

        let stored = db.get_check_in("u1", day("2024-01-03")).unwrap().unwrap();
        assert_eq!(stored.photos.get(&PhotoSlot::Legacy).unwrap(), "mem://a");
        assert!(stored.routine.steps.is_empty());
    }

    #[test]
    fn completed_date_queries() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            db.upsert_check_in("u1", day(date), &CheckInPatch::step("cleanse", true), now)
                .unwrap();
        }
        // Photo-only day does not count as completed.
        db.upsert_check_in(
            "u1",
            day("2024-01-04"),
            &CheckInPatch::photo(PhotoSlot::Front, "mem://x"),
            now,
        )
        .unwrap();

        let dates = db.completed_dates_since("u1", day("2024-01-02")).unwrap();
        assert_eq!(dates, vec![day("2024-01-02"), day("2024-01-03")]);
        assert_eq!(db.count_completed_since("u1", day("2024-01-01")).unwrap(), 3);

        let (last, _) = db.last_completed_since("u1", day("2024-01-01")).unwrap().unwrap();
        assert_eq!(last, day("2024-01-03"));
        assert!(db.last_completed_since("u1", day("2024-01-05")).unwrap().is_none());
    }

    #[test]
    fn purge_deletes_strictly_before() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        for date in ["2024-01-01", "2024-01-02", "2024-01-06"] {
            db.upsert_check_in(
                "u1",
                day(date),
                &CheckInPatch::photo(PhotoSlot::Front, format!("mem://{date}")),
                now,
            )
            .unwrap();
        }

        let urls = db.photo_urls_before("u1", day("2024-01-06")).unwrap();
        assert_eq!(urls.len(), 2);

        let deleted = db.purge_check_ins_before("u1", day("2024-01-06")).unwrap();
        assert_eq!(deleted, 2);
        assert!(db.get_check_in("u1", day("2024-01-06")).unwrap().is_some());

        // Retry converges: nothing left to delete.
        assert_eq!(db.purge_check_ins_before("u1", day("2024-01-06")).unwrap(), 0);
    }

    #[test]
    fn ensure_analytics_is_create_or_fetch() {
        let db = Database::open_memory().unwrap();
        let first = db.ensure_analytics("u1", day("2024-01-05")).unwrap();
        assert_eq!(first.baseline_date, day("2024-01-05"));

        // A second ensure (a losing concurrent creator) gets the same row,
        // not a fresh baseline.
        let second = db.ensure_analytics("u1", day("2024-02-01")).unwrap();
        assert_eq!(second.baseline_date, day("2024-01-05"));

        let count: u32 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM analytics", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn analytics_round_trip() {
        let db = Database::open_memory().unwrap();
        let mut analytics = db.ensure_analytics("u1", day("2024-01-05")).unwrap();
        analytics.total_days_tracked = 3;
        analytics.is_reset = true;
        analytics.last_reset_at = Some(Utc::now());
        analytics.progress_metrics.push(ProgressMetric {
            recorded_at: Utc::now(),
            metric: "hydration".to_string(),
            value: 0.7,
        });
        db.save_analytics(&analytics).unwrap();

        let restored = db.ensure_analytics("u1", day("2024-01-05")).unwrap();
        assert_eq!(restored.total_days_tracked, 3);
        assert!(restored.is_reset);
        assert!(restored.last_reset_at.is_some());
        assert_eq!(restored.progress_metrics.len(), 1);
    }

    #[test]
    fn milestone_round_trip() {
        let db = Database::open_memory().unwrap();
        let mut milestone = db.ensure_milestone("u1").unwrap();
        milestone.apply_streak(7, Utc::now());
        db.save_milestone(&milestone).unwrap();

        let restored = db.ensure_milestone("u1").unwrap();
        assert_eq!(restored.current_streak, 7);
        assert_eq!(restored.unlocked.len(), 2);
    }

    #[test]
    fn duplicate_gesture_is_conflict() {
        let db = Database::open_memory().unwrap();
        let gesture = GestureRecord {
            gesture_type: "compliment".to_string(),
            milestone: MilestoneThreshold::SevenDay,
            completed_at: Utc::now(),
        };
        db.record_gesture("u1", &gesture).unwrap();

        let err = db.record_gesture("u1", &gesture).unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));
        assert_eq!(db.list_gestures("u1").unwrap().len(), 1);

        // Same pair for a different user is fine.
        db.record_gesture("u2", &gesture).unwrap();
    }
}
