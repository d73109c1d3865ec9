pub mod checkin;
pub mod config;
pub mod milestone;
pub mod status;

use chrono::{FixedOffset, NaiveDate, Utc};
use glowtrack_core::storage::Config;
use glowtrack_core::ContinuityEngine;

/// Load config and open the engine over the default database and media dir.
pub(crate) fn open_engine() -> Result<(ContinuityEngine, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = ContinuityEngine::open(&config)?;
    Ok((engine, config))
}

/// Resolve the user id: explicit flag first, then `default_user` from config.
pub(crate) fn resolve_user(
    config: &Config,
    explicit: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    explicit
        .or_else(|| config.default_user.clone())
        .ok_or_else(|| "no user: pass --user or set default_user in config".into())
}

/// Resolve "today": explicit `YYYY-MM-DD` flag, or the wall clock shifted by
/// the configured UTC offset. The engine itself never reads the clock.
pub(crate) fn resolve_today(
    config: &Config,
    explicit: Option<String>,
) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match explicit {
        Some(raw) => Ok(glowtrack_core::checkin::parse_date(&raw)?),
        None => {
            let offset = FixedOffset::east_opt(config.timezone_offset_hours * 3600)
                .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
            Ok(Utc::now().with_timezone(&offset).date_naive())
        }
    }
}
