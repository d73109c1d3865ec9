use clap::Subcommand;
use glowtrack_core::checkin::{parse_date, CheckInPatch, PhotoSlot};

use super::{open_engine, resolve_today, resolve_user};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// Record a check-in: photo upload, step toggles, notes
    Record {
        /// User id (defaults to `default_user` from config)
        #[arg(long)]
        user: Option<String>,
        /// Calendar date YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Step toggle, `id` or `id=false`; repeatable
        #[arg(long = "step")]
        steps: Vec<String>,
        /// Path to a photo file to upload
        #[arg(long)]
        photo: Option<String>,
        /// Photo slot: front, right, left, or legacy
        #[arg(long, default_value = "front")]
        slot: String,
        /// Free-text note for the day
        #[arg(long)]
        notes: Option<String>,
        /// Evaluation day override (for backfills and testing)
        #[arg(long)]
        today: Option<String>,
    },
    /// Show one day's check-in
    Show {
        #[arg(long)]
        user: Option<String>,
        /// Calendar date YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: CheckinAction) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = open_engine()?;

    match action {
        CheckinAction::Record {
            user,
            date,
            steps,
            photo,
            slot,
            notes,
            today,
        } => {
            let user = resolve_user(&config, user)?;
            let today = resolve_today(&config, today)?;
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today,
            };
            let now = chrono::Utc::now();

            let mut checkin = None;
            if let Some(path) = photo {
                let bytes = std::fs::read(&path)?;
                let slot = PhotoSlot::parse(&slot)?;
                checkin = Some(engine.upload_photo(&user, date, slot, &bytes, today, now)?);
            }

            let mut patch = CheckInPatch::default();
            for spec in &steps {
                let (id, completed) = parse_step(spec)?;
                patch.steps.insert(id, completed);
            }
            if let Some(notes) = notes {
                patch.notes = Some(notes);
            }
            if !patch.is_empty() {
                checkin = Some(engine.record_check_in(&user, date, &patch, today, now)?);
            }

            match checkin {
                Some(checkin) => println!("{}", serde_json::to_string_pretty(&checkin)?),
                None => return Err("nothing to record: pass --photo, --step, or --notes".into()),
            }
        }
        CheckinAction::Show { user, date } => {
            let user = resolve_user(&config, user)?;
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => resolve_today(&config, None)?,
            };
            let checkin = engine.get_check_in(&user, date)?;
            println!("{}", serde_json::to_string_pretty(&checkin)?);
        }
    }
    Ok(())
}

/// Parse `id` (complete) or `id=true|false`.
fn parse_step(spec: &str) -> Result<(String, bool), Box<dyn std::error::Error>> {
    match spec.split_once('=') {
        Some((id, "true")) => Ok((id.to_string(), true)),
        Some((id, "false")) => Ok((id.to_string(), false)),
        Some((_, other)) => Err(format!("invalid step value '{other}': expected true/false").into()),
        None => Ok((spec.to_string(), true)),
    }
}
