use clap::Subcommand;
use glowtrack_core::MilestoneThreshold;

use super::{open_engine, resolve_today, resolve_user};

#[derive(Subcommand)]
pub enum MilestoneAction {
    /// Current milestones, including unlocks from this evaluation
    Show {
        #[arg(long)]
        user: Option<String>,
        /// Evaluation day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Record a completed real-world gesture for a milestone
    Gesture {
        #[arg(long)]
        user: Option<String>,
        /// Gesture kind, e.g. "compliment"
        #[arg(long = "type")]
        gesture_type: String,
        /// Milestone label: 3-day, 7-day, 14-day, or 30-day
        #[arg(long)]
        milestone: String,
    },
    /// List completed gestures
    Gestures {
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: MilestoneAction) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = open_engine()?;

    match action {
        MilestoneAction::Show { user, today } => {
            let user = resolve_user(&config, user)?;
            let today = resolve_today(&config, today)?;
            let status = engine.milestone_status(&user, today, chrono::Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        MilestoneAction::Gesture {
            user,
            gesture_type,
            milestone,
        } => {
            let user = resolve_user(&config, user)?;
            let milestone = MilestoneThreshold::parse(&milestone)
                .ok_or_else(|| format!("unknown milestone '{milestone}'"))?;
            let gesture =
                engine.record_gesture(&user, &gesture_type, milestone, chrono::Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&gesture)?);
        }
        MilestoneAction::Gestures { user } => {
            let user = resolve_user(&config, user)?;
            let gestures = engine.list_gestures(&user)?;
            println!("{}", serde_json::to_string_pretty(&gestures)?);
        }
    }
    Ok(())
}
