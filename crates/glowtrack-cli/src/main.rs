use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "glowtrack-cli", version, about = "Glowtrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record and inspect daily check-ins
    Checkin {
        #[command(subcommand)]
        action: commands::checkin::CheckinAction,
    },
    /// Continuity status (streaks, warnings, reset state)
    Status {
        /// User id (defaults to `default_user` from config)
        #[arg(long)]
        user: Option<String>,
        /// Evaluation day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Milestone status and gesture completion
    Milestone {
        #[command(subcommand)]
        action: commands::milestone::MilestoneAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Checkin { action } => commands::checkin::run(action),
        Commands::Status { user, today } => commands::status::run(user, today),
        Commands::Milestone { action } => commands::milestone::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
