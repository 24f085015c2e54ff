use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod platform;

#[derive(Parser)]
#[command(name = "sovereign", version, about = "Sovereign Soul workout tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's record
    Today {
        /// Show the warm-up list instead of the main protocol
        #[arg(long)]
        warmup: bool,
    },
    /// Count one repetition
    Tap {
        /// Exercise ID (e.g. "squats")
        id: String,
        #[arg(long)]
        warmup: bool,
    },
    /// Add several repetitions at once
    Add {
        id: String,
        amount: u32,
        #[arg(long)]
        warmup: bool,
    },
    /// Set an exercise to an exact value
    Set {
        id: String,
        value: u32,
        #[arg(long)]
        warmup: bool,
    },
    /// Run a timer exercise until Ctrl-C, completion or the limit
    Timer(commands::timer::TimerArgs),
    /// Toggle today's rest day
    Rest,
    /// Focus challenge countdown
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Calendar of past days
    History(commands::history::HistoryArgs),
    /// User profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Motivational quote for finishing a workout
    Quote {
        #[arg(long)]
        workout: Option<String>,
    },
    /// Benefit and form tip for an exercise
    Tip {
        /// Exercise ID from either catalog
        id: String,
    },
    /// Quick tools that never touch the day's record
    Tools {
        #[command(subcommand)]
        action: commands::tools::ToolsAction,
    },
    /// Erase all stored data
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SOVEREIGN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today { warmup } => commands::progress::today(warmup),
        Commands::Tap { id, warmup } => commands::progress::tap(&id, warmup),
        Commands::Add { id, amount, warmup } => commands::progress::add(&id, amount, warmup),
        Commands::Set { id, value, warmup } => commands::progress::set(&id, value, warmup),
        Commands::Timer(args) => commands::timer::run(args),
        Commands::Rest => commands::rest::run(),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::History(args) => commands::history::run(args),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Quote { workout } => commands::quote::quote(workout),
        Commands::Tip { id } => commands::quote::tip(&id),
        Commands::Tools { action } => commands::tools::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
