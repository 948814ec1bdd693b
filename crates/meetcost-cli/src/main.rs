use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use meetcost_application::MeetingController;
use meetcost_infrastructure::{ConfigService, MeetcostPaths};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "meetcost")]
#[command(about = "meetcost - what your meeting costs, topic by topic", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import participants (Name, Title, Salary rows) and an agenda
    Setup {
        /// File with participant rows, `-` for stdin
        #[arg(long, short)]
        participants: PathBuf,
        /// File with one agenda topic per line
        #[arg(long, short)]
        agenda: Option<PathBuf>,
    },
    /// Append a topic to the agenda
    AddTopic { title: String },
    /// Start timing a topic (agenda number or id)
    Start { topic: String },
    /// Pause the active topic
    Pause { topic: String },
    /// Mark a topic as done
    Stop { topic: String },
    /// End the meeting
    End,
    /// Show the agenda, burn rate and running total
    Status,
    /// Print the itemized receipt
    Summary,
    /// Forget the current meeting
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Run the live meter, reading commands from stdin
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::at_default_location()?,
    };
    let config = config_service.load()?;

    let paths = MeetcostPaths::from_config(&config);
    let _guard = logging::init(paths.logs_dir().ok().as_deref());
    tracing::debug!(config = %config_service.path().display(), "configuration loaded");

    let controller = Arc::new(MeetingController::from_config(&config).await?);
    let currency = config.currency_symbol.as_str();

    match cli.command {
        Commands::Setup {
            participants,
            agenda,
        } => commands::setup::run(&controller, &participants, agenda.as_deref(), currency).await?,
        Commands::AddTopic { title } => commands::topic::add(&controller, &title).await?,
        Commands::Start { topic } => commands::topic::start(&controller, &topic).await?,
        Commands::Pause { topic } => commands::topic::pause(&controller, &topic).await?,
        Commands::Stop { topic } => commands::topic::stop(&controller, &topic).await?,
        Commands::End => commands::topic::end(&controller, currency).await?,
        Commands::Status => commands::report::status(&controller, currency).await,
        Commands::Summary => commands::report::summary(&controller, currency).await,
        Commands::Reset { yes } => commands::reset::run(&controller, yes).await?,
        Commands::Run => commands::live::run(&controller, currency).await?,
    }

    controller.shutdown();
    Ok(())
}
