use crate::report::{
    run_capacity, run_leaderboard, run_overview, CapacityArgs, LeaderboardArgs, OverviewArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_pulse::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruit Pulse",
    about = "Score recruiters and forecast recruiting capacity from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the recruiter leaderboard for a reporting period
    Leaderboard(LeaderboardArgs),
    /// Print current load and the closing-project forecast
    Capacity(CapacityArgs),
    /// Print project counts and averages for a reporting period
    Overview(OverviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Leaderboard(args) => run_leaderboard(args),
        Command::Capacity(args) => run_capacity(args),
        Command::Overview(args) => run_overview(args),
    }
}
