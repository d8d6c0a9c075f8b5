use crate::demo::{
    run_advise, run_dashboard, run_demo, run_prices, AdviseArgs, DashboardArgs, DemoArgs,
    PricesArgs,
};
use crate::profile::{run_profile, ProfileCommand};
use crate::server;
use agropulse::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AgroPulse",
    about = "Run the AgroPulse farmer advisory service or query it from the command line",
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
    /// Look up mandi prices and the best market for a crop
    Prices(PricesArgs),
    /// Ask the advisor a question about a crop
    Advise(AdviseArgs),
    /// Show growth, irrigation, health and market advice for the saved farm
    Dashboard(DashboardArgs),
    /// Manage the saved farmer profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Walk through registration, dashboard and advisor with sample data
    Demo(DemoArgs),
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
        Command::Prices(args) => run_prices(args),
        Command::Advise(args) => run_advise(args).await,
        Command::Dashboard(args) => run_dashboard(args),
        Command::Profile { command } => run_profile(command),
        Command::Demo(args) => run_demo(args),
    }
}
