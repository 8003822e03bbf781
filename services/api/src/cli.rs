use crate::report::{run_catalog, run_session_report, SessionReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use shoot_capture::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Shoot Capture",
    about = "Track listing photo shoots and serve the capture session API",
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
    /// Print the shot category catalog as JSON
    Catalog,
    /// Inspect capture sessions offline
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Rebuild a session from a capture manifest and report its readiness
    Report(SessionReportArgs),
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
        Command::Catalog => run_catalog(),
        Command::Session {
            command: SessionCommand::Report(args),
        } => run_session_report(args),
    }
}
