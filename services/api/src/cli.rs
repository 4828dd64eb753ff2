use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use clinic_booking::error::AppError;

use crate::demo::{run_check, run_demo, CheckArgs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Clinic Booking",
    about = "Serve and demonstrate the clinic appointment booking rules",
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
    /// Check whether a single slot could be booked
    Check(CheckArgs),
    /// Run an end-to-end booking walkthrough against the in-memory backend
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

pub(crate) async fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await.map(|()| ExitCode::SUCCESS),
        Command::Check(args) => run_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
