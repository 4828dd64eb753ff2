mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use std::process::ExitCode;

use clinic_booking::error::AppError;

pub async fn run() -> Result<ExitCode, AppError> {
    cli::run().await
}
