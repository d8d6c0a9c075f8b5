mod cli;
mod demo;
mod infra;
mod profile;
mod routes;
mod server;

use agropulse::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
