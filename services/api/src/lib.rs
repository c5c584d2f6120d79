mod cli;
mod dashboard;
mod infra;
mod routes;
mod server;

use ticket_insights::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
