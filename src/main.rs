use std::process::ExitCode;

use clap::Parser;

use nft_deploy::cli::{self, Cli};
use nft_deploy::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env is fine; variables may come from the environment.
    let dotenv = dotenvy::dotenv();
    logging::init(cli.verbose);
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    match cli::run(cli).await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
