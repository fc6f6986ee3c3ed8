//! Factreel CLI binary.
//!
//! `factreel "<topic>"` generates facts, images, and narration for the
//! topic and writes `<topic>.mp4` to the output directory.

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, RunOutcome, run};

    // Credentials may live in a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = factreel::init_tracing(&cli.tracing_config()) {
        eprintln!("{}", e);
    }

    match run(&cli).await {
        Ok(RunOutcome::Finished(video)) => {
            println!("{}", video.path().display());
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Interrupted) => ExitCode::from(130),
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
