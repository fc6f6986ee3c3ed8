//! The `factreel <topic>` command.

use crate::cli::Cli;
use factreel::{FactreelConfig, FactreelResult, FinalVideo, Topic, build_pipeline};
use tracing::{info, warn};

/// How a command invocation ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The video was written
    Finished(FinalVideo),
    /// Ctrl-C arrived first; the run was dropped and cleaned up
    Interrupted,
}

/// Load configuration, build the pipeline, and run it for the topic.
pub async fn run(cli: &Cli) -> FactreelResult<RunOutcome> {
    let config = match &cli.config {
        Some(path) => FactreelConfig::from_file(path)?,
        None => FactreelConfig::load()?,
    }
    .with_overrides(cli.overrides());

    let topic = Topic::new(cli.topic.as_str())?;
    let pipeline = build_pipeline(&config)?;

    info!(
        topic = %topic,
        segments = config.pipeline.segment_count(),
        output_dir = %config.pipeline.output_dir().display(),
        "Starting run"
    );

    tokio::select! {
        result = pipeline.run(&topic) => Ok(RunOutcome::Finished(result?)),
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, discarding partial run");
            Ok(RunOutcome::Interrupted)
        }
    }
}
