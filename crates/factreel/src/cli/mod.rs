//! Command-line interface for the factreel binary.

mod args;
mod run;

pub use args::Cli;
pub use run::{RunOutcome, run};
