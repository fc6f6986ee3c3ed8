//! Error types for the factreel pipeline.
//!
//! This crate provides the error types shared by every factreel crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The top-level [`FactreelError`] boxes a [`FactreelErrorKind`], one variant
//! per failure family: provider calls, broken pairing contracts, rendering,
//! working-directory storage, and configuration.
//!
//! # Examples
//!
//! ```
//! use factreel_error::{FactreelResult, ProviderError, ProviderErrorKind};
//!
//! fn fetch_facts() -> FactreelResult<Vec<String>> {
//!     Err(ProviderError::new("openai", ProviderErrorKind::RateLimit))?
//! }
//!
//! match fetch_facts() {
//!     Ok(facts) => println!("Got {} facts", facts.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod contract;
mod error;
mod provider;
mod render;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use contract::{ContractError, ContractErrorKind};
pub use error::{FactreelError, FactreelErrorKind, FactreelResult};
pub use provider::{ProviderError, ProviderErrorKind, RetryableError};
pub use render::{RenderError, RenderErrorKind};
pub use storage::{StorageError, StorageErrorKind};
