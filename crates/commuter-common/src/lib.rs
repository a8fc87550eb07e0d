//! Commuter Info Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging setup for the commuter-info workspace.
//!
//! # Overview
//!
//! This crate provides the functionality every workspace member needs:
//!
//! - **Error Handling**: the common `CommuterError` type and result alias
//! - **Logging**: `tracing`-based logging initialization driven by `LOG_*`
//!   environment variables
//!
//! # Example
//!
//! ```no_run
//! use commuter_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CommuterError, Result};
