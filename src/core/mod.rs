//! Core plumbing shared by every abimap stage
//!
//! - **config**: optional abimap.toml settings
//! - **diagnostics**: leveled events and the sinks that consume them
//! - **error**: error taxonomy with help messages and exit codes
//! - **logging**: tracing-subscriber setup for the command-line front end

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
