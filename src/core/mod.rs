//! Core application functionality
//!
//! This module contains the application layer around the library:
//! - CLI argument parsing and validation
//! - The user configuration file
//! - Platform error handling
//! - The runner that wires fonts, context and output together

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::{CliArgs, FontArg};
pub use config_file::{ConfigFile, FontEntry};
pub use runner::{render, run_app};
