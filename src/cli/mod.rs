//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging and signal
//! setup, and the server runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{load_merged_config, run_server, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, LogFormat};
pub use presenter::Presenter;
