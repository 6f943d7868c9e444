//! CLI module for mcquad.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod logging;
mod output;

pub use args::{Args, Command};
pub use commands::{check_job, run_cli, run_job};
pub use logging::init_cli_logger;
pub use output::{format_check, format_estimate, format_reference, print_help, print_version};
