//! mcquad CLI - Monte-Carlo quadrature jobs
//!
//! Runs YAML-described integration jobs and checks them against their
//! closed-form references.

use std::process::ExitCode;

use mcquad::cli::{init_cli_logger, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_cli_logger(args.command.verbose());
    run_cli(args)
}
