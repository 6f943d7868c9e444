//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use super::output::{format_check, format_estimate, format_reference, print_help, print_version};
use super::{Args, Command};
use crate::config::QuadJob;
use crate::engine::estimate::Estimate;
use crate::error::QuadResult;
use crate::quadrature::mcquad;
use crate::reference::conformance::{check, ConformanceReport, Tolerance};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            job_path,
            seed_override,
            workers_override,
            ..
        } => run_command(&job_path, seed_override, workers_override),
        Command::Reference { job_path } => reference_command(&job_path),
        Command::Check {
            job_path,
            seed_override,
            sigmas,
        } => check_command(&job_path, seed_override, sigmas),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Integrate the job's reference integrand over its domain.
///
/// # Errors
///
/// Returns error if the job's options are invalid or integration fails.
pub fn run_job(job: &QuadJob) -> QuadResult<Estimate> {
    let integrand = job.integrand;
    debug!(
        job = job.display_name(),
        integrand = integrand.name(),
        dim = job.domain.dim(),
        "running job"
    );
    mcquad(|x| integrand.eval(x), &job.domain, &job.options())
}

/// Integrate the job and compare against its closed form.
///
/// # Errors
///
/// Returns error if the reference cannot be computed or integration fails.
/// A failed comparison is reported in the returned report, not as an error.
pub fn check_job(job: &QuadJob, tolerance: &Tolerance) -> QuadResult<(Estimate, ConformanceReport)> {
    let expected = job.expected()?;
    let estimate = run_job(job)?;
    let report = check(&estimate, &expected, tolerance);
    Ok((estimate, report))
}

fn load_job(path: &Path, seed_override: Option<u64>, workers_override: Option<usize>) -> Option<QuadJob> {
    match QuadJob::load(path) {
        Ok(mut job) => {
            if seed_override.is_some() {
                job.seed = seed_override;
            }
            if let Some(workers) = workers_override {
                job.workers = workers;
            }
            Some(job)
        }
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            None
        }
    }
}

fn run_command(path: &Path, seed_override: Option<u64>, workers_override: Option<usize>) -> ExitCode {
    let Some(job) = load_job(path, seed_override, workers_override) else {
        return ExitCode::from(1);
    };

    match run_job(&job) {
        Ok(estimate) => {
            print!("{}", format_estimate(job.display_name(), &estimate));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn reference_command(path: &Path) -> ExitCode {
    let Some(job) = load_job(path, None, None) else {
        return ExitCode::from(1);
    };

    match job.expected() {
        Ok(expected) => {
            print!("{}", format_reference(job.display_name(), job.npoints, &expected));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn check_command(path: &Path, seed_override: Option<u64>, sigmas: Option<f64>) -> ExitCode {
    let Some(job) = load_job(path, seed_override, None) else {
        return ExitCode::from(1);
    };
    let tolerance = sigmas.map_or_else(Tolerance::default, Tolerance::with_sigmas);

    match check_job(&job, &tolerance) {
        Ok((estimate, report)) => {
            print!("{}", format_check(job.display_name(), &estimate, &report));
            if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
