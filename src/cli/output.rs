//! CLI output formatting.
//!
//! Formatting returns `String`s so reports can be tested; the command
//! handlers print them.

use std::fmt::Write;

use crate::engine::estimate::Estimate;
use crate::reference::conformance::ConformanceReport;
use crate::reference::Expected;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("mcquad {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"mcquad - Reproducible Monte-Carlo quadrature

USAGE:
    mcquad <COMMAND> [OPTIONS]

COMMANDS:
    run <job.yaml>              Integrate the job's reference integrand
        --seed <N>              Override the job seed
        --workers <N>           Override the worker count
        -v, --verbose           Enable debug logging

    reference <job.yaml>        Print the closed-form value and standard error

    check <job.yaml>            Integrate and compare against the closed form
        --seed <N>              Override the job seed
        --sigmas <X>            Allowed value deviation in standard errors (default: 3)

    help                        Show this help message
    version                     Show version information

JOB FILE:
    name: product-6d
    integrand:
      kind: product             # constant | product | gaussian
    domain:
      lower: [0, 0, 0, 0, 0, 0]
      upper: [1, 1, 1, 1, 1, 1]
    npoints: 50000
    seed: 42

EXAMPLES:
    mcquad run jobs/product.yaml --seed 12345 --workers 4
    mcquad check jobs/gaussian.yaml --sigmas 4

Set RUST_LOG to control log output.
"
    );
}

/// Format a finished integration.
#[must_use]
pub fn format_estimate(name: &str, estimate: &Estimate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Job:      {name}");
    let _ = writeln!(out, "Seed:     {}", estimate.seed);
    let _ = writeln!(out, "Points:   {}", estimate.npoints);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Value:    {:.10e}", estimate.value);
    let _ = writeln!(out, "Error:    {:.6e}", estimate.error);
    let _ = writeln!(
        out,
        "95% CI:   [{:.10e}, {:.10e}]",
        estimate.confidence_interval.0, estimate.confidence_interval.1
    );
    out
}

/// Format a closed-form reference.
#[must_use]
pub fn format_reference(name: &str, npoints: usize, expected: &Expected) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Job:      {name}");
    let _ = writeln!(out, "Points:   {npoints}");
    let _ = writeln!(out, "Exact:    {:.10e}", expected.value);
    let _ = writeln!(out, "Err_N:    {:.6e}", expected.error);
    out
}

/// Format a conformance check.
#[must_use]
pub fn format_check(name: &str, estimate: &Estimate, report: &ConformanceReport) -> String {
    let mut out = format_estimate(name, estimate);
    let mark = |ok: bool| if ok { "✓" } else { "✗" };

    let _ = writeln!(out, "\nConformance:");
    let _ = writeln!(
        out,
        "  {} value  {:.10e} vs exact {:.10e} (|Δ| {:.3e} < {:.3e})",
        mark(report.value_ok()),
        estimate.value,
        report.expected.value,
        report.value_deviation,
        report.value_limit
    );
    let _ = writeln!(
        out,
        "  {} error  {:.6e} vs exact {:.6e} (|Δ| {:.3e} < {:.3e})",
        mark(report.error_ok()),
        estimate.error,
        report.expected.error,
        report.error_deviation,
        report.error_limit
    );
    let status = if report.passed() { "PASSED" } else { "FAILED" };
    let _ = writeln!(out, "\nResult: {status}");
    out
}
