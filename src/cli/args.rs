//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings, so parsing is testable
//! without touching `std::env::args()`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Integrate the job's reference integrand.
    Run {
        /// Path to the job YAML file.
        job_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Optional worker-count override.
        workers_override: Option<usize>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Print the closed-form value and standard error of a job.
    Reference {
        /// Path to the job YAML file.
        job_path: PathBuf,
    },
    /// Integrate and compare against the closed form.
    Check {
        /// Path to the job YAML file.
        job_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Allowed value deviation in standard errors.
        sigmas: Option<f64>,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Command {
    /// Whether the command asked for verbose logging.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(self, Self::Run { verbose: true, .. })
    }
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "reference" => Self::parse_reference_command(args),
            "check" => Self::parse_check_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Value following `flag`, parsed; `None` when absent or malformed.
    fn flag_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .and_then(|v| v.parse().ok())
    }

    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires a job path");
            return Command::Help;
        }

        let rest = &args[3..];
        Command::Run {
            job_path: PathBuf::from(&args[2]),
            seed_override: Self::flag_value(rest, "--seed"),
            workers_override: Self::flag_value(rest, "--workers"),
            verbose: rest.iter().any(|a| a == "-v" || a == "--verbose"),
        }
    }

    fn parse_reference_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'reference' command requires a job path");
            return Command::Help;
        }

        Command::Reference {
            job_path: PathBuf::from(&args[2]),
        }
    }

    fn parse_check_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'check' command requires a job path");
            return Command::Help;
        }

        let rest = &args[3..];
        Command::Check {
            job_path: PathBuf::from(&args[2]),
            seed_override: Self::flag_value(rest, "--seed"),
            sigmas: Self::flag_value(rest, "--sigmas"),
        }
    }
}
