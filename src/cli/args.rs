//! CLI argument parsing.
//!
//! Hand-rolled parser that accepts any iterator of strings, so every code
//! path can be exercised from tests without touching `std::env::args()`.

use std::path::PathBuf;
use std::str::FromStr;

/// Default number of runs for `verify`.
pub const DEFAULT_VERIFY_RUNS: usize = 3;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a simulation.
    Run {
        /// Path to the configuration YAML file.
        config_path: PathBuf,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Optional iteration count override.
        iterations_override: Option<usize>,
        /// Write per-iteration results to this CSV file.
        csv_path: Option<PathBuf>,
        /// Write the run report to this JSON file.
        json_path: Option<PathBuf>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Verify a configuration reproduces identical results.
    Verify {
        /// Path to the configuration YAML file.
        config_path: PathBuf,
        /// Number of verification runs.
        runs: usize,
    },
    /// Print the default configuration.
    Init,
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Command {
    /// Whether the command asked for verbose output.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
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
            "verify" => Self::parse_verify_command(args),
            "init" => Command::Init,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires a configuration path");
            return Command::Help;
        }

        let mut seed_override = None;
        let mut iterations_override = None;
        let mut csv_path = None;
        let mut json_path = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--seed", Some(v)) => {
                    seed_override = parse_flag_value("--seed", v);
                    i += 2;
                }
                (flag @ ("-n" | "--iterations"), Some(v)) => {
                    iterations_override = parse_flag_value(flag, v);
                    i += 2;
                }
                ("--csv", Some(v)) => {
                    csv_path = Some(PathBuf::from(v));
                    i += 2;
                }
                ("--json", Some(v)) => {
                    json_path = Some(PathBuf::from(v));
                    i += 2;
                }
                ("-v" | "--verbose", _) => {
                    verbose = true;
                    i += 1;
                }
                (other, _) => {
                    eprintln!("Ignoring argument: {other}");
                    i += 1;
                }
            }
        }

        Command::Run {
            config_path: PathBuf::from(&args[2]),
            seed_override,
            iterations_override,
            csv_path,
            json_path,
            verbose,
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'verify' command requires a configuration path");
            return Command::Help;
        }

        let mut runs = DEFAULT_VERIFY_RUNS;
        if args.len() > 4 && args[3] == "--runs" {
            if let Some(n) = parse_flag_value("--runs", &args[4]) {
                runs = n;
            }
        }

        Command::Verify {
            config_path: PathBuf::from(&args[2]),
            runs,
        }
    }
}

/// Parse a flag's value, warning and returning `None` when it is malformed.
pub(super) fn parse_flag_value<T: FromStr>(flag: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        eprintln!("Ignoring invalid value for {flag}: {value}");
    }
    parsed
}
