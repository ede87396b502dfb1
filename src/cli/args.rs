//! CLI argument parsing.
//!
//! Hand-rolled so it can be driven from any iterator of strings in tests.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options of the `run` command. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Algorithm identifier override.
    pub algorithm: Option<String>,
    /// Data size label override.
    pub size: Option<String>,
    /// Dataset seed override.
    pub seed: Option<u64>,
    /// Pacing delay override in milliseconds.
    pub delay_ms: Option<u64>,
    /// YAML configuration file.
    pub config_path: Option<PathBuf>,
    /// Print the report as JSON.
    pub json: bool,
    /// Log at debug level.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sort one generated dataset headlessly and report.
    Run(RunOptions),
    /// List algorithms and data sizes.
    List,
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
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
            "run" => Self::parse_run_command(&args[2..]),
            "list" => Command::List,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the flags following `run`.
    fn parse_run_command(flags: &[String]) -> Command {
        let mut options = RunOptions::default();

        let mut i = 0;
        while i < flags.len() {
            let value = flags.get(i + 1);
            match (flags[i].as_str(), value) {
                ("--algorithm" | "-a", Some(v)) => {
                    options.algorithm = Some(v.clone());
                    i += 2;
                }
                ("--size" | "-s", Some(v)) => {
                    options.size = Some(v.clone());
                    i += 2;
                }
                ("--seed", Some(v)) => {
                    match v.parse() {
                        Ok(seed) => options.seed = Some(seed),
                        Err(_) => eprintln!("Ignoring invalid seed: {v}"),
                    }
                    i += 2;
                }
                ("--delay-ms", Some(v)) => {
                    match v.parse() {
                        Ok(delay) => options.delay_ms = Some(delay),
                        Err(_) => eprintln!("Ignoring invalid delay: {v}"),
                    }
                    i += 2;
                }
                ("--config" | "-c", Some(v)) => {
                    options.config_path = Some(PathBuf::from(v));
                    i += 2;
                }
                ("--json", _) => {
                    options.json = true;
                    i += 1;
                }
                ("-v" | "--verbose", _) => {
                    options.verbose = true;
                    i += 1;
                }
                (flag, _) => {
                    eprintln!("Ignoring argument: {flag}");
                    i += 1;
                }
            }
        }

        Command::Run(options)
    }
}
