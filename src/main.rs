//! sortviz CLI - headless sorting visualizer
//!
//! Runs an algorithm over a generated dataset and prints a report. The
//! interactive chart lives in the `sort-tui` binary.

use std::process::ExitCode;

use sortviz::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
