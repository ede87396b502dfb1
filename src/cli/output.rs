//! CLI output formatting.
//!
//! Rendering is separated from printing so the text can be tested.

use serde::Serialize;

use crate::algorithms::AlgorithmRegistry;
use crate::config::DataSize;
use crate::error::VizResult;

/// Summary of a completed headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Algorithm identifier.
    pub algorithm: String,
    /// Algorithm display name.
    pub algorithm_name: String,
    /// Selected data size.
    pub size: DataSize,
    /// Real elements sorted (sentinel excluded).
    pub elements: usize,
    /// Dataset seed.
    pub seed: u64,
    /// Pacing delay in milliseconds.
    pub delay_ms: u64,
    /// Steps rendered, excluding the final frame.
    pub steps: u64,
    /// Frames the chart received, final frame included.
    pub frames: u64,
    /// Wall-clock duration in seconds.
    pub elapsed_secs: f64,
    /// Elapsed time as shown in the timing display.
    pub elapsed: String,
    /// Whether the final sequence is ordered.
    pub sorted: bool,
    /// Input values.
    pub input: Vec<u32>,
    /// Final values, sentinel included.
    pub output: Vec<u32>,
}

/// Print version information.
pub fn print_version() {
    println!("sortviz {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"sortviz - Step-by-step sorting algorithm visualizer

USAGE:
    sortviz <COMMAND> [OPTIONS]

COMMANDS:
    run                         Sort a generated dataset and print a report
        -a, --algorithm <ID>    Algorithm identifier (see `list`)
        -s, --size <SIZE>       small, medium, large or huge
        --seed <N>              Dataset seed
        --delay-ms <N>          Pause between steps in milliseconds
        -c, --config <FILE>     Load settings from a YAML file
        --json                  Print the report as JSON
        -v, --verbose           Debug logging on stderr

    list                        List algorithms and data sizes
    help                        Show this help message
    version                     Show version information

EXAMPLES:
    sortviz run --algorithm quick --size large --delay-ms 0
    sortviz run --config sortviz.yaml --json

The interactive chart is available as `sort-tui [config.yaml]`.
"
    );
}

/// Print available algorithms and data sizes.
pub fn print_list(registry: &AlgorithmRegistry) {
    println!("Algorithms:");
    for algorithm in registry.iter() {
        println!("  {:<12} {}", algorithm.id(), algorithm.name());
    }
    println!("\nData sizes:");
    for size in DataSize::ALL {
        println!("  {size}");
    }
}

/// Render a report as text or pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_report(report: &RunReport, json: bool) -> VizResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let status = if report.sorted { "✓ sorted" } else { "✗ NOT sorted" };
    let lines = [
        format!("Algorithm: {} ({})", report.algorithm_name, report.algorithm),
        format!("Data size: {} | seed {}", report.size, report.seed),
        format!("Elements:  {}", report.elements),
        format!("Steps:     {} ({} frames)", report.steps, report.frames),
        format!("Delay:     {} ms", report.delay_ms),
        format!("Time:      {}", report.elapsed),
        format!("Result:    {status}"),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// Print a report to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_report(report: &RunReport, json: bool) -> VizResult<()> {
    print!("{}", render_report(report, json)?);
    Ok(())
}
