//! CLI command handlers.

use std::process::ExitCode;

use tracing::{debug, error};

use crate::algorithms::AlgorithmRegistry;
use crate::config::{DataSize, VizConfig};
use crate::engine::{DataRng, RunController, RunOutcome, Sequence};
use crate::error::{VizError, VizResult};
use crate::logging::{self, Fallback};
use crate::renderers::{share, BarChart, FrameRenderer};

use super::output::{print_help, print_list, print_report, print_version, RunReport};
use super::{Args, Command, RunOptions};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run(options) => run_visualization(&options),
        Command::List => {
            print_list(&AlgorithmRegistry::builtin());
            ExitCode::SUCCESS
        }
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

/// Handle `run`: configure, sort headlessly, print the report.
#[must_use]
pub fn run_visualization(options: &RunOptions) -> ExitCode {
    let mut config = match build_config(options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    if options.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Err(e) = logging::init(&config.logging, Fallback::Stderr) {
        eprintln!("Error: {e}");
        return ExitCode::from(2);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let report = match runtime.block_on(execute(&config)) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match print_report(&report, options.json) {
        Ok(()) if report.sorted => ExitCode::SUCCESS,
        Ok(()) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Merge the configuration file (if any) with command-line overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the size label is unknown
/// or the resulting configuration is invalid.
pub fn build_config(options: &RunOptions) -> VizResult<VizConfig> {
    let mut config = match &options.config_path {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::default(),
    };

    if let Some(algorithm) = &options.algorithm {
        config.algorithm.clone_from(algorithm);
    }
    if let Some(size) = &options.size {
        config.dataset.size = size.parse::<DataSize>()?;
    }
    if let Some(seed) = options.seed {
        config.dataset.seed = seed;
    }
    if let Some(delay_ms) = options.delay_ms {
        config.pacing.delay_ms = delay_ms;
    }

    config.check()?;
    Ok(config)
}

/// Sort one generated dataset through the full engine and report.
///
/// The chart model is driven as in the terminal UI but never drawn.
///
/// # Errors
///
/// Returns the error of an aborted run, or [`VizError::Cancelled`].
pub async fn execute(config: &VizConfig) -> VizResult<RunReport> {
    let registry = AlgorithmRegistry::builtin();
    let algorithm = registry.get(&config.algorithm)?;

    let mut rng = DataRng::new(config.dataset.seed);
    let raw = rng.dataset_for(config.dataset.size, config.dataset.max_value);
    let mut sequence = Sequence::from_raw(&raw);
    let input = sequence.values().to_vec();

    let (chart, shared) = share(BarChart::new(config.chart.clone()));
    chart.borrow_mut().initial(sequence.rendered());
    let controller = RunController::new(shared, config.pacing.clone());

    debug!(algorithm = algorithm.id(), elements = sequence.len(), "headless run");
    match controller.start(&mut sequence, algorithm).await {
        RunOutcome::Completed { elapsed, steps } => Ok(RunReport {
            algorithm: algorithm.id().to_string(),
            algorithm_name: algorithm.name().to_string(),
            size: config.dataset.size,
            elements: sequence.len(),
            seed: config.dataset.seed,
            delay_ms: config.pacing.delay_ms,
            steps,
            frames: chart.borrow().frames(),
            elapsed_secs: elapsed.as_secs_f64(),
            elapsed: elapsed.to_string(),
            sorted: sequence.is_sorted(),
            input,
            output: sequence.rendered().to_vec(),
        }),
        RunOutcome::Aborted(e) => Err(e),
        RunOutcome::Cancelled | RunOutcome::Ignored => Err(VizError::Cancelled),
    }
}
