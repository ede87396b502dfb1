//! Configuration system with YAML schema and validation.
//!
//! Mistake-proofing happens in three layers:
//! - Type-safe configuration structs
//! - Schema validation via serde and `validator`
//! - Runtime semantic validation (algorithm identifiers must resolve)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::algorithms::AlgorithmRegistry;
use crate::error::{VizError, VizResult};

/// Top-level visualizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Chart canvas geometry.
    #[validate(nested)]
    #[serde(default)]
    pub chart: ChartConfig,

    /// Step pacing.
    #[validate(nested)]
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Generated input data.
    #[validate(nested)]
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Identifier of the algorithm selected at startup.
    #[validate(length(min = 1))]
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_algorithm() -> String {
    "bubble".to_string()
}

impl VizConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> VizResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> VizResult<()> {
        if !AlgorithmRegistry::builtin().contains(&self.algorithm) {
            return Err(VizError::UnknownAlgorithm(self.algorithm.clone()));
        }

        let margins = &self.chart.margin;
        if margins.left + margins.right >= self.chart.width {
            return Err(VizError::config(format!(
                "Horizontal margins ({}) leave no room in a {}-wide chart",
                margins.left + margins.right,
                self.chart.width
            )));
        }
        if margins.top + margins.bottom >= self.chart.height {
            return Err(VizError::config(format!(
                "Vertical margins ({}) leave no room in a {}-high chart",
                margins.top + margins.bottom,
                self.chart.height
            )));
        }

        Ok(())
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            chart: ChartConfig::default(),
            pacing: PacingConfig::default(),
            dataset: DatasetConfig::default(),
            algorithm: default_algorithm(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    seed: Option<u64>,
    delay_ms: Option<u64>,
    size: Option<DataSize>,
    algorithm: Option<String>,
}

impl VizConfigBuilder {
    /// Set the dataset seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the pacing delay in milliseconds.
    #[must_use]
    pub const fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Set the dataset size.
    #[must_use]
    pub const fn size(mut self, size: DataSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the algorithm identifier.
    #[must_use]
    pub fn algorithm(mut self, id: impl Into<String>) -> Self {
        self.algorithm = Some(id.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> VizConfig {
        let mut config = VizConfig::default();

        if let Some(seed) = self.seed {
            config.dataset.seed = seed;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.pacing.delay_ms = delay_ms;
        }
        if let Some(size) = self.size {
            config.dataset.size = size;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }

        config
    }
}

/// Chart canvas geometry in abstract units.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChartConfig {
    /// Canvas width.
    #[validate(range(min = 1.0, max = 100_000.0))]
    #[serde(default = "default_chart_width")]
    pub width: f64,
    /// Canvas height.
    #[validate(range(min = 1.0, max = 100_000.0))]
    #[serde(default = "default_chart_height")]
    pub height: f64,
    /// Margins around the canvas.
    #[validate(nested)]
    #[serde(default)]
    pub margin: Margin,
    /// Gap between neighbouring bars.
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "default_bar_padding")]
    pub bar_padding: f64,
    /// Extra value-domain room above the tallest bar.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_headroom")]
    pub headroom: f64,
}

const fn default_chart_width() -> f64 {
    800.0
}

const fn default_chart_height() -> f64 {
    400.0
}

const fn default_bar_padding() -> f64 {
    0.95
}

const fn default_headroom() -> f64 {
    10.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            margin: Margin::default(),
            bar_padding: default_bar_padding(),
            headroom: default_headroom(),
        }
    }
}

/// Canvas margins, in chart units. Backends inset the bars by these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Margin {
    /// Top margin.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_margin")]
    pub top: f64,
    /// Right margin.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_margin")]
    pub right: f64,
    /// Bottom margin.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_margin")]
    pub bottom: f64,
    /// Left margin.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_margin")]
    pub left: f64,
}

const fn default_margin() -> f64 {
    20.0
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: default_margin(),
            right: default_margin(),
            bottom: default_margin(),
            left: default_margin(),
        }
    }
}

/// Step pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PacingConfig {
    /// Delay after each rendered step, in milliseconds.
    #[validate(range(max = 10_000))]
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Maximum number of steps before a run is aborted.
    #[validate(range(min = 1))]
    #[serde(default = "default_step_limit")]
    pub step_limit: u64,
}

const fn default_delay_ms() -> u64 {
    20
}

const fn default_step_limit() -> u64 {
    1_000_000
}

impl PacingConfig {
    /// Pacing delay as a `Duration`.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            step_limit: default_step_limit(),
        }
    }
}

/// Generated dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Number of elements.
    #[serde(default)]
    pub size: DataSize,
    /// Largest generated value.
    #[validate(range(min = 1, max = 1_000_000))]
    #[serde(default = "default_max_value")]
    pub max_value: u32,
    /// Seed for the dataset generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_max_value() -> u32 {
    100
}

const fn default_seed() -> u64 {
    42
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            size: DataSize::default(),
            max_value: default_max_value(),
            seed: default_seed(),
        }
    }
}

/// Selectable dataset sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSize {
    /// 10 elements.
    Small,
    /// 25 elements.
    #[default]
    Medium,
    /// 50 elements.
    Large,
    /// 100 elements.
    Huge,
}

impl DataSize {
    /// All sizes in selector order.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Huge];

    /// Number of elements generated for this size.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 25,
            Self::Large => 50,
            Self::Huge => 100,
        }
    }

    /// Label used in YAML, the CLI and the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }

    /// Next size in selector order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Huge,
            Self::Huge => Self::Small,
        }
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.len())
    }
}

impl FromStr for DataSize {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| VizError::UnknownDataSize(s.to_string()))
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `sortviz=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
