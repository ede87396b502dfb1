//! Retained-mode bar chart model.
//!
//! Keeps one [`VisualElement`] per sequence index and reconciles it with
//! every frame: existing bars are updated in place, missing bars enter with
//! zero height, surplus bars are removed. Geometry is in abstract chart
//! units (origin top-left, y growing downwards); backends scale it to their
//! own surface.

use serde::Serialize;
use tracing::debug;

use crate::config::{ChartConfig, Margin};
use crate::engine::Highlight;
use crate::renderers::FrameRenderer;

/// Opacity of a hovered bar.
pub const HOVER_OPACITY: f64 = 0.85;

/// Vertical gap between a hover label and the top of its bar.
const HOVER_LABEL_OFFSET: f64 = 5.0;

/// Linear mapping from a value domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale mapping `domain` onto `range`.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a value. A degenerate domain maps everything to the range start.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Value domain.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Pixel range.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Fill colour class of a bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum BarFill {
    /// Ordinary bar.
    #[default]
    Normal,
    /// Part of the pair being compared or swapped.
    Highlighted,
    /// The run has finished.
    Done,
}

/// One rendered bar, keyed by its index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualElement {
    /// Position in the sequence.
    pub index: usize,
    /// Value currently drawn.
    pub value: u32,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Bar width.
    pub width: f64,
    /// Bar height; `y + height` is always the chart floor.
    pub height: f64,
    /// Fill colour class.
    pub fill: BarFill,
    /// 1.0 normally, lower while hovered.
    pub opacity: f64,
}

/// Transient label shown above a hovered bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverLabel {
    /// Hovered bar.
    pub index: usize,
    /// The bar's current value.
    pub text: String,
    /// Horizontal centre of the label.
    pub x: f64,
    /// Baseline of the label.
    pub y: f64,
}

/// Drawing surface established by `initial`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    /// Width in chart units.
    pub width: f64,
    /// Height in chart units.
    pub height: f64,
    /// Translation applied by the margins.
    pub margin: Margin,
    /// Incremented every time the canvas is recreated.
    pub generation: u64,
}

/// Bar chart state reconciled frame by frame.
#[derive(Debug, Clone)]
pub struct BarChart {
    config: ChartConfig,
    canvas: Option<Canvas>,
    generation: u64,
    scale: LinearScale,
    bar_width: f64,
    elements: Vec<VisualElement>,
    hover: Option<HoverLabel>,
    highlight: Highlight,
    frames: u64,
}

impl BarChart {
    /// Create an empty chart. Nothing is drawn until `initial`.
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        let scale = LinearScale::new((0.0, config.headroom), (config.height, 0.0));
        Self {
            config,
            canvas: None,
            generation: 0,
            scale,
            bar_width: 0.0,
            elements: Vec::new(),
            hover: None,
            highlight: Highlight::NONE,
            frames: 0,
        }
    }

    /// Current bars, left to right.
    #[must_use]
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    /// The canvas, if `initial` has run.
    #[must_use]
    pub const fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Value scale computed by the last `initial`.
    #[must_use]
    pub const fn scale(&self) -> &LinearScale {
        &self.scale
    }

    /// Width of every bar.
    #[must_use]
    pub const fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Chart geometry.
    #[must_use]
    pub const fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Hover label, if a bar is hovered.
    #[must_use]
    pub const fn hover_label(&self) -> Option<&HoverLabel> {
        self.hover.as_ref()
    }

    /// Highlight of the last frame.
    #[must_use]
    pub const fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// Number of frames drawn since the last `initial`.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Values currently drawn, left to right.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Index of the bar covering horizontal chart coordinate `x`.
    ///
    /// Gaps between bars belong to no bar.
    #[must_use]
    pub fn element_at(&self, x: f64) -> Option<usize> {
        self.elements
            .iter()
            .find(|e| x >= e.x && x < e.x + e.width.max(f64::EPSILON))
            .map(|e| e.index)
    }

    /// Surface the value of bar `index` as a label and dim the bar.
    ///
    /// Purely a display affordance: values and fills are untouched.
    pub fn hover(&mut self, index: usize) -> Option<&HoverLabel> {
        self.leave();
        let element = self.elements.get_mut(index)?;
        element.opacity = HOVER_OPACITY;
        self.hover = Some(Self::label_for(element, &self.scale, self.bar_width));
        self.hover.as_ref()
    }

    /// Remove the hover label and restore normal opacity.
    pub fn leave(&mut self) {
        if let Some(label) = self.hover.take() {
            if let Some(element) = self.elements.get_mut(label.index) {
                element.opacity = 1.0;
            }
        }
    }

    fn label_for(element: &VisualElement, scale: &LinearScale, bar_width: f64) -> HoverLabel {
        HoverLabel {
            index: element.index,
            text: element.value.to_string(),
            x: element.x + bar_width / 2.0,
            y: scale.apply(f64::from(element.value)) - HOVER_LABEL_OFFSET,
        }
    }

    fn x_for(&self, index: usize) -> f64 {
        index as f64 * (self.bar_width + self.config.bar_padding)
    }

    fn place(&self, element: &mut VisualElement, value: u32, fill: BarFill) {
        let y = self.scale.apply(f64::from(value));
        element.value = value;
        element.x = self.x_for(element.index);
        element.y = y;
        element.height = (self.config.height - y).max(0.0);
        element.fill = fill;
    }
}

impl FrameRenderer for BarChart {
    fn initial(&mut self, values: &[u32]) {
        self.elements.clear();
        self.hover = None;
        self.highlight = Highlight::NONE;
        self.frames = 0;

        self.generation += 1;
        self.canvas = Some(Canvas {
            width: self.config.width,
            height: self.config.height,
            margin: self.config.margin,
            generation: self.generation,
        });

        let max = values.iter().copied().max().unwrap_or(0);
        self.scale = LinearScale::new(
            (0.0, f64::from(max) + self.config.headroom),
            (self.config.height, 0.0),
        );
        self.bar_width = if values.is_empty() {
            0.0
        } else {
            (self.config.width / values.len() as f64 - 1.0).max(0.0)
        };

        for (index, &value) in values.iter().enumerate() {
            let mut element = VisualElement {
                index,
                value,
                x: 0.0,
                y: self.config.height,
                width: self.bar_width,
                height: 0.0,
                fill: BarFill::Normal,
                opacity: 1.0,
            };
            self.place(&mut element, value, BarFill::Normal);
            self.elements.push(element);
        }

        debug!(
            bars = self.elements.len(),
            bar_width = self.bar_width,
            domain_max = self.scale.domain().1,
            "chart initialised"
        );
    }

    fn update(&mut self, values: &[u32], highlight: Highlight) {
        self.elements.truncate(values.len());

        for (index, &value) in values.iter().enumerate() {
            let fill = if highlight.contains(index) {
                BarFill::Highlighted
            } else {
                BarFill::Normal
            };

            if index >= self.elements.len() {
                // Enter at zero height on the floor, then grow to target.
                self.elements.push(VisualElement {
                    index,
                    value,
                    x: self.x_for(index),
                    y: self.config.height,
                    width: self.bar_width,
                    height: 0.0,
                    fill,
                    opacity: 1.0,
                });
            }

            let mut element = self.elements[index].clone();
            self.place(&mut element, value, fill);
            self.elements[index] = element;
        }

        if let Some(label) = &self.hover {
            match self.elements.get(label.index) {
                Some(element) => {
                    self.hover = Some(Self::label_for(element, &self.scale, self.bar_width));
                }
                None => self.hover = None,
            }
        }

        self.highlight = highlight;
        self.frames += 1;
    }

    fn finish(&mut self) {
        for element in &mut self.elements {
            element.fill = BarFill::Done;
        }
        self.highlight = Highlight::NONE;
    }
}
