//! Terminal backend for [`BarChart`].
//!
//! Projects the chart's abstract geometry onto a ratatui cell grid. Bars are
//! filled from the bottom row up with full-block glyphs.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::config::ChartConfig;
use crate::renderers::chart::{BarChart, BarFill, VisualElement};

const BAR_SYMBOL: &str = "█";

/// Colour of a bar fill class.
#[must_use]
pub const fn fill_color(fill: BarFill) -> Color {
    match fill {
        BarFill::Normal => Color::Blue,
        BarFill::Highlighted => Color::Red,
        BarFill::Done => Color::White,
    }
}

/// Map a column offset inside a `width`-column area to a chart x coordinate.
///
/// Uses the column centre so that a column is attributed to the bar that
/// covers most of it.
#[must_use]
pub fn column_to_chart_x(column: u16, width: u16, chart_width: f64) -> f64 {
    if width == 0 {
        return 0.0;
    }
    (f64::from(column) + 0.5) / f64::from(width) * chart_width
}

/// The part of `area` left for bars once the chart margins are inset.
///
/// Margins are in chart units around the `width x height` canvas, so the
/// area spans `left + width + right` units across.
#[must_use]
pub fn plot_area(area: Rect, config: &ChartConfig) -> Rect {
    let margin = &config.margin;
    let (left, right) = inset(area.width, margin.left, config.width, margin.right);
    let (top, bottom) = inset(area.height, margin.top, config.height, margin.bottom);
    Rect {
        x: area.x.saturating_add(left),
        y: area.y.saturating_add(top),
        width: area.width.saturating_sub(left.saturating_add(right)),
        height: area.height.saturating_sub(top.saturating_add(bottom)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn inset(cells: u16, before: f64, extent: f64, after: f64) -> (u16, u16) {
    let total = before + extent + after;
    if total <= 0.0 {
        return (0, 0);
    }
    let unit = f64::from(cells) / total;
    let to_cells = |units: f64| (units * unit).round().clamp(0.0, f64::from(cells)) as u16;
    (to_cells(before), to_cells(after))
}

/// Ratatui widget drawing a [`BarChart`].
pub struct BarChartWidget<'a> {
    chart: &'a BarChart,
    block: Option<Block<'a>>,
}

impl<'a> BarChartWidget<'a> {
    /// Draw `chart` without a border.
    #[must_use]
    pub const fn new(chart: &'a BarChart) -> Self {
        Self { chart, block: None }
    }

    /// Surround the chart with `block`.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn columns(element: &VisualElement, area: Rect, sx: f64) -> (u16, u16) {
        let max = f64::from(area.width);
        let start = (element.x * sx).floor().clamp(0.0, max) as u16;
        let end = ((element.x + element.width) * sx).floor().clamp(0.0, max) as u16;
        (start, end.max(start + 1).min(area.width))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rows(element: &VisualElement, area: Rect, sy: f64) -> u16 {
        let rows = (element.height * sy).round().clamp(0.0, f64::from(area.height)) as u16;
        // Any non-empty bar stays visible.
        if rows == 0 && element.value > 0 && element.height > 0.0 {
            1
        } else {
            rows
        }
    }
}

impl Widget for BarChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        let config = self.chart.config();
        let inner = plot_area(inner, config);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let sx = f64::from(inner.width) / config.width;
        let sy = f64::from(inner.height) / config.height;
        let bottom = inner.y + inner.height - 1;

        for element in self.chart.elements() {
            let (start, end) = Self::columns(element, inner, sx);
            if start >= inner.width {
                continue;
            }
            let mut style = Style::default().fg(fill_color(element.fill));
            if element.opacity < 1.0 {
                style = style.add_modifier(Modifier::DIM);
            }
            for row in 0..Self::rows(element, inner, sy) {
                for column in start..end {
                    if let Some(cell) = buf.cell_mut((inner.x + column, bottom - row)) {
                        cell.set_symbol(BAR_SYMBOL).set_style(style);
                    }
                }
            }
        }

        if let Some(label) = self.chart.hover_label() {
            let Some(element) = self.chart.elements().get(label.index) else {
                return;
            };
            let rows = Self::rows(element, inner, sy);
            let row = bottom.saturating_sub(rows).max(inner.y);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let centre = (label.x * sx).floor().clamp(0.0, f64::from(inner.width)) as u16;
            let text_width = u16::try_from(label.text.len()).unwrap_or(u16::MAX);
            let column = centre
                .saturating_sub(text_width / 2)
                .min(inner.width.saturating_sub(text_width));
            buf.set_string(
                inner.x + column,
                row,
                &label.text,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::engine::Highlight;
    use crate::renderers::FrameRenderer;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn chart_with(values: &[u32]) -> BarChart {
        let mut chart = BarChart::new(ChartConfig::default());
        chart.initial(values);
        chart
    }

    fn render(chart: &BarChart, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal
            .draw(|f| f.render_widget(BarChartWidget::new(chart), f.area()))
            .expect("chart should render");
        terminal.backend().buffer().clone()
    }

    fn column_height(buf: &Buffer, column: u16) -> u16 {
        let height = buf.area.height;
        (0..height)
            .filter(|&row| buf[(column, row)].symbol() == BAR_SYMBOL)
            .count()
            .try_into()
            .expect("fits in u16")
    }

    #[test]
    fn test_taller_values_draw_taller_bars() {
        let chart = chart_with(&[10, 40, 20, 41]);
        let buf = render(&chart, 40, 20);
        let first = column_height(&buf, 2);
        let second = column_height(&buf, 12);
        assert!(second > first, "{second} > {first}");
    }

    #[test]
    fn test_bars_grow_from_bottom() {
        let chart = chart_with(&[50, 51]);
        let buf = render(&chart, 20, 10);
        assert_eq!(buf[(2, 9)].symbol(), BAR_SYMBOL);
        assert_ne!(buf[(2, 0)].symbol(), BAR_SYMBOL);
    }

    #[test]
    fn test_highlight_colours() {
        let mut chart = chart_with(&[30, 20, 31]);
        chart.update(&[20, 30, 31], Highlight::pair(0, 1));
        let buf = render(&chart, 30, 10);
        assert_eq!(buf[(1, 9)].fg, Color::Red);
        assert_eq!(buf[(25, 9)].fg, Color::Blue);

        chart.finish();
        let buf = render(&chart, 30, 10);
        assert_eq!(buf[(1, 9)].fg, Color::White);
        assert_eq!(buf[(25, 9)].fg, Color::White);
    }

    #[test]
    fn test_hover_label_drawn_above_bar() {
        let mut chart = chart_with(&[12, 90, 91]);
        chart.hover(0);
        let buf = render(&chart, 30, 12);
        let text: String = (0..buf.area.height)
            .flat_map(|row| (0..buf.area.width).map(move |col| (col, row)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("12"));
        assert!(buf.content().iter().any(|c| c.modifier.contains(Modifier::DIM)));
    }

    #[test]
    fn test_empty_chart_renders_nothing() {
        let chart = BarChart::new(ChartConfig::default());
        let buf = render(&chart, 10, 5);
        assert!(buf.content().iter().all(|c| c.symbol() != BAR_SYMBOL));
    }

    #[test]
    fn test_block_border_shrinks_plot_area() {
        let chart = chart_with(&[5, 6]);
        let backend = TestBackend::new(20, 8);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal
            .draw(|f| {
                let widget = BarChartWidget::new(&chart).block(Block::bordered().title("bars"));
                f.render_widget(widget, f.area());
            })
            .expect("chart should render");
        let buf = terminal.backend().buffer();
        assert_ne!(buf[(0, 7)].symbol(), BAR_SYMBOL);
        assert_eq!(buf[(1, 6)].symbol(), BAR_SYMBOL);
    }

    #[test]
    fn test_margins_inset_plot_area() {
        let mut config = ChartConfig::default();
        config.margin.left = 400.0;
        config.margin.right = 0.0;
        config.margin.top = 0.0;
        config.margin.bottom = 0.0;

        let plot = plot_area(Rect::new(0, 0, 24, 10), &config);
        assert_eq!(plot, Rect::new(8, 0, 16, 10));

        let mut chart = BarChart::new(config);
        chart.initial(&[50, 51]);
        let buf = render(&chart, 24, 10);
        assert!((0..8).all(|col| column_height(&buf, col) == 0));
        assert!(column_height(&buf, 9) > 0);
    }

    #[test]
    fn test_default_margins_keep_most_of_area() {
        let plot = plot_area(Rect::new(2, 3, 96, 17), &ChartConfig::default());
        assert_eq!(plot, Rect::new(4, 4, 92, 15));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let chart = chart_with(&(1..=100).collect::<Vec<_>>());
        let _ = render(&chart, 3, 1);
    }

    #[test]
    fn test_column_to_chart_x() {
        assert!((column_to_chart_x(0, 10, 100.0) - 5.0).abs() < f64::EPSILON);
        assert!((column_to_chart_x(9, 10, 100.0) - 95.0).abs() < f64::EPSILON);
        assert!(column_to_chart_x(3, 0, 100.0).abs() < f64::EPSILON);
    }
}
