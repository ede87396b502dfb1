//! Sortviz - Terminal User Interface
//!
//! Animates sorting algorithms as a live bar chart using ratatui.
//! App logic lives in `sortviz::tui::sort_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use sortviz::config::VizConfig;
    use sortviz::logging::{self, Fallback};
    use sortviz::tui::sort_app::SortApp;

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match VizConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                eprintln!("Usage: sort-tui [path/to/config.yaml]");
                std::process::exit(1);
            }
        },
        None => VizConfig::default(),
    };

    // The alternate screen owns stdout/stderr: log to a file or not at all.
    if let Err(e) = logging::init(&config.logging, Fallback::Silent) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let app = match SortApp::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, tui::run(app))
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin sort-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEvent,
            MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use sortviz::engine::{Control, RunState};
    use sortviz::renderers::tui::plot_area;
    use sortviz::renderers::BarChartWidget;
    use sortviz::tui::sort_app::{AppAction, SortApp};
    use std::io;
    use std::time::Duration;
    use tracing::info;

    /// Redraw interval; runs advance on their own timers in between.
    const FRAME_INTERVAL: Duration = Duration::from_millis(16);

    pub async fn run(mut app: SortApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            crossterm::cursor::Hide
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        )?;

        result
    }

    async fn run_main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut SortApp) -> io::Result<()> {
        loop {
            terminal.draw(|f| ui(f, app))?;
            app.tick();

            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if app.handle_key(key.code) == AppAction::Start {
                            if let Some(job) = app.begin_run() {
                                tokio::task::spawn_local(async move {
                                    let outcome = job.run().await;
                                    info!(?outcome, "run ended");
                                });
                            }
                        }
                    }
                    Event::Mouse(mouse) => {
                        let size = terminal.size()?;
                        let area = chart_area(Rect::new(0, 0, size.width, size.height));
                        handle_mouse(app, mouse, area);
                    }
                    _ => {}
                }
            }

            if app.should_quit() {
                break;
            }

            // Yield so spawned runs make progress between draws.
            tokio::time::sleep(FRAME_INTERVAL).await;
        }

        Ok(())
    }

    fn handle_mouse(app: &mut SortApp, mouse: MouseEvent, area: Rect) {
        if !matches!(mouse.kind, MouseEventKind::Moved) {
            return;
        }
        let area = plot_area(area, app.chart.borrow().config());
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        if inside {
            app.hover_at_column(mouse.column - area.x, area.width);
        } else {
            app.leave();
        }
    }

    fn layout(area: Rect) -> [Rect; 4] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2], chunks[3]]
    }

    /// Inner area of the chart block, where bars are drawn.
    fn chart_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(layout(area)[1])
    }

    fn ui(f: &mut Frame, app: &SortApp) {
        let [title, chart, controls, status] = layout(f.area());

        render_title(f, title, app);
        render_chart(f, chart, app);
        render_controls(f, controls, app);
        render_status_bar(f, status, app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &SortApp) {
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " Sorting Visualizer ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("- "),
            Span::styled(app.algorithm_name(), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("  [{} bars]", app.sequence.len()),
                Style::default().fg(Color::Gray),
            ),
        ])])
        .block(Block::default().borders(Borders::ALL).title("sortviz"));
        f.render_widget(title, area);
    }

    fn render_chart(f: &mut Frame, area: Rect, app: &SortApp) {
        let chart = app.chart.borrow();
        let widget = BarChartWidget::new(&chart)
            .block(Block::default().borders(Borders::ALL).title("Chart"));
        f.render_widget(widget, area);
    }

    fn control_style(enabled: bool) -> Style {
        if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        }
    }

    fn render_controls(f: &mut Frame, area: Rect, app: &SortApp) {
        let key = Style::default().fg(Color::Yellow);
        let line = Line::from(vec![
            Span::styled("[s]", key),
            Span::styled(" Start  ", control_style(app.is_enabled(Control::Start))),
            Span::styled("[d]", key),
            Span::styled(
                format!(" Size: {}  ", app.data_size),
                control_style(app.is_enabled(Control::DataSize)),
            ),
            Span::styled("[a]", key),
            Span::styled(
                format!(" Algorithm: {}  ", app.algorithm_name()),
                control_style(app.is_enabled(Control::Algorithm)),
            ),
            Span::styled("[r]", key),
            Span::raw(" Reset  "),
            Span::styled("[q]", key),
            Span::raw(" Quit"),
        ]);
        let controls =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &SortApp) {
        let state = app.state();
        let state_color = match state {
            RunState::Idle => Color::Gray,
            RunState::Running => Color::Green,
            RunState::Finished => Color::Cyan,
        };
        let mut spans = vec![
            Span::styled(
                format!(" {state} "),
                Style::default()
                    .fg(state_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("| Time: {} ", app.elapsed_text())),
            Span::raw(format!("| Frame: {} ", app.frame_count)),
        ];
        if let Some(error) = app.controller.last_error() {
            spans.push(Span::styled(
                format!("| {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        let status =
            Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

}
