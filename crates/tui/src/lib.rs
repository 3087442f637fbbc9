pub mod app;
pub mod async_ops;
pub mod config;
pub mod listing;
pub mod pagination;
pub mod platform;
pub mod presenter;
pub mod workflow;
mod theme;
mod ui;
mod views;

use anyhow::Result;
use app::App;
use async_ops::CommandResult;
use chrono::Utc;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use platform::{Platform, SystemPlatform};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::info;
use vidbrief_api_client::{ApiClient, VideoService};
use vidbrief_runtime_config::AppConfig;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: AppConfig,
    /// Search (or video link) submitted right after the first listing load.
    pub initial_query: Option<String>,
}

/// Launch the TUI against the configured server.
pub fn run(options: RunOptions) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let client = ApiClient::new(
        &options.config.server.url,
        config::request_timeout(&options.config),
    )?;
    let service: Arc<dyn VideoService> = Arc::new(client);
    let mut platform = SystemPlatform::new(options.config.export.resolved_directory());
    info!(server = %options.config.server.url, "starting vidbrief");

    let mut app = App::new();
    match options.initial_query.filter(|q| !q.trim().is_empty()) {
        Some(query) => {
            app.search.buffer = query.clone();
            app.submit_search(&query);
            // A video link summarizes without listing; load the default
            // page behind it.
            if !app.pagination.is_fetching() {
                app.load_initial();
            }
        }
        None => app.load_initial(),
    }

    let mouse_capture_enabled = options.config.ui.mouse_capture;
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    if mouse_capture_enabled {
        stdout().execute(EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(
        &mut terminal,
        &mut app,
        &Dispatcher::new(&rt, service),
        &mut platform,
        Duration::from_millis(options.config.ui.tick_ms.max(10)),
        mouse_capture_enabled,
    );

    // Restore terminal
    disable_raw_mode()?;
    if mouse_capture_enabled {
        stdout().execute(DisableMouseCapture)?;
    }
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Runs network commands on the tokio runtime and hands results back to
/// the UI thread over a channel, so the loop never waits on the network.
struct Dispatcher<'rt> {
    rt: &'rt tokio::runtime::Runtime,
    service: Arc<dyn VideoService>,
    tx: mpsc::Sender<CommandResult>,
    rx: mpsc::Receiver<CommandResult>,
}

impl<'rt> Dispatcher<'rt> {
    fn new(rt: &'rt tokio::runtime::Runtime, service: Arc<dyn VideoService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rt,
            service,
            tx,
            rx,
        }
    }

    fn dispatch(&self, app: &mut App) {
        for cmd in app.take_commands() {
            let service = Arc::clone(&self.service);
            let tx = self.tx.clone();
            self.rt.spawn(async move {
                let result = async_ops::execute(cmd, service.as_ref()).await;
                // The receiver is gone only after the UI has quit.
                let _ = tx.send(result);
            });
        }
    }

    fn drain(&self, app: &mut App) {
        while let Ok(result) = self.rx.try_recv() {
            app.apply_command_result(result, Utc::now());
        }
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher<'_>,
    platform: &mut dyn Platform,
    tick: Duration,
    mouse_capture_enabled: bool,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        dispatcher.drain(app);
        dispatcher.dispatch(app);

        let size = terminal.size()?;
        app.set_viewport(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| ui::render(frame, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    if app.handle_key(key.code, platform) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    if !mouse_capture_enabled {
                        continue;
                    }
                    if app.handle_mouse(mouse, platform) {
                        break;
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}
