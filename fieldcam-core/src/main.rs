//! src/main.rs
//! Field survey file manager: browse homes and entrances, take photos

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{signal, sync::Notify};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use fieldcam_core::{
    Logger,
    camera::camera_from_config,
    config::Config,
    controller::{
        action_dispatcher::{ActionDispatcher, DispatchResult, DispatcherStats},
        event_loop::EventLoop,
    },
    fs::filesystem::StdFileSystem,
    model::{app_state::AppState, navigator::Navigator, ui_state::UIState},
    view::{theme, ui::UIRenderer},
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    state: AppState,
    action_dispatcher: ActionDispatcher,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
    started: Instant,
    _log_guard: WorkerGuard,
}

impl App {
    async fn new() -> Result<Self> {
        let config = Config::load().await.unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        });

        let log_guard = Logger::init(&config.logging).context("Failed to initialize logging")?;
        info!("Starting fieldcam");
        theme::init_theme();

        let base_path = config.base_path()?;
        info!(base = %base_path.display(), "Using base directory");

        let navigator = Navigator::new(base_path, Box::new(StdFileSystem));
        let camera = camera_from_config(&config.camera);
        let state = AppState::new(
            navigator,
            camera,
            UIState::new(config.notification_timeout),
            config.entrance_prefix.as_str(),
        )
        .context("Failed to open base directory")?;

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            event_loop: EventLoop::new(TICK_RATE),
            state,
            action_dispatcher: ActionDispatcher::new(),
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
            started: Instant::now(),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        loop {
            self.render()?;

            let next = tokio::select! {
                () = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    None
                }

                action = self.event_loop.next_action(&self.state) => action,
            };

            let Some(action) = next else {
                break;
            };

            if self.action_dispatcher.handle(&mut self.state, action) == DispatchResult::Quit {
                info!("Quit requested");
                break;
            }
        }

        self.log_final_metrics();
        info!("Event loop terminated cleanly");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if !self.state.ui.needs_redraw() {
            return Ok(());
        }

        let start = Instant::now();
        let state = &self.state;
        let renderer = &mut self.ui_renderer;
        let mut hits = None;

        self.terminal
            .draw(|frame: &mut Frame<'_>| {
                hits = Some(renderer.render(frame, state));
            })
            .context("Failed to draw terminal")?;

        if let Some(hits) = hits {
            self.event_loop.sync(&hits);
        }
        self.state.ui.clear_redraw();

        let duration = start.elapsed();
        if duration.as_millis() > 16 {
            warn!("Slow render: {}ms (target: <16ms)", duration.as_millis());
        } else {
            debug!("Frame rendered in {}us", duration.as_micros());
        }

        Ok(())
    }

    fn log_final_metrics(&self) {
        let dispatcher_stats: DispatcherStats = self.action_dispatcher.get_stats();
        let render_stats = self.ui_renderer.stats();

        info!(
            uptime_secs = self.started.elapsed().as_secs(),
            events = self.event_loop.event_count(),
            actions = dispatcher_stats.total_actions,
            failed_actions = dispatcher_stats.failed_actions,
            frames = render_stats.frames,
            slow_frames = render_stats.slow,
            photos = self.state.photo_count(),
            "Final metrics"
        );
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                match signal(SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = sigterm.recv() => info!("Received SIGTERM"),
                            _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                        }
                    }
                    Err(e) => {
                        warn!("Failed to create SIGTERM handler: {}", e);
                        if let Err(e) = signal::ctrl_c().await {
                            warn!("Failed to listen for Ctrl+C: {}", e);
                            return;
                        }
                        info!("Received Ctrl+C");
                    }
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
