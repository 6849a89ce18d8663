use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use research_tui::{
    app::{update, AppState},
    config::Config,
    event::AppEvent,
    logging,
    transport::{apply_effects, LangGraphClient, RunTransport},
    view::{conversation_scroll_limit, render},
};
use std::sync::mpsc;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    // Install color-eyre panic handler for better error messages
    color_eyre::install()?;

    // Configuration errors (e.g. unknown effort) stop us before the terminal is touched
    let config = Config::parse();
    config.validate()?;

    logging::init(&config.log_path())
        .map_err(|e| eyre!("failed to initialize logging: {}", e))?;
    tracing::info!(api_url = %config.api_url, effort = %config.effort, model = %config.model, "starting");

    let mut state = AppState::with_settings(config.effort, &config.model);

    // Stream events arrive on this channel from the transport runtime
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let mut transport = LangGraphClient::new(&config, tx)?;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop (Elm Architecture)
    let tick_rate = Duration::from_millis(250);

    let result = run_event_loop(&mut terminal, &mut state, &rx, &mut transport, tick_rate);

    transport.stop();

    // Terminal cleanup (always execute even if event loop errored)
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

/// Main event loop following Elm Architecture.
/// Separated from main() for testability.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    stream_rx: &mpsc::Receiver<AppEvent>,
    transport: &mut impl RunTransport,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Render current state
        let area = terminal
            .draw(|frame| {
                render(state, frame);
            })?
            .area;
        state.ui.conversation_scroll_max = conversation_scroll_limit(state, area);

        // Poll keyboard events with timeout
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let effects = update(state, AppEvent::Key(key));
                apply_effects(transport, effects);
            }
        }

        // Drain stream events, one at a time, in arrival order
        while let Ok(event) = stream_rx.try_recv() {
            let effects = update(state, event);
            apply_effects(transport, effects);
        }

        // Tick event
        if last_tick.elapsed() >= tick_rate {
            update(state, AppEvent::Tick(Utc::now()));
            last_tick = Instant::now();
        }

        // Check quit condition
        if state.meta.should_quit {
            break;
        }
    }

    Ok(())
}
