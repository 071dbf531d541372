use mochi::api::MochiClient;
use mochi::app::{App, AppMessage};
use mochi::auth::{CredentialsManager, RequestContext};
use mochi::cli::{parse_args, run_cli_command};
use mochi::config::Config;
use mochi::{logging, ui};

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}; using defaults", e);
            Config::default()
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init(&config);
    tracing::info!("mochi {} starting", mochi::cli::VERSION);

    if let Some(result) = run_cli_command(command, &config) {
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // Load stored credentials; an expired token is treated as signed out
    let credentials = CredentialsManager::new()?.load();
    if credentials.has_token() && !credentials.is_valid() {
        tracing::warn!("Stored token has expired; continuing signed out");
    }
    let ctx = RequestContext::new(&config.api_url).with_credentials(&credentials);
    let client = MochiClient::with_timeout(config.request_timeout())?;

    // Create Tokio runtime for background requests and the event loop
    let runtime = tokio::runtime::Runtime::new()?;

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(client, ctx, &config).with_username(credentials.username.clone());

    let result = runtime.block_on(async {
        // Requests are spawned onto the runtime, so initialize inside it
        app.initialize();
        run_app(&mut terminal, &mut app).await
    });

    restore_terminal(&mut terminal)?;
    tracing::info!("mochi exiting");
    result
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw the UI only when something changed
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        // 16ms tick drives the spinner
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Terminal event error: {}", e);
                    }
                    None => return Ok(()),
                }
            }

            Some(msg) = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }
    }
}
