use judgeflow::api::JudgeApi;
use judgeflow::app::{App, AppMessage, Screen};
use judgeflow::cli::{parse_args, run_cli_command, LaunchOptions};
use judgeflow::config::ClientConfig;
use judgeflow::logging;
use judgeflow::terminal::{setup_panic_hook, TerminalManager};
use judgeflow::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Animation and timer tick.
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let options = match run_cli_command(parse_args(std::env::args())) {
        Ok(options) => options,
        Err(code) => std::process::exit(code),
    };

    color_eyre::install()?;
    let config = build_config(&options);
    let log_path = logging::init(&config.log_filter);

    // Restore the terminal before the panic message is printed
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        let mut manager = TerminalManager::new()?;

        let api = Arc::new(JudgeApi::from_config(&config));
        let mut app = App::new(api);
        if let Some(path) = options.open.clone() {
            app.pending_open = Some(path);
            app.after_login = Some(Screen::Playground);
        }
        app.start();

        let result = run_app(manager.terminal(), &mut app).await;
        manager.restore()?;
        result
    });

    if let Err(e) = &result {
        tracing::error!("Exited with error: {:?}", e);
        if let Some(path) = log_path {
            eprintln!("See {} for details.", path.display());
        }
    }
    result
}

fn build_config(options: &LaunchOptions) -> ClientConfig {
    let config = ClientConfig::from_env();
    match &options.api_url {
        Some(url) => config.with_api_base_url(url.as_str()),
        None => config,
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Taken out of the app so select! can own it
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Terminal event error: {}", e);
                    }
                    None => app.quit(),
                }
            }

            Some(msg) = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
