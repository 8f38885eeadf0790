//! Terminal task browser.
//!
//! Loads the task collection once, then reads one command per line from
//! stdin and prints the updated screen to stdout after every change. Type
//! `help` for the list of commands.
//!
//! # Environment Variables
//!
//! - `TODO_BROWSER_BASE_URL`: collection service base URL
//!   (default: `https://jsonplaceholder.typicode.com`)
//! - `TODO_BROWSER_TIMEOUT_MS`: per-request timeout in milliseconds (default: 5000)
//! - `TODO_BROWSER_DETAIL_ORDERING`: `last_completed` (default) | `latest_requested`
//! - `RUST_LOG`: logging filter, written to stderr (default: `todo_browser=info`)

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_browser::browser::{Event, Session};
use todo_browser::infrastructure::{BrowserConfig, HttpCollectionSource};
use todo_browser::input::{self, UserAction};
use todo_browser::render::Screen;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_browser=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match BrowserConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!("Failed to create tokio runtime: {}", error);
            std::process::exit(1);
        }
    };

    runtime.block_on(run(config));
}

async fn run(config: BrowserConfig) {
    tracing::info!(
        base_url = %config.base_url,
        timeout = ?config.timeout,
        detail_ordering = %config.detail_ordering,
        "Starting todo browser"
    );

    let source = HttpCollectionSource::new(&config.base_url, config.timeout);
    let mut session = Session::new(Arc::new(source), config.detail_ordering);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    session.dispatch(Event::LoadRequested);
    print!("{}", Screen::new(session.state()));
    println!("{}", input::HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(error) => {
                        tracing::error!(%error, "Failed to read input");
                        break;
                    }
                };

                match input::parse_line(&line, session.state()) {
                    Ok(Some(UserAction::Dispatch(event))) => {
                        session.dispatch(event);
                        print!("{}", Screen::new(session.state()));
                    }
                    Ok(Some(UserAction::Help)) => println!("{}", input::HELP),
                    Ok(Some(UserAction::Quit)) => break,
                    Ok(None) => {}
                    Err(error) => println!("{error}"),
                }
            }
            applied = session.next_completion(), if session.in_flight() > 0 => {
                if applied {
                    print!("{}", Screen::new(session.state()));
                }
            }
        }
    }

    tracing::info!(in_flight = session.in_flight(), "Todo browser stopped");
}
