//! stackread - Substack RSS reader
//!
//! A TUI for reading Substack publications over RSS.
//!
//! Features:
//! - Resolve a publication name or URL into its feed
//! - Browse posts and read them as plain text
//! - Light/dark theme, toggled with `t` and remembered across runs
//!
//! Usage: stackread [OPTIONS] <publication>

mod app;
mod feed;
mod store;
mod theme;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use feed::FeedSource;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("stackread {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let ephemeral = args.iter().any(|a| a == "--ephemeral" || a == "-e");

    let Some(publication) = args.iter().find(|a| !a.starts_with('-')) else {
        print_help();
        std::process::exit(2);
    };

    // Run the application
    let result = run_app(publication, ephemeral);

    // Terminal state is restored inside run_app, even on error
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"stackread - Substack RSS reader

USAGE:
    stackread [OPTIONS] <publication>

ARGS:
    <publication>    Publication name, host, or feed URL
                     (e.g. "myblog" or "https://myblog.substack.com")

OPTIONS:
    -e, --ephemeral  Do not persist preference changes
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    1-3              Switch tabs
    j/k              Navigate up/down
    g/G              Jump to top/bottom
    Enter            Open post
    Esc              Back to posts
    t                Toggle light/dark theme
    r                Refresh feed
    q                Quit

TABS:
    [1] Posts        Latest posts from the feed
    [2] Reader       Read the opened post
    [3] Help         Keybinding reference

PREFERENCES:
    ~/.config/stackread/preferences.toml
"#
    );
}

fn run_app(publication: &str, ephemeral: bool) -> Result<()> {
    // Resolve and fetch the feed before touching the terminal
    let source =
        FeedSource::resolve(publication).context("Failed to resolve publication")?;
    eprintln!("Feed: {}", source.url);

    eprintln!("Fetching feed...");
    let xml = feed::fetch_feed(&source.url)?;
    let channel = feed::parse_feed(&xml).context("Failed to parse feed")?;
    eprintln!("Loaded {} posts from {}", channel.posts.len(), channel.title);

    // Load preferences
    let prefs: Box<dyn store::PreferenceStore> = if ephemeral {
        Box::new(store::MemoryStore::new())
    } else {
        Box::new(store::TomlStore::load().context("Failed to load preferences")?)
    };

    // Create application state
    let mut app = App::new(channel, Some(source), prefs, app::default_controls());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Expire stale flash messages
        app.tick();

        // Poll for events with timeout (so flash expiry shows without input)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }
}
