use std::time::{Duration, Instant};

use album_viewer::logging::{clear_log_file, init_logging, log_file_path};
use album_viewer::{
    AlbumConfig, App, AppMode, Event, EventHandler, TerminalGuard, init_panic_hook, init_tui,
};
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, value_parser};
use crossterm::ExecutableCommand;
use crossterm::event::{KeyCode, KeyEventKind};
use crossterm::terminal::SetTitle;
use log::{error, info};
use ratatui::Terminal;
use ratatui::backend::Backend as RatatuiBackend;

/// One display frame at about 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Seconds moved by the seek keys.
const SEEK_STEP_SECS: f64 = 5.0;

fn main() -> Result<()>
{
    init_panic_hook();

    // Parse command line arguments
    let matches = Command::new("album_viewer")
        .about("A terminal album viewer with page-turning artwork")
        // Inform about the log file
        .after_help(format!(
            "Logs are written to the following file: {}",
            log_file_path().display()
        ))
        .arg(
            Arg::new("config")
                .help("Album configuration file or HTTP(S) URL")
                .value_name("CONFIG")
                .default_value("album.json")
                .index(1),
        )
        .arg(
            Arg::new("song")
                .long("song")
                .short('s')
                .help("Track to select first, by file name without .mp3 or by number")
                .value_name("SLUG"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .help("Artwork page to start on (0-3)")
                .value_name("N")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("no-auto-advance")
                .long("no-auto-advance")
                .help("Do not turn the artwork pages automatically")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear-log")
                .long("clear-log")
                .help("Remove the log file and exit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("clear-log")
    {
        clear_log_file()?;
        println!("Removed {}", log_file_path().display());
        return Ok(());
    }

    init_logging()?;

    let source = matches
        .get_one::<String>("config")
        .map_or("album.json", String::as_str);
    let config = AlbumConfig::load(source).inspect_err(|err| error!("{err:#}"))?;

    let app = App::new(
        config,
        matches
            .get_one::<String>("song")
            .map(String::as_str),
        matches.get_one::<i64>("page").copied(),
        !matches.get_flag("no-auto-advance"),
    )?;

    // Use RAII to ensure terminal cleanup happens
    let _terminal_guard = TerminalGuard::new().context("Failed to set up the terminal")?;
    std::io::stdout()
        .execute(SetTitle(app.config.page_title()))
        .context("Failed to set the window title")?;

    let mut terminal = init_tui()?;

    let event_handler = EventHandler::new(FRAME_INTERVAL);

    // Terminal will be cleaned up automatically when _terminal_guard is dropped
    // Just propagate any error from run_app
    run_app(&mut terminal, app, &event_handler)
}

/// Run the main loop
///
/// # Arguments
///
/// * `terminal` - The terminal to draw to
/// * `app` - The app to run
/// * `event_handler` - The event handler to handle events
///
/// # Errors
///
/// Returns an error if the terminal fails to draw to the screen or the event
/// channel disconnects.
fn run_app<T: RatatuiBackend>(
    terminal: &mut Terminal<T>,
    mut app: App,
    event_handler: &EventHandler,
) -> Result<()>
where
    T::Error: Send + Sync + 'static,
{
    let started = Instant::now();

    loop
    {
        terminal.draw(|frame| app.render(frame))?;

        match event_handler.next()?
        {
            Event::Tick => app.on_tick(started.elapsed()),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Resize(width, height) =>
            {
                info!("Terminal resized to {width}x{height}");
                app.on_resize();
            }
            // Key release and repeat events are reported on some platforms
            Event::Key(key) if key.kind != KeyEventKind::Press =>
            {}
            Event::Key(key) => match (app.mode, key.code)
            {
                // Quit with 'q' from anywhere
                (_, KeyCode::Char('q')) =>
                {
                    app.should_quit = true;
                }

                // Help toggle with '?'
                (AppMode::Normal | AppMode::Help, KeyCode::Char('?')) =>
                {
                    app.toggle_help();
                }
                (AppMode::Help | AppMode::Lyrics, KeyCode::Esc) =>
                {
                    app.close_overlay();
                }
                (AppMode::Normal | AppMode::Lyrics, KeyCode::Char('l')) =>
                {
                    if app.mode == AppMode::Lyrics
                    {
                        app.close_overlay();
                    }
                    else
                    {
                        app.open_lyrics();
                    }
                }

                // Player
                (_, KeyCode::Char(' ')) =>
                {
                    app.player.toggle_play();
                }
                (_, KeyCode::Char('n')) =>
                {
                    app.next_track();
                }
                (_, KeyCode::Char('p')) =>
                {
                    app.prev_track();
                }
                (_, KeyCode::Char('[')) =>
                {
                    app.player.seek_by(-SEEK_STEP_SECS);
                }
                (_, KeyCode::Char(']')) =>
                {
                    app.player.seek_by(SEEK_STEP_SECS);
                }

                // Track list
                (AppMode::Normal, KeyCode::Char('j') | KeyCode::Down) =>
                {
                    app.select_next();
                }
                (AppMode::Normal, KeyCode::Char('k') | KeyCode::Up) =>
                {
                    app.select_previous();
                }
                (AppMode::Normal, KeyCode::Enter) =>
                {
                    app.play_selected();
                }

                // Artwork
                (AppMode::Normal, KeyCode::Left) =>
                {
                    app.page_backward();
                }
                (AppMode::Normal, KeyCode::Right) =>
                {
                    app.page_forward();
                }
                (AppMode::Normal, KeyCode::Tab) =>
                {
                    app.viewer.tap();
                }
                (AppMode::Normal, KeyCode::Char(digit @ '1'..='4')) =>
                {
                    app.viewer
                        .go_to_page(i64::from(u32::from(digit) - u32::from('1')));
                }

                // 2 for borders
                (AppMode::Normal, KeyCode::PageDown) =>
                {
                    app.scroll_down(
                        terminal
                            .size()?
                            .height
                            .saturating_sub(2),
                    );
                }
                (AppMode::Normal, KeyCode::PageUp) =>
                {
                    app.scroll_up(
                        terminal
                            .size()?
                            .height
                            .saturating_sub(2),
                    );
                }

                _ =>
                {} // Ignore other key combinations
            },
        }

        if app.should_quit
        {
            app.viewer.unmount();
            break;
        }
    }

    Ok(())
}
