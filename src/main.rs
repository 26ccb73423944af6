use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use devhub::catalog;
use devhub::logging::{clear_log_file, init_logging, log_file_path};
use devhub::resolver::DocumentStatus;
use devhub::{App, AppMode, Book, Category, ContentResolver, Event, EventHandler, NavigationState};
use devhub::{Selector, TerminalGuard, Tui, init_panic_hook, init_tui};
use log::{info, warn};

fn main() -> Result<()>
{
    let matches = cli().get_matches();

    if matches.get_flag("clear-log")
    {
        clear_log_file()?;
        println!("Log file cleared");
        return Ok(());
    }

    init_logging()?;

    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let resolver = ContentResolver::new(root);

    info!("Starting with content root {}", resolver.root().display());

    if matches.get_flag("check")
    {
        return check_documents(&resolver);
    }

    let navigation = initial_navigation(&matches)?;

    init_panic_hook();

    // Use RAII to ensure terminal cleanup happens
    let _terminal_guard = TerminalGuard::new()?;
    let mut terminal = init_tui()?;

    let app = App::new(resolver, navigation);

    // Create event handler with 250ms tick rate
    let event_handler = EventHandler::new(Duration::from_millis(250));

    run_app(&mut terminal, app, &event_handler)
}

/// Command line definition.
fn cli() -> Command
{
    let log_hint = log_file_path().map_or_else(
        |_| String::from("Logs are written to the user cache directory."),
        |path| format!("Logs are written to {}", path.display()),
    );

    Command::new("devhub")
        .about("A terminal viewer for markdown cheat sheets")
        .after_help(log_hint)
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .help("Directory holding the markdown content")
                .value_name("DIR")
                .env("DEVHUB_ROOT")
                .default_value(".")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .short('c')
                .help("Open a category, e.g. datasci or \"📊 Data Science\"")
                .value_name("NAME")
                .conflicts_with("book"),
        )
        .arg(
            Arg::new("book")
                .long("book")
                .short('b')
                .help("Open a book, e.g. pcc or atbs")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report missing or unreadable documents and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear-log")
                .long("clear-log")
                .help("Remove the log file and exit")
                .action(ArgAction::SetTrue),
        )
}

/// Applies `--category` or `--book` to a fresh navigation state.
///
/// # Errors
///
/// Returns an error if the name matches no category or book.
fn initial_navigation(matches: &ArgMatches) -> Result<NavigationState>
{
    let mut navigation = NavigationState::new();

    if let Some(name) = matches.get_one::<String>("category")
    {
        navigation = navigation.select_primary(Some(name.parse::<Category>()?));
    }

    if let Some(name) = matches.get_one::<String>("book")
    {
        navigation = navigation.select_book(Some(name.parse::<Book>()?));
    }

    Ok(navigation)
}

/// Prints the status of every document in the catalog.
///
/// # Errors
///
/// Returns an error if any document is missing or unreadable.
fn check_documents(resolver: &ContentResolver) -> Result<()>
{
    let mut total: usize = 0;
    let mut failed: usize = 0;

    for tab in catalog::all_tabs()
    {
        total = total.saturating_add(1);

        match resolver.status(tab.path)
        {
            DocumentStatus::Present => println!("ok       {}", tab.path),
            DocumentStatus::Missing =>
            {
                failed = failed.saturating_add(1);
                println!("missing  {}", tab.path);
            }
            DocumentStatus::Unreadable(reason) =>
            {
                failed = failed.saturating_add(1);
                warn!("Unreadable document {}: {reason}", tab.path);
                println!("error    {} ({reason})", tab.path);
            }
        }
    }

    if failed > 0
    {
        bail!("{failed} of {total} documents are missing or unreadable");
    }

    println!("All {total} documents present");
    Ok(())
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
/// Returns an error if the terminal fails to draw to the screen or input
/// can no longer be read.
fn run_app(terminal: &mut Tui, mut app: App, event_handler: &EventHandler) -> Result<()>
{
    loop
    {
        terminal.draw(|frame| app.render(frame))?;

        // Ticks and resizes only need the redraw above
        if let Event::Key(key) = event_handler.next()?
        {
            handle_key(&mut app, key);
        }

        if app.should_quit
        {
            break;
        }
    }

    Ok(())
}

/// Applies a key press to the app.
fn handle_key(app: &mut App, key: KeyEvent)
{
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    match (app.mode, key.code)
    {
        // Quit with 'q' in normal mode
        (AppMode::Normal, KeyCode::Char('q')) =>
        {
            app.should_quit = true;
        }

        // Help toggle with '?'
        (AppMode::Normal | AppMode::Help, KeyCode::Char('?')) |
        (AppMode::Help, KeyCode::Esc) =>
        {
            app.toggle_help();
        }

        // Selector popups
        (AppMode::Normal, KeyCode::Char('c')) =>
        {
            app.open_picker(Selector::Category);
        }
        (AppMode::Normal, KeyCode::Char('b')) =>
        {
            app.open_picker(Selector::Book);
        }
        (AppMode::Picker, KeyCode::Char('j') | KeyCode::Down) =>
        {
            app.picker_next();
        }
        (AppMode::Picker, KeyCode::Char('k') | KeyCode::Up) =>
        {
            app.picker_previous();
        }
        (AppMode::Picker, KeyCode::Enter) =>
        {
            app.confirm_picker();
        }
        (AppMode::Picker, KeyCode::Esc | KeyCode::Char('q')) =>
        {
            app.cancel_picker();
        }

        // Tabs
        (AppMode::Normal, KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab) =>
        {
            app.next_tab();
        }
        (AppMode::Normal, KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab) =>
        {
            app.prev_tab();
        }

        // Navigation in normal mode
        (AppMode::Normal, KeyCode::Char('j') | KeyCode::Down) =>
        {
            app.scroll_down(1);
        }
        (AppMode::Normal, KeyCode::Char('k') | KeyCode::Up) =>
        {
            app.scroll_up(1);
        }
        (AppMode::Normal, KeyCode::Char(' ') | KeyCode::PageDown) =>
        {
            app.page_down();
        }
        (AppMode::Normal, KeyCode::PageUp) =>
        {
            app.page_up();
        }
        (AppMode::Normal, KeyCode::Char('g') | KeyCode::Home) =>
        {
            app.scroll = 0;
        }
        (AppMode::Normal, KeyCode::Char('G') | KeyCode::End) =>
        {
            app.scroll_down(usize::MAX);
        }

        // Search handling
        (AppMode::Normal, KeyCode::Char('/')) =>
        {
            app.enter_search_mode();
        }
        (AppMode::Search, KeyCode::Enter) =>
        {
            app.perform_search();
            app.exit_search_mode();
        }
        (AppMode::Search, KeyCode::Esc) =>
        {
            app.exit_search_mode();
        }
        (AppMode::Search, KeyCode::Backspace) =>
        {
            app.remove_search_char();
        }
        (AppMode::Search, KeyCode::Char(ch)) =>
        {
            app.add_search_char(ch);
        }

        // Search result navigation
        (AppMode::Normal, KeyCode::Char('n')) =>
        {
            app.next_search_result();
        }
        (AppMode::Normal, KeyCode::Char('N')) =>
        {
            app.prev_search_result();
        }
        (AppMode::Normal, KeyCode::Esc) =>
        {
            app.reset_search_highlights();
        }

        _ =>
        {} // Ignore other key combinations
    }
}

#[cfg(test)]
mod tests
{
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use devhub::View;
    use tempfile::TempDir;

    use super::*;

    fn press(app: &mut App, code: KeyCode)
    {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn keys_drive_the_book_picker()
    {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(ContentResolver::new(dir.path()), NavigationState::new());

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.mode, AppMode::Picker);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.view(), View::BookCategory(Book::AutomateTheBoringStuff));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab_index, 1);
    }

    #[test]
    fn search_mode_captures_letters()
    {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(ContentResolver::new(dir.path()), NavigationState::new());

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('c'));

        assert_eq!(app.search_text, "qc");
        assert!(!app.should_quit);
        assert_eq!(app.mode, AppMode::Search);
    }

    #[test]
    fn control_c_quits_from_any_mode()
    {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(ContentResolver::new(dir.path()), NavigationState::new());

        press(&mut app, KeyCode::Char('/'));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.should_quit);
    }

    #[test]
    fn command_line_preselects_a_book()
    {
        let matches = cli()
            .try_get_matches_from(["devhub", "--book", "pcc"])
            .unwrap();

        assert_eq!(
            initial_navigation(&matches).unwrap().current_view(),
            View::BookCategory(Book::PythonCrashCourse)
        );
    }

    #[test]
    fn command_line_rejects_both_selectors()
    {
        assert!(
            cli()
                .try_get_matches_from(["devhub", "--category", "notes", "--book", "pcc"])
                .is_err()
        );
    }

    #[test]
    fn unknown_category_is_an_error()
    {
        let matches = cli()
            .try_get_matches_from(["devhub", "--category", "cooking"])
            .unwrap();

        assert!(initial_navigation(&matches).is_err());
    }

    #[test]
    fn check_fails_on_an_empty_root()
    {
        let dir = TempDir::new().unwrap();

        assert!(check_documents(&ContentResolver::new(dir.path())).is_err());
    }

    #[test]
    fn check_passes_when_every_document_exists()
    {
        let dir = TempDir::new().unwrap();

        for tab in catalog::all_tabs()
        {
            let file = dir.path().join(tab.path);
            std::fs::create_dir_all(file.parent().unwrap()).unwrap();
            std::fs::write(file, tab.label).unwrap();
        }

        assert!(check_documents(&ContentResolver::new(dir.path())).is_ok());
    }
}
