// ============================================================================
// TradeDeck - Tableau de bord marché en terminal
// ============================================================================
// Cartes "top coins" avec sparklines, carnet d'ordres, thème clair/sombre
// et interface bilingue (anglais / chinois)
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop mono-thread : render -> input -> update
// 3. Result partout : une erreur de contexte thème arrête la boucle proprement
// ============================================================================

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use tradedeck::app::{App, Screen};
use tradedeck::config::Config;
use tradedeck::i18n::Translations;
use tradedeck::theme::{ThemeError, ThemeProvider};
use tradedeck::ui::events::{Event, EventHandler};
use tradedeck::ui::render;

// ============================================================================
// Logging
// ============================================================================

/// Initialise tracing vers un fichier à rotation quotidienne
///
/// Les logs ne vont jamais sur stdout : le terminal appartient à la TUI.
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.resolved_log_dir();
    std::fs::create_dir_all(&log_dir).with_context(|| {
        format!("Échec de la création du répertoire de logs {}", log_dir.display())
    })?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "tradedeck.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG=tradedeck=trace pour tout voir
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradedeck=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'installation du subscriber tracing")?;

    info!(?log_dir, "Logging initialised");
    Ok(())
}

/// Charge la config depuis `path`, ou depuis l'emplacement par défaut
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Échec du chargement de la configuration")
}

fn main() -> Result<()> {
    // La config passe avant le logging : elle choisit le répertoire des logs
    let config = load_config(None)?;

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: failed to initialise logging: {e:#}");
        eprintln!("   Continuing without logging...");
    });

    info!(?config, "TradeDeck starting up");

    let translations =
        Translations::load_default().context("Échec du chargement des traductions")?;
    for (language, key) in translations.missing_keys() {
        error!(%language, key = %key, "Missing translation");
    }

    let provider = ThemeProvider::new(translations);
    let mut app = App::new(provider, &config);
    let events = EventHandler::new(Duration::from_millis(config.tick_rate_ms));

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal même en cas d'erreur
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(()) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // 1. Render : l'erreur de contexte est capturée hors de la closure
        let mut rendered: Result<(), ThemeError> = Ok(());
        terminal.draw(|frame| rendered = render(frame, app))?;
        rendered.context("Échec du rendu du tableau de bord")?;

        // 2. Input
        let event = events.next()?;

        // 3. Update
        handle_event(app, event)?;
    }

    Ok(())
}

/// Applique un événement à l'état de l'application
///
/// Toute action qui modifie l'affichage relance un re-render, ce qui
/// regénère les tendances.
fn handle_event(app: &mut App, event: Event) -> Result<(), ThemeError> {
    use tradedeck::ui::events::{
        is_enter_event, is_language_toggle_event, is_layout_event, is_left_event,
        is_precision_event, is_quit_event, is_refresh_event, is_right_event, is_tab_event,
        is_theme_toggle_event,
    };

    let on_dashboard = app.current_screen == Screen::Dashboard;

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
            return Ok(());
        }

        Event::Key(_) if is_theme_toggle_event(&event) => {
            app.cancel_quit();
            let mut scope = app.scope_mut();
            let theme = scope.theme_mut()?;
            theme.toggle_theme();
            info!(state = ?theme.state(), "User toggled theme");
        }

        Event::Key(_) if is_language_toggle_event(&event) => {
            app.cancel_quit();
            let mut scope = app.scope_mut();
            let theme = scope.theme_mut()?;
            theme.toggle_language();
            info!(state = ?theme.state(), "User toggled language");
        }

        Event::Key(_) if is_enter_event(&event) && !on_dashboard => {
            app.cancel_quit();
            info!("User signed in");
            app.sign_in();
        }

        Event::Key(_) if is_tab_event(&event) && on_dashboard => {
            app.cancel_quit();
            app.toggle_depth_tab();
            debug!(tab = ?app.depth_tab, "User switched depth tab");
        }

        Event::Key(_) if is_layout_event(&event) && on_dashboard => {
            app.cancel_quit();
            app.cycle_book_layout();
            debug!(layout = ?app.book_layout, "User changed book layout");
        }

        Event::Key(_) if is_precision_event(&event) && on_dashboard => {
            app.cancel_quit();
            app.cycle_precision();
            debug!(precision = app.precision.label(), "User changed precision");
        }

        Event::Key(_) if is_left_event(&event) && on_dashboard => {
            app.cancel_quit();
            app.navigate_left();
            debug!(index = app.selected_index, "User navigated left");
        }

        Event::Key(_) if is_right_event(&event) && on_dashboard => {
            app.cancel_quit();
            app.navigate_right();
            debug!(index = app.selected_index, "User navigated right");
        }

        Event::Key(_) if is_refresh_event(&event) && on_dashboard => {
            app.cancel_quit();
            debug!("User requested re-render");
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();
            return Ok(());
        }

        Event::Tick | Event::Resize => return Ok(()),
    }

    app.rerender();
    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Échec du passage à l'écran alternatif")?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tradedeck::app::DepthTab;
    use tradedeck::theme::{Language, Theme};

    fn app() -> App {
        let provider = ThemeProvider::new(Translations::load_default().unwrap());
        App::new(provider, &Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::empty()))).unwrap();
    }

    fn theme_of(app: &App) -> (Theme, Language) {
        let scope = app.scope();
        let theme = scope.theme().unwrap();
        (theme.theme(), theme.language())
    }

    #[test]
    fn test_quit_needs_two_presses() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.is_running());
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_other_key_cancels_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.is_awaiting_quit_confirmation());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.is_running());
    }

    #[test]
    fn test_toggles_rerender() {
        let mut app = app();
        assert_eq!(theme_of(&app), (Theme::Light, Language::Zh));

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(theme_of(&app), (Theme::Dark, Language::En));
        assert_eq!(app.render_generation, 3);
    }

    #[test]
    fn test_ticks_do_not_regenerate_trends() {
        let mut app = app();
        let before = app.trends.clone();
        handle_event(&mut app, Event::Tick).unwrap();
        assert_eq!(app.trends, before);
        assert_eq!(app.render_generation, 1);
    }

    #[test]
    fn test_dashboard_keys_ignored_on_sign_in() {
        let mut config = Config::default();
        config.session.logged_in = false;
        let provider = ThemeProvider::new(Translations::load_default().unwrap());
        let mut app = App::new(provider, &config);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.depth_tab, DepthTab::OrderBook);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Dashboard);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.depth_tab, DepthTab::Trades);
    }

    #[test]
    fn test_bad_config_error_has_context() {
        let path = std::env::temp_dir().join(format!(
            "tradedeck-main-bad-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "[1, 2").unwrap();

        let result = load_config(Some(&path));
        std::fs::remove_file(&path).ok();

        let message = format!("{:#}", result.unwrap_err());
        assert!(
            message.starts_with("Échec du chargement de la configuration"),
            "message = {message}"
        );
    }

    #[test]
    fn test_card_selection_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.selected_index, 2);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.selected_index, 1);
    }
}
