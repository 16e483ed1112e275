// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'écran courant à partir de l'état de l'application
//
// Structure :
// - Header : titre, navigation traduite, thème et langue actifs
// - Contenu : bande "top coins" (4 cartes avec sparkline) + panneau profondeur
// - Footer : raccourcis, ou confirmation de quit
//
// CONCEPT : toutes les vues lisent le contexte via app.scope().theme()?
// Une lecture hors provider remonte ThemeError au lieu de dessiner un défaut.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::quote::format_price;
use crate::models::{CoinQuote, TrendSeries};
use crate::theme::{Language, Palette, Scope, Theme, ThemeError, ThemeProvider};
use crate::ui::depth::render_depth_panel;
use crate::ui::sparkline::TrendLine;

/// Hauteur de la bande des cartes (bordures incluses)
const CARD_HEIGHT: u16 = 9;

/// Entrées de navigation du header ; la page active est "spot"
const NAV_KEYS: [&str; 5] = ["dashboard", "statistics", "spot", "futures", "wallet"];
const ACTIVE_NAV: &str = "spot";

/// Dessine l'écran courant
pub fn render(frame: &mut Frame, app: &App) -> Result<(), ThemeError> {
    render_in(frame, app, app.scope())
}

/// Dessine l'écran courant avec un scope explicite
pub fn render_in(frame: &mut Frame, app: &App, scope: Scope<'_>) -> Result<(), ThemeError> {
    let theme = scope.theme()?;
    let palette = theme.palette();
    let size = frame.size();

    // Fond global : le thème sombre repeint tout l'écran
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        size,
    );

    let chunks = create_layout(size);
    render_header(frame, chunks[0], theme);

    match app.current_screen {
        Screen::SignIn => render_sign_in(frame, chunks[1], theme),
        Screen::Dashboard => render_main_content(frame, chunks[1], app, theme),
    }

    render_footer(frame, chunks[2], app, theme);
    Ok(())
}

/// Layout principal (header, contenu, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area)
        .to_vec()
}

fn panel_block<'a>(palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.panel())
}

// ============================================================================
// Header
// ============================================================================

fn theme_label(theme: &ThemeProvider) -> &str {
    theme.t(theme.theme().as_str())
}

fn language_label(theme: &ThemeProvider) -> &str {
    match theme.language() {
        Language::En => theme.t("english"),
        Language::Zh => theme.t("chinese"),
    }
}

/// Libellé du bouton de bascule de thème (annonce le thème cible)
fn theme_switch_label(theme: &ThemeProvider) -> &str {
    match theme.theme() {
        Theme::Light => theme.t("switch_to_dark"),
        Theme::Dark => theme.t("switch_to_light"),
    }
}

/// Libellé du bouton de bascule de langue (dans la langue cible)
fn language_switch_label(theme: &ThemeProvider) -> &str {
    match theme.language() {
        Language::En => theme.t("switch_to_chinese"),
        Language::Zh => theme.t("switch_to_english"),
    }
}

fn render_header(frame: &mut Frame, area: Rect, theme: &ThemeProvider) {
    let palette = theme.palette();
    let block = panel_block(palette).title(Span::styled(
        format!(" {} ", theme.t("app_title")),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut nav = Vec::with_capacity(NAV_KEYS.len() * 2);
    for key in NAV_KEYS {
        let style = if key == ACTIVE_NAV {
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.muted)
        };
        nav.push(Span::styled(theme.t(key), style));
        nav.push(Span::raw("  "));
    }

    let indicator = Line::from(vec![
        Span::styled("[t] ", palette.key_hint()),
        Span::styled(theme_label(theme), Style::default().fg(palette.text)),
        Span::raw("  "),
        Span::styled("[g] ", palette.key_hint()),
        Span::styled(language_label(theme), Style::default().fg(palette.text)),
        Span::raw(" "),
    ]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(indicator.width() as u16),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(nav)), columns[0]);
    frame.render_widget(
        Paragraph::new(indicator).alignment(Alignment::Right),
        columns[1],
    );
}

// ============================================================================
// Contenu : cartes + carnet
// ============================================================================

fn render_main_content(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let palette = theme.palette();
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", theme.t("top_coins")),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    render_cards(frame, chunks[1], app, theme);
    render_depth_panel(frame, chunks[2], app, theme);
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    if app.coins.is_empty() {
        return;
    }

    let count = app.coins.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); app.coins.len()])
        .split(area);

    for (index, (coin, column)) in app.coins.iter().zip(columns.iter()).enumerate() {
        let Some(trend) = app.trends.get(index) else {
            continue;
        };
        render_card(frame, *column, coin, trend, index == app.selected_index, theme);
    }
}

/// Décimales affichées pour une carte : les petits prix gardent 5 décimales
pub fn card_decimals(price: f64) -> usize {
    if price.abs() >= 1.0 {
        2
    } else {
        5
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    coin: &CoinQuote,
    trend: &TrendSeries,
    selected: bool,
    theme: &ThemeProvider,
) {
    let palette = theme.palette();
    let border = if selected {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        palette.border_style()
    };

    let block = panel_block(palette)
        .border_style(border)
        .title(format!(" {} {} ", coin.icon, coin.pair_name()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let color = palette.trend(coin.is_positive());
    let price_line = Line::from(vec![
        Span::styled(
            format_price(coin.price, card_decimals(coin.price)),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(coin.change_label(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(price_line), rows[0]);

    frame.render_widget(TrendLine::new(trend, palette), rows[1]);

    let volume = Line::from(vec![
        Span::styled(theme.t("volume_24h"), Style::default().fg(palette.muted)),
        Span::styled(
            format!(" {:.2}M", coin.volume_24h_millions),
            Style::default().fg(palette.text),
        ),
    ]);
    frame.render_widget(Paragraph::new(volume), rows[2]);
}

// ============================================================================
// Écran de connexion
// ============================================================================

fn render_sign_in(frame: &mut Frame, area: Rect, theme: &ThemeProvider) {
    let palette = theme.palette();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            theme.t("app_title"),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            theme.t("sign_in_required"),
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", palette.key_hint()),
            Span::styled(theme.t("sign_in"), Style::default().fg(palette.text)),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(text)
            .block(panel_block(palette))
            .alignment(Alignment::Center),
        area,
    );
}

// ============================================================================
// Footer
// ============================================================================

fn render_footer(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    let palette = theme.palette();

    let line = if app.is_awaiting_quit_confirmation() {
        let warning = Style::default().fg(palette.down).add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("⚠  ", warning),
            Span::styled(
                theme.t("quit_confirm"),
                warning.add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled("  ⚠", warning),
        ])
    } else {
        let label = Style::default().fg(palette.text);
        let mut spans = vec![
            Span::styled("[q]", palette.key_hint()),
            Span::styled(format!(" {}  ", theme.t("quit")), label),
            Span::styled("[t]", palette.key_hint()),
            Span::styled(format!(" {}  ", theme_switch_label(theme)), label),
            Span::styled("[g]", palette.key_hint()),
            Span::styled(format!(" {}  ", language_switch_label(theme)), label),
        ];
        if app.current_screen == Screen::Dashboard {
            spans.extend([
                Span::styled("[←→ / h l]", palette.key_hint()),
                Span::styled(format!(" {}  ", theme.t("select")), label),
                Span::styled("[Tab]", palette.key_hint()),
                Span::styled(format!(" {}  ", theme.t("switch_tab")), label),
                Span::styled("[r]", palette.key_hint()),
                Span::styled(format!(" {}", theme.t("refresh")), label),
            ]);
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(line)
            .block(panel_block(palette))
            .alignment(Alignment::Center),
        area,
    );
}
