// ============================================================================
// Depth - Panneau carnet d'ordres / dernières transactions
// ============================================================================
// Deux onglets :
// - Carnet : ventes au-dessus, dernier prix au milieu, achats en dessous,
//   chaque niveau avec une barre de profondeur proportionnelle au cumul
// - Transactions : flux des dernières transactions
// ============================================================================

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
    Frame,
};

use crate::app::{App, BookLayout, DepthTab, Precision};
use crate::models::orderbook::{OrderBook, OrderLevel, Side, DEFAULT_DEPTH_SCALE};
use crate::models::quote::format_price;
use crate::theme::{Palette, ThemeProvider};
use crate::ui::sparkline::TrendLine;

/// Hauteur de la tendance du flux dans l'onglet transactions
const TAPE_TREND_HEIGHT: u16 = 3;

// ============================================================================
// DepthLadder : un côté du carnet
// ============================================================================

/// Widget qui dessine une liste de niveaux avec leurs barres de profondeur
pub struct DepthLadder<'a> {
    levels: &'a [OrderLevel],
    is_bid: bool,
    palette: &'a Palette,
    precision: Precision,
    scale: f64,
}

impl<'a> DepthLadder<'a> {
    pub fn new(levels: &'a [OrderLevel], is_bid: bool, palette: &'a Palette) -> Self {
        Self {
            levels,
            is_bid,
            palette,
            precision: Precision::default(),
            scale: DEFAULT_DEPTH_SCALE,
        }
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Largeur de la barre de profondeur en cases
pub fn bar_width(level: &OrderLevel, scale: f64, width: u16) -> u16 {
    (level.depth_fraction(scale) * f64::from(width)).round() as u16
}

/// Écrit `text` aligné à droite sur `right` (exclu), sans déborder à gauche
fn set_right_aligned(buf: &mut Buffer, left: u16, right: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    let x = right.saturating_sub(len).max(left);
    buf.set_stringn(x, y, text, usize::from(right - x), style);
}

impl Widget for DepthLadder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }

        let price_style = Style::default().fg(self.palette.trend(self.is_bid));
        let text_style = Style::default().fg(self.palette.text);
        let tint = self.palette.depth_tint(self.is_bid);
        let col_w = area.width / 3;

        for (i, level) in self.levels.iter().take(usize::from(area.height)).enumerate() {
            let y = area.y + i as u16;

            let price = format!("{:.*}", self.precision.decimals(), level.price);
            buf.set_stringn(area.x, y, &price, usize::from(col_w), price_style);

            let amount = format!("{:.6}", level.amount);
            set_right_aligned(buf, area.x + col_w, area.x + 2 * col_w, y, &amount, text_style);

            let total = format!("{:.6}", level.total);
            set_right_aligned(buf, area.x + 2 * col_w, area.right(), y, &total, text_style);

            // Barre de profondeur : ancrée à droite
            let bar = bar_width(level, self.scale, area.width);
            for x in area.right() - bar..area.right() {
                buf.get_mut(x, y).set_bg(tint);
            }
        }
    }
}

// ============================================================================
// Panneau complet
// ============================================================================

/// Dessine le panneau profondeur pour le carnet de l'application
pub fn render_depth_panel(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    let palette = theme.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.panel())
        .title(format!(" {} ", app.book.symbol));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 4 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Onglets
            Constraint::Length(1), // Contrôles (disposition, précision)
            Constraint::Length(1), // En-têtes de colonnes
            Constraint::Min(0),    // Contenu
        ])
        .split(inner);

    render_tabs(frame, chunks[0], app, theme);

    match app.depth_tab {
        DepthTab::OrderBook => {
            render_controls(frame, chunks[1], app, theme);
            render_column_headers(
                frame,
                chunks[2],
                theme,
                ["price_usdt", "amount_btc", "total_btc"],
            );
            render_book(frame, chunks[3], app, theme);
        }
        DepthTab::Trades => {
            // Pas de contrôles sur cet onglet : la tendance du flux prend leur place
            let rest = Rect::new(
                chunks[1].x,
                chunks[1].y,
                chunks[1].width,
                inner.bottom().saturating_sub(chunks[1].y),
            );
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(TAPE_TREND_HEIGHT),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(rest);

            let trend = app.book.price_trend();
            frame.render_widget(TrendLine::new(&trend, palette), parts[0]);
            render_column_headers(frame, parts[1], theme, ["price_usdt", "amount_btc", "time"]);
            render_trades(frame, parts[2], &app.book, palette);
        }
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    let palette = theme.palette();
    let selected = match app.depth_tab {
        DepthTab::OrderBook => 0,
        DepthTab::Trades => 1,
    };

    let tabs = Tabs::new(vec![theme.t("order_book"), theme.t("latest_trades")])
        .select(selected)
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    let palette = theme.palette();
    let layout_key = match app.book_layout {
        BookLayout::Both => "layout_both",
        BookLayout::Bids => "layout_bids",
        BookLayout::Asks => "layout_asks",
    };

    let line = Line::from(vec![
        Span::styled("[b] ", palette.key_hint()),
        Span::styled(theme.t(layout_key), Style::default().fg(palette.text)),
        Span::raw("   "),
        Span::styled("[p] ", palette.key_hint()),
        Span::styled(
            format!("{} {}", theme.t("precision"), app.precision.label()),
            Style::default().fg(palette.text),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_column_headers(frame: &mut Frame, area: Rect, theme: &ThemeProvider, keys: [&str; 3]) {
    let style = Style::default().fg(theme.palette().muted);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let alignments = [Alignment::Left, Alignment::Right, Alignment::Right];
    for ((key, column), alignment) in keys.iter().zip(columns.iter()).zip(alignments) {
        frame.render_widget(
            Paragraph::new(Span::styled(theme.t(key), style)).alignment(alignment),
            *column,
        );
    }
}

/// Répartit la hauteur entre ventes et achats selon la disposition
///
/// Retourne (lignes ventes, lignes achats) ; une ligne est réservée au
/// dernier prix dans tous les cas.
pub fn split_rows(layout: BookLayout, height: u16) -> (u16, u16) {
    let available = height.saturating_sub(1);
    match layout {
        BookLayout::Both => {
            let asks = available / 2;
            (asks, available - asks)
        }
        BookLayout::Bids => (0, available),
        BookLayout::Asks => (available, 0),
    }
}

fn render_book(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeProvider) {
    let palette = theme.palette();
    let (ask_rows, bid_rows) = split_rows(app.book_layout, area.height);
    let book = &app.book;

    // Ventes : les plus proches du prix en bas, donc ordre inversé
    let mut asks: Vec<OrderLevel> = book.asks.iter().take(usize::from(ask_rows)).copied().collect();
    asks.reverse();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ask_rows),
            Constraint::Length(1),
            Constraint::Length(bid_rows),
        ])
        .split(area);

    if ask_rows > 0 {
        // Aligne les ventes en bas de leur zone
        let zone = chunks[0];
        let used = (asks.len() as u16).min(zone.height);
        let ask_area = Rect::new(zone.x, zone.y + zone.height - used, zone.width, used);
        frame.render_widget(
            DepthLadder::new(&asks, false, palette)
                .precision(app.precision)
                .scale(app.depth_scale),
            ask_area,
        );
    }

    render_last_price(frame, chunks[1], book, app.precision, theme);

    if bid_rows > 0 {
        frame.render_widget(
            DepthLadder::new(&book.bids, true, palette)
                .precision(app.precision)
                .scale(app.depth_scale),
            chunks[2],
        );
    }
}

fn render_last_price(
    frame: &mut Frame,
    area: Rect,
    book: &OrderBook,
    precision: Precision,
    theme: &ThemeProvider,
) {
    let palette = theme.palette();
    let color = palette.trend(book.change >= 0.0);
    let row_style = Style::default().bg(palette.depth_tint(book.change >= 0.0));

    let line = Line::from(vec![
        Span::styled(
            format_price(book.last_price, precision.decimals()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{:+.3} USD", book.change), Style::default().fg(color)),
    ]);
    let more = Line::from(Span::styled(
        format!("{} ›", theme.t("more")),
        Style::default().fg(palette.muted),
    ));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(more.width() as u16)])
        .split(area);

    frame.render_widget(Paragraph::new(line).style(row_style), columns[0]);
    frame.render_widget(
        Paragraph::new(more).style(row_style).alignment(Alignment::Right),
        columns[1],
    );
}

fn render_trades(frame: &mut Frame, area: Rect, book: &OrderBook, palette: &Palette) {
    let text_style = Style::default().fg(palette.text);
    let time_style = Style::default().fg(palette.muted);
    let buf = frame.buffer_mut();

    let col_w = area.width / 3;
    for (i, trade) in book.trades.iter().take(usize::from(area.height)).enumerate() {
        let y = area.y + i as u16;
        let price_style = Style::default().fg(palette.trend(trade.side == Side::Buy));

        buf.set_stringn(
            area.x,
            y,
            format!("{:.2}", trade.price),
            usize::from(col_w),
            price_style,
        );
        set_right_aligned(
            buf,
            area.x + col_w,
            area.x + 2 * col_w,
            y,
            &format!("{:.6}", trade.amount),
            text_style,
        );
        set_right_aligned(
            buf,
            area.x + 2 * col_w,
            area.right(),
            y,
            &trade.time.format("%H:%M:%S").to_string(),
            time_style,
        );
    }
}
