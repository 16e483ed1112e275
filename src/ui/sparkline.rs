// ============================================================================
// TrendLine - Mini-graphique de tendance (sparkline)
// ============================================================================
// Widget partagé par les cartes et le flux des transactions : une ligne + un remplissage en
// dégradé sous la ligne qui s'estompe vers le bas.
//
// CONCEPTS RATATUI :
// 1. Trait Widget : render(self, area, buf) écrit directement dans le Buffer
// 2. Cell : symbole + style pour une case du terminal
// ============================================================================

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::models::TrendSeries;
use crate::theme::Palette;

/// Symbole utilisé pour la ligne
pub const LINE_SYMBOL: &str = "•";

/// Dégradé sous la ligne, du plus dense au plus léger
/// Au-delà du dernier niveau : case vide (transparente)
pub const GRADIENT: [&str; 3] = ["▓", "▒", "░"];

/// Widget sparkline, coloré selon la direction de la série
pub struct TrendLine<'a> {
    series: &'a TrendSeries,
    palette: &'a Palette,
}

impl<'a> TrendLine<'a> {
    pub fn new(series: &'a TrendSeries, palette: &'a Palette) -> Self {
        Self { series, palette }
    }
}

/// Ligne (0 = haut) de la valeur interpolée pour chaque colonne
///
/// Repose sur `TrendSeries::normalized` : la série est projetée sur
/// `width - 1` x `height - 1` cases, puis interpolée colonne par colonne.
pub fn column_rows(series: &TrendSeries, width: u16, height: u16) -> Vec<u16> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let points = series.normalized(f64::from(width - 1), f64::from(height - 1), 0.0);
    if points.is_empty() {
        return Vec::new();
    }

    (0..width)
        .map(|col| interpolate(&points, f64::from(col)).round() as u16)
        .collect()
}

/// y du segment qui contient `x` (points triés par x croissant)
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }

    points
        .windows(2)
        .find(|w| x <= w[1].0)
        .map(|w| {
            let ((x0, y0), (x1, y1)) = (w[0], w[1]);
            if x1 > x0 {
                y0 + (y1 - y0) * (x - x0) / (x1 - x0)
            } else {
                y0
            }
        })
        .unwrap_or(last.1)
}

/// Symbole de dégradé pour la k-ième case sous la ligne (k >= 1)
///
/// `below` : nombre total de cases entre la ligne et le bas de la zone.
pub fn gradient_symbol(k: u16, below: u16) -> Option<&'static str> {
    if k == 0 || below == 0 {
        return None;
    }
    let level = usize::from(k - 1) * (GRADIENT.len() + 1) / usize::from(below);
    GRADIENT.get(level).copied()
}

impl Widget for TrendLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let color = self.palette.trend(self.series.is_positive());
        let line_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        let fill_style = Style::default().fg(color);

        for (col, row) in column_rows(self.series, area.width, area.height)
            .into_iter()
            .enumerate()
        {
            let x = area.x + col as u16;
            buf.get_mut(x, area.y + row)
                .set_symbol(LINE_SYMBOL)
                .set_style(line_style);

            let below = area.height - 1 - row;
            for k in 1..=below {
                if let Some(symbol) = gradient_symbol(k, below) {
                    buf.get_mut(x, area.y + row + k)
                        .set_symbol(symbol)
                        .set_style(fill_style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising() -> TrendSeries {
        TrendSeries::from_values((0..15).map(|i| 30.0 + i as f64), true)
    }

    #[test]
    fn test_column_rows_follow_series_scale() {
        let rows = column_rows(&rising(), 15, 6);
        assert_eq!(rows.len(), 15);
        // Min à gauche -> en bas ; max à droite -> en haut
        assert_eq!(rows[0], 5);
        assert_eq!(rows[14], 0);
        // Série croissante -> lignes décroissantes
        assert!(rows.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_column_rows_interpolate_between_points() {
        // 3 points sur 5 colonnes : les colonnes 1 et 3 sont à mi-chemin
        let series = TrendSeries::from_values([30.0, 40.0, 30.0], true);
        assert_eq!(column_rows(&series, 5, 5), vec![4, 2, 0, 2, 4]);
    }

    #[test]
    fn test_column_rows_agree_with_normalized_points() {
        let series = TrendSeries::from_values([20.0, 55.0, 35.0, 80.0, 60.0], false);
        let rows = column_rows(&series, 5, 8);
        let points = series.normalized(4.0, 7.0, 0.0);
        for (row, (_, y)) in rows.iter().zip(points) {
            assert_eq!(*row, y.round() as u16);
        }
    }

    #[test]
    fn test_single_column_uses_first_value() {
        let rows = column_rows(&rising(), 1, 6);
        assert_eq!(rows, vec![5]);
    }

    #[test]
    fn test_flat_series_sits_on_top_row() {
        let flat = TrendSeries::from_values([50.0; 15], true);
        assert!(column_rows(&flat, 10, 4).iter().all(|&r| r == 0));
    }

    #[test]
    fn test_gradient_fades_to_transparent() {
        assert_eq!(gradient_symbol(1, 4), Some("▓"));
        assert_eq!(gradient_symbol(2, 4), Some("▒"));
        assert_eq!(gradient_symbol(3, 4), Some("░"));
        assert_eq!(gradient_symbol(4, 4), None);
        assert_eq!(gradient_symbol(1, 1), Some("▓"));
        assert_eq!(gradient_symbol(0, 3), None);
    }

    #[test]
    fn test_render_positive_line_colors() {
        let palette = Palette::light();
        let series = rising();
        let area = Rect::new(0, 0, 15, 6);
        let mut buf = Buffer::empty(area);

        TrendLine::new(&series, &palette).render(area, &mut buf);

        let top_right = buf.get(14, 0);
        assert_eq!(top_right.symbol(), LINE_SYMBOL);
        assert_eq!(top_right.fg, palette.up);

        assert_eq!(buf.get(0, 5).symbol(), LINE_SYMBOL);
        // Dégradé sous le point le plus haut
        assert_eq!(buf.get(14, 1).symbol(), "▓");
        assert_eq!(buf.get(14, 5).symbol(), " ");
    }

    #[test]
    fn test_render_negative_uses_down_color() {
        let palette = Palette::dark();
        let series = TrendSeries::from_values((0..15).map(|i| 60.0 - i as f64), false);
        let area = Rect::new(0, 0, 15, 4);
        let mut buf = Buffer::empty(area);

        TrendLine::new(&series, &palette).render(area, &mut buf);

        assert_eq!(buf.get(0, 0).fg, palette.down);
        assert_eq!(buf.get(14, 3).fg, palette.down);
    }

    #[test]
    fn test_render_into_empty_area_is_noop() {
        let palette = Palette::light();
        let series = rising();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        TrendLine::new(&series, &palette).render(area, &mut buf);
        assert_eq!(buf.get(0, 0).symbol(), " ");
    }
}
