// ============================================================================
// Palettes et racine de style
// ============================================================================
// Deux variantes de couleurs (clair / sombre) et la "racine" qui porte la
// classe `dark`, équivalent terminal de l'attribut racine du document.
// ============================================================================

use std::collections::BTreeSet;

use ratatui::style::{Color, Modifier, Style};

use super::Theme;

/// Nom de la classe posée sur la racine quand le thème sombre est actif
pub const DARK_CLASS: &str = "dark";

/// Couleurs utilisées par tous les widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Fond de l'écran
    pub background: Color,
    /// Fond des cartes / panneaux
    pub surface: Color,
    /// Bordures des panneaux
    pub border: Color,
    /// Texte principal
    pub text: Color,
    /// Texte secondaire (en-têtes de colonnes, volumes)
    pub muted: Color,
    /// Accent (onglet actif, raccourcis)
    pub accent: Color,
    /// Hausse / achats
    pub up: Color,
    /// Baisse / ventes
    pub down: Color,
    /// Fond des barres de profondeur côté achats (up à 10% sur surface)
    pub up_tint: Color,
    /// Fond des barres de profondeur côté ventes
    pub down_tint: Color,
}

impl Palette {
    pub const fn light() -> Self {
        Self {
            background: Color::Rgb(0xf5, 0xf8, 0xfa),
            surface: Color::Rgb(0xff, 0xff, 0xff),
            border: Color::Rgb(0xe5, 0xe7, 0xeb),
            text: Color::Rgb(0x1f, 0x29, 0x37),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            accent: Color::Rgb(0x3b, 0x82, 0xf6),
            up: Color::Rgb(0x13, 0xc2, 0xa3),
            down: Color::Rgb(0xef, 0x44, 0x44),
            up_tint: Color::Rgb(0xe7, 0xf9, 0xf6),
            down_tint: Color::Rgb(0xfd, 0xec, 0xec),
        }
    }

    pub const fn dark() -> Self {
        Self {
            background: Color::Rgb(0x0f, 0x11, 0x1a),
            surface: Color::Rgb(0x1a, 0x1d, 0x29),
            border: Color::Rgb(0x25, 0x28, 0x42),
            text: Color::Rgb(0xff, 0xff, 0xff),
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),
            accent: Color::Rgb(0x3b, 0x82, 0xf6),
            up: Color::Rgb(0x13, 0xc2, 0xa3),
            down: Color::Rgb(0xef, 0x44, 0x44),
            up_tint: Color::Rgb(0x19, 0x2d, 0x35),
            down_tint: Color::Rgb(0x2f, 0x21, 0x2c),
        }
    }

    /// Palette associée à un thème
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    /// Couleur directionnelle : `up` si positif, `down` sinon
    pub fn trend(&self, is_positive: bool) -> Color {
        if is_positive {
            self.up
        } else {
            self.down
        }
    }

    /// Teinte de fond de la barre de profondeur
    pub fn depth_tint(&self, is_bid: bool) -> Color {
        if is_bid {
            self.up_tint
        } else {
            self.down_tint
        }
    }

    /// Style de base d'un panneau (texte sur surface)
    pub fn panel(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Style des bordures de panneau
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style d'un raccourci clavier dans le footer
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

// ============================================================================
// StyleRoot
// ============================================================================
// CONCEPT : la racine possède la liste de classes et la palette active.
// Le provider est le seul à la modifier (via apply()).
// ============================================================================

/// Racine de style : classes actives + palette résolue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRoot {
    classes: BTreeSet<&'static str>,
    palette: Palette,
}

impl StyleRoot {
    /// Crée une racine déjà synchronisée avec `theme`
    pub fn new(theme: Theme) -> Self {
        let mut root = Self {
            classes: BTreeSet::new(),
            palette: Palette::default(),
        };
        root.apply(theme);
        root
    }

    /// Applique un thème : bascule la classe `dark` et change de palette
    pub fn apply(&mut self, theme: Theme) {
        if theme == Theme::Dark {
            self.classes.insert(DARK_CLASS);
        } else {
            self.classes.remove(DARK_CLASS);
        }
        self.palette = Palette::for_theme(theme);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_class_follows_theme() {
        let mut root = StyleRoot::new(Theme::Light);
        assert!(!root.has_class(DARK_CLASS));

        root.apply(Theme::Dark);
        assert!(root.has_class(DARK_CLASS));
        assert_eq!(*root.palette(), Palette::dark());

        root.apply(Theme::Light);
        assert!(!root.has_class(DARK_CLASS));
        assert_eq!(*root.palette(), Palette::light());
    }

    #[test]
    fn test_applying_same_theme_twice_is_stable() {
        let mut root = StyleRoot::new(Theme::Dark);
        root.apply(Theme::Dark);
        assert!(root.has_class(DARK_CLASS));
        assert_eq!(*root.palette(), Palette::dark());
    }

    #[test]
    fn test_trend_color() {
        let palette = Palette::light();
        assert_eq!(palette.trend(true), palette.up);
        assert_eq!(palette.trend(false), palette.down);
    }
}
