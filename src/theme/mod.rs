// ============================================================================
// Module : theme
// ============================================================================
// Contexte thème / langue partagé par toutes les vues
//
// CONCEPTS :
// 1. Un seul ThemeProvider, construit par la racine de l'application (App)
// 2. Les vues y accèdent via un Scope, passé explicitement
// 3. Toute mutation passe par set_theme() / set_language()
// 4. Accès hors provider : erreur immédiate (ThemeError::OutsideProvider)
//
// Pas de static, pas de singleton : deux providers sont indépendants.
// ============================================================================

pub mod palette;

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::i18n::Translations;

pub use palette::{Palette, StyleRoot, DARK_CLASS};

// ============================================================================
// Enums : Theme et Language
// ============================================================================

/// Palette visuelle active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse une valeur externe ; toute valeur inconnue donne le défaut
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            _ => Theme::default(),
        }
    }

    /// L'autre thème (bouton de bascule)
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Langue d'affichage active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    #[default]
    Zh,
}

impl Language {
    /// Parse une valeur externe ; toute valeur inconnue donne le défaut
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "zh" => Language::Zh,
            _ => Language::default(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// État thème + langue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
    pub language: Language,
}

// ============================================================================
// Erreurs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Un consommateur a lu le contexte sans provider actif
    #[error("theme context accessed outside of a ThemeProvider")]
    OutsideProvider,
}

// ============================================================================
// ThemeProvider
// ============================================================================

/// Propriétaire unique de l'état thème / langue
///
/// Construit une fois par la racine de l'application et prêté aux vues.
#[derive(Debug, Clone)]
pub struct ThemeProvider {
    state: ThemeState,
    root: StyleRoot,
    translations: Translations,
}

impl ThemeProvider {
    /// Crée un provider avec les valeurs par défaut (clair, chinois)
    pub fn new(translations: Translations) -> Self {
        let state = ThemeState::default();
        Self {
            root: StyleRoot::new(state.theme),
            state,
            translations,
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Change le thème et synchronise la racine de style
    pub fn set_theme(&mut self, theme: Theme) {
        debug!(from = %self.state.theme, to = %theme, "Theme changed");
        self.state.theme = theme;
        self.root.apply(theme);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.state.theme.toggled());
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn set_language(&mut self, language: Language) {
        debug!(from = %self.state.language, to = %language, "Language changed");
        self.state.language = language;
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.state.language.toggled());
    }

    /// Instantané de l'état courant
    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// Palette active (résolue par la racine de style)
    pub fn palette(&self) -> &Palette {
        self.root.palette()
    }

    pub fn style_root(&self) -> &StyleRoot {
        &self.root
    }

    pub fn is_dark(&self) -> bool {
        self.state.theme == Theme::Dark
    }

    /// Traduit une clé dans la langue active
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.t(self.state.language, key)
    }
}

// ============================================================================
// Scope : accès au contexte depuis une vue
// ============================================================================
// CONCEPT : équivalent explicite de "useContext"
// - Scope::new(&provider) : vue montée sous le provider
// - Scope::detached() : vue montée hors provider, tout accès échoue
// ============================================================================

/// Accès en lecture au contexte, passé aux fonctions de rendu
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    provider: Option<&'a ThemeProvider>,
}

impl<'a> Scope<'a> {
    pub fn new(provider: &'a ThemeProvider) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Scope sans provider
    pub fn detached() -> Self {
        Self { provider: None }
    }

    /// Récupère le contexte, ou échoue immédiatement hors provider
    pub fn theme(&self) -> Result<&'a ThemeProvider, ThemeError> {
        self.provider.ok_or(ThemeError::OutsideProvider)
    }
}

/// Accès en écriture au contexte, passé aux gestionnaires d'événements
#[derive(Debug)]
pub struct ScopeMut<'a> {
    provider: Option<&'a mut ThemeProvider>,
}

impl<'a> ScopeMut<'a> {
    pub fn new(provider: &'a mut ThemeProvider) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn detached() -> Self {
        Self { provider: None }
    }

    pub fn theme_mut(&mut self) -> Result<&mut ThemeProvider, ThemeError> {
        self.provider.as_deref_mut().ok_or(ThemeError::OutsideProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ThemeProvider {
        ThemeProvider::new(Translations::load_default().unwrap())
    }

    #[test]
    fn test_defaults() {
        let provider = provider();
        assert_eq!(provider.theme(), Theme::Light);
        assert_eq!(provider.language(), Language::Zh);
        assert!(!provider.style_root().has_class(DARK_CLASS));
    }

    #[test]
    fn test_set_theme_round_trip() {
        let mut provider = provider();

        provider.set_theme(Theme::Dark);
        assert_eq!(provider.theme(), Theme::Dark);
        assert!(provider.style_root().has_class(DARK_CLASS));
        assert_eq!(*provider.palette(), Palette::dark());

        provider.set_theme(Theme::Light);
        assert_eq!(provider.theme(), Theme::Light);
        assert!(!provider.style_root().has_class(DARK_CLASS));
        assert_eq!(*provider.palette(), Palette::light());
    }

    #[test]
    fn test_set_language_switches_table() {
        let mut provider = provider();
        assert_eq!(provider.t("wallet"), "钱包");

        provider.set_language(Language::En);
        assert_eq!(provider.language(), Language::En);
        assert_eq!(provider.t("wallet"), "Wallet");
    }

    #[test]
    fn test_toggles() {
        let mut provider = provider();
        provider.toggle_theme();
        assert!(provider.is_dark());
        provider.toggle_theme();
        assert!(!provider.is_dark());

        provider.toggle_language();
        assert_eq!(provider.language(), Language::En);
        provider.toggle_language();
        assert_eq!(provider.language(), Language::Zh);
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        assert_eq!(Theme::parse_or_default("DARK"), Theme::Dark);
        assert_eq!(Theme::parse_or_default("blue"), Theme::Light);
        assert_eq!(Theme::parse_or_default(""), Theme::Light);
        assert_eq!(Language::parse_or_default(" en "), Language::En);
        assert_eq!(Language::parse_or_default("fr"), Language::Zh);
    }

    #[test]
    fn test_detached_scope_fails_fast() {
        let scope = Scope::detached();
        assert_eq!(scope.theme().unwrap_err(), ThemeError::OutsideProvider);

        let mut scope_mut = ScopeMut::detached();
        assert_eq!(scope_mut.theme_mut().unwrap_err(), ThemeError::OutsideProvider);
    }

    #[test]
    fn test_scope_reads_and_writes_provider() {
        let mut provider = provider();
        {
            let mut scope = ScopeMut::new(&mut provider);
            scope.theme_mut().unwrap().set_theme(Theme::Dark);
        }
        let scope = Scope::new(&provider);
        assert_eq!(scope.theme().unwrap().theme(), Theme::Dark);
    }

    #[test]
    fn test_providers_are_independent() {
        let mut first = provider();
        let second = provider();

        first.set_theme(Theme::Dark);
        first.set_language(Language::En);

        assert_eq!(second.theme(), Theme::Light);
        assert_eq!(second.language(), Language::Zh);
        assert!(!second.style_root().has_class(DARK_CLASS));
    }
}
