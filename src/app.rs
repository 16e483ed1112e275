// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// PATTERN : "Application State"
// - App est la racine : elle possède le ThemeProvider et les données
// - Les vues lisent via un Scope, les événements modifient via les méthodes
// - Les tendances sont regénérées à chaque changement d'état ("re-render")
// ============================================================================

use tracing::debug;

use crate::config::Config;
use crate::models::{CoinQuote, OrderBook, TrendSeries};
use crate::theme::{Scope, ScopeMut, ThemeProvider};

// ============================================================================
// Enums d'état
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Session non connectée : invite de connexion
    SignIn,

    /// Tableau de bord : cartes + carnet d'ordres
    Dashboard,
}

/// Onglet actif du panneau profondeur
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DepthTab {
    #[default]
    OrderBook,
    Trades,
}

impl DepthTab {
    pub fn toggled(self) -> Self {
        match self {
            DepthTab::OrderBook => DepthTab::Trades,
            DepthTab::Trades => DepthTab::OrderBook,
        }
    }
}

/// Côtés du carnet affichés
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookLayout {
    #[default]
    Both,
    Bids,
    Asks,
}

impl BookLayout {
    /// Cycle : Both -> Bids -> Asks -> Both
    pub fn next(self) -> Self {
        match self {
            BookLayout::Both => BookLayout::Bids,
            BookLayout::Bids => BookLayout::Asks,
            BookLayout::Asks => BookLayout::Both,
        }
    }
}

/// Pas de prix affiché dans le carnet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precision {
    /// 0.01
    #[default]
    Hundredth,
    /// 0.1
    Tenth,
    /// 1
    One,
}

impl Precision {
    pub fn next(self) -> Self {
        match self {
            Precision::Hundredth => Precision::Tenth,
            Precision::Tenth => Precision::One,
            Precision::One => Precision::Hundredth,
        }
    }

    /// Nombre de décimales affichées
    pub fn decimals(self) -> usize {
        match self {
            Precision::Hundredth => 2,
            Precision::Tenth => 1,
            Precision::One => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Precision::Hundredth => "0.01",
            Precision::Tenth => "0.1",
            Precision::One => "1",
        }
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Contexte thème / langue, unique pour toute l'application
    theme: ThemeProvider,

    /// Cartes "top coins"
    pub coins: Vec<CoinQuote>,

    /// Une tendance par carte, regénérée à chaque re-render
    pub trends: Vec<TrendSeries>,

    /// Index de la carte sélectionnée
    pub selected_index: usize,

    pub book: OrderBook,
    pub depth_tab: DepthTab,
    pub book_layout: BookLayout,
    pub precision: Precision,

    /// Cumul correspondant à une barre de profondeur pleine
    pub depth_scale: f64,

    /// Two-step quit : première pression de 'q' -> confirm_quit = true
    pub confirm_quit: bool,

    /// Nombre de re-renders effectués
    pub render_generation: u64,
}

impl App {
    /// Crée l'application avec son provider et la config chargée
    pub fn new(theme: ThemeProvider, config: &Config) -> Self {
        let coins = CoinQuote::top_coins();
        let current_screen = if config.session.logged_in {
            Screen::Dashboard
        } else {
            Screen::SignIn
        };

        let mut app = Self {
            running: true,
            current_screen,
            theme,
            coins,
            trends: Vec::new(),
            selected_index: 0,
            book: OrderBook::sample(),
            depth_tab: DepthTab::default(),
            book_layout: BookLayout::default(),
            precision: Precision::default(),
            depth_scale: config.depth_scale,
            confirm_quit: false,
            render_generation: 0,
        };
        app.rerender();
        app
    }

    // ========================================================================
    // Accès au contexte thème
    // ========================================================================

    /// Scope en lecture pour les vues
    pub fn scope(&self) -> Scope<'_> {
        Scope::new(&self.theme)
    }

    /// Scope en écriture pour les gestionnaires d'événements
    pub fn scope_mut(&mut self) -> ScopeMut<'_> {
        ScopeMut::new(&mut self.theme)
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Regénère une série fraîche pour chaque carte
    pub fn rerender(&mut self) {
        self.trends = self
            .coins
            .iter()
            .map(|coin| TrendSeries::generate(coin.is_positive()))
            .collect();
        self.render_generation += 1;
        debug!(generation = self.render_generation, "Trends regenerated");
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn is_signed_in(&self) -> bool {
        self.current_screen != Screen::SignIn
    }

    /// Pose le drapeau de session (en mémoire uniquement)
    pub fn sign_in(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate_left(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_right(&mut self) {
        let max_index = self.coins.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    pub fn selected_coin(&self) -> Option<&CoinQuote> {
        self.coins.get(self.selected_index)
    }

    // ========================================================================
    // Panneau profondeur
    // ========================================================================

    pub fn toggle_depth_tab(&mut self) {
        self.depth_tab = self.depth_tab.toggled();
    }

    pub fn cycle_book_layout(&mut self) {
        self.book_layout = self.book_layout.next();
    }

    pub fn cycle_precision(&mut self) {
        self.precision = self.precision.next();
    }

    // ========================================================================
    // Quit confirmation
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
