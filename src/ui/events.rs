// ============================================================================
// Gestion des événements
// ============================================================================
// Lit le clavier (crossterm) et produit des événements applicatifs
//
// CONCEPTS RUST :
// 1. Enums avec variants : Key porte la touche, Tick n'a pas de données
// 2. Poll avec timeout : la boucle reste réactive sans thread dédié
// 3. Helpers is_*_event : un prédicat par raccourci, testable isolément
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Aucun événement pendant le délai de poll
    Tick,

    /// Redimensionnement du terminal
    Resize,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Lit le prochain événement (bloquant au plus `tick_rate`)
    ///
    /// Sans événement dans le délai : Event::Tick.
    /// Seuls les appuis (Press) sont transmis, Release/Repeat deviennent des ticks.
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            CrosstermEvent::Resize(_, _) => Ok(Event::Resize),
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

// ============================================================================
// Helpers : identifier les raccourcis
// ============================================================================

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        _ => None,
    }
}

/// 'q' : quitter (deux appuis)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q' | 'Q')))
}

/// 't' : basculer clair / sombre
pub fn is_theme_toggle_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('t' | 'T')))
}

/// 'g' : basculer anglais / chinois
pub fn is_language_toggle_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('g' | 'G')))
}

/// Tab : onglet carnet / transactions
pub fn is_tab_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab))
}

/// 'b' : disposition du carnet
pub fn is_layout_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('b' | 'B')))
}

/// 'p' : précision des prix
pub fn is_precision_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('p' | 'P')))
}

/// Flèche gauche ou 'h' (vim)
pub fn is_left_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Left | KeyCode::Char('h')))
}

/// Flèche droite ou 'l' (vim)
pub fn is_right_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Right | KeyCode::Char('l')))
}

/// 'r' : regénérer les tendances
pub fn is_refresh_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('r' | 'R')))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}
