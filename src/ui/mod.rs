// ============================================================================
// Module : ui
// ============================================================================
// Interface terminal : événements, écran principal et widgets
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Rendu de l'écran courant
pub mod sparkline; // Widget TrendLine des cartes
pub mod depth;     // Panneau carnet d'ordres / transactions

pub use events::{Event, EventHandler};
pub use dashboard::render;
pub use sparkline::TrendLine;
