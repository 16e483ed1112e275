// ============================================================================
// TradeDeck - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod config; // Configuration utilisateur (JSON)
pub mod i18n;   // Tables de traduction en / zh
pub mod theme;  // Contexte thème + langue
pub mod models; // Structures de données
pub mod app;    // État de l'application
pub mod ui;     // Interface utilisateur
