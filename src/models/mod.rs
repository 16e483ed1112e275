// ============================================================================
// Module : models
// ============================================================================
// Données affichées : tendances, carnet d'ordres, cartes de cotation
// ============================================================================

pub mod trend;     // Génération et normalisation des séries de tendance
pub mod orderbook; // Carnet d'ordres d'exemple et dernières transactions
pub mod quote;     // Cartes "top coins"

pub use orderbook::{OrderBook, OrderLevel, Side, Trade};
pub use quote::CoinQuote;
pub use trend::TrendSeries;
