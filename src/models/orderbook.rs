// ============================================================================
// Structures : OrderBook, OrderLevel, Trade
// ============================================================================
// Carnet d'ordres d'exemple (paire BTC/USDT) et dernières transactions
//
// Données statiques : aucune mise en correspondance d'ordres.
// ============================================================================

use chrono::NaiveTime;

use super::trend::TrendSeries;

/// Échelle par défaut des barres de profondeur (cumul max affiché à 100%)
pub const DEFAULT_DEPTH_SCALE: f64 = 0.12;

/// Un niveau de prix du carnet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderLevel {
    pub price: f64,
    pub amount: f64,
    pub total: f64,
}

impl OrderLevel {
    pub const fn new(price: f64, amount: f64, total: f64) -> Self {
        Self {
            price,
            amount,
            total,
        }
    }

    /// Largeur relative de la barre de profondeur, dans [0, 1]
    ///
    /// Une échelle nulle ou négative donne une barre vide.
    pub fn depth_fraction(&self, scale: f64) -> f64 {
        if scale <= 0.0 {
            return 0.0;
        }
        (self.total / scale).clamp(0.0, 1.0)
    }
}

/// Sens d'une transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// Une transaction du flux "dernières transactions"
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub price: f64,
    pub amount: f64,
    pub time: NaiveTime,
    pub side: Side,
}

/// Carnet complet : ventes (asks) au-dessus, achats (bids) en dessous
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBook {
    pub symbol: String,
    /// Ventes, triées par prix croissant
    pub asks: Vec<OrderLevel>,
    /// Achats, triés par prix décroissant
    pub bids: Vec<OrderLevel>,
    pub last_price: f64,
    /// Variation affichée à côté du dernier prix (USD)
    pub change: f64,
    pub trades: Vec<Trade>,
}

impl OrderBook {
    /// Tendance des prix du flux de transactions, du plus ancien au plus récent
    ///
    /// Le flux est stocké du plus récent au plus ancien, d'où le rev().
    pub fn price_trend(&self) -> TrendSeries {
        let prices: Vec<f64> = self.trades.iter().rev().map(|t| t.price).collect();
        TrendSeries::from_prices(&prices)
    }

    /// Carnet d'exemple BTC/USDT (9 niveaux de chaque côté)
    pub fn sample() -> Self {
        let asks = vec![
            OrderLevel::new(69877.68, 0.952515, 0.112015),
            OrderLevel::new(69880.25, 0.845621, 0.110532),
            OrderLevel::new(69883.42, 0.763458, 0.109876),
            OrderLevel::new(69885.17, 0.687234, 0.108543),
            OrderLevel::new(69888.93, 0.598765, 0.107654),
            OrderLevel::new(69890.56, 0.512387, 0.106789),
            OrderLevel::new(69893.21, 0.435621, 0.105432),
            OrderLevel::new(69895.84, 0.367892, 0.104321),
            OrderLevel::new(69898.47, 0.298765, 0.103210),
        ];

        let bids = vec![
            OrderLevel::new(69875.32, 0.987654, 0.113210),
            OrderLevel::new(69872.45, 0.876543, 0.112345),
            OrderLevel::new(69870.18, 0.765432, 0.111456),
            OrderLevel::new(69867.93, 0.654321, 0.110567),
            OrderLevel::new(69865.27, 0.543210, 0.109678),
            OrderLevel::new(69862.84, 0.432109, 0.108789),
            OrderLevel::new(69860.51, 0.321098, 0.107890),
            OrderLevel::new(69858.26, 0.210987, 0.106901),
            OrderLevel::new(69855.73, 0.109876, 0.105012),
        ];

        // (prix, quantité, seconde après 14:30, sens)
        let tape = [
            (69877.68, 0.001234, 25, Side::Buy),
            (69875.32, 0.002156, 24, Side::Sell),
            (69878.90, 0.000987, 23, Side::Buy),
            (69876.45, 0.001567, 22, Side::Sell),
            (69879.12, 0.000876, 21, Side::Buy),
            (69877.33, 0.002345, 20, Side::Sell),
            (69880.67, 0.001123, 19, Side::Buy),
            (69878.89, 0.001789, 18, Side::Sell),
            (69881.23, 0.000654, 17, Side::Buy),
            (69879.56, 0.002012, 16, Side::Sell),
            (69882.34, 0.001456, 15, Side::Buy),
            (69880.78, 0.000987, 14, Side::Sell),
            (69883.45, 0.001234, 13, Side::Buy),
            (69881.90, 0.001678, 12, Side::Sell),
        ];

        let trades = tape
            .iter()
            .filter_map(|&(price, amount, second, side)| {
                NaiveTime::from_hms_opt(14, 30, second).map(|time| Trade {
                    price,
                    amount,
                    time,
                    side,
                })
            })
            .collect();

        Self {
            symbol: "BTC/USDT".to_string(),
            asks,
            bids,
            last_price: 69877.86,
            change: 60.244,
            trades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_fraction() {
        let level = OrderLevel::new(1.0, 1.0, 0.06);
        assert!((level.depth_fraction(DEFAULT_DEPTH_SCALE) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_depth_fraction_is_clamped() {
        let level = OrderLevel::new(1.0, 1.0, 0.5);
        assert_eq!(level.depth_fraction(DEFAULT_DEPTH_SCALE), 1.0);
        assert_eq!(level.depth_fraction(0.0), 0.0);
        assert_eq!(OrderLevel::new(1.0, 1.0, -1.0).depth_fraction(0.12), 0.0);
    }

    #[test]
    fn test_sample_book_shape() {
        let book = OrderBook::sample();
        assert_eq!(book.asks.len(), 9);
        assert_eq!(book.bids.len(), 9);
        assert_eq!(book.trades.len(), 14);
        assert_eq!(
            book.trades[0].time,
            NaiveTime::from_hms_opt(14, 30, 25).unwrap()
        );
    }

    #[test]
    fn test_sample_tape_trends_down() {
        let book = OrderBook::sample();
        let trend = book.price_trend();

        assert_eq!(trend.len(), book.trades.len());
        // 69881.90 (14:30:12) -> 69877.68 (14:30:25)
        assert!(!trend.is_positive());
    }
}
