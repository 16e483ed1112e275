// ============================================================================
// Structure : CoinQuote
// ============================================================================
// Carte "top coins" : une paire, son prix, sa variation et son volume
// ============================================================================

/// Cotation d'une paire affichée dans une carte
#[derive(Debug, Clone, PartialEq)]
pub struct CoinQuote {
    /// Symbole de la crypto (ex: "BTC")
    pub symbol: String,

    /// Devise de cotation (ex: "USDT")
    pub pair: String,

    pub price: f64,

    /// Variation 24h en pourcentage
    pub change_percent: f64,

    /// Volume 24h en millions
    pub volume_24h_millions: f64,

    /// Pictogramme affiché devant le symbole
    pub icon: String,
}

impl CoinQuote {
    pub fn new(
        symbol: &str,
        pair: &str,
        price: f64,
        change_percent: f64,
        volume_24h_millions: f64,
        icon: &str,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            pair: pair.to_string(),
            price,
            change_percent,
            volume_24h_millions,
            icon: icon.to_string(),
        }
    }

    /// "BTC/USDT"
    pub fn pair_name(&self) -> String {
        format!("{}/{}", self.symbol, self.pair)
    }

    /// Vrai si la variation est positive ou nulle
    pub fn is_positive(&self) -> bool {
        self.change_percent >= 0.0
    }

    /// Variation formatée avec flèche : "▲ +2.54%"
    pub fn change_label(&self) -> String {
        let arrow = if self.is_positive() { "▲" } else { "▼" };
        format!("{} {:+.2}%", arrow, self.change_percent)
    }

    /// Les quatre cartes de la page marché
    pub fn top_coins() -> Vec<CoinQuote> {
        vec![
            CoinQuote::new("EHT", "USDT", 3949.25, 2.54, 68.66, "◆"),
            CoinQuote::new("BTC", "USDT", 69900.02, 0.95, 60.50, "₿"),
            CoinQuote::new("BFT", "USDT", 0.84130, 0.79, 13.59, "●"),
            CoinQuote::new("DOGE", "USDT", 0.17205, 1.94, 10.58, "Ð"),
        ]
    }
}

/// Formate un prix avec séparateurs de milliers : 69900.02 -> "69,900.02"
pub fn format_price(price: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, price.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_name_and_direction() {
        let quote = CoinQuote::new("BTC", "USDT", 1.0, -3.46, 1.0, "₿");
        assert_eq!(quote.pair_name(), "BTC/USDT");
        assert!(!quote.is_positive());
        assert_eq!(quote.change_label(), "▼ -3.46%");
    }

    #[test]
    fn test_top_coins() {
        let coins = CoinQuote::top_coins();
        assert_eq!(coins.len(), 4);
        assert!(coins.iter().all(CoinQuote::is_positive));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(69900.02, 2), "69,900.02");
        assert_eq!(format_price(3949.25, 2), "3,949.25");
        assert_eq!(format_price(0.84130, 5), "0.84130");
        assert_eq!(format_price(69877.68, 0), "69,878");
        assert_eq!(format_price(1234567.0, 1), "1,234,567.0");
        assert_eq!(format_price(-60.244, 3), "-60.244");
    }
}
