// ============================================================================
// Structure : TrendSeries
// ============================================================================
// Courbe de tendance synthétique pour les mini-graphiques (sparklines)
//
// Algorithme :
// 1. Valeur de départ : 50
// 2. 15 pas : +0.5 (hausse) ou -0.5 (baisse) + bruit uniforme dans [-4, +4]
// 3. Clamp dans [20, 80] après chaque pas
// 4. Les 15 valeurs clampées forment la série
//
// Les séries aléatoires sont décoratives ; from_prices() reprend un
// historique de prix existant (flux des transactions).
// ============================================================================

use rand::Rng;

/// Nombre de points d'une série
pub const TREND_LEN: usize = 15;

/// Valeur de départ de la marche aléatoire
pub const BASELINE: f64 = 50.0;

/// Dérive appliquée à chaque pas (signe selon la direction)
pub const DRIFT: f64 = 0.5;

/// Amplitude du bruit uniforme : [-NOISE, +NOISE]
pub const NOISE: f64 = 4.0;

/// Bornes de la zone tracée
pub const MIN_VALUE: f64 = 20.0;
pub const MAX_VALUE: f64 = 80.0;

/// Série de 15 valeurs dans [20, 80], biaisée vers le haut ou le bas
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    values: Vec<f64>,
    is_positive: bool,
}

impl TrendSeries {
    /// Génère une nouvelle série avec le générateur du thread
    ///
    /// Chaque appel produit un échantillon indépendant (pas de seed).
    pub fn generate(is_positive: bool) -> Self {
        Self::generate_with(&mut rand::thread_rng(), is_positive)
    }

    /// Génère une série avec un générateur fourni (tests reproductibles)
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, is_positive: bool) -> Self {
        let drift = if is_positive { DRIFT } else { -DRIFT };
        let mut value = BASELINE;

        let values = (0..TREND_LEN)
            .map(|_| {
                let noise = rng.gen_range(-NOISE..=NOISE);
                value = (value + drift + noise).clamp(MIN_VALUE, MAX_VALUE);
                value
            })
            .collect();

        Self { values, is_positive }
    }

    /// Construit une série à partir de valeurs existantes
    ///
    /// Les valeurs sont clampées dans [20, 80].
    pub fn from_values(values: impl IntoIterator<Item = f64>, is_positive: bool) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(MIN_VALUE, MAX_VALUE))
                .collect(),
            is_positive,
        }
    }

    /// Construit une série à partir de prix de marché
    ///
    /// Les prix sont ramenés linéairement dans [20, 80], ce qui conserve la
    /// forme. La direction compare le dernier prix au premier.
    pub fn from_prices(prices: &[f64]) -> Self {
        let (min, max) = prices
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        let span = if max > min { max - min } else { 1.0 };
        let is_positive = match (prices.first(), prices.last()) {
            (Some(first), Some(last)) => last >= first,
            _ => true,
        };

        Self::from_values(
            prices
                .iter()
                .map(|p| MIN_VALUE + (p - min) / span * (MAX_VALUE - MIN_VALUE)),
            is_positive,
        )
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_positive(&self) -> bool {
        self.is_positive
    }

    /// Min et max de la série (échelle verticale propre à la série)
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().fold(
            (f64::MAX, f64::MIN),
            |(min, max), &v| (min.min(v), max.max(v)),
        ))
    }

    /// Écart max - min, ou 1 si la série est plate
    pub fn range(&self) -> f64 {
        match self.bounds() {
            Some((min, max)) if max > min => max - min,
            _ => 1.0,
        }
    }

    /// Pente moyenne : (dernier - premier) / nombre de pas
    pub fn mean_slope(&self) -> f64 {
        match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) if self.values.len() > 1 => {
                (last - first) / (self.values.len() - 1) as f64
            }
            _ => 0.0,
        }
    }

    // ========================================================================
    // Géométrie
    // ========================================================================

    /// Projette la série dans une zone `width` x `height` avec marge
    ///
    /// - x : de gauche à droite selon l'index
    /// - y : 0 en haut ; la valeur max touche le haut, la min le bas
    pub fn normalized(&self, width: f64, height: f64, padding: f64) -> Vec<(f64, f64)> {
        let Some((_, max)) = self.bounds() else {
            return Vec::new();
        };
        let range = self.range();
        let steps = self.values.len().saturating_sub(1).max(1) as f64;
        let inner_w = width - padding * 2.0;
        let inner_h = height - padding * 2.0;

        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = padding + (i as f64 / steps) * inner_w;
                let y = padding + ((max - v) / range) * inner_h;
                (x, y)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 2000;

    #[test]
    fn test_length_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..SAMPLES {
            let series = TrendSeries::generate_with(&mut rng, i % 2 == 0);
            assert_eq!(series.len(), TREND_LEN);
            assert!(series
                .values()
                .iter()
                .all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
        }
    }

    #[test]
    fn test_thread_rng_generation_is_valid() {
        let series = TrendSeries::generate(true);
        assert_eq!(series.len(), TREND_LEN);
        assert!(series.is_positive());
        assert!(series
            .values()
            .iter()
            .all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
    }

    #[test]
    fn test_positive_bias() {
        let mut rng = StdRng::seed_from_u64(42);
        let (mut up, mut down) = (0, 0);
        for _ in 0..SAMPLES {
            let slope = TrendSeries::generate_with(&mut rng, true).mean_slope();
            if slope > 0.0 {
                up += 1;
            } else if slope < 0.0 {
                down += 1;
            }
        }
        assert!(up > down, "up={up} down={down}");
    }

    #[test]
    fn test_negative_bias() {
        let mut rng = StdRng::seed_from_u64(42);
        let (mut up, mut down) = (0, 0);
        for _ in 0..SAMPLES {
            let slope = TrendSeries::generate_with(&mut rng, false).mean_slope();
            if slope > 0.0 {
                up += 1;
            } else if slope < 0.0 {
                down += 1;
            }
        }
        assert!(down > up, "up={up} down={down}");
    }

    #[test]
    fn test_from_values_clamps() {
        let series = TrendSeries::from_values([0.0, 50.0, 100.0], true);
        assert_eq!(series.values(), &[20.0, 50.0, 80.0]);
    }

    #[test]
    fn test_normalized_uses_series_own_scale() {
        let series = TrendSeries::from_values([30.0, 40.0, 35.0], true);
        let points = series.normalized(112.0, 48.0, 4.0);

        assert_eq!(points.len(), 3);
        // Premier point : à gauche, valeur min -> en bas
        assert_eq!(points[0], (4.0, 44.0));
        // Deuxième point : au milieu, valeur max -> en haut
        assert_eq!(points[1], (56.0, 4.0));
        // Dernier point : à droite, à mi-hauteur
        assert_eq!(points[2], (108.0, 24.0));
    }

    #[test]
    fn test_flat_series_uses_unit_range() {
        let series = TrendSeries::from_values([50.0; 4], false);
        assert_eq!(series.range(), 1.0);
        let points = series.normalized(112.0, 48.0, 4.0);
        assert!(points.iter().all(|&(_, y)| y == 4.0));
    }

    #[test]
    fn test_from_prices_keeps_shape_and_direction() {
        let falling = TrendSeries::from_prices(&[69881.90, 69883.45, 69877.68]);
        assert!(!falling.is_positive());
        assert_eq!(falling.values()[1], MAX_VALUE);
        assert_eq!(falling.values()[2], MIN_VALUE);

        let rising = TrendSeries::from_prices(&[100.0, 101.0]);
        assert!(rising.is_positive());
        assert_eq!(rising.values(), &[MIN_VALUE, MAX_VALUE]);
    }

    #[test]
    fn test_from_prices_flat_and_empty() {
        let flat = TrendSeries::from_prices(&[5.0, 5.0, 5.0]);
        assert!(flat.is_positive());
        assert!(flat.values().iter().all(|&v| v == MIN_VALUE));
        assert!(TrendSeries::from_prices(&[]).is_empty());
    }

    #[test]
    fn test_empty_series() {
        let series = TrendSeries::from_values(Vec::new(), true);
        assert!(series.bounds().is_none());
        assert!(series.normalized(10.0, 10.0, 0.0).is_empty());
        assert_eq!(series.mean_slope(), 0.0);
    }
}
