//! Base score: cosine relevance to the seed centroid, log-normal price affinity, brand nudge.

use mmrec_core::config::EngineSettings;

/// Median of the strictly positive values, `None` when there are none.
pub fn median_positive(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.into_iter().filter(|x| *x > 0.0).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let m = v.len() / 2;
    Some(if v.len() % 2 == 1 { v[m] } else { (v[m - 1] + v[m]) / 2.0 })
}

/// Per-request scoring constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    relevance_weight: f64,
    price_weight: f64,
    neutral_affinity: f64,
    sigma: f64,
    median_price: Option<f64>,
    /// Already multiplied by the configured weight; 0 when no brand filter is set.
    brand_bonus: f64,
}

impl Scorer {
    pub fn new(settings: &EngineSettings, median_price: Option<f64>, brand_boost: f64, has_brand_filter: bool) -> Self {
        let brand_bonus = if brand_boost > 0.0 && has_brand_filter { settings.brand_boost_weight * brand_boost } else { 0.0 };
        Self {
            relevance_weight: settings.relevance_weight,
            price_weight: settings.price_weight,
            neutral_affinity: settings.neutral_price_affinity,
            sigma: settings.price_sigma,
            median_price,
            brand_bonus,
        }
    }

    /// `exp(-0.5 · ln(price / median)² / σ²)`; neutral without a median or a price.
    ///
    /// Symmetric on a multiplicative scale: 2× and 0.5× the median score the same.
    pub fn price_affinity(&self, price: f64) -> f64 {
        match self.median_price {
            Some(median) if median > 0.0 && price > 0.0 => {
                let dist = (price / median).ln();
                (-0.5 * dist * dist / (self.sigma * self.sigma)).exp()
            }
            _ => self.neutral_affinity,
        }
    }

    pub fn score(&self, relevance: f64, price: f64, brand_matches: bool) -> f64 {
        let base = self.relevance_weight * relevance + self.price_weight * self.price_affinity(price);
        if brand_matches { base + self.brand_bonus } else { base }
    }
}
