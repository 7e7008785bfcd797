//! Human-readable reasons attached to each pick.
//!
//! The nearest seed is found with plain term counts rather than the request's
//! tf-idf space; it only has to name a plausible seed, not rank anything.

use mmrec_core::config::EngineSettings;
use mmrec_core::Item;
use mmrec_text::{item_tokens, SparseVector};

use crate::filter::ActiveFilters;

pub struct Explainer<'a> {
    settings: &'a EngineSettings,
    filters: &'a ActiveFilters,
    seeds: Vec<(&'a Item, SparseVector)>,
}

impl<'a> Explainer<'a> {
    pub fn new(settings: &'a EngineSettings, filters: &'a ActiveFilters, seeds: &'a [Item]) -> Self {
        let seeds = seeds.iter().map(|s| (s, SparseVector::term_counts(&item_tokens(s)))).collect();
        Self { settings, filters, seeds }
    }

    /// First seed with the highest term-count cosine to `tokens`.
    pub fn nearest_seed(&self, tokens: &[String]) -> Option<&'a Item> {
        let v = SparseVector::term_counts(tokens);
        let mut best: Option<(&'a Item, f64)> = None;
        for (seed, sv) in &self.seeds {
            let sim = sv.cosine(&v);
            if best.map_or(true, |(_, b)| sim > b) { best = Some((*seed, sim)); }
        }
        best.map(|(s, _)| s)
    }

    pub fn explain(&self, item: &Item, tokens: &[String]) -> String {
        let mut bits: Vec<String> = Vec::new();
        if let Some(seed) = self.nearest_seed(tokens).filter(|s| s.has_name()) {
            bits.push(format!("similar to {}", truncate(&seed.product_name, self.settings.seed_name_chars)));
        }
        if !item.product_category_tree.is_empty() {
            bits.push(format!("category: {}", item.product_category_tree));
        }
        if !item.brand.is_empty() {
            bits.push(format!("brand: {}", item.brand));
        }
        if item.has_price() {
            bits.push(format!("price {}{}", self.settings.currency_symbol, format_amount(item.price_value())));
        }
        if self.filters.budget > 0.0 {
            let within = item.price_value() <= self.filters.budget;
            bits.push(if within { "within budget" } else { "over budget" }.to_string());
        }
        if !self.filters.categories.is_empty() && self.filters.category_matches(item) {
            bits.push("matches chosen category".to_string());
        }
        if !self.filters.brands.is_empty() && self.filters.brand_matches(item) {
            bits.push("matches chosen brand".to_string());
        }
        bits.join(&self.settings.reason_separator)
    }
}

/// At most `max` chars; longer text keeps `max - 1` chars plus an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Thousands separators and at most three decimals: `1299.5` → `"1,299.5"`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 { grouped.push(','); }
        grouped.push(c);
    }
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() { grouped } else { format!("{grouped}.{frac}") }
}
