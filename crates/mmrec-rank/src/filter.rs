//! Candidate pool construction: a strict pass, and a relaxed pass when the strict one finds nothing.

use std::collections::HashSet;

use mmrec_core::config::EngineSettings;
use mmrec_core::{normalize, Filters, Item, RecommendRequest};
use mmrec_text::item_tokens;
use tracing::{debug, info};

/// Normalized category/brand terms, deduplicated, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet(Vec<String>);

impl TermSet {
    pub fn from_raw(raw: &[String]) -> Self {
        let mut terms: Vec<String> = Vec::with_capacity(raw.len());
        for t in raw.iter().map(|t| normalize(t)) {
            if !terms.contains(&t) { terms.push(t); }
        }
        Self(terms)
    }

    pub fn contains(&self, term: &str) -> bool { self.0.iter().any(|t| t == term) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn joined(&self) -> String { self.0.join(" ") }
}

/// Read-only constraints for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveFilters {
    pub categories: TermSet,
    pub brands: TermSet,
    pub min_price: f64,
    pub max_price: f64,
    /// Clamped to `[0, 1]`.
    pub brand_boost: f64,
    /// Only active when `> 0`.
    pub budget: f64,
}

impl ActiveFilters {
    pub fn new(filters: &Filters, budget: f64) -> Self {
        Self {
            categories: TermSet::from_raw(&filters.categories),
            brands: TermSet::from_raw(&filters.brands),
            min_price: filters.min_price,
            max_price: filters.max_price,
            brand_boost: filters.brand_boost.clamp(0.0, 1.0),
            budget,
        }
    }

    /// Whether category or brand terms can drive a request without seeds.
    pub fn has_terms(&self) -> bool { !self.categories.is_empty() || !self.brands.is_empty() }

    /// Budget and price band. An unknown price (0) is never rejected by the lower bound.
    pub fn price_allows(&self, price: f64) -> bool {
        if self.budget > 0.0 && price > self.budget { return false; }
        if self.min_price > 0.0 && price > 0.0 && price < self.min_price { return false; }
        if self.max_price > 0.0 && price > self.max_price { return false; }
        true
    }

    pub fn category_matches(&self, item: &Item) -> bool { self.categories.contains(&item.normalized_category()) }

    pub fn brand_matches(&self, item: &Item) -> bool { self.brands.contains(&item.normalized_brand()) }

    /// Stand-in seed built from the filter terms, used when the caller picked no items.
    pub fn synthetic_seed(&self) -> Item {
        let categories = self.categories.joined();
        let brands = self.brands.joined();
        let name = if !categories.is_empty() {
            categories.clone()
        } else if !brands.is_empty() {
            brands.clone()
        } else {
            "seed".to_string()
        };
        Item { product_name: name, product_category_tree: categories, brand: brands, ..Item::default() }
    }
}

/// A pool member: index into the request's products plus its tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    pub candidates: Vec<Candidate>,
    /// True when the strict pass was empty and the relaxed pass filled the pool.
    pub relaxed: bool,
}

impl CandidatePool {
    pub fn len(&self) -> usize { self.candidates.len() }

    pub fn is_empty(&self) -> bool { self.candidates.is_empty() }
}

/// Non-seed, named items in input order, with their parsed price.
fn eligible<'a>(request: &'a RecommendRequest) -> impl Iterator<Item = (usize, &'a Item, f64)> + 'a {
    request
        .products
        .iter()
        .enumerate()
        .filter(move |(i, _)| !request.is_seed(*i))
        .filter_map(|(i, p)| p.as_ref().map(|p| (i, p)))
        .filter(|(_, p)| p.has_name())
        .map(|(i, p)| (i, p, p.price_value()))
}

/// Price gates, category and brand membership, non-empty tokens and, when
/// `seed_vocabulary` is given, at least one token shared with the seeds.
/// Stops after `cap` candidates.
pub fn strict_filter(
    request: &RecommendRequest,
    filters: &ActiveFilters,
    seed_vocabulary: Option<&HashSet<String>>,
    cap: usize,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    for (index, item, price) in eligible(request) {
        if !filters.price_allows(price) { continue; }
        if !filters.categories.is_empty() && !filters.category_matches(item) { continue; }
        if !filters.brands.is_empty() && !filters.brand_matches(item) { continue; }
        let tokens = item_tokens(item);
        if tokens.is_empty() { continue; }
        if let Some(vocabulary) = seed_vocabulary {
            if !tokens.iter().any(|t| vocabulary.contains(t)) { continue; }
        }
        out.push(Candidate { index, tokens });
        if out.len() >= cap { break; }
    }
    out
}

/// Price gates only, up to `cap` candidates.
pub fn relaxed_filter(request: &RecommendRequest, filters: &ActiveFilters, cap: usize) -> Vec<Candidate> {
    eligible(request)
        .filter(|(_, _, price)| filters.price_allows(*price))
        .take(cap)
        .map(|(index, item, _)| Candidate { index, tokens: item_tokens(item) })
        .collect()
}

/// Strict pass, falling back to the relaxed pass when it yields nothing.
pub fn candidate_pool(
    request: &RecommendRequest,
    filters: &ActiveFilters,
    seed_vocabulary: Option<&HashSet<String>>,
    settings: &EngineSettings,
) -> CandidatePool {
    let strict = strict_filter(request, filters, seed_vocabulary, settings.max_candidates);
    if !strict.is_empty() {
        debug!(candidates = strict.len(), "strict pass");
        return CandidatePool { candidates: strict, relaxed: false };
    }
    let relaxed = relaxed_filter(request, filters, settings.fallback_candidates);
    info!(candidates = relaxed.len(), "strict pass empty, using relaxed pool");
    CandidatePool { candidates: relaxed, relaxed: true }
}
