use std::collections::HashSet;

use mmrec_core::config::EngineSettings;
use mmrec_core::{Error, Item, RecommendRequest, Recommender, Result};
use mmrec_text::{item_tokens, VectorSpace};
use tracing::{debug, warn};

use crate::explain::Explainer;
use crate::filter::{candidate_pool, ActiveFilters, CandidatePool};
use crate::mmr;
use crate::score::{median_positive, Scorer};

/// Content-based recommender: filter → tf-idf → score → MMR → explain.
///
/// Holds only configuration; every request builds its own pool and vectors.
#[derive(Debug, Clone, Default)]
pub struct RecommendEngine {
    settings: EngineSettings,
}

/// Everything computed for one request before selection.
#[derive(Debug, Clone)]
pub struct ScoredPool {
    pub pool: CandidatePool,
    pub space: VectorSpace,
    /// Base score per pool member, same order as `pool.candidates`.
    pub scores: Vec<f64>,
    pub filters: ActiveFilters,
    /// Real seeds, or the single synthetic seed.
    pub driving_seeds: Vec<Item>,
    pub median_price: Option<f64>,
}

impl ScoredPool {
    /// Base score of the product at `index`, if it made it into the pool.
    pub fn score_of(&self, index: usize) -> Option<f64> {
        self.pool.candidates.iter().position(|c| c.index == index).map(|pos| self.scores[pos])
    }
}

impl RecommendEngine {
    pub fn new(settings: EngineSettings) -> Self { Self { settings } }

    /// Candidate pool plus base scores, or `None` when there is nothing to rank.
    pub fn score(&self, request: &RecommendRequest) -> Result<Option<ScoredPool>> {
        if request.products.is_empty() {
            return Ok(None);
        }
        let options = request.options(&self.settings);
        let filters = ActiveFilters::new(&request.filters, options.budget);

        let seeds: Vec<Item> = request.seeds().into_iter().cloned().collect();
        if seeds.len() < request.sel_indices.len() {
            warn!(given = request.sel_indices.len(), kept = seeds.len(), "dropped seed indices without an item");
        }
        if seeds.is_empty() && !filters.has_terms() {
            debug!("no seeds and no category/brand terms");
            return Ok(None);
        }
        let has_real_seeds = !seeds.is_empty();
        let driving_seeds = if has_real_seeds { seeds } else { vec![filters.synthetic_seed()] };
        let seed_tokens: Vec<Vec<String>> = driving_seeds.iter().map(item_tokens).collect();

        let vocabulary: Option<HashSet<String>> = has_real_seeds.then(|| seed_tokens.iter().flatten().cloned().collect());
        let pool = candidate_pool(request, &filters, vocabulary.as_ref(), &self.settings);
        if pool.is_empty() {
            return Ok(None);
        }

        let documents: Vec<Vec<String>> = pool.candidates.iter().map(|c| c.tokens.clone()).collect();
        let space = VectorSpace::build(&documents);
        let centroid = space.centroid(&seed_tokens);

        // True seeds only: a synthetic seed has no price.
        let median_price = if has_real_seeds { median_positive(driving_seeds.iter().map(Item::price_value)) } else { None };
        let scorer = Scorer::new(&self.settings, median_price, filters.brand_boost, !filters.brands.is_empty());

        let mut scores = Vec::with_capacity(pool.len());
        for (candidate, vector) in pool.candidates.iter().zip(space.vectors()) {
            let item = request.product(candidate.index).ok_or_else(|| Error::Operation(format!("candidate {} has no item", candidate.index)))?;
            let score = scorer.score(centroid.cosine(vector), item.price_value(), filters.brand_matches(item));
            if !score.is_finite() {
                return Err(Error::Operation(format!("non-finite score for candidate {}", candidate.index)));
            }
            scores.push(score);
        }
        debug!(candidates = pool.len(), relaxed = pool.relaxed, ?median_price, "scored pool");

        Ok(Some(ScoredPool { pool, space, scores, filters, driving_seeds, median_price }))
    }
}

impl Recommender for RecommendEngine {
    fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Item>> {
        let Some(scored) = self.score(request)? else {
            return Ok(Vec::new());
        };
        let options = request.options(&self.settings);
        let picks = mmr::select(&scored.scores, scored.space.vectors(), options.lambda, options.topk);

        let explainer = Explainer::new(&self.settings, &scored.filters, &scored.driving_seeds);
        let mut out = Vec::with_capacity(picks.len());
        for pos in picks {
            let candidate = &scored.pool.candidates[pos];
            let mut item = request
                .product(candidate.index)
                .cloned()
                .ok_or_else(|| Error::Operation(format!("candidate {} has no item", candidate.index)))?;
            item.reason = Some(explainer.explain(&item, &candidate.tokens));
            out.push(item);
        }
        Ok(out)
    }
}
