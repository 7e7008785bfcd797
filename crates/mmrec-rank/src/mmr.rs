//! Maximal Marginal Relevance selection.
//!
//! `MMR(i) = λ · score(i) − (1 − λ) · max_{j ∈ chosen} cos(i, j)`
//!
//! Candidates are ordered once by descending base score (stable, so equal
//! scores keep pool order). The first pick is the head of that order; every
//! later pick is the first candidate in that order with the highest MMR.

use mmrec_text::SparseVector;
use tracing::debug;

/// Returns up to `k` positions into `scores`/`vectors`, in pick order.
pub fn select(scores: &[f64], vectors: &[SparseVector], lambda: f64, k: usize) -> Vec<usize> {
    debug_assert_eq!(scores.len(), vectors.len());
    let mut remaining: Vec<usize> = (0..scores.len()).collect();
    remaining.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    // Highest similarity of each candidate to anything chosen so far.
    let mut max_sim = vec![0.0f64; scores.len()];
    let mut chosen: Vec<usize> = Vec::with_capacity(k.min(scores.len()));

    while chosen.len() < k && !remaining.is_empty() {
        let pos = if let Some(&last) = chosen.last() {
            let mut best_pos = 0;
            let mut best_mmr = f64::NEG_INFINITY;
            for (pos, &i) in remaining.iter().enumerate() {
                let sim = vectors[i].cosine(&vectors[last]);
                if sim > max_sim[i] { max_sim[i] = sim; }
                let mmr = lambda * scores[i] - (1.0 - lambda) * max_sim[i];
                if mmr > best_mmr {
                    best_mmr = mmr;
                    best_pos = pos;
                }
            }
            best_pos
        } else {
            0
        };
        let picked = remaining.remove(pos);
        debug!(pick = chosen.len(), candidate = picked, score = scores[picked], "mmr pick");
        chosen.push(picked);
    }
    chosen
}
