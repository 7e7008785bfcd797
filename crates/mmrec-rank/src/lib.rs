//! mmrec-rank
//!
//! The recommendation pipeline: candidate filtering, base scoring, MMR
//! selection and explanations, plus the request boundary used by hosts.
pub mod engine;
pub mod explain;
pub mod filter;
pub mod mmr;
pub mod score;
pub mod worker;

pub use engine::{RecommendEngine, ScoredPool};
pub use explain::Explainer;
pub use filter::{candidate_pool, ActiveFilters, Candidate, CandidatePool, TermSet};
pub use score::{median_positive, Scorer};
pub use worker::Worker;
