//! Request boundary: the only place faults are absorbed.
//!
//! Whatever happens inside a recommender, the host gets an array back.

use std::panic::{catch_unwind, AssertUnwindSafe};

use mmrec_core::{Item, RecommendRequest, Recommender};
use tracing::error;

pub struct Worker<R: Recommender> {
    recommender: R,
}

impl<R: Recommender> Worker<R> {
    pub fn new(recommender: R) -> Self { Self { recommender } }

    /// Recommendations, or an empty list when the recommender fails or panics.
    pub fn handle(&self, request: &RecommendRequest) -> Vec<Item> {
        match catch_unwind(AssertUnwindSafe(|| self.recommender.recommend(request))) {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                error!(error = %e, "recommendation failed");
                Vec::new()
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(panic = %message, "recommender panicked");
                Vec::new()
            }
        }
    }

    /// One JSON message in, one JSON array out. Malformed input answers `[]`.
    pub fn handle_json(&self, message: &str) -> String {
        let request = match RecommendRequest::from_json(message) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "unreadable request");
                return "[]".to_string();
            }
        };
        let items = self.handle(&request);
        match serde_json::to_string(&items) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "response serialization failed");
                "[]".to_string()
            }
        }
    }
}
