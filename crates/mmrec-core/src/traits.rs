use crate::error::Result;
use crate::request::RecommendRequest;
use crate::types::Item;

/// Anything that can turn one request into a ranked, explained item list.
///
/// Implementations must be deterministic: the same request yields the same
/// list in the same order.
pub trait Recommender: Send + Sync {
    fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Item>>;
}
