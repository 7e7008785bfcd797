//! The request message and its resolved options.

use serde::{Deserialize, Serialize};

use crate::config::{EngineSettings, TOPK_LIMIT};
use crate::error::Result;
use crate::lenient;
use crate::types::{Filters, Item};

/// One recommendation request, as delivered by the host.
///
/// Every field is optional on the wire; malformed parts degrade to defaults
/// instead of rejecting the message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default, deserialize_with = "lenient::products")]
    pub products: Vec<Option<Item>>,
    #[serde(default, rename = "selIndices", deserialize_with = "lenient::indices")]
    pub sel_indices: Vec<i64>,
    #[serde(default, deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub topk: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::filters")]
    pub filters: Filters,
}

/// Request knobs after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendOptions {
    /// Relevance/diversity trade-off in `[0, 1]`.
    pub lambda: f64,
    /// Number of picks in `[1, max_topk]`.
    pub topk: usize,
    /// Price ceiling; only active when `> 0`.
    pub budget: f64,
}

impl RecommendRequest {
    pub fn new(products: Vec<Item>, sel_indices: Vec<i64>) -> Self {
        Self { products: products.into_iter().map(Some).collect(), sel_indices, ..Self::default() }
    }

    /// Parse a JSON message. Only a syntax error is an error; shape problems are tolerated.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Present items picked by `sel_indices`, in the given order. Out-of-range
    /// indices and empty slots are dropped; repeats are kept.
    pub fn seeds(&self) -> Vec<&Item> {
        self.sel_indices.iter().filter_map(|&i| self.item(i)).collect()
    }

    /// Item at a wire index; negative, out-of-range and empty slots are `None`.
    pub fn item(&self, index: i64) -> Option<&Item> {
        usize::try_from(index).ok().and_then(|i| self.product(i))
    }

    pub fn product(&self, index: usize) -> Option<&Item> {
        self.products.get(index).and_then(Option::as_ref)
    }

    pub fn is_seed(&self, index: usize) -> bool {
        self.sel_indices.iter().any(|&i| usize::try_from(i).is_ok_and(|i| i == index))
    }

    pub fn options(&self, settings: &EngineSettings) -> RecommendOptions {
        let max_topk = settings.max_topk.clamp(1, TOPK_LIMIT);
        let lambda = self.lambda.unwrap_or(settings.default_lambda).clamp(0.0, 1.0);
        // `0` is treated like "not given".
        let topk = match self.topk {
            Some(k) if k != 0.0 => k.trunc().clamp(1.0, max_topk as f64) as usize,
            _ => settings.default_topk.clamp(1, max_topk),
        };
        RecommendOptions { lambda, topk, budget: self.budget.unwrap_or(0.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RecommendRequest {
        serde_json::from_value(value).expect("request")
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let request = parse(json!({}));
        let opts = request.options(&EngineSettings::default());
        assert!(request.products.is_empty());
        assert_eq!(opts.lambda, 0.8);
        assert_eq!(opts.topk, 10);
        assert_eq!(opts.budget, 0.0);
    }

    #[test]
    fn knobs_are_clamped() {
        let settings = EngineSettings::default();
        let opts = parse(json!({"lambda": 3, "topk": 500})).options(&settings);
        assert_eq!((opts.lambda, opts.topk), (1.0, 50));
        let opts = parse(json!({"lambda": -1, "topk": -4})).options(&settings);
        assert_eq!((opts.lambda, opts.topk), (0.0, 1));
        let opts = parse(json!({"lambda": 0, "topk": 0})).options(&settings);
        assert_eq!((opts.lambda, opts.topk), (0.0, 10), "lambda 0 is honoured, topk 0 means default");
        let opts = parse(json!({"topk": "2.9"})).options(&settings);
        assert_eq!(opts.topk, 2);
    }

    #[test]
    fn topk_never_exceeds_hard_limit() {
        let loose = EngineSettings { max_topk: 100, default_topk: 80, ..EngineSettings::default() };
        assert_eq!(parse(json!({"topk": 500})).options(&loose).topk, TOPK_LIMIT);
        assert_eq!(parse(json!({})).options(&loose).topk, TOPK_LIMIT);
    }

    #[test]
    fn malformed_parts_degrade_instead_of_failing() {
        let request = parse(json!({
            "products": [{"product_name": "A"}, 7, null, {"product_name": "B"}],
            "selIndices": [0, "3", 1.5, "x", -1, 99],
            "filters": "nope"
        }));
        assert_eq!(request.products.len(), 4);
        assert!(request.products[1].is_none());
        assert_eq!(request.sel_indices, vec![0, 3, -1, 99]);
        let names: Vec<&str> = request.seeds().iter().map(|s| s.product_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(request.filters, Filters::default());

        let request = parse(json!({"products": "not a list"}));
        assert!(request.products.is_empty());
    }

    #[test]
    fn from_json_reports_syntax_errors() {
        assert!(RecommendRequest::from_json("{\"products\": [").is_err());
        assert!(RecommendRequest::from_json("{\"selIndices\": [0]}").is_ok());
    }
}
