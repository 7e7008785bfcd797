use mmrec_core::{Filters, Item, RecommendRequest, Recommender};
use mmrec_rank::{RecommendEngine, Worker};
use serde_json::json;

fn catalog() -> Vec<Item> {
    vec![
        Item::new("Red Running Shoes", "Footwear>Sports", "Acme", 50.0),
        Item::new("Blue Running Shoes", "Footwear>Sports", "Acme", 52.0),
        Item::new("Office Chair", "Furniture>Office", "Zed", 80.0),
    ]
}

fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.product_name.as_str()).collect()
}

#[test]
fn similar_shoe_ranks_before_unrelated_chair() {
    let mut request = RecommendRequest::new(catalog(), vec![0]);
    request.topk = Some(2.0);
    request.lambda = Some(0.5);
    let out = RecommendEngine::default().recommend(&request).expect("recommend");

    assert!(!out.is_empty() && out.len() <= 2);
    assert_eq!(out[0].product_name, "Blue Running Shoes");
    if let Some(pos) = out.iter().position(|i| i.product_name == "Office Chair") {
        assert!(pos > 0, "chair must come after the shoe");
    }
    for item in &out {
        let reason = item.reason.as_deref().unwrap_or("");
        assert!(!reason.is_empty(), "{} has no reason", item.product_name);
    }
    assert!(out[0].reason.as_deref().unwrap_or("").starts_with("similar to Red Running Shoes"));
}

#[test]
fn category_filter_drives_request_without_seeds() {
    let mut request = RecommendRequest::new(catalog(), vec![]);
    request.topk = Some(1.0);
    request.filters = Filters { categories: vec!["Furniture".into()], ..Filters::default() };
    let out = RecommendEngine::default().recommend(&request).expect("recommend");

    assert_eq!(names(&out), vec!["Office Chair"]);
    let reason = out[0].reason.as_deref().unwrap_or("");
    assert!(reason.contains("matches chosen category"), "reason was {reason:?}");
}

#[test]
fn nothing_within_budget_returns_empty() {
    let mut request = RecommendRequest::new(catalog(), vec![0]);
    request.budget = Some(10.0);
    let out = RecommendEngine::default().recommend(&request).expect("recommend");
    assert!(out.is_empty(), "got {:?}", names(&out));
}

#[test]
fn brand_boost_adds_fixed_bonus_to_matching_brand() {
    let engine = RecommendEngine::default();
    let mut plain = RecommendRequest::new(catalog(), vec![0]);
    plain.filters = Filters { brands: vec!["Zed".into()], ..Filters::default() };
    let mut boosted = plain.clone();
    boosted.filters.brand_boost = 1.0;

    let plain = engine.score(&plain).expect("score").expect("pool");
    let boosted = engine.score(&boosted).expect("score").expect("pool");
    assert!(plain.pool.relaxed, "no Zed item overlaps the seed, so the relaxed pass fills the pool");

    let chair_gain = boosted.score_of(2).expect("chair") - plain.score_of(2).expect("chair");
    let shoe_gain = boosted.score_of(1).expect("shoe") - plain.score_of(1).expect("shoe");
    assert!((chair_gain - 0.15).abs() < 1e-9, "chair gained {chair_gain}");
    assert!(shoe_gain.abs() < 1e-12, "non-matching brand gained {shoe_gain}");
}

#[test]
fn brand_boost_shifts_ranking() {
    let products = vec![
        Item::new("Red Running Shoes", "Footwear>Sports", "Acme", 50.0),
        Item::new("Blue Running Shoes", "Footwear>Sports", "Acme", 52.0),
        Item::new("Garden Hose", "Garden", "Hoseco", 100.0),
        Item::new("Office Chair", "Furniture>Office", "Zed", 300.0),
    ];
    let mut request = RecommendRequest::new(products, vec![0]);
    request.lambda = Some(1.0);
    request.topk = Some(3.0);
    request.filters = Filters { brands: vec!["Zed".into()], ..Filters::default() };
    let engine = RecommendEngine::default();

    let out = engine.recommend(&request).expect("recommend");
    assert_eq!(names(&out), vec!["Blue Running Shoes", "Garden Hose", "Office Chair"]);

    request.filters.brand_boost = 1.0;
    let out = engine.recommend(&request).expect("recommend");
    assert_eq!(names(&out), vec!["Blue Running Shoes", "Office Chair", "Garden Hose"]);
    assert!(out[1].reason.as_deref().unwrap_or("").ends_with("matches chosen brand"));
}

#[test]
fn items_with_conflicting_or_odd_fields_still_rank() {
    let worker = Worker::new(RecommendEngine::default());
    let message = json!({
        "products": [
            {"product_name": "Red Running Shoes", "product_category_tree": "Footwear>Sports", "brand": "Acme", "price": 50},
            {"product_name": "Blue Running Shoes", "name": "Blue", "product_category_tree": "Footwear>Sports", "brand": "Acme", "price": 52},
            {"product_name": "Green Running Shoes", "product_category_tree": "Footwear>Sports", "brand": "Acme", "price": 55, "reason": 7}
        ],
        "selIndices": [0]
    });
    let out: serde_json::Value = serde_json::from_str(&worker.handle_json(&message.to_string())).expect("json");
    let mut names: Vec<&str> = out.as_array().expect("array").iter().filter_map(|i| i["product_name"].as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Blue Running Shoes", "Green Running Shoes"]);
    assert!(out[0]["reason"].as_str().is_some_and(|r| r.starts_with("similar to")), "reason is rewritten");
}

#[test]
fn worker_answers_wire_messages() {
    let worker = Worker::new(RecommendEngine::default());
    let message = json!({
        "products": [
            {"name": "Red Running Shoes", "category": "Footwear>Sports", "brand": "Acme", "price": "₹50"},
            {"product_name": "Blue Running Shoes", "product_category_tree": "Footwear>Sports", "brand": "Acme", "price": "₹1,052", "sku": "B-2"},
            "garbage",
            {"product_name": "Office Chair", "product_category_tree": "Furniture>Office", "brand": "Zed", "price": 80}
        ],
        "selIndices": [0, "7", 42],
        "topk": "3"
    });
    let out: serde_json::Value = serde_json::from_str(&worker.handle_json(&message.to_string())).expect("json");
    let first = &out[0];
    assert_eq!(first["product_name"], "Blue Running Shoes");
    assert_eq!(first["price"], "₹1,052", "price is echoed as given");
    assert_eq!(first["sku"], "B-2");
    let reason = first["reason"].as_str().expect("reason");
    assert!(reason.contains("price ₹1,052"), "reason was {reason:?}");
}
