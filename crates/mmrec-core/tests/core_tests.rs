use std::fs;
use std::path::Path;
use tempfile::TempDir;

use mmrec_core::config::{expand_path, resolve_with_base, Config, EngineSettings};
use mmrec_core::{Item, RecommendRequest};

#[test]
fn config_without_files_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from(tmp.path()).expect("load");
    let settings = config.engine_settings().expect("settings");
    assert_eq!(settings, EngineSettings::default());
}

#[test]
fn engine_table_overrides_selected_fields() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[engine]\nmax_topk = 20\nreason_separator = \" • \"\n",
    )
    .unwrap();

    let settings = Config::load_from(tmp.path()).expect("load").engine_settings().expect("settings");
    assert_eq!(settings.max_topk, 20);
    assert_eq!(settings.reason_separator, " • ");
    assert_eq!(settings.max_candidates, 30_000, "untouched fields keep their defaults");
}

#[test]
fn invalid_engine_table_is_rejected_at_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[engine]\nprice_sigma = 0.0\n").unwrap();
    let err = Config::load_from(tmp.path()).err().expect("sigma 0 must be rejected");
    assert!(err.to_string().contains("price_sigma"), "unexpected error: {err}");
}

#[test]
fn max_topk_above_hard_limit_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[engine]\nmax_topk = 100\n").unwrap();
    let err = Config::load_from(tmp.path()).err().expect("max_topk 100 must be rejected");
    assert!(err.to_string().contains("max_topk"), "unexpected error: {err}");

    fs::write(tmp.path().join("config.toml"), "[engine]\nmax_topk = 50\n").unwrap();
    assert!(Config::load_from(tmp.path()).is_ok());
}

#[test]
fn load_reads_the_working_directory() {
    // Integration tests run from the crate root, which has no config files.
    let settings = Config::load().expect("load").engine_settings().expect("settings");
    assert_eq!(settings.max_topk, EngineSettings::default().max_topk);
}

#[test]
fn get_extracts_arbitrary_keys() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[data]\ncatalog = \"catalog.json\"\n").unwrap();
    let config = Config::load_from(tmp.path()).expect("load");
    let catalog: String = config.get("data.catalog").expect("catalog key");
    assert_eq!(catalog, "catalog.json");
    assert!(config.get::<String>("data.missing").is_err());
}

#[test]
fn paths_expand_env_vars_and_resolve_against_base() {
    std::env::set_var("MMREC_CORE_TEST_DIR", "/srv/catalogs");
    assert_eq!(expand_path("$MMREC_CORE_TEST_DIR/a.json"), Path::new("/srv/catalogs/a.json"));
    assert_eq!(resolve_with_base(Path::new("/base"), "rel/a.json"), Path::new("/base/rel/a.json"));
    assert_eq!(resolve_with_base(Path::new("/base"), "/abs/a.json"), Path::new("/abs/a.json"));
}

#[test]
fn request_round_trips_through_json() {
    let request = RecommendRequest::new(
        vec![Item::new("Red Running Shoes", "Footwear>Sports", "Acme", 50.0)],
        vec![0],
    );
    let text = serde_json::to_string(&request).unwrap();
    assert!(text.contains("\"selIndices\":[0]"));
    let back = RecommendRequest::from_json(&text).expect("parse");
    assert_eq!(back, request);
}
