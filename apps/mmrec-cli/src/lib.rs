pub mod cli;

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use mmrec_core::config::{expand_path, resolve_with_base, Config};
use mmrec_core::{Filters, RecommendRequest, Recommender};
use mmrec_rank::{RecommendEngine, Worker};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, RecommendArgs};

/// `RUST_LOG`-driven logs on stderr, `info` by default. Stdout carries responses only.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Config from `config_dir`, or from the working directory when none is given.
pub fn load_config(config_dir: Option<&str>) -> anyhow::Result<(Config, PathBuf)> {
    match config_dir {
        Some(dir) => {
            let dir = expand_path(dir);
            let config = Config::load_from(&dir).with_context(|| format!("loading config from {}", dir.display()))?;
            Ok((config, dir))
        }
        None => Ok((Config::load().context("loading config from the working directory")?, PathBuf::from("."))),
    }
}

pub fn load_engine(config_dir: Option<&str>) -> anyhow::Result<RecommendEngine> {
    let (config, _) = load_config(config_dir)?;
    Ok(RecommendEngine::new(config.engine_settings()?))
}

/// `data.catalog` from the config, relative to the config directory.
pub fn configured_catalog(config: &Config, dir: &Path) -> Option<PathBuf> {
    config.get::<String>("data.catalog").ok().map(|p| resolve_with_base(dir, p))
}

/// The request named by `--request`, or one assembled from a catalog and the other flags.
pub fn build_request(args: &RecommendArgs, default_catalog: Option<PathBuf>) -> anyhow::Result<RecommendRequest> {
    if let Some(path) = &args.request {
        let path = expand_path(path);
        let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        return RecommendRequest::from_json(&text).with_context(|| format!("parsing {}", path.display()));
    }
    let Some(path) = args.catalog.as_deref().map(expand_path).or(default_catalog) else {
        anyhow::bail!("no catalog: pass --request or --catalog, or set data.catalog in config.toml");
    };
    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let products: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let mut request: RecommendRequest = serde_json::from_value(json!({ "products": products }))?;
    request.sel_indices = args.seeds.clone();
    request.topk = args.topk;
    request.lambda = args.lambda;
    request.budget = args.budget;
    request.filters = Filters {
        categories: args.categories.clone(),
        brands: args.brands.clone(),
        min_price: args.min_price,
        max_price: args.max_price,
        brand_boost: args.brand_boost,
    };
    Ok(request)
}

/// Run one command and return what belongs on stdout.
pub fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Command::Recommend(args) => {
            let (config, dir) = load_config(cli.config_dir.as_deref())?;
            let worker = Worker::new(RecommendEngine::new(config.engine_settings()?));
            let request = build_request(&args, configured_catalog(&config, &dir))?;
            let items = worker.handle(&request);
            info!(products = request.products.len(), picks = items.len(), "recommended");
            let out = if args.pretty { serde_json::to_string_pretty(&items)? } else { serde_json::to_string(&items)? };
            Ok(out)
        }
    }
}

/// One response line per non-blank request line until `input` ends.
pub fn serve<R, I, O>(worker: &Worker<R>, input: I, mut output: O) -> anyhow::Result<usize>
where
    R: Recommender,
    I: BufRead,
    O: Write,
{
    let mut handled = 0;
    for line in input.lines() {
        let line = line.context("reading request line")?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(output, "{}", worker.handle_json(&line))?;
        output.flush()?;
        handled += 1;
    }
    Ok(handled)
}
