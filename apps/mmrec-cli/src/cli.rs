use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mmrec", about = "Content-based product recommendations with diversity re-ranking")]
pub struct Cli {
    /// Directory holding config.toml and config.<env>.toml [default: working directory].
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend items for one request, read from a file or built from flags.
    Recommend(RecommendArgs),
}

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    /// Complete request message (JSON). Other request flags are ignored.
    #[arg(long, conflicts_with = "catalog")]
    pub request: Option<String>,

    /// JSON array of products. Defaults to `data.catalog` from the config.
    #[arg(long)]
    pub catalog: Option<String>,

    /// Index of a liked product; repeat for several.
    #[arg(long = "seed")]
    pub seeds: Vec<i64>,

    #[arg(long)]
    pub topk: Option<f64>,

    /// 1.0 ranks by relevance only, lower values favour variety.
    #[arg(long)]
    pub lambda: Option<f64>,

    #[arg(long)]
    pub budget: Option<f64>,

    #[arg(long = "category")]
    pub categories: Vec<String>,

    #[arg(long = "brand")]
    pub brands: Vec<String>,

    #[arg(long, default_value_t = 0.0)]
    pub min_price: f64,

    #[arg(long, default_value_t = 0.0)]
    pub max_price: f64,

    #[arg(long, default_value_t = 0.0)]
    pub brand_boost: f64,

    #[arg(long)]
    pub pretty: bool,
}
