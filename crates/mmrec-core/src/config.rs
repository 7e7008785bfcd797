use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    /// Config files from the working directory.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`Config::load`] with the TOML files looked up in `dir`.
    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        // APP_ENGINE__MAX_TOPK=20 -> engine.max_topk
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.engine_settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[engine]` table, or defaults when it is absent.
    pub fn engine_settings(&self) -> anyhow::Result<EngineSettings> {
        let settings = if self.figment.find_value("engine").is_ok() {
            self.get::<EngineSettings>("engine")?
        } else {
            EngineSettings::default()
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Hard ceiling on picks per request; `max_topk` may lower it, never raise it.
pub const TOPK_LIMIT: usize = 50;

/// Tunables of the scoring pipeline, read from the `[engine]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Cap on the strict candidate pass.
    pub max_candidates: usize,
    /// Cap on the relaxed fallback pass.
    pub fallback_candidates: usize,
    /// Width of the log-price Gaussian.
    pub price_sigma: f64,
    pub relevance_weight: f64,
    pub price_weight: f64,
    /// Price affinity used when there is no seed median or no candidate price.
    pub neutral_price_affinity: f64,
    /// Added per unit of `brandBoost` to items of a chosen brand.
    pub brand_boost_weight: f64,
    pub default_lambda: f64,
    pub default_topk: usize,
    pub max_topk: usize,
    /// Seed names longer than this are cut in explanations.
    pub seed_name_chars: usize,
    pub reason_separator: String,
    pub currency_symbol: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_candidates: 30_000,
            fallback_candidates: 5_000,
            price_sigma: 0.35,
            relevance_weight: 0.7,
            price_weight: 0.3,
            neutral_price_affinity: 0.5,
            brand_boost_weight: 0.15,
            default_lambda: 0.8,
            default_topk: 10,
            max_topk: 50,
            seed_name_chars: 40,
            reason_separator: " | ".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), Error> {
        let weights = [
            ("relevance_weight", self.relevance_weight),
            ("price_weight", self.price_weight),
            ("neutral_price_affinity", self.neutral_price_affinity),
            ("brand_boost_weight", self.brand_boost_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if !self.price_sigma.is_finite() || self.price_sigma <= 0.0 {
            return Err(Error::InvalidConfig(format!("price_sigma must be positive, got {}", self.price_sigma)));
        }
        if !(0.0..=1.0).contains(&self.default_lambda) {
            return Err(Error::InvalidConfig(format!("default_lambda must be in [0, 1], got {}", self.default_lambda)));
        }
        if self.max_topk == 0 || self.max_topk > TOPK_LIMIT {
            return Err(Error::InvalidConfig(format!("max_topk must be in [1, {TOPK_LIMIT}], got {}", self.max_topk)));
        }
        if self.max_candidates == 0 || self.fallback_candidates == 0 {
            return Err(Error::InvalidConfig("candidate caps must be at least 1".to_string()));
        }
        if self.seed_name_chars == 0 {
            return Err(Error::InvalidConfig("seed_name_chars must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
