#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod lenient;
pub mod request;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use request::{RecommendOptions, RecommendRequest};
pub use traits::Recommender;
pub use types::{normalize, Filters, Item};
