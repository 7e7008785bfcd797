//! mmrec-text
//!
//! Text side of the recommender: a fixed tokenizer, request-scoped TF-IDF
//! vector spaces and sparse cosine similarity.
pub mod tfidf;
pub mod tokenize;
pub mod vector;

pub use tfidf::VectorSpace;
pub use tokenize::{item_tokens, tokenize, STOP_WORDS};
pub use vector::{SparseVector, NORM_EPSILON};
