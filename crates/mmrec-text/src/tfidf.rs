use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::vector::SparseVector;

/// TF-IDF space over one request's candidate pool.
///
/// The corpus is exactly the documents handed to [`VectorSpace::build`], never
/// the whole catalog, so the statistics describe the items that can actually
/// be recommended. Nothing here outlives the request.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
	idf: HashMap<String, f64>,
	vectors: Vec<SparseVector>,
}

impl VectorSpace {
	/// `idf(t) = ln((N + 1) / (df(t) + 1)) + 1`, then one tf·idf vector per document.
	pub fn build(documents: &[Vec<String>]) -> Self {
		let n = documents.len() as f64;
		let mut df: HashMap<&str, usize> = HashMap::new();
		for doc in documents {
			let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
			for t in unique { *df.entry(t).or_insert(0) += 1; }
		}
		let idf: HashMap<String, f64> = df
			.into_iter()
			.map(|(t, d)| (t.to_string(), ((n + 1.0) / (d as f64 + 1.0)).ln() + 1.0))
			.collect();
		let mut space = Self { idf, vectors: Vec::new() };
		let vectors: Vec<SparseVector> = documents.iter().map(|doc| space.weigh(doc)).collect();
		space.vectors = vectors;
		debug!(documents = documents.len(), vocabulary = space.idf.len(), "built tf-idf space");
		space
	}

	pub fn idf(&self, token: &str) -> Option<f64> { self.idf.get(token).copied() }

	pub fn vocabulary_len(&self) -> usize { self.idf.len() }

	/// Sum idf over every occurrence; tokens outside the vocabulary contribute nothing.
	pub fn weigh<'a, I>(&self, tokens: I) -> SparseVector
	where
		I: IntoIterator<Item = &'a String>,
	{
		let mut weights = BTreeMap::new();
		for t in tokens {
			if let Some(w) = self.idf(t) { *weights.entry(t.clone()).or_insert(0.0) += w; }
		}
		SparseVector::from_weights(weights)
	}

	/// One vector for all driving documents together, weighted by this space's idf.
	pub fn centroid<'a, I>(&self, documents: I) -> SparseVector
	where
		I: IntoIterator<Item = &'a Vec<String>>,
	{
		self.weigh(documents.into_iter().flatten())
	}

	pub fn vector(&self, index: usize) -> Option<&SparseVector> { self.vectors.get(index) }

	pub fn vectors(&self) -> &[SparseVector] { &self.vectors }

	pub fn len(&self) -> usize { self.vectors.len() }

	pub fn is_empty(&self) -> bool { self.vectors.is_empty() }
}
