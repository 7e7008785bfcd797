use std::collections::BTreeMap;

/// Stand-in for a zero norm so cosine never divides by zero.
pub const NORM_EPSILON: f64 = 1e-8;

/// Token → non-negative weight, with its L2 norm computed once at construction.
///
/// Ordered map so that summation order, and therefore every float derived from
/// it, is the same on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
	weights: BTreeMap<String, f64>,
	norm: f64,
}

impl SparseVector {
	pub fn from_weights(weights: BTreeMap<String, f64>) -> Self {
		let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
		Self { weights, norm }
	}

	/// Raw term counts: every occurrence adds 1.
	pub fn term_counts<'a, I>(tokens: I) -> Self
	where
		I: IntoIterator<Item = &'a String>,
	{
		let mut weights = BTreeMap::new();
		for t in tokens { *weights.entry(t.clone()).or_insert(0.0) += 1.0; }
		Self::from_weights(weights)
	}

	pub fn weight(&self, token: &str) -> f64 { self.weights.get(token).copied().unwrap_or(0.0) }

	pub fn len(&self) -> usize { self.weights.len() }

	pub fn is_empty(&self) -> bool { self.weights.is_empty() }

	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> { self.weights.iter().map(|(t, w)| (t.as_str(), *w)) }

	/// L2 norm, zero for an empty vector.
	pub fn norm(&self) -> f64 { self.norm }

	/// L2 norm with zero replaced by [`NORM_EPSILON`].
	pub fn safe_norm(&self) -> f64 { if self.norm > 0.0 { self.norm } else { NORM_EPSILON } }

	/// Dot product over shared tokens, walking the smaller vector.
	pub fn dot(&self, other: &SparseVector) -> f64 {
		let (small, big) = if self.len() < other.len() { (self, other) } else { (other, self) };
		small.weights.iter().filter_map(|(t, w)| big.weights.get(t).map(|ww| w * ww)).sum()
	}

	/// Cosine similarity in `[0, 1]`; 0 when the vectors share no token.
	pub fn cosine(&self, other: &SparseVector) -> f64 {
		let dot = self.dot(other);
		if dot == 0.0 { return 0.0; }
		dot / (self.safe_norm() * other.safe_norm())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toks(words: &[&str]) -> Vec<String> { words.iter().map(|w| w.to_string()).collect() }

	#[test]
	fn term_counts_accumulate_repeats() {
		let v = SparseVector::term_counts(&toks(&["red", "shoe", "red"]));
		assert_eq!(v.weight("red"), 2.0);
		assert_eq!(v.weight("shoe"), 1.0);
		assert!((v.norm() - 5f64.sqrt()).abs() < 1e-12);
	}

	#[test]
	fn cosine_of_identical_and_disjoint_vectors() {
		let a = SparseVector::term_counts(&toks(&["red", "shoe"]));
		let b = SparseVector::term_counts(&toks(&["red", "shoe"]));
		let c = SparseVector::term_counts(&toks(&["office", "chair"]));
		assert!((a.cosine(&b) - 1.0).abs() < 1e-12);
		assert_eq!(a.cosine(&c), 0.0);
	}

	#[test]
	fn empty_vector_uses_epsilon_norm() {
		let empty = SparseVector::default();
		assert_eq!(empty.norm(), 0.0);
		assert_eq!(empty.safe_norm(), NORM_EPSILON);
		let a = SparseVector::term_counts(&toks(&["red"]));
		assert_eq!(a.cosine(&empty), 0.0);
	}
}
