use mmrec_core::Item;

pub const STOP_WORDS: [&str; 21] = [
	"the","and","for","with","from","into","your","you","this","that","have","has","are","was","were","of","in","on","to","a","an",
];

/// Lowercase, split on anything that is not an ASCII letter or digit, drop
/// one-character tokens and stop words. No stemming.
pub fn tokenize(text: &str) -> Vec<String> {
	text.to_lowercase()
		.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
		.filter(|t| t.len() > 1 && !STOP_WORDS.contains(t))
		.map(str::to_string)
		.collect()
}

/// Tokens of name, first category level, brand and description, in that order.
pub fn item_tokens(item: &Item) -> Vec<String> {
	let text = [item.product_name.as_str(), item.category_head(), item.brand.as_str(), item.description.as_str()].join(" ");
	tokenize(&text)
}
