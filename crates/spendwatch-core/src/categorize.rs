//! Keyword-rule transaction categorizer
//!
//! Used for feeds that deliver transactions without a category (the
//! sandbox banking API). Rules are ordered; the first match wins.

/// Category assigned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "other";

/// Ordered keyword rules. Matching is case-insensitive substring
/// containment against the transaction description.
const RULES: &[(&[&str], &str)] = &[
    (&["grocery", "food"], "grocery"),
    (&["restaurant", "cafe"], "dining"),
    (&["movie", "entertainment"], "entertainment"),
    (&["shop", "store"], "merchandise"),
];

/// Categorizes a transaction description. Always returns a
/// lower-case category key.
pub fn categorize(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    for (keywords, category) in RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return category;
        }
    }
    FALLBACK_CATEGORY
}
