//! Text normalization shared by the reference index and the matcher.

/// Builds the comparison key for a value: lowercased with all whitespace removed.
///
/// Both sides of every comparison go through this function, so reference
/// entries and dataset cells agree on what "the same value" means.
///
/// ```
/// use iso_common::normalize_key;
///
/// assert_eq!(normalize_key("  United Kingdom "), "unitedkingdom");
/// assert_eq!(normalize_key("C A"), "ca");
/// ```
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
