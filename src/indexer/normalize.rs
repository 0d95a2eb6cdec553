/// Lowercase `text` and drop every ASCII punctuation character.
///
/// Total over all inputs: anything that is not punctuation passes through
/// lowercased, so applying it twice gives the same string as applying it once.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Same as [`normalize`], with a missing value treated as the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
