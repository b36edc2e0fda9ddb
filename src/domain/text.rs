//! Search text canonicalization.
//!
//! Process numbers and enterprise names are typed by hand with inconsistent
//! punctuation ("123.456-7/2024", "123456-7 2024"). Both sides of a search are
//! passed through [`normalize`] so that substring comparison ignores that noise.

/// Lowercases `text` and removes periods, hyphens, slashes and whitespace.
///
/// The result is stable under a second pass (`normalize(normalize(x)) ==
/// normalize(x)`).
///
/// # Examples
///
/// ```
/// use licensemap::domain::text::normalize;
///
/// assert_eq!(normalize("000.123-4/2024"), "00012342024");
/// assert_eq!(normalize("Posto Boa Vista LTDA"), "postoboavistaltda");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '.' | '-' | '/') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalizes an optional field; absent text becomes the empty string.
#[must_use]
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
