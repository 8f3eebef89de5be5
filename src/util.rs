// Utility helpers for the forgiving field handling the exports need.
//
// Call-center exports are ragged: columns go missing, counts arrive with
// thousands separators, and blank cells are common. These helpers turn
// that into values the mappers can use without further checks.
use num_format::{Locale, ToFormattedString};
use tracing::warn;

/// Parse an integer count field.
///
/// - Trims whitespace.
/// - Blank fields are `0`.
/// - Strips thousands separators like `","` before parsing.
/// - Anything else that does not parse is logged and treated as `0`.
pub fn parse_count(field: &str, value: &str) -> i64 {
    let s = value.trim();
    if s.is_empty() {
        return 0;
    }
    match s.replace(',', "").parse::<i64>() {
        Ok(n) => n,
        Err(_) => {
            warn!(field, value = s, "non-numeric count, using 0");
            0
        }
    }
}

/// `None` for blank text, otherwise the value as written.
pub fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Render a row or call count with thousands separators for the console.
pub fn format_count(n: impl ToFormattedString) -> String {
    n.to_formatted_string(&Locale::en)
}
