//! Data processing for dataset explorer views.
//!
//! This crate turns backend payloads into forms suitable for the map,
//! the forecast chart, and the data tables.

pub mod series;
pub mod value_map;

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so Cyrillic indicator names are cut on a
/// character boundary.
pub fn elide(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(elide("Phosphates", 50), "Phosphates");
        assert_eq!(elide(&"a".repeat(50), 50), "a".repeat(50));
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        let long = "x".repeat(60);
        assert_eq!(elide(&long, 50), format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundary() {
        let long = "Азот".repeat(20);
        let cut = elide(&long, 50);
        assert_eq!(cut.chars().count(), 53);
        assert!(cut.ends_with("..."));
    }
}
