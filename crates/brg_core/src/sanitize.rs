//! Free-text normalization for block titles and filenames.

use unicode_normalization::UnicodeNormalization;

/// Reduce text to an ASCII identifier-like form.
///
/// Decomposes to NFD so accented letters split into base letter plus
/// combining mark, drops everything non-ASCII (the marks), then keeps only
/// ASCII letters, digits, `_` and `-`. Spaces are removed as well.
pub fn sanitize(text: &str) -> String {
    text.nfd()
        .filter(char::is_ascii)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_spaces() {
        assert_eq!(sanitize("Café Für Élan"), "CafeFurElan");
    }

    #[test]
    fn keeps_identifier_characters() {
        assert_eq!(sanitize("take_01-final"), "take_01-final");
        assert_eq!(sanitize("scene 4 (alt).wav"), "scene4altwav");
    }

    #[test]
    fn drops_characters_without_ascii_base() {
        assert_eq!(sanitize("日本語 track"), "track");
        assert_eq!(sanitize("ßø"), "");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(sanitize(""), "");
    }
}
