//! Display name slugification.

use unicode_normalization::UnicodeNormalization;

/// Convert a display name to its URL segment.
///
/// Lower-cases, replaces spaces with underscores, then NFKD-normalizes and
/// drops everything outside ASCII. Accented Latin characters lose their
/// marks (`päivä` becomes `paiva`); non-Latin scripts are dropped entirely,
/// which is lossy but matches the URL alphabet the site promises.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .replace(' ', "_")
        .nfkd()
        .filter(char::is_ascii)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("Browse"), "browse");
    }

    #[test]
    fn test_slugify_replaces_spaces() {
        assert_eq!(slugify("User Control"), "user_control");
        assert_eq!(slugify("a b c"), "a_b_c");
    }

    #[test]
    fn test_slugify_strips_accents() {
        assert_eq!(slugify("päivä"), "paiva");
        assert_eq!(slugify("Viikko"), "viikko");
        assert_eq!(slugify("crème brûlée"), "creme_brulee");
    }

    #[test]
    fn test_slugify_drops_non_latin() {
        assert_eq!(slugify("день"), "");
    }

    #[test]
    fn test_slugify_keeps_ascii_punctuation() {
        assert_eq!(slugify("what's-new"), "what's-new");
    }

    #[test]
    fn test_slugify_idempotent() {
        let once = slugify("Päivän Suunnittelu");
        assert_eq!(slugify(&once), once);
    }
}
