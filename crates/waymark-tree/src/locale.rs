//! Per-language display names.
//!
//! Translation itself is delegated to the host through the [`Translator`]
//! trait; this module only captures the resolved per-language mapping that
//! tree nodes carry. Catalog management is explicitly out of scope.

use std::collections::BTreeMap;
use std::collections::HashMap;

/// Seam to the host's translation subsystem.
///
/// Implementations look a source text up in whatever catalog the host
/// maintains. Texts without a translation are returned unchanged.
pub trait Translator: Send + Sync {
    /// Translate `text` into `language`.
    fn translate(&self, text: &str, language: &str) -> String;
}

/// Identity translator: every language sees the source text.
#[derive(Debug, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, text: &str, _language: &str) -> String {
        text.to_owned()
    }
}

/// In-memory translation table, useful for tests and embedding hosts that
/// already hold their catalog in memory.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    entries: HashMap<(String, String), String>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation for `text` in `language`.
    #[must_use]
    pub fn with(mut self, language: &str, text: &str, translation: &str) -> Self {
        self.entries
            .insert((language.to_owned(), text.to_owned()), translation.to_owned());
        self
    }
}

impl Translator for StaticCatalog {
    fn translate(&self, text: &str, language: &str) -> String {
        self.entries
            .get(&(language.to_owned(), text.to_owned()))
            .cloned()
            .unwrap_or_else(|| text.to_owned())
    }
}

/// A display name resolved into every configured language.
///
/// Built once per node during tree construction; rebuilding from the same
/// inputs yields an identical mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    texts: BTreeMap<String, String>,
}

impl LocalizedText {
    /// Resolve `text` into each of `languages` through `translator`.
    #[must_use]
    pub fn new(text: &str, languages: &[String], translator: &dyn Translator) -> Self {
        let texts = languages
            .iter()
            .map(|lang| (lang.clone(), translator.translate(text, lang)))
            .collect();
        Self { texts }
    }

    /// Display name in `language`, if configured.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.texts.get(language).map(String::as_str)
    }

    /// Iterate `(language, display name)` pairs in language order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.texts.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn languages() -> Vec<String> {
        vec!["en".to_owned(), "fi".to_owned()]
    }

    #[test]
    fn test_no_translation_is_identity() {
        let text = LocalizedText::new("Browse", &languages(), &NoTranslation);

        assert_eq!(text.get("en"), Some("Browse"));
        assert_eq!(text.get("fi"), Some("Browse"));
    }

    #[test]
    fn test_static_catalog_translates() {
        let catalog = StaticCatalog::new().with("fi", "Browse", "Selaa");
        let text = LocalizedText::new("Browse", &languages(), &catalog);

        assert_eq!(text.get("en"), Some("Browse"));
        assert_eq!(text.get("fi"), Some("Selaa"));
    }

    #[test]
    fn test_unknown_language_returns_none() {
        let text = LocalizedText::new("Browse", &languages(), &NoTranslation);

        assert_eq!(text.get("sv"), None);
    }

    #[test]
    fn test_rebuild_yields_identical_mapping() {
        let catalog = StaticCatalog::new().with("fi", "Day", "Päivä");

        let first = LocalizedText::new("Day", &languages(), &catalog);
        let second = LocalizedText::new("Day", &languages(), &catalog);

        assert_eq!(first, second);
    }

    #[test]
    fn test_iter_in_language_order() {
        let text = LocalizedText::new("Browse", &languages(), &NoTranslation);

        let langs: Vec<_> = text.iter().map(|(l, _)| l).collect();
        assert_eq!(langs, vec!["en", "fi"]);
    }
}
