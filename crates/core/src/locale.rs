//! Language selection for bilingual (English/Greek) fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the public site is published in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Gr,
}

impl Language {
    /// Map a language code to a [`Language`], falling back to English for
    /// anything unrecognized.
    pub fn from_code(code: &str) -> Self {
        match code {
            "gr" => Language::Gr,
            _ => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Gr => "gr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Two parallel attributes carrying the same content in both languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bilingual<T> {
    pub en: T,
    pub gr: T,
}

impl<T> Bilingual<T> {
    pub fn new(en: T, gr: T) -> Self {
        Self { en, gr }
    }

    /// Pick the variant for `lang`.
    pub fn pick(self, lang: Language) -> T {
        match lang {
            Language::En => self.en,
            Language::Gr => self.gr,
        }
    }
}

/// Resolve a bilingual pair for a raw language code.
///
/// ```
/// use harsia_core::locale::{resolve, Bilingual};
/// assert_eq!(resolve("gr", Bilingual::new("A", "B")), "B");
/// assert_eq!(resolve("xx", Bilingual::new("A", "B")), "A");
/// ```
pub fn resolve<T>(code: &str, pair: Bilingual<T>) -> T {
    pair.pick(Language::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greek_code_selects_greek_variant() {
        assert_eq!(resolve("gr", Bilingual::new("A", "B")), "B");
    }

    #[test]
    fn unknown_code_defaults_to_english() {
        assert_eq!(resolve("xx", Bilingual::new("A", "B")), "A");
        assert_eq!(resolve("", Bilingual::new("A", "B")), "A");
        assert_eq!(resolve("GR", Bilingual::new("A", "B")), "A");
    }

    #[test]
    fn optional_variants_resolve_too() {
        let pair = Bilingual::new(Some("Athens"), None);
        assert_eq!(pair.pick(Language::En), Some("Athens"));
        assert_eq!(pair.pick(Language::Gr), None);
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Gr).unwrap(), "\"gr\"");
    }
}
