//! Validated language handle.

use crate::i18n::{LanguageConfig, LanguageRegistry};

/// A language that has been validated against the registry.
///
/// Construction only succeeds for languages the registry knows about, so a
/// `Language` can always resolve its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    id: i64,
    code: &'static str,
}

impl Language {
    /// Create a Language from a numeric id, if the registry knows it.
    pub fn from_id(id: i64) -> Option<Language> {
        LanguageRegistry::get()
            .get_by_id(id)
            .map(|config| Language {
                id: config.id,
                code: config.code,
            })
    }

    /// Create a Language from a short code (e.g. "en", "zh").
    pub fn from_code(code: &str) -> Option<Language> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language {
                id: config.id,
                code: config.code,
            })
    }

    /// The system default language.
    pub fn default_lang() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language {
            id: config.id,
            code: config.code,
        }
    }

    /// Numeric language id, as used to key localized attribute maps.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Short language code, as used to key fallback content files.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration from the registry.
    ///
    /// # Panics
    /// Panics if the id is not found in the registry; cannot happen for a
    /// properly constructed `Language`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_id(self.id)
            .expect("Language id should always be valid")
    }
}
