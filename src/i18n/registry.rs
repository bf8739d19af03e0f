//! Language registry: single source of truth for all supported languages.
//!
//! The registry is a process-wide singleton behind `OnceLock`, initialized on
//! first access and immutable thereafter. Pages store their localized
//! attributes keyed by the numeric language id; fallback content files are
//! keyed by the short code.

use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Numeric language id; keys the per-language attribute maps on pages.
    pub id: i64,

    /// Short language code (e.g. "en", "zh"); keys fallback content files.
    pub code: &'static str,

    /// English name of the language (e.g. "English", "Chinese")
    pub name: &'static str,

    /// Native name of the language (e.g. "English", "中文")
    pub native_name: &'static str,

    /// Whether this is the default language (exactly one should be true)
    pub is_default: bool,

    /// Whether this language is active. Deactivating a language removes it
    /// from form composition but its id stays resolvable, so stored
    /// translations keyed by it remain retrievable.
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by its numeric id, including disabled ones.
    pub fn get_by_id(&self, id: i64) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.id == id)
    }

    /// Look up a language by its short code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Look up a language by id, failing with `LanguageNotFound` when the id
    /// is unknown to the registry.
    pub fn find(&self, id: i64) -> Result<&LanguageConfig> {
        self.get_by_id(id).ok_or(Error::LanguageNotFound(id))
    }

    /// All active languages, in registration order. This order drives the
    /// per-language blocks of the composed form.
    pub fn active(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// All languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The default language, used whenever a lookup omits the language id.
    ///
    /// # Panics
    /// Panics if zero or multiple default languages are configured; that is a
    /// build-time configuration defect, not a runtime condition.
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language id is known and active.
    pub fn is_active(&self, id: i64) -> bool {
        self.get_by_id(id).map(|lang| lang.enabled).unwrap_or(false)
    }
}

/// Default language configurations.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            id: 1,
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            id: 2,
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            is_default: false,
            enabled: true,
        },
        LanguageConfig {
            id: 3,
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
            enabled: false,
        },
    ]
}
