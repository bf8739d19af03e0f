//! Language registry and language type for multilingual page attributes.
//!
//! - `registry`: single source of truth for all known languages, their
//!   numeric ids (which key the per-language attribute maps on pages) and
//!   short codes (which key fallback content files).
//! - `language`: validated language handle used where a caller picks a
//!   language explicitly (e.g. `?lang=zh` on the list view).

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
