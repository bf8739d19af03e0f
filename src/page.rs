//! The Page entity and its localized attribute resolution.
//!
//! Title, content and description are maps from numeric language id to text.
//! A missing key never errors: title and description resolve to an empty
//! string, while content resolves to a reference to a fallback view named
//! `{name}_{code}`, letting an editor ship hand-written static content for
//! languages that have no stored translation yet.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::i18n::{Language, LanguageRegistry};

/// Localized text keyed by numeric language id.
pub type LangMap = BTreeMap<i64, String>;

/// Auxiliary key-value bag merged into the row (e.g. `feature_image`).
pub type Extras = BTreeMap<String, String>;

/// A persisted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    /// Template variant; decides which extra form fields apply.
    pub template: String,
    /// Stable machine identifier; keys fallback content files, so it should
    /// not change once such files exist.
    pub name: String,
    /// URL path segment; non-empty after any successful save.
    pub slug: String,
    pub title: LangMap,
    pub content: LangMap,
    pub description: LangMap,
    pub extras: Extras,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted page data, before the store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageDraft {
    #[serde(default)]
    pub template: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: LangMap,
    #[serde(default)]
    pub content: LangMap,
    #[serde(default)]
    pub description: LangMap,
    #[serde(default)]
    pub extras: Extras,
    #[serde(default)]
    pub published: bool,
}

/// Resolved page content for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// Stored translation, pre-rendered markup returned verbatim.
    Stored(String),
    /// No stored translation; the value is a fallback view reference of the
    /// form `{name}_{code}`. Resolving and rendering it is the caller's job.
    Fallback(String),
}

impl PageContent {
    /// The fallback view name, when this is a fallback reference.
    pub fn view_name(&self) -> Option<&str> {
        match self {
            PageContent::Stored(_) => None,
            PageContent::Fallback(view) => Some(view),
        }
    }

    /// Collapse to a plain string: the stored markup, or the view reference.
    pub fn into_string(self) -> String {
        match self {
            PageContent::Stored(value) | PageContent::Fallback(value) => value,
        }
    }
}

/// Source handed to the slug generator: the slug itself when present, else
/// the raw title map.
#[derive(Debug, Clone, PartialEq)]
pub enum SlugSource<'a> {
    Slug(&'a str),
    TitleMap(&'a LangMap),
}

/// The three localized attributes of a page.
///
/// Content is the only one with fallback logic; the other two are plain map
/// lookups. This typed accessor replaces the original's string-parsed
/// attribute dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizedField {
    Title,
    Content,
    Description,
}

impl LocalizedField {
    pub fn from_name(name: &str) -> Option<LocalizedField> {
        match name {
            "title" => Some(LocalizedField::Title),
            "content" => Some(LocalizedField::Content),
            "description" => Some(LocalizedField::Description),
            _ => None,
        }
    }
}

fn indexed_name_regex() -> &'static Regex {
    static INDEXED: OnceLock<Regex> = OnceLock::new();
    INDEXED.get_or_init(|| Regex::new(r"^([a-zA-Z_]+)\[(\d+)\]$").expect("static regex"))
}

fn trailing_token_regex() -> &'static Regex {
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    TRAILING.get_or_init(|| Regex::new(r"(?i)(id|at|\[\])$").expect("static regex"))
}

impl Page {
    /// Resolve an omitted or zero language id to the default language.
    fn effective_lang(lang: Option<i64>) -> i64 {
        match lang {
            Some(id) if id != 0 => id,
            _ => LanguageRegistry::get().default_language().id,
        }
    }

    /// Title for the given language; empty string when no translation is
    /// stored. Never fails.
    pub fn title(&self, lang: Option<i64>) -> &str {
        let lang_id = Self::effective_lang(lang);
        self.title.get(&lang_id).map_or("", String::as_str)
    }

    /// Description for the given language; same contract as [`Page::title`].
    pub fn description(&self, lang: Option<i64>) -> &str {
        let lang_id = Self::effective_lang(lang);
        self.description.get(&lang_id).map_or("", String::as_str)
    }

    /// Content for the given language.
    ///
    /// A non-empty stored entry is returned verbatim. Otherwise the result is
    /// a fallback view reference `{name}_{code}` built from the registry's
    /// short code for that language. An id the registry does not know at all
    /// degrades to empty stored content rather than failing.
    pub fn content(&self, lang: Option<i64>) -> PageContent {
        let lang_id = Self::effective_lang(lang);

        match self.content.get(&lang_id) {
            Some(value) if !value.is_empty() => PageContent::Stored(value.clone()),
            _ => match LanguageRegistry::get().get_by_id(lang_id) {
                Some(config) => PageContent::Fallback(format!("{}_{}", self.name, config.code)),
                None => PageContent::Stored(String::new()),
            },
        }
    }

    /// Resolve one localized attribute to a plain string. Content collapses
    /// its fallback reference into the string form.
    pub fn localized_field(&self, field: LocalizedField, lang: Option<i64>) -> String {
        match field {
            LocalizedField::Title => self.title(lang).to_owned(),
            LocalizedField::Description => self.description(lang).to_owned(),
            LocalizedField::Content => self.content(lang).into_string(),
        }
    }

    /// Resolve a form field name to this page's current value.
    ///
    /// Bracket-indexed names like `content[3]` resolve the named localized
    /// attribute for language id 3; `content` routes through the fallback
    /// logic, the others are plain map lookups. Scalar field names resolve
    /// the corresponding column, anything else falls through to the extras
    /// bag. Unknown names resolve to empty string, never an error.
    pub fn field_value(&self, name: &str) -> String {
        if let Some(captures) = indexed_name_regex().captures(name) {
            let field = &captures[1];
            // An index too large for i64 cannot match any stored key; it
            // resolves to empty like any other absent language id.
            let Ok(lang_id) = captures[2].parse::<i64>() else {
                return String::new();
            };

            return match LocalizedField::from_name(field) {
                Some(field) => self.localized_field(field, Some(lang_id)),
                None => String::new(),
            };
        }

        match name {
            "template" => self.template.clone(),
            "name" => self.name.clone(),
            "slug" => self.slug.clone(),
            "published" => self.published.to_string(),
            other => self.extras.get(other).cloned().unwrap_or_default(),
        }
    }

    /// Source for slug generation: the slug when non-empty, else the raw
    /// title map.
    pub fn slug_source(&self) -> SlugSource<'_> {
        if self.slug.is_empty() {
            SlugSource::TitleMap(&self.title)
        } else {
            SlugSource::Slug(&self.slug)
        }
    }

    /// Cosmetic template label for the admin UI: underscores become spaces,
    /// the first letter is capitalized and a trailing `id`/`at`/`[]` token is
    /// stripped.
    pub fn display_template_name(&self) -> String {
        let spaced = self.template.replace('_', " ");
        let capitalized = capitalize_first(&spaced);
        trailing_token_regex()
            .replace(&capitalized, "")
            .trim()
            .to_string()
    }

    /// Public link to this page, in the given language (default language when
    /// omitted).
    pub fn page_link(&self, lang: Option<Language>) -> String {
        let lang = lang.unwrap_or_else(Language::default_lang);
        format!("/{}/{}", lang.code(), self.slug)
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn arbitrary text into a URL-safe slug: ASCII-lowercased alphanumerics
/// with runs of everything else collapsed to single dashes.
pub fn slugify(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut pending_dash = false;

    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Derive the definitive slug for a save.
///
/// A present slug is normalized as-is. A title map picks the default
/// language's entry, else the first entry in key order. When that yields
/// nothing sluggable (e.g. a fully non-ASCII title), the machine `name` is
/// used, and as a last resort the literal `"page"`, keeping the non-empty
/// invariant.
pub fn derive_slug(source: SlugSource<'_>, name: &str) -> String {
    let raw = match source {
        SlugSource::Slug(slug) => slug.to_owned(),
        SlugSource::TitleMap(titles) => {
            let default_id = LanguageRegistry::get().default_language().id;
            titles
                .get(&default_id)
                .or_else(|| titles.values().next())
                .cloned()
                .unwrap_or_default()
        }
    };

    let slug = slugify(&raw);
    if !slug.is_empty() {
        return slug;
    }

    let from_name = slugify(name);
    if !from_name.is_empty() {
        return from_name;
    }

    "page".to_string()
}
