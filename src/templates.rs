//! Closed registry of page templates.
//!
//! A template is a named contributor that declares, per language, the extra
//! form fields it needs beyond the defaults. The set is known at compile
//! time and registered once behind `OnceLock`; an unknown template name is
//! rejected at lookup time instead of failing inside a dynamic dispatch.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::i18n::LanguageConfig;

/// How a field is rendered in the admin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Select,
    Text,
    Textarea,
    Wysiwyg,
    Checkbox,
    Browse,
}

/// One form field to present in the create/edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Wire name of the field. Per-language fields use the indexed form
    /// `title[2]`, matching the language-keyed attribute maps on the entity.
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Select options (template names for the template selector).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Current/preselected value, filled in when composing an edit form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Language this field belongs to; `None` for the default fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<i64>,
    /// Whether the value lives in the extras bag rather than a real column.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stored_in_extras: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.into(),
            label: label.into(),
            kind,
            hint: None,
            options: Vec::new(),
            value: None,
            language_id: None,
            stored_in_extras: false,
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn for_language(mut self, lang: &LanguageConfig) -> Self {
        self.language_id = Some(lang.id);
        self
    }

    pub fn in_extras(mut self) -> Self {
        self.stored_in_extras = true;
        self
    }
}

/// Declares the per-language fields of one template.
pub type FieldContributor = fn(&LanguageConfig) -> Vec<FieldDescriptor>;

/// A registered template.
#[derive(Clone)]
pub struct TemplateDef {
    pub name: &'static str,
    pub label: &'static str,
    contributor: FieldContributor,
}

impl TemplateDef {
    pub fn new(name: &'static str, label: &'static str, contributor: FieldContributor) -> Self {
        TemplateDef {
            name,
            label,
            contributor,
        }
    }

    /// The fields this template declares for one language. May be empty.
    pub fn fields_for(&self, lang: &LanguageConfig) -> Vec<FieldDescriptor> {
        (self.contributor)(lang)
    }
}

impl std::fmt::Debug for TemplateDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish()
    }
}

/// Registry of all known templates, in registration order. The first
/// registered template is the default when a form does not select one.
pub struct TemplateRegistry {
    templates: Vec<TemplateDef>,
}

static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();

impl TemplateRegistry {
    /// Global registry instance with the built-in templates.
    pub fn get() -> &'static TemplateRegistry {
        REGISTRY.get_or_init(|| TemplateRegistry::new(builtin_templates()))
    }

    pub fn new(templates: Vec<TemplateDef>) -> Self {
        TemplateRegistry { templates }
    }

    /// All registered templates, order-preserving. Zero registered templates
    /// means no form can be rendered at all, so that is a hard error.
    pub fn list(&self) -> Result<&[TemplateDef]> {
        if self.templates.is_empty() {
            return Err(Error::NoTemplates);
        }
        Ok(&self.templates)
    }

    pub fn find(&self, name: &str) -> Option<&TemplateDef> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// The default template: first in registration order.
    pub fn first(&self) -> Result<&TemplateDef> {
        Ok(&self.list()?[0])
    }
}

/// Built-in templates.
fn builtin_templates() -> Vec<TemplateDef> {
    vec![
        TemplateDef::new("default", "Default", default_template),
        TemplateDef::new("about_us", "About us", about_us_template),
    ]
}

fn default_template(lang: &LanguageConfig) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            format!("title[{}]", lang.id),
            format!("Title ({})", lang.name),
            FieldKind::Text,
        )
        .for_language(lang),
        FieldDescriptor::new(
            format!("content[{}]", lang.id),
            format!("Content ({})", lang.name),
            FieldKind::Wysiwyg,
        )
        .for_language(lang),
    ]
}

fn about_us_template(lang: &LanguageConfig) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            format!("title[{}]", lang.id),
            format!("Title ({})", lang.name),
            FieldKind::Text,
        )
        .for_language(lang),
        FieldDescriptor::new(
            format!("description[{}]", lang.id),
            format!("Meta description ({})", lang.name),
            FieldKind::Textarea,
        )
        .hint("Used for SEO.")
        .for_language(lang),
        FieldDescriptor::new(
            format!("content[{}]", lang.id),
            format!("Content ({})", lang.name),
            FieldKind::Wysiwyg,
        )
        .for_language(lang),
    ]
}
