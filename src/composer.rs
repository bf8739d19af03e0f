//! Template-driven composition of the admin form and list columns.
//!
//! `compose_fields` produces the ordered field list for a create/edit form:
//! the fixed default fields first, then one block per active language with
//! whatever the selected template contributes for that language. The column
//! set of the list view is fixed and template-independent.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::i18n::LanguageRegistry;
use crate::templates::{FieldDescriptor, FieldKind, TemplateDef, TemplateRegistry};

/// Where a list column takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// Resolved through the entity's localized title lookup.
    LocalizedTitle,
    /// Plain column value.
    Field,
}

/// One column of the page list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub source: ColumnSource,
}

/// A fully composed form: the resolved template plus its ordered fields.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedForm {
    pub template: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Composes forms and columns from the template registry and the active
/// language set.
pub struct FormComposer<'a> {
    templates: &'a TemplateRegistry,
}

impl<'a> FormComposer<'a> {
    pub fn new(templates: &'a TemplateRegistry) -> Self {
        FormComposer { templates }
    }

    /// All registered templates, in registration order.
    pub fn list_templates(&self) -> Result<&'a [TemplateDef]> {
        self.templates.list()
    }

    /// Compose the full ordered field list for a create/edit form.
    ///
    /// An unset or empty template selects the first registered one; a
    /// set-but-unknown template aborts with `UnknownTemplate` rather than
    /// composing a partial form.
    pub fn compose_fields(&self, template: Option<&str>) -> Result<ComposedForm> {
        let all = self.templates.list()?;

        let resolved = match template.filter(|t| !t.is_empty()) {
            None => &all[0],
            Some(name) => all
                .iter()
                .find(|t| t.name == name)
                .ok_or_else(|| Error::UnknownTemplate(name.to_string()))?,
        };

        let mut fields = self.default_fields(resolved.name)?;

        // Outer loop over active languages, inner dispatch to the single
        // resolved template. A template may declare zero fields for a
        // language.
        for lang in LanguageRegistry::get().active() {
            fields.extend(resolved.fields_for(lang));
        }

        Ok(ComposedForm {
            template: resolved.name.to_string(),
            fields,
        })
    }

    /// The fixed default fields every page form carries, in fixed relative
    /// order, regardless of template.
    fn default_fields(&self, selected: &str) -> Result<Vec<FieldDescriptor>> {
        let options: Vec<String> = self
            .templates
            .list()?
            .iter()
            .map(|t| t.name.to_string())
            .collect();

        Ok(vec![
            FieldDescriptor::new("template", "Template", FieldKind::Select)
                .options(options)
                .value(selected),
            FieldDescriptor::new("name", "Admin name", FieldKind::Text)
                .hint("Internal identifier; keys fallback content files."),
            FieldDescriptor::new("slug", "Page slug (URL)", FieldKind::Text)
                .hint("Will be automatically generated from your title, if left empty."),
            FieldDescriptor::new("feature_image", "Feature image", FieldKind::Browse)
                .hint("Recommended size 1200 x 630.")
                .in_extras(),
            FieldDescriptor::new("published", "Published", FieldKind::Checkbox)
                .hint("Only published pages are included in the static export."),
        ])
    }

    /// List-view columns: fixed, unaffected by template selection.
    pub fn compose_columns(&self) -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor {
                name: "title",
                source: ColumnSource::LocalizedTitle,
            },
            ColumnDescriptor {
                name: "published",
                source: ColumnSource::Field,
            },
            ColumnDescriptor {
                name: "slug",
                source: ColumnSource::Field,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LanguageConfig;

    fn composer() -> FormComposer<'static> {
        FormComposer::new(TemplateRegistry::get())
    }

    const DEFAULT_FIELD_NAMES: [&str; 5] =
        ["template", "name", "slug", "feature_image", "published"];

    #[test]
    fn test_compose_fields_unset_template_uses_first_registered() {
        let form = composer().compose_fields(None).unwrap();
        assert_eq!(form.template, "default");
    }

    #[test]
    fn test_compose_fields_empty_template_string_is_unset() {
        // `?template=` arrives as an empty string; it selects the first
        // registered template just like an absent one.
        let form = composer().compose_fields(Some("")).unwrap();
        assert_eq!(form.template, "default");

        let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(&names[..5], &DEFAULT_FIELD_NAMES);
    }

    #[test]
    fn test_compose_fields_ordering_with_two_active_languages() {
        // Active languages are [en (1), zh (2)]: defaults first in fixed
        // order, then the template's en block, then its zh block.
        let form = composer().compose_fields(None).unwrap();
        let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "template",
                "name",
                "slug",
                "feature_image",
                "published",
                "title[1]",
                "content[1]",
                "title[2]",
                "content[2]",
            ]
        );
    }

    #[test]
    fn test_default_fields_always_present_regardless_of_template() {
        for template in [None, Some("default"), Some("about_us")] {
            let form = composer().compose_fields(template).unwrap();
            let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(&names[..5], &DEFAULT_FIELD_NAMES);
        }
    }

    #[test]
    fn test_template_selector_carries_options_and_value() {
        let form = composer().compose_fields(Some("about_us")).unwrap();
        let selector = &form.fields[0];

        assert_eq!(selector.kind, FieldKind::Select);
        assert_eq!(selector.options, vec!["default", "about_us"]);
        assert_eq!(selector.value.as_deref(), Some("about_us"));
    }

    #[test]
    fn test_feature_image_is_extras_backed() {
        let form = composer().compose_fields(None).unwrap();
        let feature = form
            .fields
            .iter()
            .find(|f| f.name == "feature_image")
            .unwrap();
        assert!(feature.stored_in_extras);
    }

    #[test]
    fn test_contributor_may_emit_zero_fields_for_a_language() {
        fn english_only(lang: &LanguageConfig) -> Vec<FieldDescriptor> {
            if lang.code == "en" {
                vec![FieldDescriptor::new(
                    format!("content[{}]", lang.id),
                    format!("Content ({})", lang.name),
                    FieldKind::Wysiwyg,
                )]
            } else {
                Vec::new()
            }
        }

        let registry =
            TemplateRegistry::new(vec![TemplateDef::new("landing", "Landing", english_only)]);
        let form = FormComposer::new(&registry).compose_fields(None).unwrap();

        // Defaults, then the en block; the empty zh block contributes
        // nothing, without error or ordering disturbance.
        let names: Vec<_> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "template",
                "name",
                "slug",
                "feature_image",
                "published",
                "content[1]",
            ]
        );
    }

    #[test]
    fn test_unknown_template_fails_loudly() {
        let err = composer().compose_fields(Some("gallery")).unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate(name) if name == "gallery"));
    }

    #[test]
    fn test_empty_registry_fails_with_configuration_error() {
        let empty = TemplateRegistry::new(vec![]);
        let composer = FormComposer::new(&empty);

        assert!(matches!(composer.list_templates(), Err(Error::NoTemplates)));
        assert!(matches!(
            composer.compose_fields(None),
            Err(Error::NoTemplates)
        ));
        // An explicit template name does not mask the missing registry.
        assert!(matches!(
            composer.compose_fields(Some("default")),
            Err(Error::NoTemplates)
        ));
    }

    #[test]
    fn test_compose_columns_fixed() {
        let columns = composer().compose_columns();

        let names: Vec<_> = columns.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["title", "published", "slug"]);
        assert_eq!(columns[0].source, ColumnSource::LocalizedTitle);
        assert_eq!(columns[1].source, ColumnSource::Field);
    }
}
