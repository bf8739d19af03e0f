//! Admin page operations: the surface the HTTP layer calls into.
//!
//! Ties the store, the form composer and the fallback file provisioner
//! together. Template resolution on submit mirrors form composition: an
//! unset template falls back to the first registered one, an unknown
//! template is rejected.

use serde::Serialize;
use tracing::info;

use crate::composer::{ColumnDescriptor, ComposedForm, FormComposer};
use crate::error::{Error, Result};
use crate::fallback::FallbackStore;
use crate::i18n::{Language, LanguageRegistry};
use crate::page::{self, Page, PageDraft};
use crate::store::PageStore;
use crate::templates::TemplateRegistry;

/// One row of the list view, with the title resolved through the localized
/// lookup for the requested language.
#[derive(Debug, Clone, Serialize)]
pub struct PageListItem {
    pub id: i64,
    pub title: String,
    pub published: bool,
    pub slug: String,
}

/// The list view: fixed columns plus one item per page, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct PageList {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<PageListItem>,
}

pub struct PageService {
    store: PageStore,
    fallback: FallbackStore,
}

impl PageService {
    pub fn new(store: PageStore, fallback: FallbackStore) -> Self {
        PageService { store, fallback }
    }

    fn composer(&self) -> FormComposer<'static> {
        FormComposer::new(TemplateRegistry::get())
    }

    /// List all pages for the admin table.
    pub fn list_pages(&self, lang: Option<Language>) -> Result<PageList> {
        let lang_id = lang.map(|l| l.id());
        let rows = self
            .store
            .list()?
            .into_iter()
            .map(|page| PageListItem {
                id: page.id,
                title: page.title(lang_id).to_owned(),
                published: page.published,
                slug: page.slug.clone(),
            })
            .collect();

        Ok(PageList {
            columns: self.composer().compose_columns(),
            rows,
        })
    }

    /// Compose the create form for the given (or default) template.
    pub fn show_create_form(&self, template: Option<&str>) -> Result<ComposedForm> {
        self.composer().compose_fields(template)
    }

    /// Create a page from a submitted draft.
    ///
    /// Resolves the template, derives a non-empty slug, persists the row and
    /// provisions one empty fallback content file per active language for
    /// the page name (idempotent, best-effort).
    pub fn submit_create(&self, mut draft: PageDraft) -> Result<Page> {
        self.resolve_template(&mut draft)?;
        self.apply_slug(&mut draft);

        let page = self.store.create(&draft)?;

        let created = self
            .fallback
            .ensure_placeholders(&page.name, &LanguageRegistry::get().active())?;
        if !created.is_empty() {
            info!(page = %page.name, count = created.len(), "provisioned fallback content files");
        }

        info!(id = page.id, slug = %page.slug, "created page");
        Ok(page)
    }

    /// Compose the edit form for an existing page, with current values
    /// filled in. When the template is not supplied, it is read from the
    /// stored row.
    pub fn show_edit_form(&self, id: i64, template: Option<&str>) -> Result<ComposedForm> {
        let page = self.store.find(id)?;
        // An empty `?template=` counts as unsupplied.
        let template = template
            .filter(|t| !t.is_empty())
            .unwrap_or(&page.template);

        let mut form = self.composer().compose_fields(Some(template))?;
        for field in &mut form.fields {
            // The template selector already carries its value.
            if field.value.is_none() {
                field.value = Some(page.field_value(&field.name));
            }
        }

        Ok(form)
    }

    /// Update a page from a submitted draft, re-running the same template
    /// resolution and slug derivation as creation.
    pub fn submit_update(&self, id: i64, mut draft: PageDraft) -> Result<Page> {
        self.resolve_template(&mut draft)?;
        self.apply_slug(&mut draft);

        let page = self.store.update(id, &draft)?;
        info!(id = page.id, slug = %page.slug, "updated page");
        Ok(page)
    }

    /// Set the published flag; every other field is untouched.
    pub fn publish(&self, id: i64) -> Result<Page> {
        let page = self.store.set_published(id, true)?;
        info!(id, "published page");
        Ok(page)
    }

    /// Exact inverse of [`PageService::publish`].
    pub fn unpublish(&self, id: i64) -> Result<Page> {
        let page = self.store.set_published(id, false)?;
        info!(id, "unpublished page");
        Ok(page)
    }

    /// Delete a page. Fallback content files are deliberately left behind.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id)?;
        info!(id, "deleted page");
        Ok(())
    }

    /// Resolve the stored content of a page for one language: stored markup
    /// when present, else the fallback file's contents (empty when the file
    /// is missing too).
    pub fn render_content(&self, id: i64, lang: Option<Language>) -> Result<String> {
        let page = self.store.find(id)?;

        match page.content(lang.map(|l| l.id())) {
            crate::page::PageContent::Stored(markup) => Ok(markup),
            crate::page::PageContent::Fallback(view) => {
                Ok(self.fallback.resolve(&view)?.unwrap_or_default())
            }
        }
    }

    fn resolve_template(&self, draft: &mut PageDraft) -> Result<()> {
        let registry = TemplateRegistry::get();

        if draft.template.is_empty() {
            draft.template = registry.first()?.name.to_string();
        } else if registry.find(&draft.template).is_none() {
            return Err(Error::UnknownTemplate(draft.template.clone()));
        }

        Ok(())
    }

    fn apply_slug(&self, draft: &mut PageDraft) {
        let source = if draft.slug.is_empty() {
            page::SlugSource::TitleMap(&draft.title)
        } else {
            page::SlugSource::Slug(&draft.slug)
        };

        let slug = page::derive_slug(source, &draft.name);
        draft.slug = slug;
    }
}
