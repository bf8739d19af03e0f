//! Fallback content files.
//!
//! When a page has no stored translation for a language, the entity resolves
//! its content to a view reference `{name}_{code}`. This module owns the
//! filesystem side of that contract: provisioning one empty placeholder per
//! page and active language at creation time, and resolving a reference back
//! to its file. Provisioning is guarded only by an existence check; two
//! racing creations of the same placeholder are harmless since the file is
//! created empty either way.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::i18n::LanguageConfig;

pub struct FallbackStore {
    root: PathBuf,
}

impl FallbackStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FallbackStore { root: root.into() }
    }

    /// Filesystem path of a fallback view reference.
    pub fn view_path(&self, view: &str) -> PathBuf {
        self.root.join(format!("{view}.html"))
    }

    /// Ensure one empty placeholder file exists per language for the given
    /// page name. Returns the view names that were actually created.
    /// Idempotent: existing files (empty or hand-edited) are left alone.
    pub fn ensure_placeholders(
        &self,
        name: &str,
        languages: &[&LanguageConfig],
    ) -> Result<Vec<String>> {
        fs::create_dir_all(&self.root)?;

        let mut created = Vec::new();
        for lang in languages {
            let view = format!("{}_{}", name, lang.code);
            let path = self.view_path(&view);
            if self.create_placeholder(&path)? {
                debug!(view = %view, "provisioned fallback content file");
                created.push(view);
            }
        }

        Ok(created)
    }

    /// Create an empty file unless it already exists. `create_new` keeps the
    /// check-and-create atomic at the filesystem level, so a lost race just
    /// reports the file as pre-existing.
    fn create_placeholder(&self, path: &Path) -> Result<bool> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve a view reference to its file contents, if the file exists.
    pub fn resolve(&self, view: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.view_path(view)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
