//! Page manager: admin CRUD backend for multilingual, template-driven pages.
//!
//! A "page" holds its title, content and description as per-language maps and
//! carries a template name that decides which extra form fields apply. The
//! interesting logic lives in two places:
//!
//! - [`page`]: localized attribute resolution, including the file-backed
//!   content fallback for languages with no stored translation.
//! - [`composer`]: template-driven composition of the create/edit form and
//!   the list-view columns.
//!
//! Everything else (store, fallback file provisioning, HTTP surface) is thin
//! plumbing around those two.

pub mod composer;
pub mod config;
pub mod error;
pub mod fallback;
pub mod http;
pub mod i18n;
pub mod page;
pub mod service;
pub mod store;
pub mod templates;

pub use error::{Error, Result};
