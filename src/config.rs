use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub database_path: String,

    // Fallback content files
    pub content_dir: String,

    // HTTP
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Storage
            database_path: std::env::var("PAGES_DATABASE_PATH")
                .context("PAGES_DATABASE_PATH not set")?,

            // Fallback content files
            content_dir: std::env::var("PAGES_CONTENT_DIR")
                .unwrap_or_else(|_| "content/pages".to_string()),

            // HTTP
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
