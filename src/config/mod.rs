//! Preferences that survive restarts, plus the runtime [`Settings`].
//!
//! The store is a single SQLite key-value table. It only ever holds the
//! chosen summary format and model override.

pub mod settings;

pub use settings::Settings;

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

use crate::prompts::SummaryFormat;

const FORMAT_KEY: &str = "format";
const MODEL_KEY: &str = "model";

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("config connection lock poisoned"))
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Stored summary format. Unparseable values are reported, not ignored.
    pub fn format(&self) -> Result<Option<SummaryFormat>> {
        self.get(FORMAT_KEY)?
            .map(|raw| raw.parse::<SummaryFormat>().map_err(|e| anyhow!(e)))
            .transpose()
            .context("stored summary format is invalid")
    }

    pub fn set_format(&self, format: SummaryFormat) -> Result<()> {
        self.set(FORMAT_KEY, format.as_str())
    }

    /// Stored model override.
    pub fn model(&self) -> Result<Option<String>> {
        self.get(MODEL_KEY)
    }

    pub fn set_model(&self, model: &str) -> Result<()> {
        self.set(MODEL_KEY, model)
    }

    /// Layer stored preferences under `settings`. Values already set on
    /// the command line are passed in as `Some` and win.
    pub fn apply(
        &self,
        settings: &mut Settings,
        cli_format: Option<SummaryFormat>,
        cli_model: Option<String>,
    ) -> Result<()> {
        let format = match cli_format {
            Some(format) => Some(format),
            None => self.format()?,
        };
        if let Some(format) = format {
            settings.format = format;
        }
        let model = match cli_model {
            Some(model) => Some(model),
            None => self.model()?,
        };
        if let Some(model) = model {
            settings.model = model;
        }
        Ok(())
    }
}
