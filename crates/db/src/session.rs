use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;

/// Set once the welcome overlay has been dismissed in the current session.
pub const WELCOME_SHOWN_KEY: &str = "welcomeShown";

impl Db {
    pub fn get_session_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM session_storage WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_session_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO session_storage (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove_session_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM session_storage WHERE key = ?1", [key])?;
        Ok(())
    }

    pub fn clear_session(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM session_storage", [])?)
    }

    pub fn welcome_shown(&self) -> Result<bool> {
        Ok(self.get_session_item(WELCOME_SHOWN_KEY)?.as_deref() == Some("true"))
    }

    pub fn set_welcome_shown(&self, shown: bool) -> Result<()> {
        if shown {
            self.set_session_item(WELCOME_SHOWN_KEY, "true")
        } else {
            self.remove_session_item(WELCOME_SHOWN_KEY)
        }
    }
}
