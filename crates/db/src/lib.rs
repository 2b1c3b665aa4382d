mod error;
mod migrations;
mod records;
mod session;
mod storage;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use records::RECORDS_KEY;
pub use session::WELCOME_SHOWN_KEY;

/// Local profile storage: a persistent key/value area and a session area
/// that is wiped on logout.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        Ok(Self { conn })
    }
}
