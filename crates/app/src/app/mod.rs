use std::path::PathBuf;

use crate::dashboard::Dashboard;
use crate::error::{AppError, Result};
use crate::store::RecordStore;
use roll_db::Db;

/// Files needed to run the local tracker.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

/// Entry point shared by front ends.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            config: AppConfig { db_path },
        }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn initialize(&self) -> Result<()> {
        let is_fresh_db = self.is_fresh_db();
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        if is_fresh_db {
            tracing::info!(path = %self.config.db_path.display(), "created local storage");
        }
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }

    pub fn open_store(&self) -> Result<RecordStore> {
        RecordStore::open(self.open_db()?)
    }

    pub fn open_dashboard(&self) -> Result<Dashboard> {
        Dashboard::open(self.open_store()?)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
