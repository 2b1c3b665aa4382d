use roll_core::UsageRecord;
use roll_db::Db;
use tracing::{debug, info};

use crate::error::Result;

/// The record collection, loaded once and written back whole after every
/// mutation.
pub struct RecordStore {
    db: Db,
    records: Vec<UsageRecord>,
}

impl RecordStore {
    pub fn open(db: Db) -> Result<Self> {
        let records = db.load_records()?;
        debug!(count = records.len(), "loaded records");
        Ok(Self { db, records })
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn list(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&UsageRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the record with the same id in place, or appends it.
    pub fn upsert(&mut self, record: UsageRecord) -> Result<()> {
        let mut next = self.records.clone();
        match next.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => next.push(record),
        }
        self.replace(next)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next: Vec<UsageRecord> = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        self.replace(next)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.db.clear_records()?;
        info!(count = self.records.len(), "cleared records");
        self.records.clear();
        Ok(())
    }

    fn replace(&mut self, next: Vec<UsageRecord>) -> Result<()> {
        self.db.save_records(&next)?;
        self.records = next;
        Ok(())
    }
}
