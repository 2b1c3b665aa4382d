use std::collections::HashSet;

use roll_core::UsageRecord;
use tracing::warn;

use crate::Db;
use crate::error::Result;

/// Storage key of the serialized record collection.
pub const RECORDS_KEY: &str = "rollUsageData";

impl Db {
    /// Loads the whole collection. A blob that does not parse is ignored and
    /// reads as an empty collection.
    pub fn load_records(&self) -> Result<Vec<UsageRecord>> {
        let Some(raw) = self.get_item(RECORDS_KEY)? else {
            return Ok(Vec::new());
        };
        let records: Vec<UsageRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "ignoring malformed stored records");
                return Ok(Vec::new());
            }
        };
        let mut seen = HashSet::new();
        let total = records.len();
        let unique: Vec<UsageRecord> = records
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();
        if unique.len() != total {
            warn!(
                dropped = total - unique.len(),
                "dropped stored records with duplicate ids"
            );
        }
        Ok(unique)
    }

    pub fn save_records(&self, records: &[UsageRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.set_item(RECORDS_KEY, &raw)
    }

    pub fn clear_records(&self) -> Result<bool> {
        self.remove_item(RECORDS_KEY)
    }
}
