use std::io::Write;

use roll_core::{RecordInput, ReportSet, ReportTab, UsageRecord, aggregate_all, validate_input};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::export::write_csv;
use crate::store::RecordStore;

pub const CONFIRM_DELETE: &str = "Apakah Anda yakin ingin menghapus data ini?";
pub const CONFIRM_RESET: &str =
    "Apakah Anda yakin ingin menghapus semua data? Tindakan ini tidak dapat dibatalkan.";
pub const CONFIRM_LOGOUT: &str = "Apakah Anda yakin ingin keluar?";

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Done,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(UsageRecord),
    Updated(UsageRecord),
}

impl SaveOutcome {
    pub fn record(&self) -> &UsageRecord {
        match self {
            SaveOutcome::Created(record) | SaveOutcome::Updated(record) => record,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Created(_) => "Data berhasil disimpan",
            SaveOutcome::Updated(_) => "Data berhasil diperbarui",
        }
    }
}

/// What renderers see after each change.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSnapshot<'a> {
    pub records: &'a [UsageRecord],
    pub reports: &'a ReportSet,
    pub active_tab: ReportTab,
    pub editing_id: Option<&'a str>,
    pub welcome_visible: bool,
}

pub trait DashboardObserver {
    fn on_change(&mut self, snapshot: &DashboardSnapshot<'_>);
}

/// Sole owner of the record collection and of the page state around it.
/// Every mutation recomputes the reports and notifies observers.
pub struct Dashboard {
    store: RecordStore,
    reports: ReportSet,
    editing_id: Option<String>,
    welcome_visible: bool,
    active_tab: ReportTab,
    observers: Vec<Box<dyn DashboardObserver>>,
}

impl Dashboard {
    pub fn open(store: RecordStore) -> Result<Self> {
        let welcome_visible = !store.db().welcome_shown()?;
        let reports = aggregate_all(store.list());
        Ok(Self {
            store,
            reports,
            editing_id: None,
            welcome_visible,
            active_tab: ReportTab::default(),
            observers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, observer: Box<dyn DashboardObserver>) {
        self.observers.push(observer);
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        DashboardSnapshot {
            records: self.store.list(),
            reports: &self.reports,
            active_tab: self.active_tab,
            editing_id: self.editing_id.as_deref(),
            welcome_visible: self.welcome_visible,
        }
    }

    pub fn records(&self) -> &[UsageRecord] {
        self.store.list()
    }

    pub fn has_data(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn reports(&self) -> &ReportSet {
        &self.reports
    }

    pub fn active_tab(&self) -> ReportTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: ReportTab) {
        self.active_tab = tab;
        self.notify();
    }

    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }

    pub fn dismiss_welcome(&mut self) -> Result<()> {
        self.store.db().set_welcome_shown(true)?;
        self.welcome_visible = false;
        self.notify();
        Ok(())
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn editing_record(&self) -> Option<&UsageRecord> {
        self.editing_id.as_deref().and_then(|id| self.store.get(id))
    }

    /// Enters edit mode and returns the form prefilled with the record.
    pub fn begin_edit(&mut self, id: &str) -> Result<RecordInput> {
        let record = self.store.get(id).ok_or_else(|| missing_record(id))?;
        let input = RecordInput::from_record(record);
        self.editing_id = Some(id.to_string());
        self.notify();
        Ok(input)
    }

    pub fn cancel_edit(&mut self) {
        if self.editing_id.take().is_some() {
            self.notify();
        }
    }

    /// Creates a record, or replaces the one under edit. Invalid input leaves
    /// the collection untouched.
    pub fn save(&mut self, input: &RecordInput) -> Result<SaveOutcome> {
        let valid = validate_input(input)?;
        let outcome = match self.editing_id.take() {
            Some(id) => {
                if self.store.get(&id).is_none() {
                    self.notify();
                    return Err(missing_record(&id));
                }
                let record = UsageRecord::from_valid(id, valid);
                self.store.upsert(record.clone())?;
                info!(id = %record.id, "updated record");
                SaveOutcome::Updated(record)
            }
            None => {
                let record = UsageRecord::from_valid(Uuid::new_v4().to_string(), valid);
                self.store.upsert(record.clone())?;
                info!(id = %record.id, "created record");
                SaveOutcome::Created(record)
            }
        };
        self.refresh();
        Ok(outcome)
    }

    pub fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<Confirmation> {
        if self.store.get(id).is_none() {
            return Err(missing_record(id));
        }
        if !confirm.confirm(CONFIRM_DELETE) {
            return Ok(Confirmation::Declined);
        }
        self.store.delete(id)?;
        if self.editing_id.as_deref() == Some(id) {
            self.editing_id = None;
        }
        info!(id, "deleted record");
        self.refresh();
        Ok(Confirmation::Done)
    }

    pub fn reset(&mut self, confirm: &dyn Confirm) -> Result<Confirmation> {
        if !confirm.confirm(CONFIRM_RESET) {
            return Ok(Confirmation::Declined);
        }
        self.store.clear()?;
        self.editing_id = None;
        self.refresh();
        Ok(Confirmation::Done)
    }

    /// Ends the session: the welcome overlay comes back, records stay.
    pub fn logout(&mut self, confirm: &dyn Confirm) -> Result<Confirmation> {
        if !confirm.confirm(CONFIRM_LOGOUT) {
            return Ok(Confirmation::Declined);
        }
        self.store.db().set_welcome_shown(false)?;
        self.welcome_visible = true;
        self.editing_id = None;
        info!("logged out");
        self.notify();
        Ok(Confirmation::Done)
    }

    /// Case-insensitive match on lot, supplier or machine.
    pub fn search(&self, term: &str) -> Vec<&UsageRecord> {
        let needle = term.trim().to_lowercase();
        self.store
            .list()
            .iter()
            .filter(|record| {
                needle.is_empty()
                    || record.lot.to_lowercase().contains(&needle)
                    || record.supplier.to_lowercase().contains(&needle)
                    || record.machine.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        if !self.has_data() {
            return Err(AppError::InvalidInput("no records to export".to_string()));
        }
        write_csv(self.store.list(), writer)
    }

    fn refresh(&mut self) {
        self.reports = aggregate_all(self.store.list());
        debug!(
            records = self.store.len(),
            suppliers = self.reports.colors.len(),
            "recomputed reports"
        );
        self.notify();
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        let snapshot = self.snapshot();
        for observer in observers.iter_mut() {
            observer.on_change(&snapshot);
        }
        self.observers = observers;
    }
}

fn missing_record(id: &str) -> AppError {
    AppError::NotFound(format!("record {} not found", id))
}
