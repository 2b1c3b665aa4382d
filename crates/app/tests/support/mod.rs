#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use roll_app::{AppPaths, AppState, DashboardObserver, DashboardSnapshot, ensure_app_data_dir};
use roll_core::RecordInput;
use tempfile::TempDir;

pub struct TestApp {
    pub _dir: TempDir,
    pub state: AppState,
}

pub fn setup_app() -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = AppPaths::new(dir.path().join("data"));
    ensure_app_data_dir(&paths).expect("data dir");
    let state = AppState::new(paths.db_path);
    state.initialize().expect("initialize");
    TestApp { _dir: dir, state }
}

pub fn input(lot: &str, supplier: &str, counter: i64, start: &str) -> RecordInput {
    RecordInput {
        lot: lot.to_string(),
        supplier: supplier.to_string(),
        machine: "M1".to_string(),
        counter,
        start_time: start.to_string(),
    }
}

pub fn yes(_: &str) -> bool {
    true
}

pub fn no(_: &str) -> bool {
    false
}

/// Records what each notification carried.
#[derive(Clone, Default)]
pub struct Recorder {
    pub seen: Rc<RefCell<Vec<(usize, u64, bool)>>>,
}

impl DashboardObserver for Recorder {
    fn on_change(&mut self, snapshot: &DashboardSnapshot<'_>) {
        let total: u64 = snapshot
            .reports
            .by_supplier
            .iter()
            .map(|item| item.total)
            .sum();
        self.seen
            .borrow_mut()
            .push((snapshot.records.len(), total, snapshot.welcome_visible));
    }
}

/// Records the edit state each notification carried.
#[derive(Clone, Default)]
pub struct EditTracker {
    pub seen: Rc<RefCell<Vec<Option<String>>>>,
}

impl DashboardObserver for EditTracker {
    fn on_change(&mut self, snapshot: &DashboardSnapshot<'_>) {
        self.seen
            .borrow_mut()
            .push(snapshot.editing_id.map(str::to_string));
    }
}
