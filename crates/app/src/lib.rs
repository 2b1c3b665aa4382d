pub mod app;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod startup;
pub mod store;
pub mod table;
pub mod util;

pub use app::{AppConfig, AppState};
pub use dashboard::{
    CONFIRM_DELETE, CONFIRM_LOGOUT, CONFIRM_RESET, Confirm, Confirmation, Dashboard,
    DashboardObserver, DashboardSnapshot, SaveOutcome,
};
pub use error::{AppError, Result};
pub use export::{CSV_HEADER, export_file_name, write_csv};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use store::RecordStore;
pub use table::{EMPTY_TABLE_MESSAGE, TableRow, format_counter, table_footer, table_rows};
pub use util::time::{format_header_date, format_locale_datetime, format_table_datetime, now_local};
