use std::path::PathBuf;

use roll_app::AppPaths;

const DATA_DIR_NAME: &str = "roll-usage";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub paths: AppPaths,
    pub matched_existing: bool,
}

/// `--data-dir` when given, otherwise the platform data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<DataDirResolution, String> {
    let dir = match explicit {
        Some(dir) => dir,
        None => dirs::data_dir()
            .map(|base| base.join(DATA_DIR_NAME))
            .ok_or_else(|| "resolve data dir".to_string())?,
    };
    let paths = AppPaths::new(dir);
    let matched_existing = paths.db_path.exists();
    Ok(DataDirResolution {
        paths,
        matched_existing,
    })
}
