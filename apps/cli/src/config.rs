use std::fs;
use std::path::{Path, PathBuf};

use roll_core::ReportTab;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "roll-usage";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Report shown when `report` is run without a view.
    pub default_report: ReportTab,
    /// Where `export` writes when no `--output` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Reads the config file, writing one with defaults when it is missing.
pub fn load_or_create(path: Option<&Path>) -> Result<ConfigLoad, String> {
    let file = match path {
        Some(path) => path.to_path_buf(),
        None => config_dir()?.join(CONFIG_FILE_NAME),
    };

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    }
    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| "resolve config dir".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_defaults_then_reads_them_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let first = load_or_create(Some(&file)).expect("create");
        assert!(first.created);
        assert_eq!(first.config, CliConfig::default());
        assert_eq!(first.config.default_report, ReportTab::Supplier);

        let second = load_or_create(Some(&file)).expect("load");
        assert!(!second.created);
        assert_eq!(second.config, first.config);
    }

    #[test]
    fn reads_partial_config() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&file, "default_report = \"monthly\"\nexport_dir = \"/tmp/out\"\n")
            .expect("write");

        let loaded = load_or_create(Some(&file)).expect("load");
        assert_eq!(loaded.config.default_report, ReportTab::Monthly);
        assert_eq!(loaded.config.export_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn rejects_unknown_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&file, "default_report = \"yearly\"\n").expect("write");
        assert!(load_or_create(Some(&file)).is_err());
    }
}
