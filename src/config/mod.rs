use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::import::MatchField;
use crate::core::query::SortDirection;
use crate::db::pool::OpenOptions;
use crate::errors::{AppError, AppResult};
use crate::models::OrderField;
use crate::ui::messages::success;

pub mod migrate;

pub const CONFIG_FILE_NAME: &str = "rorders.conf";
pub const DB_FILE_NAME: &str = "orders.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,
    #[serde(default = "default_sort_direction")]
    pub default_sort_direction: String,
    #[serde(default = "default_import_match_field")]
    pub import_match_field: MatchField,
    #[serde(default = "default_backup_before_rebuild")]
    pub backup_before_rebuild: bool,
}

fn default_sort_field() -> String {
    "createdAt".to_string()
}
fn default_sort_direction() -> String {
    "desc".to_string()
}
fn default_import_match_field() -> MatchField {
    MatchField::OrderNumber
}
fn default_backup_before_rebuild() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_sort_field: default_sort_field(),
            default_sort_direction: default_sort_direction(),
            import_match_field: default_import_match_field(),
            backup_before_rebuild: default_backup_before_rebuild(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rorders")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rorders")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE_NAME)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
    }

    /// Sort applied by `list` when no `--sort`/`--dir` is given.
    pub fn default_sort(&self) -> AppResult<(OrderField, SortDirection)> {
        let field = OrderField::parse(&self.default_sort_field)?;
        let dir = self.default_sort_direction.parse::<SortDirection>()?;
        Ok((field, dir))
    }

    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            backup_before_rebuild: self.backup_before_rebuild,
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join(DB_FILE_NAME),
        };

        let config = Config::with_database(db_path.clone());

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {}", db_path.display()));

        Ok(config)
    }
}
