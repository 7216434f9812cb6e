use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use super::Config;

/// Keys every config file is expected to carry.
pub const EXPECTED_KEYS: [&str; 5] = [
    "database",
    "default_sort_field",
    "default_sort_direction",
    "import_match_field",
    "backup_before_rebuild",
];

fn read_mapping(conf_file: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(conf_file).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            conf_file.display()
        ))),
    }
}

/// Keys of `EXPECTED_KEYS` absent from the config file.
pub fn missing_keys(conf_file: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(conf_file)?;
    Ok(EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(&Value::String(k.to_string())))
        .collect())
}

/// Add missing keys with their default values, leaving existing ones alone.
/// Returns the keys that were added.
pub fn add_missing_keys(conf_file: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(conf_file)?;

    let defaults = serde_yaml::to_value(Config::default()).map_err(|_| AppError::ConfigSave)?;
    let Value::Mapping(defaults) = defaults else {
        return Err(AppError::ConfigSave);
    };

    let mut added = Vec::new();
    for key in EXPECTED_KEYS {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k)
            && let Some(v) = defaults.get(&k)
        {
            map.insert(k, v.clone());
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized =
            serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
        fs::write(conf_file, serialized).map_err(|_| AppError::ConfigSave)?;
        success(format!(
            "Config migrated: added {} to {}",
            added.join(", "),
            conf_file.display()
        ));
    } else {
        info("Config already up to date.");
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_only_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("rorders.conf");
        fs::write(&conf, "database: /data/o.sqlite\ndefault_sort_direction: asc\n").unwrap();

        let missing = missing_keys(&conf).unwrap();
        assert_eq!(
            missing,
            vec!["default_sort_field", "import_match_field", "backup_before_rebuild"]
        );

        let added = add_missing_keys(&conf).unwrap();
        assert_eq!(added.len(), 3);
        assert!(missing_keys(&conf).unwrap().is_empty());

        let cfg = Config::load_from(&conf).unwrap();
        assert_eq!(cfg.database, "/data/o.sqlite");
        assert_eq!(cfg.default_sort_direction, "asc");
        assert_eq!(cfg.default_sort_field, "createdAt");
    }
}
