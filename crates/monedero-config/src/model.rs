use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable application preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for the state document.
    /// Defaults to `~/Documents/Monedero`.
    pub data_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for backups.
    /// Defaults to `~/Documents/Monedero/backups`.
    pub backup_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            backup_retention: Self::default_backup_retention(),
            data_root: None,
            backup_root: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "es-ES".into()
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }
        default_base().join("Monedero")
    }

    pub fn resolve_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.backup_root {
            return path.clone();
        }
        default_base().join("Monedero").join("backups")
    }
}

fn default_base() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_roots_win_over_defaults() {
        let config = Config {
            data_root: Some(PathBuf::from("/tmp/monedero")),
            ..Config::default()
        };
        assert_eq!(config.resolve_data_root(), PathBuf::from("/tmp/monedero"));
        assert!(config
            .resolve_backup_root()
            .ends_with("Monedero/backups"));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty doc parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.backup_retention, 5);
    }
}
