//! JSON configuration file.
//!
//! ```json
//! {
//!   "include": ["expressions/*"],
//!   "exclude": ["variables/rename"],
//!   "enable": ["optimization/unreachable"],
//!   "order": ["control/unflatten"],
//!   "max_passes": 3,
//!   "decode_table": { "_0x1a(5)": "log" }
//! }
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::Deserialize;

use crate::{DecodeTable, DeobfuscateOptions, RuleSelection};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub selection: RuleSelection,
    pub decode_table: DecodeTable,
}

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn into_options(self) -> DeobfuscateOptions {
        DeobfuscateOptions {
            selection: self.selection,
            decode_table: self.decode_table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = Config::from_json(
            r#"{
                "include": ["expressions/*"],
                "exclude": ["expressions/simplify"],
                "enable": ["optimization/unreachable"],
                "order": ["expressions/binary-fold"],
                "max_passes": 5,
                "decode_table": { "_0x1a(5)": "log" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.selection.include, ["expressions/*"]);
        assert_eq!(config.selection.exclude, ["expressions/simplify"]);
        assert_eq!(config.selection.enable, ["optimization/unreachable"]);
        assert_eq!(
            config.selection.order.as_deref(),
            Some(&["expressions/binary-fold".to_owned()][..])
        );
        assert_eq!(config.selection.max_passes, 5);
        assert_eq!(
            config.decode_table.get("_0x1a(5)").map(String::as_str),
            Some("log")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.selection.max_passes, 3);
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = Config::load(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = Config::load(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
