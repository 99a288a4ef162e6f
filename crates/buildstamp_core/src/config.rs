//! Resolver configuration.

use std::fs;
use std::path::{Path, PathBuf};

use buildstamp_archive::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::StampError;

/// Configuration for timestamp resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StampConfig {
    /// Remove a leading `<grist>` qualifier before touching the filesystem.
    #[serde(default = "default_strip_grist")]
    pub strip_grist: bool,

    /// Archives larger than this many bytes are not read.
    #[serde(default = "default_max_archive_size")]
    pub max_archive_size: u64,

    /// Accept GNU thin archives.
    #[serde(default = "default_thin_archives")]
    pub thin_archives: bool,
}

fn default_strip_grist() -> bool {
    true
}

fn default_max_archive_size() -> u64 {
    256 * 1024 * 1024
}

fn default_thin_archives() -> bool {
    true
}

impl StampConfig {
    /// Config file names searched by [`StampConfig::discover`], in priority order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".buildstamp.jsonc", ".buildstamp.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            strip_grist: default_strip_grist(),
            max_archive_size: default_max_archive_size(),
            thin_archives: default_thin_archives(),
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StampError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| StampError::config(format!("Failed to read config: {}", e)))?;

        Self::from_jsonc(&content)
    }

    /// Parses configuration from a JSON-with-comments string.
    pub fn from_jsonc(content: &str) -> Result<Self, StampError> {
        let value = jsonc_parser::parse_to_serde_value(content, &Default::default())
            .map_err(|e| StampError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| StampError::config(format!("Invalid config: {}", e)))
    }

    /// Finds the first config file present in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Archive reader options derived from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_thin: self.thin_archives,
        }
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_config_default() {
        let config = StampConfig::default();
        assert!(config.strip_grist);
        assert!(config.thin_archives);
        assert_eq!(config.max_archive_size, 256 * 1024 * 1024);
        assert!(config.parse_options().allow_thin);
    }

    #[test]
    fn test_config_from_jsonc() {
        let json = r#"{
            // archives from the vendor drop are huge
            "max_archive_size": 1024,
            "thin_archives": false,
        }"#;

        let config = StampConfig::from_jsonc(json).unwrap();
        assert_eq!(config.max_archive_size, 1024);
        assert!(!config.thin_archives);
        assert!(config.strip_grist);
    }

    #[test]
    fn test_config_empty_document() {
        let config = StampConfig::from_jsonc("").unwrap();
        assert_eq!(config, StampConfig::new());
    }

    #[rstest]
    #[case::unknown_property(r#"{ "strip_gist": true }"#, "Invalid config")]
    #[case::type_mismatch(r#"{ "max_archive_size": "big" }"#, "Invalid config")]
    #[case::not_json(r#"{ "strip_grist": "#, "Invalid JSON")]
    fn test_config_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let err = StampConfig::from_jsonc(json).unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(StampConfig::discover(dir.path()), None);

        fs::write(dir.path().join(".buildstamp.json"), "{}").unwrap();
        assert_eq!(
            StampConfig::discover(dir.path()),
            Some(dir.path().join(".buildstamp.json"))
        );

        fs::write(dir.path().join(".buildstamp.jsonc"), "{}").unwrap();
        assert_eq!(
            StampConfig::discover(dir.path()),
            Some(dir.path().join(".buildstamp.jsonc"))
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = StampConfig::from_file("/nonexistent/.buildstamp.jsonc").unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
