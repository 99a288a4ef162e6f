//! Init command implementation

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use buildstamp_core::StampConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const DEFAULT_CONFIG: &str = r#"{
  // Resolve "<grist>path" targets as "path"
  "strip_grist": true,
  // Archives larger than this (bytes) report every member as unknown
  "max_archive_size": 268435456,
  "thin_archives": true
}
"#;

/// What happened to the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitOutcome {
    Created,
    Replaced,
}

pub fn run_init(dir: Option<&Path>, force: bool) -> Result<()> {
    let name = StampConfig::CONFIG_FILES[0];
    let config_path = dir.map_or_else(|| PathBuf::from(name), |dir| dir.join(name));

    match write_config(&config_path, force)? {
        InitOutcome::Created => info!("Created {}", config_path.display()),
        InitOutcome::Replaced => info!("Replaced {}", config_path.display()),
    }
    Ok(())
}

/// Writes the starter config, replacing an existing file only with `force`.
///
/// A symlink at `path` is never followed.
fn write_config(path: &Path, force: bool) -> Result<InitOutcome> {
    let (mut file, outcome) = match create_exclusive(path) {
        Ok(file) => (file, InitOutcome::Created),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if !force {
                return Err(miette::miette!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                ));
            }

            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_diagnostic(),
            }

            let file = create_exclusive(path).map_err(|e| {
                miette::miette!("Unable to replace {}: {}", path.display(), e)
            })?;
            (file, InitOutcome::Replaced)
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    file.write_all(DEFAULT_CONFIG.as_bytes()).into_diagnostic()?;
    Ok(outcome)
}

fn create_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_defaults() {
        assert_eq!(
            StampConfig::from_jsonc(DEFAULT_CONFIG).unwrap(),
            StampConfig::default()
        );
    }

    #[test]
    fn test_write_config_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".buildstamp.jsonc");

        assert_eq!(write_config(&path, false).unwrap(), InitOutcome::Created);
        assert_eq!(
            StampConfig::from_file(&path).unwrap(),
            StampConfig::default()
        );
    }

    #[test]
    fn test_write_config_keeps_existing_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".buildstamp.jsonc");
        std::fs::write(&path, r#"{"strip_grist": false}"#).unwrap();

        let err = write_config(&path, false).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"strip_grist": false}"#
        );
    }

    #[test]
    fn test_write_config_replaces_with_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".buildstamp.jsonc");
        std::fs::write(&path, r#"{"strip_grist": false}"#).unwrap();

        assert_eq!(write_config(&path, true).unwrap(), InitOutcome::Replaced);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_config_does_not_write_through_symlink() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("elsewhere.json");
        let path = dir.path().join(".buildstamp.jsonc");
        std::fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &path).unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(write_config(&path, true).unwrap(), InitOutcome::Replaced);

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");
        assert!(!std::fs::symlink_metadata(&path).unwrap().is_symlink());
    }

    #[test]
    fn test_run_init_into_directory() {
        let dir = TempDir::new().unwrap();

        run_init(Some(dir.path()), false).unwrap();

        assert!(dir.path().join(".buildstamp.jsonc").is_file());
    }
}
