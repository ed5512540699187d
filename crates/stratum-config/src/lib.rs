pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};

/// Environment variable that points directly at a configuration file
pub const CONFIG_PATH_ENV: &str = "STRATUM_CONFIG_PATH";

const CANDIDATES: [&str; 4] = [
    "stratum.local.yaml",
    ".stratum.local.yaml",
    "stratum.yaml",
    ".stratum.yaml",
];

/// Path of the global configuration file (`~/.config/stratum/stratum.yaml`)
///
/// The file itself may not exist.
pub fn global_config_file() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(config_dir.join("stratum").join("stratum.yaml"))
}

/// Find the project's configuration file
///
/// Search order:
/// 1. `STRATUM_CONFIG_PATH` environment variable
/// 2. current directory: stratum.local.yaml, .stratum.local.yaml, stratum.yaml, .stratum.yaml
/// 3. `./.stratum/` directory, same order
/// 4. `~/.config/stratum/stratum.yaml` (global)
pub fn find_config_file() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    find_config_file_from(&current_dir)
}

/// Same as [`find_config_file`], starting from `dir` instead of the current directory
pub fn find_config_file_from(dir: &Path) -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Using {}", CONFIG_PATH_ENV);
            return Ok(path);
        }
        tracing::warn!(
            path = %path.display(),
            "{} points to a missing file, ignoring",
            CONFIG_PATH_ENV
        );
    }

    if let Some(path) = first_candidate(dir) {
        return Ok(path);
    }

    let stratum_dir = dir.join(".stratum");
    if stratum_dir.is_dir()
        && let Some(path) = first_candidate(&stratum_dir)
    {
        return Ok(path);
    }

    if let Ok(global_config) = global_config_file()
        && global_config.exists()
    {
        return Ok(global_config);
    }

    Err(ConfigError::ConfigFileNotFound)
}

fn first_candidate(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|filename| dir.join(filename))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_global_config_file() {
        let path = global_config_file().unwrap();
        assert!(path.ends_with("stratum/stratum.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stratum.yaml"), "teams: []").unwrap();

        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            let result = find_config_file_from(temp_dir.path()).unwrap();
            assert!(result.ends_with("stratum.yaml"));
        });
    }

    #[test]
    #[serial]
    fn test_find_config_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stratum.yaml"), "teams: []").unwrap();
        fs::write(temp_dir.path().join("stratum.local.yaml"), "teams: []").unwrap();

        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            let result = find_config_file_from(temp_dir.path()).unwrap();
            assert!(result.ends_with("stratum.local.yaml"));
        });
    }

    #[test]
    #[serial]
    fn test_hidden_local_beats_visible() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".stratum.local.yaml"), "teams: []").unwrap();
        fs::write(temp_dir.path().join("stratum.yaml"), "teams: []").unwrap();

        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            let result = find_config_file_from(temp_dir.path()).unwrap();
            assert!(result.ends_with(".stratum.local.yaml"));
        });
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_stratum_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let stratum_dir = temp_dir.path().join(".stratum");
        fs::create_dir(&stratum_dir).unwrap();
        fs::write(stratum_dir.join("stratum.yaml"), "teams: []").unwrap();

        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            let result = find_config_file_from(temp_dir.path()).unwrap();
            assert!(result.ends_with(".stratum/stratum.yaml"));
        });
    }

    #[test]
    #[serial]
    fn test_find_config_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, "teams: []").unwrap();

        temp_env::with_var(CONFIG_PATH_ENV, Some(config_path.as_os_str()), || {
            let result = find_config_file_from(temp_dir.path()).unwrap();
            assert_eq!(result, config_path);
        });
    }

    #[test]
    #[serial]
    fn test_find_config_file_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();

        temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            let result = find_config_file_from(temp_dir.path());

            // A global ~/.config/stratum/stratum.yaml on the test machine is a valid hit
            if let Ok(path) = &result {
                assert!(path.ends_with("stratum/stratum.yaml"));
                return;
            }

            if let Err(ConfigError::ConfigFileNotFound) = result {
                // expected
            } else {
                panic!("Expected ConfigFileNotFound error");
            }
        });
    }
}
