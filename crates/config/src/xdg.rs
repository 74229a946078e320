//! XDG directory lookup.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "folio";

/// `$XDG_CONFIG_HOME/folio` (usually `~/.config/folio`).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_DIR))
        .context("Could not locate a config directory for folio")
}

/// `$XDG_DATA_HOME/folio` (usually `~/.local/share/folio`).
///
/// Holds the key-value storage file and the log.
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_DIR))
        .context("Could not locate a data directory for folio")
}

/// Default log file inside the data directory.
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("folio.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_are_app_scoped() {
        assert!(get_config_dir().unwrap().ends_with(APP_DIR));
        assert!(get_data_dir().unwrap().ends_with(APP_DIR));
    }

    #[test]
    fn test_log_file_lives_in_data_dir() {
        let log = get_log_file_path().unwrap();
        assert_eq!(log.parent().unwrap(), get_data_dir().unwrap());
    }
}
