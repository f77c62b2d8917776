//! Platform directories for Ragdesk files.
//!
//! ```text
//! ~/.config/ragdesk/        # Config directory (dirs::config_dir)
//! └── client.toml           # Client settings
//! ```

use std::path::PathBuf;

use ragdesk_core::{RagdeskError, Result};

const APP_DIR: &str = "ragdesk";
const SETTINGS_FILE: &str = "client.toml";

pub struct RagdeskPaths;

impl RagdeskPaths {
    /// Returns the Ragdesk configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| RagdeskError::config("cannot determine the configuration directory"))
    }

    /// Returns the path of `client.toml`. The file may not exist.
    pub fn settings_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }
}
