//! Per-project persisted test command.
//!
//! `testcmd init` writes the generated configuration to
//! `<project>/testcmd.conf.json` so a mutation-testing run can read it
//! without probing the host again.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use testcmd_core::Configuration;

pub const DEFAULT_STORE_FILENAME: &str = "testcmd.conf.json";

/// The on-disk shape of a project's test command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStore {
    pub test_command_executable: String,
    #[serde(default)]
    pub test_command_arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exclude_list: BTreeSet<String>,
}

impl From<Configuration> for ProjectStore {
    fn from(config: Configuration) -> Self {
        Self {
            test_command_executable: config.executable,
            test_command_arguments: config.arguments,
            exclude_list: config.exclude_list,
        }
    }
}

impl ProjectStore {
    /// Where the store lives for `project_dir`.
    pub fn path_in(project_dir: &Path, file_name: &str) -> PathBuf {
        project_dir.join(file_name)
    }

    /// Load a store, returning `Ok(None)` if the file does not exist.
    pub fn load(path: &Path) -> std::io::Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Write the store as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json + "\n")
    }
}
