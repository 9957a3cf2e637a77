//! External process probes used while generating a test command.
//!
//! Every question the generator asks of the host machine goes through the
//! [`Probe`] trait: where a tool lives, which simulator device types exist,
//! and which destinations `xcodebuild` offers for a scheme. The production
//! implementation, [`SystemProbe`], shells out with [`std::process::Command`];
//! tests substitute canned outputs.
//!
//! # Example
//!
//! ```no_run
//! use testcmd_core::probe::{Probe, SystemProbe};
//!
//! let probe = SystemProbe::new("/path/to/project");
//! let swift = probe.which("swift").unwrap_or_default();
//! println!("swift is at {}", swift.trim());
//! ```

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while running a probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The command ran but exited unsuccessfully.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The command could not be spawned.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host-environment queries needed to build a test command.
///
/// Each method corresponds to one external invocation and returns the raw
/// standard output. Interpretation (trimming, JSON parsing, line matching)
/// is left to the caller.
pub trait Probe {
    /// Looks up `tool` on the search path, `which`-style.
    fn which(&self, tool: &str) -> Result<String, ProbeError>;

    /// Returns the simulator device-type catalog as JSON text.
    fn simulator_catalog(&self) -> Result<String, ProbeError>;

    /// Lists the run destinations `xcodebuild` reports for a scheme.
    ///
    /// `scheme_args` is the `-project`/`-workspace` + `-scheme` skeleton.
    fn destinations(&self, xcodebuild: &str, scheme_args: &[String]) -> Result<String, ProbeError>;
}

/// [`Probe`] backed by real processes on the host.
///
/// The destination listing runs inside `project_dir`, because the scheme
/// arguments name the project or workspace by bare file name.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    project_dir: PathBuf,
}

impl SystemProbe {
    /// Create a probe rooted at the given project directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// The directory destination listings are run from.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

fn stdout_of(output: Output) -> Result<String, ProbeError> {
    if !output.status.success() {
        return Err(ProbeError::CommandFailed(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

impl Probe for SystemProbe {
    fn which(&self, tool: &str) -> Result<String, ProbeError> {
        debug!(tool, "running which");
        let output = Command::new("/usr/bin/which").arg(tool).output()?;
        stdout_of(output)
    }

    fn simulator_catalog(&self) -> Result<String, ProbeError> {
        debug!("listing simulator device types");
        let output = Command::new("xcrun")
            .args(["simctl", "list", "devicetypes", "-j"])
            .output()?;
        stdout_of(output)
    }

    fn destinations(&self, xcodebuild: &str, scheme_args: &[String]) -> Result<String, ProbeError> {
        debug!(?scheme_args, dir = %self.project_dir.display(), "listing xcodebuild destinations");
        let output = Command::new(xcodebuild)
            .args(scheme_args)
            .arg("-showdestinations")
            .current_dir(&self.project_dir)
            .output()?;
        stdout_of(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_display() {
        let err = ProbeError::CommandFailed("no such scheme".to_string());
        assert!(err.to_string().contains("no such scheme"));
    }

    #[test]
    fn test_system_probe_keeps_project_dir() {
        let probe = SystemProbe::new("/some/path");
        assert_eq!(probe.project_dir(), Path::new("/some/path"));
    }

    #[test]
    fn test_destinations_in_missing_directory_fails() {
        let probe = SystemProbe::new("/definitely/not/a/real/dir");
        let result = probe.destinations("xcodebuild", &["-list".to_string()]);
        assert!(result.is_err());
    }
}
