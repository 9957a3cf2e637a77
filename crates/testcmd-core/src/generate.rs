//! Test command assembly.
//!
//! [`generate`] turns a directory listing into a [`Configuration`]: the
//! executable and arguments that run the project's tests, plus the files a
//! mutation run must leave alone.
//!
//! # Outcomes
//!
//! - `Ok(config)` with a non-empty executable: a project was recognised and
//!   every probe succeeded.
//! - `Ok(config)` with [`Configuration::is_empty`]: nothing recognisable in
//!   the listing. No probe was run.
//! - `Err(_)`: the project was recognised but the host could not supply what
//!   it needs (see [`GenerateError`]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::classify::{classify, ProjectKind};
use crate::destination::{self, PREFERRED_SIMULATORS};
use crate::locate::locate;
use crate::probe::Probe;
use crate::scheme::base_arguments;

/// Failures for a project that was recognised but cannot be tested here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// `which` found nothing for a tool the project kind requires.
    #[error("{tool} not found on this machine")]
    ToolNotFound { tool: String },

    /// Neither a simulator nor the local machine is a usable destination.
    #[error("no run destination found for scheme '{scheme}'")]
    DestinationUnresolved { scheme: String },
}

/// The command that runs a project's tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Absolute path of the test runner, or empty for unsupported projects.
    pub executable: String,
    /// Arguments passed to `executable`, in order.
    pub arguments: Vec<String>,
    /// File names to keep out of mutation scanning.
    #[serde(default)]
    pub exclude_list: BTreeSet<String>,
}

impl Configuration {
    /// The configuration for a directory with no recognised project.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the unsupported-project configuration.
    pub fn is_empty(&self) -> bool {
        self.executable.is_empty() && self.arguments.is_empty() && self.exclude_list.is_empty()
    }
}

/// Build the test command for a directory listing using the default
/// simulator preferences.
pub fn generate<S: AsRef<str>>(paths: &[S], probe: &dyn Probe) -> Result<Configuration, GenerateError> {
    generate_with_preferences(paths, probe, PREFERRED_SIMULATORS)
}

/// Like [`generate`], with an explicit simulator preference list.
///
/// Probes run one at a time in a fixed order: tool lookup, simulator
/// catalog, destination listing. Later probes are skipped once the answer
/// is known.
pub fn generate_with_preferences<S: AsRef<str>>(
    paths: &[S],
    probe: &dyn Probe,
    preferences: &[&str],
) -> Result<Configuration, GenerateError> {
    let descriptor = classify(paths);

    let Some(tool) = descriptor.kind.tool() else {
        info!("no supported project found");
        return Ok(Configuration::empty());
    };

    let executable = locate(probe, tool);
    if executable.is_empty() {
        return Err(GenerateError::ToolNotFound {
            tool: tool.to_string(),
        });
    }

    let anchor = descriptor.anchor_path.as_deref().unwrap_or_default();

    if descriptor.kind == ProjectKind::SwiftPackage {
        info!(executable = %executable, "generated Swift package test command");
        return Ok(Configuration {
            executable,
            arguments: base_arguments(ProjectKind::SwiftPackage, anchor),
            exclude_list: descriptor.exclude_list,
        });
    }

    let mut arguments = base_arguments(descriptor.kind, anchor);
    debug!(?arguments, "resolved scheme arguments");

    let destination = destination::resolve(probe, &executable, &arguments, preferences).ok_or_else(|| {
        GenerateError::DestinationUnresolved {
            scheme: descriptor.scheme_name.clone(),
        }
    })?;

    arguments.push("-destination".to_string());
    arguments.push(destination.to_string());
    arguments.push("test".to_string());

    info!(kind = %descriptor.kind, executable = %executable, "generated xcodebuild test command");
    Ok(Configuration {
        executable,
        arguments,
        exclude_list: BTreeSet::new(),
    })
}
