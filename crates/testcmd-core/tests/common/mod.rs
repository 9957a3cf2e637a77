//! Shared test helpers for testcmd-core integration tests.
//!
//! [`CannedProbe`] answers every probe from fixed strings and records each
//! call, so tests can assert both the generated command and which external
//! processes would have been started.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use testcmd_core::probe::{Probe, ProbeError};

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
}

/// Simulator catalog containing "iPhone 14 Plus" then "iPhone SE (3rd generation)".
pub fn sim_catalog() -> String {
    fixture("devicetypes.json")
}

/// `-showdestinations` output for a macOS-only scheme.
pub fn macos_destinations() -> String {
    fixture("macos_destinations.txt")
}

pub fn which(program: &str) -> String {
    format!("/path/to/{}\n", program)
}

/// A probe call, as recorded by [`CannedProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Which(String),
    SimulatorCatalog,
    Destinations(Vec<String>),
}

#[derive(Default)]
pub struct CannedProbe {
    pub which: Option<String>,
    pub catalog: Option<String>,
    pub destinations: Option<String>,
    pub calls: RefCell<Vec<Call>>,
}

impl CannedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_which(mut self, output: impl Into<String>) -> Self {
        self.which = Some(output.into());
        self
    }

    pub fn with_catalog(mut self, output: impl Into<String>) -> Self {
        self.catalog = Some(output.into());
        self
    }

    pub fn with_destinations(mut self, output: impl Into<String>) -> Self {
        self.destinations = Some(output.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn answer(&self, call: Call, output: &Option<String>) -> Result<String, ProbeError> {
        self.calls.borrow_mut().push(call);
        output
            .clone()
            .ok_or_else(|| ProbeError::CommandFailed("no canned output".to_string()))
    }
}

impl Probe for CannedProbe {
    fn which(&self, tool: &str) -> Result<String, ProbeError> {
        self.answer(Call::Which(tool.to_string()), &self.which)
    }

    fn simulator_catalog(&self) -> Result<String, ProbeError> {
        self.answer(Call::SimulatorCatalog, &self.catalog)
    }

    fn destinations(&self, _xcodebuild: &str, scheme_args: &[String]) -> Result<String, ProbeError> {
        self.answer(Call::Destinations(scheme_args.to_vec()), &self.destinations)
    }
}
