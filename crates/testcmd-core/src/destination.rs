//! Run destination resolution for Xcode projects.
//!
//! `xcodebuild test` needs a `-destination`. Two sources are tried in order:
//!
//! 1. The simulator device-type catalog from `xcrun simctl list devicetypes -j`.
//!    The first entry of [`PREFERRED_SIMULATORS`] present in the catalog wins,
//!    independent of catalog order.
//! 2. The destinations `xcodebuild -showdestinations` reports for the scheme,
//!    used for macOS-only schemes. The first concrete destination is taken;
//!    the `Any Mac` placeholder is skipped.
//!
//! The second probe is never run once a simulator matches.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::probe::Probe;

/// Simulator device names to run tests on, most preferred first.
pub const PREFERRED_SIMULATORS: &[&str] = &[
    "iPhone SE (3rd generation)",
    "iPhone SE (2nd generation)",
    "iPhone 15",
    "iPhone 14",
    "iPhone 13",
    "iPhone 12",
    "iPhone 11",
    "iPhone 8",
];

/// Placeholder destination `xcodebuild` lists alongside the real Mac.
const ANY_MAC: &str = "Any Mac";

/// Errors from decoding the simulator catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// A simulator device type as reported by `simctl list devicetypes -j`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorDevice {
    /// Human-readable name, e.g. "iPhone SE (3rd generation)".
    pub name: String,

    /// Device family, e.g. "iPhone" or "iPad".
    #[serde(rename = "productFamily", default)]
    pub product_family: String,

    /// Device type identifier, e.g. "com.apple.CoreSimulator.SimDeviceType.iPhone-14-Plus".
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
struct DeviceTypeList {
    devicetypes: Vec<SimulatorDevice>,
}

/// Parses the device-type catalog JSON into a list of devices.
pub fn parse_catalog(json: &str) -> Result<Vec<SimulatorDevice>, CatalogError> {
    let list: DeviceTypeList = serde_json::from_str(json)?;
    Ok(list.devicetypes)
}

/// Picks the most preferred simulator present in `devices`.
///
/// `preferences` order decides; catalog order does not.
pub fn preferred_simulator<'a>(
    devices: &'a [SimulatorDevice],
    preferences: &[&str],
) -> Option<&'a SimulatorDevice> {
    preferences
        .iter()
        .find_map(|wanted| devices.iter().find(|d| d.name == *wanted))
}

/// A resolved `xcodebuild -destination` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// An iOS simulator, identified by device name.
    Simulator { name: String },
    /// The local machine, as `key=value` pairs in `xcodebuild`'s order.
    LocalMachine { fields: Vec<(String, String)> },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Simulator { name } => write!(f, "platform=iOS Simulator,name={}", name),
            Destination::LocalMachine { fields } => {
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                Ok(())
            }
        }
    }
}

fn destination_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\s*(platform:[^}]*?)\s*\}").expect("destination pattern is valid")
    })
}

/// Splits `platform:macOS, arch:arm64, name:My Mac` into ordered pairs.
fn parse_fields(body: &str) -> Vec<(String, String)> {
    body.split(',')
        .filter_map(|segment| {
            let (key, value) = segment.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Finds the local-machine destination in `xcodebuild -showdestinations` output.
///
/// Returns the first `{ platform:..., ... }` entry that is not the `Any Mac`
/// placeholder. Entries carrying an `error` field are ineligible and skipped.
pub fn parse_local_destination(text: &str) -> Option<Destination> {
    text.lines()
        .filter_map(|line| destination_line().captures(line))
        .map(|caps| parse_fields(&caps[1]))
        .find(|fields| {
            let field = |k: &str| fields.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
            field("name") != Some(ANY_MAC) && field("error").is_none()
        })
        .map(|fields| Destination::LocalMachine { fields })
}

/// Resolves a destination for an Xcode scheme.
///
/// Tries the simulator catalog first, then the scheme's destination listing.
/// A failed or unparsable probe counts as "no match" for its tier.
pub fn resolve(
    probe: &dyn Probe,
    xcodebuild: &str,
    scheme_args: &[String],
    preferences: &[&str],
) -> Option<Destination> {
    match probe.simulator_catalog() {
        Ok(json) => match parse_catalog(&json) {
            Ok(devices) => {
                if let Some(device) = preferred_simulator(&devices, preferences) {
                    debug!(name = %device.name, "using simulator destination");
                    return Some(Destination::Simulator {
                        name: device.name.clone(),
                    });
                }
                debug!(count = devices.len(), "no preferred simulator in catalog");
            }
            Err(e) => warn!(error = %e, "could not parse simulator catalog"),
        },
        Err(e) => warn!(error = %e, "simulator catalog probe failed"),
    }

    match probe.destinations(xcodebuild, scheme_args) {
        Ok(text) => {
            let destination = parse_local_destination(&text);
            match &destination {
                Some(d) => debug!(destination = %d, "using local machine destination"),
                None => debug!("no usable destination in xcodebuild listing"),
            }
            destination
        }
        Err(e) => {
            warn!(error = %e, "destination listing probe failed");
            None
        }
    }
}
