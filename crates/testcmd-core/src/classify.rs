//! Build-system detection from a directory listing.
//!
//! [`classify`] looks only at file names. It never touches the filesystem
//! and never runs a process, so the same listing always produces the same
//! [`ProjectDescriptor`].
//!
//! Detection order:
//!
//! 1. `<Name>.xcworkspace` next to a `<Name>.xcodeproj` → [`ProjectKind::XcodeWorkspace`]
//! 2. any `*.xcodeproj` → [`ProjectKind::XcodeProject`]
//! 3. `Package.swift` or `Package@swift-<version>.swift` → [`ProjectKind::SwiftPackage`]
//! 4. anything else → [`ProjectKind::Unsupported`]
//!
//! Xcode anchors win over a `Package.swift` in the same listing.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scheme;

const XCODEPROJ_EXTENSION: &str = "xcodeproj";
const XCWORKSPACE_EXTENSION: &str = "xcworkspace";

/// The build system a project directory uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// A Swift Package Manager package, tested with `swift test`.
    SwiftPackage,
    /// A bare `.xcodeproj`, tested with `xcodebuild -project`.
    XcodeProject,
    /// A `.xcworkspace` wrapping a same-named project, tested with `xcodebuild -workspace`.
    XcodeWorkspace,
    /// No recognised anchor file.
    Unsupported,
}

impl ProjectKind {
    /// The tool that runs this kind of project's tests, if any.
    pub fn tool(&self) -> Option<&'static str> {
        match self {
            ProjectKind::SwiftPackage => Some("swift"),
            ProjectKind::XcodeProject | ProjectKind::XcodeWorkspace => Some("xcodebuild"),
            ProjectKind::Unsupported => None,
        }
    }

    /// Whether tests for this kind need an `xcodebuild` destination.
    pub fn is_xcode(&self) -> bool {
        matches!(self, ProjectKind::XcodeProject | ProjectKind::XcodeWorkspace)
    }
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProjectKind::SwiftPackage => "Swift package",
            ProjectKind::XcodeProject => "Xcode project",
            ProjectKind::XcodeWorkspace => "Xcode workspace",
            ProjectKind::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// What [`classify`] learned about a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub kind: ProjectKind,
    /// The path that triggered the classification. `None` for unsupported projects.
    pub anchor_path: Option<String>,
    /// Anchor base name for Xcode kinds, empty otherwise.
    pub scheme_name: String,
    /// Package manifest file names; only populated for Swift packages.
    pub exclude_list: BTreeSet<String>,
}

impl ProjectDescriptor {
    fn unsupported() -> Self {
        Self {
            kind: ProjectKind::Unsupported,
            anchor_path: None,
            scheme_name: String::new(),
            exclude_list: BTreeSet::new(),
        }
    }

    fn xcode(kind: ProjectKind, anchor: &str) -> Self {
        Self {
            kind,
            anchor_path: Some(anchor.to_string()),
            scheme_name: scheme::scheme_name(anchor),
            exclude_list: BTreeSet::new(),
        }
    }
}

fn manifest_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Package(@swift-\d+(\.\d+)*)?\.swift$").expect("manifest pattern is valid")
    })
}

/// Returns true if `file_name` is `Package.swift` or a versioned manifest
/// such as `Package@swift-5.11.swift`.
pub fn is_package_manifest(file_name: &str) -> bool {
    manifest_pattern().is_match(file_name)
}

pub(crate) fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

pub(crate) fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
}

fn has_extension(path: &str, extension: &str) -> bool {
    Path::new(path).extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Classify a project from its directory listing.
///
/// `paths` is unordered. When several candidates of the same kind exist the
/// lexicographically smallest path is used, so the result never depends on
/// listing order.
pub fn classify<S: AsRef<str>>(paths: &[S]) -> ProjectDescriptor {
    let mut paths: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
    paths.sort_unstable();
    paths.dedup();

    let projects: Vec<&str> = paths
        .iter()
        .copied()
        .filter(|p| has_extension(p, XCODEPROJ_EXTENSION))
        .collect();

    if projects.len() > 1 {
        warn!(?projects, "multiple Xcode projects found, using the first");
    }

    let workspace = paths.iter().copied().find(|p| {
        has_extension(p, XCWORKSPACE_EXTENSION)
            && projects.iter().any(|proj| base_name(proj) == base_name(p))
    });

    if let Some(workspace) = workspace {
        debug!(workspace, "classified as Xcode workspace");
        return ProjectDescriptor::xcode(ProjectKind::XcodeWorkspace, workspace);
    }

    if let Some(project) = projects.first() {
        debug!(project, "classified as Xcode project");
        return ProjectDescriptor::xcode(ProjectKind::XcodeProject, project);
    }

    let manifests: Vec<&str> = paths
        .iter()
        .copied()
        .filter(|p| is_package_manifest(file_name(p)))
        .collect();

    if manifests.is_empty() {
        debug!("no anchor file found");
        return ProjectDescriptor::unsupported();
    }

    let anchor = manifests
        .iter()
        .copied()
        .find(|p| file_name(p) == "Package.swift")
        .unwrap_or(manifests[0]);
    debug!(anchor, "classified as Swift package");

    ProjectDescriptor {
        kind: ProjectKind::SwiftPackage,
        anchor_path: Some(anchor.to_string()),
        scheme_name: String::new(),
        exclude_list: manifests.iter().map(|p| file_name(p).to_string()).collect(),
    }
}
