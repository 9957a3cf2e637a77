//! Scheme names and base `xcodebuild`/`swift` argument skeletons.

use crate::classify::{base_name, file_name, ProjectKind};

/// The scheme for an Xcode anchor: its file name without the extension.
///
/// `/path/to/iOSApp.xcodeproj` → `iOSApp`.
pub fn scheme_name(anchor: &str) -> String {
    base_name(anchor).to_string()
}

/// Arguments every test invocation for `kind` starts with.
///
/// Xcode kinds reference the anchor by bare file name, so the command must
/// run from the project directory. Unsupported projects have no arguments.
pub fn base_arguments(kind: ProjectKind, anchor: &str) -> Vec<String> {
    let flag = match kind {
        ProjectKind::SwiftPackage => return vec!["test".to_string()],
        ProjectKind::Unsupported => return Vec::new(),
        ProjectKind::XcodeProject => "-project",
        ProjectKind::XcodeWorkspace => "-workspace",
    };

    vec![
        flag.to_string(),
        file_name(anchor).to_string(),
        "-scheme".to_string(),
        scheme_name(anchor),
    ]
}
