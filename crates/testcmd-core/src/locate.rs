//! Executable lookup.

use tracing::{debug, warn};

use crate::probe::Probe;

/// Resolve the absolute path of `tool` with a single `which` probe.
///
/// Returns the trimmed probe output, or an empty string if the probe failed
/// or printed nothing. Callers decide whether empty means failure.
pub fn locate(probe: &dyn Probe, tool: &str) -> String {
    match probe.which(tool) {
        Ok(output) => {
            let path = output.trim().to_string();
            debug!(tool, path = %path, "located tool");
            path
        }
        Err(e) => {
            warn!(tool, error = %e, "tool lookup failed");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeError;
    use std::cell::Cell;

    struct WhichOnly {
        output: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl Probe for WhichOnly {
        fn which(&self, _tool: &str) -> Result<String, ProbeError> {
            self.calls.set(self.calls.get() + 1);
            self.output
                .map(str::to_string)
                .ok_or_else(|| ProbeError::CommandFailed("not found".to_string()))
        }

        fn simulator_catalog(&self) -> Result<String, ProbeError> {
            unreachable!("locate only calls which")
        }

        fn destinations(&self, _: &str, _: &[String]) -> Result<String, ProbeError> {
            unreachable!("locate only calls which")
        }
    }

    #[test]
    fn test_locate_trims_output() {
        let probe = WhichOnly { output: Some("/usr/bin/swift\n"), calls: Cell::new(0) };
        assert_eq!(locate(&probe, "swift"), "/usr/bin/swift");
        assert_eq!(probe.calls.get(), 1);
    }

    #[test]
    fn test_locate_empty_output() {
        let probe = WhichOnly { output: Some("  \n"), calls: Cell::new(0) };
        assert_eq!(locate(&probe, "swift"), "");
    }

    #[test]
    fn test_locate_failed_probe_is_empty() {
        let probe = WhichOnly { output: None, calls: Cell::new(0) };
        assert_eq!(locate(&probe, "xcodebuild"), "");
        assert_eq!(probe.calls.get(), 1);
    }
}
