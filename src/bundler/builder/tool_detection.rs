//! External tool detection and availability checking.
//!
//! Results are cached so repeated packaging runs in one process probe each
//! tool once.

use std::sync::LazyLock;

/// Check if makensis is available on `PATH` for NSIS installer creation.
pub static HAS_MAKENSIS: LazyLock<bool> = LazyLock::new(|| probe("makensis", &["-VERSION"]));

/// Check if hdiutil is available for disk image creation.
pub static HAS_HDIUTIL: LazyLock<bool> = LazyLock::new(|| probe("hdiutil", &["help"]));

/// Finds `tool` on `PATH` and confirms it runs.
fn probe(tool: &str, args: &[&str]) -> bool {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {tool} at: {}", path.display());

            match std::process::Command::new(&path).args(args).output() {
                Ok(output) if output.status.success() => {
                    let version = String::from_utf8_lossy(&output.stdout);
                    log::info!(
                        "✓ {tool} available: {}",
                        version.lines().next().unwrap_or_default().trim()
                    );
                    true
                }
                Ok(output) => {
                    log::warn!(
                        "{tool} found at {} but {:?} failed (exit code: {:?}). Stderr: {}",
                        path.display(),
                        args,
                        output.status.code(),
                        String::from_utf8_lossy(&output.stderr)
                    );
                    false
                }
                Err(e) => {
                    log::warn!(
                        "{tool} found at {} but failed to execute: {}. Check file permissions.",
                        path.display(),
                        e
                    );
                    false
                }
            }
        }
        Err(e) => {
            log::debug!("{tool} not found in PATH: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_is_unavailable() {
        assert!(!probe("definitely-not-a-packaging-tool", &["--version"]));
    }
}
