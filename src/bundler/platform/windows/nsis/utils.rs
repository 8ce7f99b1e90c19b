//! NSIS helper functions.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Windows path under `$INSTDIR` for a `/`-separated relative path.
///
/// The empty path is `$INSTDIR` itself.
pub fn install_path(relative: &str) -> String {
    let relative = relative.trim_end_matches('/');
    if relative.is_empty() {
        "$INSTDIR".to_string()
    } else {
        format!("$INSTDIR\\{}", relative.replace('/', "\\"))
    }
}

/// Escapes double quotes for use inside an NSIS string literal.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "$\\\"")
}

/// Write file with UTF-8 BOM (required by Unicode NSIS).
pub async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating NSI script file", path)?;

    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing NSI content", path)?;
    file.flush().await.fs_context("flushing NSI file", path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_path() {
        assert_eq!(install_path(""), "$INSTDIR");
        assert_eq!(install_path("skins/default/"), "$INSTDIR\\skins\\default");
        assert_eq!(install_path("a.txt"), "$INSTDIR\\a.txt");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(
            escape_quotes("--channel \"Beta Viewer\""),
            "--channel $\\\"Beta Viewer$\\\""
        );
    }

    #[tokio::test]
    async fn test_write_utf8_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.nsi");
        write_utf8_bom(&path, "Name \"x\"\n").await.unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&bytes[3..], b"Name \"x\"\n");
    }
}
