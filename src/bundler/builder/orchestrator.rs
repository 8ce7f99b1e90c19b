//! Main bundler orchestration and coordination.
//!
//! A run constructs the manifest for the configured layout, applies the
//! post-copy fixups and, when packaging was requested, hands the staged tree
//! to the installer generator of the layout.

use crate::{
    bail,
    bundler::{
        BundledArtifact, PackageType, Result, Settings,
        error::{Error, ErrorExt},
        manifest::{Manifest, ManifestBuilder, RecordMode},
        platform,
        utils::fs,
    },
};

use super::{
    checksum::calculate_sha256,
    tool_detection::{HAS_HDIUTIL, HAS_MAKENSIS},
};

/// Main bundler orchestrator.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_manifest::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_manifest::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .source_root("indra/newview")
///     .dest_root("build/packaged")
///     .version("2.1.0.13828")
///     .build()?;
///
/// let bundler = Bundler::new(settings);
/// let outcome = bundler.bundle().await?;
///
/// for artifact in &outcome.artifacts {
///     println!("Created: {} ({} bytes)", artifact.package_type, artifact.size);
///     println!("SHA256: {}", artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bundler {
    settings: Settings,
}

/// Result of a full run: the frozen manifest and any packaged artifacts.
#[derive(Debug, Clone)]
pub struct BundleOutcome {
    /// Mapping list of the run.
    pub manifest: Manifest,
    /// Installers produced; empty unless packaging was requested.
    pub artifacts: Vec<BundledArtifact>,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the layout against a fresh manifest builder.
    ///
    /// Construction is sequential file work and runs on the blocking pool.
    pub async fn construct(&self, mode: RecordMode) -> Result<Manifest> {
        let settings = self.settings.clone();
        tokio::task::spawn_blocking(move || {
            let mut m = ManifestBuilder::new(settings.source_root(), settings.dest_root(), mode);
            settings.layout().construct(&mut m, &settings)?;
            m.finish()
        })
        .await
        .map_err(|e| Error::GenericError(format!("Manifest construction task panicked: {}", e)))?
    }

    /// Marks the layout's staged scripts executable.
    pub fn apply_fixups(&self) -> Result<()> {
        for script in self.settings.layout().executable_scripts() {
            let path = self.settings.dest_root().join(script);
            log::debug!("Marking {} executable", path.display());
            fs::make_executable(&path)?;
        }
        Ok(())
    }

    /// Copies the package tree and, when requested, builds the installer.
    pub async fn bundle(&self) -> Result<BundleOutcome> {
        let manifest = self.construct(RecordMode::Copy).await?;
        self.apply_fixups()?;

        let artifacts = if self.settings.build().is_packaging() {
            vec![self.package(&manifest).await?]
        } else {
            log::info!("Packaging not requested, leaving staged tree in place");
            Vec::new()
        };

        Ok(BundleOutcome {
            manifest,
            artifacts,
        })
    }

    /// Builds the installer of the configured layout from a staged manifest.
    pub async fn package(&self, manifest: &Manifest) -> Result<BundledArtifact> {
        let package_type = self.settings.layout().package_type();
        self.preflight(package_type)?;

        let paths = match package_type {
            PackageType::Nsis => {
                platform::windows::nsis::bundle_project(&self.settings, manifest).await?
            }
            PackageType::Dmg => platform::macos::dmg::bundle_project(&self.settings).await?,
            PackageType::Tarball => {
                platform::linux::tarball::bundle_project(&self.settings).await?
            }
        };

        // Calculate artifact metadata
        let mut size = 0u64;
        for p in &paths {
            let metadata = tokio::fs::metadata(p)
                .await
                .fs_context("reading artifact metadata", p)?;
            size += metadata.len();
        }

        let checksum = if let Some(first_path) = paths.first() {
            calculate_sha256(first_path).await?
        } else {
            bail!(
                "Installer generator for {:?} returned no paths - this indicates a bundler bug",
                package_type
            );
        };

        Ok(BundledArtifact {
            package_type,
            paths,
            size,
            checksum,
        })
    }

    /// Fails early when a required external tool is missing.
    fn preflight(&self, package_type: PackageType) -> Result<()> {
        match package_type {
            PackageType::Nsis => {
                if self.settings.nsis().makensis.is_none() && !*HAS_MAKENSIS {
                    log::debug!("makensis not in PATH, checking program directories");
                }
            }
            PackageType::Dmg => {
                if !*HAS_HDIUTIL {
                    bail!("hdiutil not found; disk images can only be created on macOS");
                }
            }
            PackageType::Tarball => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        Action, Layout, SettingsBuilder,
        layout::fixtures::{PACKAGED_RESOURCES, X86_64_TREE, touch_all},
    };
    use std::path::Path;

    /// Source tree for a packaged 64-bit Linux run.
    fn linux_tree(root: &Path) {
        touch_all(root, X86_64_TREE);
        touch_all(root, PACKAGED_RESOURCES);
    }

    #[tokio::test]
    async fn test_declare_only_writes_nothing() {
        let tree = tempfile::tempdir().unwrap();
        let stage = tempfile::tempdir().unwrap();
        linux_tree(tree.path());
        let dest = stage.path().join("packaged");

        let settings = SettingsBuilder::new()
            .source_root(tree.path().join("indra/newview"))
            .dest_root(&dest)
            .layout(Layout::LinuxX86_64)
            .version("2.1.0.13828")
            .build()
            .unwrap();
        let manifest = Bundler::new(settings)
            .construct(RecordMode::DeclareOnly)
            .await
            .unwrap();

        assert!(!manifest.mappings().is_empty());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_copy_and_package_tarball() {
        let tree = tempfile::tempdir().unwrap();
        let stage = tempfile::tempdir().unwrap();
        linux_tree(tree.path());

        let settings = SettingsBuilder::new()
            .source_root(tree.path().join("indra/newview"))
            .dest_root(stage.path().join("packaged"))
            .artifact_dir(stage.path())
            .layout(Layout::LinuxX86_64)
            .version("2.1.0.13828")
            .actions(vec![Action::Copy, Action::Package])
            .build()
            .unwrap();
        let outcome = Bundler::new(settings).bundle().await.unwrap();

        assert_eq!(outcome.artifacts.len(), 1);
        let artifact = &outcome.artifacts[0];
        assert_eq!(artifact.package_type, PackageType::Tarball);
        assert_eq!(
            artifact.paths,
            vec![stage.path().join("SecondLife-2.1.0.13828-Linux64.tar.gz")]
        );
        assert_eq!(artifact.checksum.len(), 64);
        assert!(artifact.size > 0);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(stage.path().join("packaged/bin/update_install"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[tokio::test]
    async fn test_missing_required_file_aborts_run() {
        let tree = tempfile::tempdir().unwrap();
        let stage = tempfile::tempdir().unwrap();
        linux_tree(tree.path());
        std::fs::remove_file(tree.path().join("indra/newview/gpu_table.txt")).unwrap();

        let settings = SettingsBuilder::new()
            .source_root(tree.path().join("indra/newview"))
            .dest_root(stage.path().join("packaged"))
            .layout(Layout::LinuxX86_64)
            .version("2.1.0.13828")
            .actions(vec![Action::Copy, Action::Package])
            .build()
            .unwrap();
        let result = Bundler::new(settings).bundle().await;

        match result {
            Err(Error::MissingRequired { pattern, .. }) => assert_eq!(pattern, "gpu_table.txt"),
            other => panic!("expected missing gpu_table.txt, got {other:?}"),
        }
    }
}
