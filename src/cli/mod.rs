//! Command line interface for the manifest bundler.
//!
//! Parses arguments, builds [`Settings`](crate::bundler::Settings) and
//! drives one [`Bundler`] run with colored progress output.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{Bundler, RecordMode, Settings},
    error::{CliError, Result},
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    let settings = args.settings_builder()?.build()?;
    execute(&args, &config, settings).await
}

/// Runs the requested actions for already-built settings.
pub async fn execute(args: &Args, config: &RuntimeConfig, settings: Settings) -> Result<i32> {
    config.section(&format!(
        "{} {} ({})",
        settings.product_name(),
        settings.package().version_dots(),
        settings.layout()
    ))?;
    config.verbose_println(&format!("Source: {}", settings.source_root().display()))?;
    config.verbose_println(&format!("Staging: {}", settings.dest_root().display()))?;

    let bundler = Bundler::new(settings);

    if args.declare_only() {
        config.progress("Resolving manifest without copying...")?;
        let manifest = bundler.construct(RecordMode::DeclareOnly).await?;
        if args.list {
            config.output().data(&manifest.to_json()?)?;
        } else {
            config.success(&format!(
                "{} file(s) would be staged",
                manifest.mappings().len()
            ))?;
        }
        return Ok(0);
    }

    config.progress("Staging files...")?;
    let outcome = bundler.bundle().await?;
    config.success(&format!(
        "Staged {} file(s) into {}",
        outcome.manifest.mappings().len(),
        outcome.manifest.dest_root().display()
    ))?;

    if outcome.artifacts.is_empty() && bundler.settings().build().is_packaging() {
        config.warn("Packaging produced no artifacts")?;
    }
    for artifact in &outcome.artifacts {
        for path in &artifact.paths {
            config.success(&format!("Created {}: {}", artifact.package_type, path.display()))?;
        }
        config.indent(&format!("{} bytes", artifact.size))?;
        config.indent(&format!("SHA256: {}", artifact.checksum))?;
    }

    Ok(0)
}
