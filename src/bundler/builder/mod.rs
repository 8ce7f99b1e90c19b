//! Bundle orchestration and coordination.
//!
//! The [`Bundler`] ties a [`Settings`](crate::bundler::Settings) value to
//! one run:
//!
//! 1. Construct the manifest of the configured layout
//! 2. Mark staged scripts executable
//! 3. Delegate to the installer generator when packaging is requested
//! 4. Calculate checksums and sizes of the produced artifacts
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`tool_detection`] - External tool availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use orchestrator::{BundleOutcome, Bundler};
