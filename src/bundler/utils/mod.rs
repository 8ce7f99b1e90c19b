//! Shared helpers for staging and artifact output.

pub mod fs;
