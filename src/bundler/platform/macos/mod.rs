//! macOS disk image generation.

pub mod dmg;
