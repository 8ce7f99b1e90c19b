//! Linux tarball generation.

pub mod tarball;
