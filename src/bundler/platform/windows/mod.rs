//! Windows installer generation.

pub mod nsis;
