//! Rendering style: palettes, the immutable per-run configuration, font resolution.

pub mod config;
pub mod font;
pub mod palette;
