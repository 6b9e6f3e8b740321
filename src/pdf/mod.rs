//! Minimal PDF output: a title line on the first page and raster tiles placed in mm.

pub mod metrics;
pub mod writer;

pub use writer::{MM_TO_PT, ReportPdf};
