//! trendgrid renders one trend chart with a time x group sum table per entity, and tiles
//! those images into a paginated A4 PDF.
//!
//! The usual flow:
//!
//! - Load a [`Dataset`] with [`load_dataset`]
//! - Build a [`StyleConfig`] (or let a [`ReportConfig`] do it)
//! - Run [`generate_report`] (or a [`ReportJob`]) and write [`ReportOutput::bytes`]
#![forbid(unsafe_code)]

/// JSON report configuration.
pub mod config;
/// Per-entity chart and table composition.
pub mod compose;
/// Input loading and record filtering.
pub mod data;
/// Errors, colors and geometry primitives.
pub mod foundation;
/// Page geometry and tile placement.
pub mod layout;
/// PDF output.
pub mod pdf;
/// Report and preview entry points.
pub mod report;
/// Palettes, style settings and fonts.
pub mod style;

pub use crate::config::ReportConfig;
pub use crate::compose::{ComposedTile, RasterContext, TableOutcome, compose_entity};
pub use crate::data::filter::ExclusionPattern;
pub use crate::data::load::{load_dataset, sheet_names};
pub use crate::data::record::{ColumnRoles, Dataset, Record, RoleHints};
pub use crate::foundation::core::{Point, Rect, Rgb8, Size};
pub use crate::foundation::error::{ReportError, ReportResult};
pub use crate::layout::grid::{LayoutCursor, PageGeometry, Placement};
pub use crate::report::{
    FnProgress, LogProgress, NoProgress, ProgressSink, RecordingProgress, ReportJob, ReportOutput,
    ReportSummary, TileRecord, generate_report, preview_tiles,
};
pub use crate::style::config::{ChartLabels, StyleConfig};
pub use crate::style::font::{FontResolver, FontSource, ResolvedFont};
pub use crate::style::palette::Palette;
