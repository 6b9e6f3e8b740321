//! Batch entry points: the paginated report and the tile preview.

pub mod paginator;
pub mod preview;
pub mod progress;

pub use paginator::{
    REPORT_TITLE, ReportJob, ReportOutput, ReportSummary, TileRecord, generate_report,
};
pub use preview::preview_tiles;
pub use progress::{FnProgress, LogProgress, NoProgress, ProgressSink, RecordingProgress};

#[cfg(test)]
#[path = "../../tests/unit/report/mod.rs"]
mod tests;
