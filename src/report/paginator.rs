use anyhow::Context;
use kurbo::Rect;
use serde::Serialize;

use crate::compose::raster::DEFAULT_RELEASE_INTERVAL;
use crate::compose::{RasterContext, TableOutcome, compose_entity};
use crate::data::filter::{ExclusionPattern, filter_records, group_by_entity};
use crate::data::record::Dataset;
use crate::foundation::error::{ReportError, ReportResult};
use crate::layout::grid::{LayoutCursor, PageGeometry, check_per_row};
use crate::pdf::ReportPdf;
use crate::pdf::metrics::encode_winansi;
use crate::report::progress::ProgressSink;
use crate::style::config::StyleConfig;

/// Heading on the first page.
pub const REPORT_TITLE: &str = "Trend Analysis Report";

/// Where one entity's tile ended up.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileRecord {
    /// Entity identifier.
    pub entity: String,
    /// Zero-based page index.
    pub page: usize,
    /// Tile rectangle in mm, top-left origin.
    pub rect: Rect,
    /// Table panel outcome.
    pub table: TableOutcome,
}

/// What a report run produced, besides the document itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Pages in the document.
    pub pages: usize,
    /// Placed tiles in placement order.
    pub tiles: Vec<TileRecord>,
}

impl ReportSummary {
    /// Tiles whose table degraded to the placeholder.
    pub fn degraded(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.iter().filter(|t| t.table.is_degraded())
    }
}

/// Finished report.
#[derive(Clone, Debug)]
pub struct ReportOutput {
    /// Encoded PDF.
    pub bytes: Vec<u8>,
    /// Placement and table outcomes.
    pub summary: ReportSummary,
}

/// Parameters of a report run beyond the dataset and style.
#[derive(Clone, Debug)]
pub struct ReportJob {
    /// Tiles per row, `1..=4`.
    pub per_row: usize,
    /// Entities to leave out.
    pub exclusion: ExclusionPattern,
    /// Page measurements.
    pub geometry: PageGeometry,
    /// Entities composed between raster buffer releases.
    pub release_interval: usize,
    /// First-page heading.
    pub title: String,
}

impl Default for ReportJob {
    fn default() -> Self {
        Self {
            per_row: 2,
            exclusion: ExclusionPattern::default(),
            geometry: PageGeometry::A4,
            release_interval: DEFAULT_RELEASE_INTERVAL,
            title: REPORT_TITLE.to_string(),
        }
    }
}

impl ReportJob {
    /// Job with the given per-row count and defaults elsewhere.
    pub fn new(per_row: usize) -> Self {
        Self {
            per_row,
            ..Self::default()
        }
    }

    /// Render every entity of `dataset` and lay the tiles out into a PDF.
    ///
    /// Any chart, raster or IO failure aborts the run; table failures are recorded in the
    /// summary and the run continues. A title the WinAnsi title font cannot show is an
    /// input error.
    #[tracing::instrument(skip_all, fields(per_row = self.per_row, records = dataset.len()))]
    pub fn run(
        &self,
        dataset: &Dataset,
        style: &StyleConfig,
        progress: &mut dyn ProgressSink,
    ) -> ReportResult<ReportOutput> {
        check_per_row(self.per_row)?;
        encode_winansi(&self.title).map_err(|c| {
            ReportError::input(format!(
                "title character {c:?} cannot be set in the PDF title font (WinAnsi only)"
            ))
        })?;
        let mut cursor = LayoutCursor::new(self.geometry, self.per_row)?;

        let filtered = filter_records(dataset, &self.exclusion);
        let entities = group_by_entity(&filtered);
        let total = entities.len();
        tracing::info!(
            entities = total,
            excluded_records = dataset.len() - filtered.len(),
            "entities selected"
        );

        let scratch = tempfile::Builder::new()
            .prefix("trendgrid-")
            .tempdir()
            .context("create scratch directory")
            .map_err(|e| ReportError::resource(format!("{e:#}")))?;

        let mut raster = RasterContext::new(style).with_release_interval(self.release_interval);
        let mut pdf = ReportPdf::new(self.geometry, self.title.clone());
        let mut tiles = Vec::with_capacity(total);

        progress.begin(total);
        for (idx, (entity, records)) in entities.iter().enumerate() {
            if records.is_empty() {
                tracing::debug!(entity = %entity, "no records, skipped");
                progress.advance(idx + 1, total);
                continue;
            }

            let path = scratch.path().join(format!("tile_{idx:05}.png"));
            let tile = compose_entity(records, entity, style, &mut raster, &path)?;
            let placement = cursor.place();
            pdf.add_png(placement.page, placement.rect, &tile.path)?;
            std::fs::remove_file(&tile.path)
                .with_context(|| format!("remove scratch tile '{}'", tile.path.display()))
                .map_err(|e| ReportError::resource(format!("{e:#}")))?;
            raster.tick();

            tracing::debug!(
                entity = %entity,
                page = placement.page,
                x = placement.rect.x0,
                y = placement.rect.y0,
                "tile placed"
            );
            tiles.push(TileRecord {
                entity: tile.entity,
                page: placement.page,
                rect: placement.rect,
                table: tile.table,
            });
            progress.advance(idx + 1, total);
        }
        progress.end();

        let summary = ReportSummary {
            pages: pdf.page_count(),
            tiles,
        };
        let bytes = pdf.finish();
        tracing::info!(
            pages = summary.pages,
            tiles = summary.tiles.len(),
            degraded = summary.degraded().count(),
            bytes = bytes.len(),
            "report assembled"
        );
        Ok(ReportOutput { bytes, summary })
    }
}

/// Render a report with default page geometry and title.
pub fn generate_report(
    dataset: &Dataset,
    per_row: usize,
    style: &StyleConfig,
    exclusion: &ExclusionPattern,
    progress: &mut dyn ProgressSink,
) -> ReportResult<ReportOutput> {
    ReportJob {
        per_row,
        exclusion: exclusion.clone(),
        ..ReportJob::default()
    }
    .run(dataset, style, progress)
}
