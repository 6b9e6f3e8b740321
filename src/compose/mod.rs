//! Per-entity composer: a trend chart stacked over a time x group sum table, drawn with
//! plotters' SVG backend and rasterized to a PNG tile.

pub mod axis;
pub mod chart;
pub mod pivot;
pub mod raster;
pub mod table;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use kurbo::Rect;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::{IntoDrawingArea, RGBColor, SVGBackend, WHITE};

use crate::data::record::Record;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReportError, ReportResult};
use crate::style::config::StyleConfig;

pub use raster::RasterContext;
pub use table::TableOutcome;

/// Tile edge in px (6 in at 100 dpi).
pub const CANVAS_PX: u32 = 600;
/// Chart share of the canvas height; the table takes the rest (3 : 1.6).
pub const CHART_HEIGHT_RATIO: f64 = 3.0 / 4.6;
const TABLE_MARGIN_PX: f64 = 10.0;

/// One composed entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedTile {
    /// Entity display name.
    pub entity: String,
    /// PNG location.
    pub path: PathBuf,
    /// Pixel width.
    pub width_px: u32,
    /// Pixel height.
    pub height_px: u32,
    /// What the table panel shows.
    pub table: TableOutcome,
}

/// Chart and table panels inside the canvas.
pub fn panels() -> (Rect, Rect) {
    let size = f64::from(CANVAS_PX);
    let split = size * CHART_HEIGHT_RATIO;
    let chart = Rect::new(0.0, 0.0, size, split);
    let table = Rect::new(
        TABLE_MARGIN_PX,
        split + TABLE_MARGIN_PX,
        size - TABLE_MARGIN_PX,
        size - TABLE_MARGIN_PX,
    );
    (chart, table)
}

/// Convert typographic points to canvas pixels at the composer's 100 dpi.
pub fn pt_to_px(pt: f64) -> f64 {
    pt * 100.0 / 72.0
}

/// Build the SVG markup for one entity.
///
/// Chart failures propagate; table failures are folded into the returned outcome.
pub fn entity_svg(
    records: &[Record],
    entity: &str,
    style: &StyleConfig,
) -> ReportResult<(String, TableOutcome)> {
    let (chart_panel, _) = panels();
    let mut markup = String::with_capacity(32 * 1024);
    let table = {
        let root =
            SVGBackend::with_string(&mut markup, (CANVAS_PX, CANVAS_PX)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_failed)?;
        let (upper, lower) = root.split_vertically(chart_panel.height().round() as i32);
        chart::draw_chart(&upper, entity, records, style)?;

        let inset = TABLE_MARGIN_PX as i32;
        let table_area = lower.margin(inset, inset, inset, inset);
        let table = table::draw_table(&table_area, entity, records, style)?;
        root.present().map_err(draw_failed)?;
        table
    };
    Ok((markup, table))
}

/// Render one entity's tile and write it to `out_path` as PNG.
#[tracing::instrument(level = "debug", skip(records, style, raster), fields(records = records.len()))]
pub fn compose_entity(
    records: &[Record],
    entity: &str,
    style: &StyleConfig,
    raster: &mut RasterContext,
    out_path: &Path,
) -> ReportResult<ComposedTile> {
    let (markup, table) = entity_svg(records, entity, style)?;
    let img = raster.rasterize(&markup)?;
    raster::write_png(&img, out_path)?;
    tracing::debug!(path = %out_path.display(), degraded = table.is_degraded(), "tile written");
    Ok(ComposedTile {
        entity: entity.to_string(),
        path: out_path.to_path_buf(),
        width_px: img.width(),
        height_px: img.height(),
        table,
    })
}

pub(crate) fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

pub(crate) fn draw_failed<E>(err: DrawingAreaErrorKind<E>) -> ReportError
where
    E: std::error::Error + Send + Sync,
{
    ReportError::render(format!("draw: {err}"))
}

/// Drop control characters, which cannot appear in SVG text.
pub(crate) fn plain_text(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(s.chars().filter(|c| !c.is_control()).collect())
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/mod.rs"]
mod tests;
