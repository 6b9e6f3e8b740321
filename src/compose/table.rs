use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::compose::pivot::{PivotTable, font_tier_pt};
use crate::compose::{draw_failed, plain_text, pt_to_px, rgb};
use crate::data::record::Record;
use crate::foundation::core::Rgb8;
use crate::foundation::error::ReportResult;
use crate::style::config::StyleConfig;

const HEADER_FILL: Rgb8 = Rgb8::new(0xF4, 0xF6, 0xF7);
const BORDER: Rgb8 = Rgb8::new(0xDD, 0xDD, 0xDD);
const TEXT_COLOR: Rgb8 = Rgb8::new(0x33, 0x33, 0x33);
const PLACEHOLDER_COLOR: Rgb8 = Rgb8::new(0xC0, 0x39, 0x2B);

/// Text drawn in place of a table that failed to aggregate.
pub const PLACEHOLDER: &str = "Table Error";

/// Default row height as a multiple of the font size in px.
const DEFAULT_ROW_FACTOR: f64 = 1.6;
/// Vertical stretch applied on top of the default row height.
const ROW_SCALE: f64 = 1.5;

/// What the bottom panel ended up showing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    /// The pivot table was drawn.
    Rendered(PivotTable),
    /// Aggregation failed; the placeholder was drawn instead.
    Degraded {
        /// Display text of the aggregation error.
        reason: String,
    },
}

impl TableOutcome {
    /// Return `true` for [`TableOutcome::Degraded`].
    pub fn is_degraded(&self) -> bool {
        matches!(self, TableOutcome::Degraded { .. })
    }

    /// Formatted cell text, or `None` when degraded.
    pub fn cell_text(&self) -> Option<Vec<Vec<String>>> {
        match self {
            TableOutcome::Rendered(p) => Some(p.cell_text()),
            TableOutcome::Degraded { .. } => None,
        }
    }
}

/// Aggregate `records` and draw the table onto `area`.
///
/// Aggregation failures never propagate: they are logged and drawn as [`PLACEHOLDER`].
/// Only drawing-backend failures are returned as errors.
pub fn draw_table<DB>(
    area: &DrawingArea<DB, Shift>,
    entity: &str,
    records: &[Record],
    style: &StyleConfig,
) -> ReportResult<TableOutcome>
where
    DB: DrawingBackend,
{
    let family = style.font_family_css();
    match PivotTable::build(records) {
        Ok(pivot) => {
            draw_pivot(area, &pivot, &family)?;
            Ok(TableOutcome::Rendered(pivot))
        }
        Err(err) => {
            tracing::warn!(entity, error = %err, "table degraded to placeholder");
            let (w, h) = area.dim_in_pixel();
            let text = FontDesc::new(FontFamily::Name(&family), pt_to_px(12.0), FontStyle::Normal)
                .color(&rgb(PLACEHOLDER_COLOR))
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(PLACEHOLDER, ((w / 2) as i32, (h / 2) as i32), text))
                .map_err(draw_failed)?;
            Ok(TableOutcome::Degraded {
                reason: err.to_string(),
            })
        }
    }
}

/// Row height and font size (both px) for a table of `rows` lines, header included.
pub fn fit_rows(font_px: f64, rows: usize, available_px: f64) -> (f64, f64) {
    let wanted = font_px * DEFAULT_ROW_FACTOR * ROW_SCALE;
    let row_h = wanted.min(available_px / rows.max(1) as f64);
    (row_h, font_px.min(row_h / 1.25))
}

fn draw_pivot<DB>(
    area: &DrawingArea<DB, Shift>,
    pivot: &PivotTable,
    family: &str,
) -> ReportResult<()>
where
    DB: DrawingBackend,
{
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (f64::from(w), f64::from(h));
    let columns = pivot.col_count() + 1;
    let rows = pivot.row_count() + 1;
    let col_w = w / columns as f64;
    let tier_px = pt_to_px(font_tier_pt(pivot.col_count()));
    let (row_h, mut font_px) = fit_rows(tier_px, rows, h);

    let row_labels = pivot.row_labels();
    let cells = pivot.cell_text();
    let font = |px: f64| {
        FontDesc::new(FontFamily::Name(family), px, FontStyle::Normal)
            .color(&rgb(TEXT_COLOR))
            .pos(Pos::new(HPos::Center, VPos::Center))
    };

    let mut widest = 0_u32;
    for s in pivot.groups.iter().chain(&row_labels).chain(cells.iter().flatten()) {
        let (tw, _) = area
            .estimate_text_size(&plain_text(s), &font(font_px))
            .map_err(draw_failed)?;
        widest = widest.max(tw);
    }
    let room = col_w - 4.0;
    let widest = f64::from(widest);
    if widest > room && widest > 0.0 {
        font_px *= (room / widest).max(0.3);
    }

    let text = font(font_px);
    let top = (h - row_h * rows as f64) * 0.5;
    let cell = |col: usize, row: usize| {
        let x0 = col_w * col as f64;
        let y0 = top + row_h * row as f64;
        let corners = [
            (x0.round() as i32, y0.round() as i32),
            ((x0 + col_w).round() as i32, (y0 + row_h).round() as i32),
        ];
        let center = ((x0 + col_w * 0.5).round() as i32, (y0 + row_h * 0.5).round() as i32);
        (corners, center)
    };
    let put = |col: usize, row: usize, label: &str, fill: bool| -> ReportResult<()> {
        let (corners, center) = cell(col, row);
        if fill {
            area.draw(&Rectangle::new(corners, rgb(HEADER_FILL).filled()))
                .map_err(draw_failed)?;
        }
        area.draw(&Rectangle::new(corners, rgb(BORDER).stroke_width(1)))
            .map_err(draw_failed)?;
        area.draw(&Text::new(plain_text(label).into_owned(), center, text.clone()))
            .map_err(draw_failed)?;
        Ok(())
    };

    for (c, group) in pivot.groups.iter().enumerate() {
        put(c + 1, 0, group.as_str(), true)?;
    }
    for (r, (label, row)) in row_labels.iter().zip(&cells).enumerate() {
        put(0, r + 1, label.as_str(), false)?;
        for (c, value) in row.iter().enumerate() {
            put(c + 1, r + 1, value.as_str(), false)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/table.rs"]
mod tests;
