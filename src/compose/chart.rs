use indexmap::IndexMap;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::compose::{axis, draw_failed, plain_text, pt_to_px, rgb};
use crate::data::record::{Record, format_ordinal};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReportError, ReportResult};
use crate::style::config::StyleConfig;
use crate::style::palette::cycle_color;

const TITLE_COLOR: Rgb8 = Rgb8::new(0x33, 0x33, 0x33);
const TEXT_COLOR: Rgb8 = Rgb8::new(0x33, 0x33, 0x33);
const AXIS_COLOR: Rgb8 = Rgb8::new(0x66, 0x66, 0x66);
const GRID_COLOR: Rgb8 = Rgb8::new(0x80, 0x80, 0x80);
const GRID_OPACITY: f64 = 0.4;
const MARKER_RADIUS_PX: i32 = 3;
const LEGEND_SWATCH_PX: i32 = 18;
const Y_TARGET_TICKS: usize = 5;

/// One line of the chart: a group and its points in time order.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Group label.
    pub group: String,
    /// `(time, value)` pairs, strictly increasing in time.
    pub points: Vec<(f64, f64)>,
}

/// Split records into one series per group, in first-occurrence order.
///
/// Records missing a time or a value, or carrying non-finite numbers, are skipped. Points
/// sharing a time within a group are averaged.
pub fn collect_series(records: &[Record]) -> Vec<Series> {
    let mut by_group: IndexMap<&str, Vec<(f64, f64)>> = IndexMap::new();
    for r in records {
        let (Some(t), Some(v)) = (r.time, r.value) else {
            continue;
        };
        if !t.is_finite() || !v.is_finite() {
            continue;
        }
        by_group.entry(r.group.as_str()).or_default().push((t, v));
    }

    by_group
        .into_iter()
        .map(|(group, mut raw)| {
            raw.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut points: Vec<(f64, f64)> = Vec::with_capacity(raw.len());
            let mut i = 0;
            while i < raw.len() {
                let t = raw[i].0;
                let mut mean = 0.0;
                let mut n = 0.0;
                while i < raw.len() && raw[i].0 == t {
                    n += 1.0;
                    mean += (raw[i].1 - mean) / n;
                    i += 1;
                }
                points.push((t, mean));
            }
            Series {
                group: group.to_string(),
                points,
            }
        })
        .collect()
}

/// Draw the trend chart for one entity onto `area`.
///
/// Fails when no record carries both a time and a value.
pub fn draw_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    records: &[Record],
    style: &StyleConfig,
) -> ReportResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let series = collect_series(records);
    if series.is_empty() {
        return Err(ReportError::render(format!(
            "'{title}' has no plottable points"
        )));
    }

    let times = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .collect::<Vec<_>>();
    let values = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .collect::<Vec<_>>();
    let x_range = axis::x_range(&times, style.show_legend())
        .ok_or_else(|| ReportError::render("empty time axis"))?;
    let y_range =
        axis::y_range(&values).ok_or_else(|| ReportError::render("empty value axis"))?;
    let x_ticks = axis::x_ticks(&times);

    let family = style.font_family_css();
    let family = family.as_str();
    let font = |pt: f64, weight: FontStyle, color: Rgb8| {
        FontDesc::new(FontFamily::Name(family), pt_to_px(pt), weight).color(&rgb(color))
    };

    let mut chart = ChartBuilder::on(area)
        .caption(plain_text(title), font(14.0, FontStyle::Bold, TITLE_COLOR))
        .margin_top(6)
        .margin_right(15)
        .margin_left(8)
        .x_label_area_size(45)
        .y_label_area_size(62)
        .build_cartesian_2d(
            x_range.as_range().with_key_points(x_ticks),
            y_range.as_range(),
        )
        .map_err(draw_failed)?;

    let labels = style.labels();
    chart
        .configure_mesh()
        .y_labels(Y_TARGET_TICKS)
        .x_label_formatter(&|t| format_ordinal(*t))
        .label_style(font(8.0, FontStyle::Normal, TEXT_COLOR))
        .x_desc(plain_text(&labels.x_axis))
        .y_desc(plain_text(&labels.y_axis))
        .axis_desc_style(font(10.0, FontStyle::Normal, TEXT_COLOR))
        .bold_line_style(&rgb(GRID_COLOR).mix(GRID_OPACITY))
        .light_line_style(&TRANSPARENT)
        .axis_style(&rgb(AXIS_COLOR))
        .draw()
        .map_err(draw_failed)?;

    if style.show_legend() {
        // Label-only entry that heads the legend.
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
            .map_err(draw_failed)?
            .label(plain_text(&labels.legend_title));
    }

    let stroke = pt_to_px(f64::from(style.line_width())).round().max(1.0) as u32;
    for (idx, s) in series.iter().enumerate() {
        let color = rgb(cycle_color(style.colors(), idx));
        if s.points.len() > 1 {
            chart
                .draw_series(LineSeries::new(
                    s.points.iter().copied(),
                    color.stroke_width(stroke),
                ))
                .map_err(draw_failed)?;
        }
        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|&p| Circle::new(p, MARKER_RADIUS_PX, color.filled())),
            )
            .map_err(draw_failed)?
            .label(plain_text(&s.group))
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + LEGEND_SWATCH_PX, y)],
                    color.stroke_width(stroke),
                )
            });
    }

    if style.show_legend() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::MiddleRight)
            .border_style(&TRANSPARENT)
            .background_style(&WHITE.mix(0.8))
            .label_font(font(7.0, FontStyle::Normal, TEXT_COLOR))
            .draw()
            .map_err(draw_failed)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/chart.rs"]
mod tests;
