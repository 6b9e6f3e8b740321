use std::ops::Range;

/// Left padding as a fraction of the time span.
pub const X_PAD_LEFT: f64 = 0.05;
/// Right padding when the legend is drawn; leaves room for it inside the plot.
pub const X_PAD_RIGHT_LEGEND: f64 = 0.35;
/// Right padding without a legend.
pub const X_PAD_RIGHT_PLAIN: f64 = 0.05;
/// Vertical headroom above and below the data, as a fraction of the value span.
pub const Y_MARGIN: f64 = 0.05;

/// Closed data interval of one chart axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    /// Data value at the start of the axis.
    pub min: f64,
    /// Data value at the end of the axis.
    pub max: f64,
}

impl AxisRange {
    /// Half-open form handed to the chart coordinate builder.
    pub fn as_range(&self) -> Range<f64> {
        self.min..self.max
    }

    /// Return `true` when `v` lies inside the closed interval.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// X-axis limits for the given times.
///
/// A zero span (all records at one time) is replaced by a unit span.
pub fn x_range(times: &[f64], show_legend: bool) -> Option<AxisRange> {
    let (lo, hi) = min_max(times)?;
    let mut span = hi - lo;
    if span == 0.0 {
        span = 1.0;
    }
    let right = if show_legend {
        X_PAD_RIGHT_LEGEND
    } else {
        X_PAD_RIGHT_PLAIN
    };
    Some(AxisRange {
        min: lo - span * X_PAD_LEFT,
        max: hi + span * right,
    })
}

/// Distinct times, ascending. These are the only x ticks.
pub fn x_ticks(times: &[f64]) -> Vec<f64> {
    let mut out = times
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .collect::<Vec<_>>();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Y-axis limits with headroom; a constant series is widened by `max(5% of |v|, 0.5)`.
pub fn y_range(values: &[f64]) -> Option<AxisRange> {
    let (mut lo, mut hi) = min_max(values)?;
    if hi == lo {
        let half = (lo.abs() * 0.05).max(0.5);
        lo -= half;
        hi += half;
    }
    let pad = (hi - lo) * Y_MARGIN;
    Some(AxisRange {
        min: lo - pad,
        max: hi + pad,
    })
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/axis.rs"]
mod tests;
