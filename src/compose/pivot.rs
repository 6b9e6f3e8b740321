use std::collections::BTreeSet;

use crate::data::record::{Record, format_ordinal};
use crate::foundation::error::{ReportError, ReportResult};

/// Time x group sums for one entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PivotTable {
    /// Distinct times, ascending.
    pub times: Vec<f64>,
    /// Distinct group labels, sorted.
    pub groups: Vec<String>,
    /// `cells[row][col]`: sum of values at `times[row]` for `groups[col]`; zero when absent.
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Aggregate records into a time x group sum table.
    ///
    /// Records without a time or value do not contribute. Fails on non-finite input values
    /// or sums, and when nothing is left to tabulate.
    pub fn build(records: &[Record]) -> ReportResult<Self> {
        let mut contributing = Vec::with_capacity(records.len());
        for r in records {
            let (Some(t), Some(v)) = (r.time, r.value) else {
                continue;
            };
            if !t.is_finite() {
                return Err(ReportError::aggregation(format!("non-finite time {t}")));
            }
            if !v.is_finite() {
                return Err(ReportError::aggregation(format!(
                    "non-finite value {v} at time {}",
                    format_ordinal(t)
                )));
            }
            contributing.push((t, r.group.as_str(), v));
        }
        if contributing.is_empty() {
            return Err(ReportError::aggregation("no numeric values to tabulate"));
        }

        let mut times = contributing.iter().map(|(t, _, _)| *t).collect::<Vec<_>>();
        times.sort_by(f64::total_cmp);
        times.dedup();
        let groups = contributing
            .iter()
            .map(|(_, g, _)| *g)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut cells = vec![vec![0.0_f64; groups.len()]; times.len()];
        for (t, g, v) in contributing {
            let row = times.partition_point(|x| *x < t);
            let col = groups.partition_point(|x| x.as_str() < g);
            cells[row][col] += v;
        }
        if let Some((row, _)) = cells
            .iter()
            .enumerate()
            .find(|(_, r)| r.iter().any(|c| !c.is_finite()))
        {
            return Err(ReportError::aggregation(format!(
                "sum overflowed at time {}",
                format_ordinal(times[row])
            )));
        }

        Ok(Self {
            times,
            groups,
            cells,
        })
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.times.len()
    }

    /// Number of data columns (groups).
    pub fn col_count(&self) -> usize {
        self.groups.len()
    }

    /// Row header text.
    pub fn row_labels(&self) -> Vec<String> {
        self.times.iter().copied().map(format_ordinal).collect()
    }

    /// Cell text, formatted with [`format_cell`].
    pub fn cell_text(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().copied().map(format_cell).collect())
            .collect()
    }
}

/// Format one table value.
///
/// Whole numbers print as grouped integers, other values above 1000 in magnitude are
/// rounded (ties to even) to grouped integers, the rest get two decimals.
pub fn format_cell(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v.fract() == 0.0 {
        group_thousands(&format!("{v:.0}"))
    } else if v.abs() > 1000.0 {
        group_thousands(&format!("{:.0}", v.round_ties_even()))
    } else {
        format!("{v:.2}")
    }
}

/// Insert `,` between every group of three digits of a formatted integer.
///
/// A leading `-` is kept, except on zero.
pub fn group_thousands(integer: &str) -> String {
    let (negative, digits) = match integer.strip_prefix('-') {
        Some(rest) => (rest.bytes().any(|b| b != b'0'), rest),
        None => (false, integer),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Table font size in points, stepped down as columns are added.
pub fn font_tier_pt(columns: usize) -> f64 {
    if columns < 4 {
        12.0
    } else if columns < 6 {
        10.0
    } else {
        8.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pivot.rs"]
mod tests;
