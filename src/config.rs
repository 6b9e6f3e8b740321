use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::filter::ExclusionPattern;
use crate::data::record::RoleHints;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReportError, ReportResult};
use crate::report::ReportJob;
use crate::style::config::{ChartLabels, StyleConfig};
use crate::style::font::{FontResolver, FontSource};
use crate::style::palette::Palette;

/// JSON-facing report settings. Every field is optional; unset fields keep the defaults.
///
/// ```json
/// { "per_row": 3, "palette": "tab10", "columns": { "value": "Area" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Workbook sheet to read.
    pub sheet: Option<String>,
    /// Column header per role.
    pub columns: RoleHints,
    /// Tiles per row.
    pub per_row: Option<usize>,
    /// Named palette; ignored when `colors` is set.
    pub palette: Option<Palette>,
    /// Explicit `#RRGGBB` series colors.
    pub colors: Option<Vec<Rgb8>>,
    /// Line width in points.
    pub line_width: Option<f32>,
    /// Legend visibility.
    pub show_legend: Option<bool>,
    /// Font file to use.
    pub font: Option<PathBuf>,
    /// Directories searched for the default CJK font names.
    pub font_dirs: Vec<PathBuf>,
    /// Axis and legend captions.
    pub labels: Option<ChartLabels>,
    /// Entity substrings to leave out.
    pub exclude: Option<ExclusionPattern>,
    /// First-page heading.
    pub title: Option<String>,
}

impl ReportConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReportResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReportError::input(format!("parse report config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReportError::input(format!("open report config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Overlay `other` on `self`; anything set in `other` wins.
    pub fn merged(self, other: ReportConfig) -> ReportConfig {
        let mut font_dirs = other.font_dirs;
        font_dirs.extend(self.font_dirs);
        ReportConfig {
            sheet: other.sheet.or(self.sheet),
            columns: self.columns.merged(other.columns),
            per_row: other.per_row.or(self.per_row),
            palette: other.palette.or(self.palette),
            colors: other.colors.or(self.colors),
            line_width: other.line_width.or(self.line_width),
            show_legend: other.show_legend.or(self.show_legend),
            font: other.font.or(self.font),
            font_dirs,
            labels: other.labels.or(self.labels),
            exclude: other.exclude.or(self.exclude),
            title: other.title.or(self.title),
        }
    }

    /// Font lookup order: the explicit file, then each search directory, then the working
    /// directory.
    pub fn font_resolver(&self) -> FontResolver {
        let mut resolver = FontResolver::new();
        if let Some(path) = &self.font {
            resolver = resolver.push(FontSource::File(path.clone()));
        }
        for dir in &self.font_dirs {
            resolver = resolver.with_default_search(dir.clone());
        }
        resolver.with_default_search(".")
    }

    /// Resolve the font and build the validated style.
    pub fn style(&self) -> ReportResult<StyleConfig> {
        let mut builder = StyleConfig::builder().font(self.font_resolver().resolve());
        if let Some(colors) = &self.colors {
            builder = builder.colors(colors.clone());
        } else if let Some(palette) = self.palette {
            builder = builder.palette(palette);
        }
        if let Some(width) = self.line_width {
            builder = builder.line_width(width);
        }
        if let Some(show) = self.show_legend {
            builder = builder.show_legend(show);
        }
        if let Some(labels) = &self.labels {
            builder = builder.labels(labels.clone());
        }
        builder.build()
    }

    /// Paginator parameters.
    pub fn job(&self) -> ReportJob {
        let mut job = ReportJob::default();
        if let Some(n) = self.per_row {
            job.per_row = n;
        }
        if let Some(exclude) = &self.exclude {
            job.exclusion = exclude.clone();
        }
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        job
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
