use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReportError, ReportResult};
use crate::style::font::ResolvedFont;
use crate::style::palette::Palette;

/// Inclusive bounds accepted for [`StyleConfig::line_width`].
pub const LINE_WIDTH_RANGE: (f32, f32) = (1.0, 4.0);

/// Text drawn around the chart.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartLabels {
    /// X-axis caption.
    pub x_axis: String,
    /// Y-axis caption.
    pub y_axis: String,
    /// Legend heading.
    pub legend_title: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            x_axis: "Day".to_string(),
            y_axis: "Peak area ratio".to_string(),
            legend_title: "Group".to_string(),
        }
    }
}

/// Immutable per-run rendering settings, shared by reference with every composer call.
#[derive(Clone, Debug)]
pub struct StyleConfig {
    colors: Vec<Rgb8>,
    line_width: f32,
    show_legend: bool,
    font: Option<ResolvedFont>,
    labels: ChartLabels,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colors: Palette::default().colors(),
            line_width: 2.0,
            show_legend: true,
            font: None,
            labels: ChartLabels::default(),
        }
    }
}

impl StyleConfig {
    /// Start a builder from the defaults (paired palette, 2.0 line width, legend on).
    pub fn builder() -> StyleConfigBuilder {
        StyleConfigBuilder {
            inner: Self::default(),
        }
    }

    /// Series colors in assignment order.
    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    /// Line stroke width in points.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Whether the chart draws a legend.
    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    /// Font override, if one was resolved.
    pub fn font(&self) -> Option<&ResolvedFont> {
        self.font.as_ref()
    }

    /// Axis and legend captions.
    pub fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    /// CSS `font-family` list for generated SVG.
    pub fn font_family_css(&self) -> String {
        match &self.font {
            Some(f) => format!("'{}', sans-serif", f.family.replace(['\'', '"'], "")),
            None => "sans-serif".to_string(),
        }
    }
}

/// Validating builder for [`StyleConfig`].
#[derive(Clone, Debug)]
pub struct StyleConfigBuilder {
    inner: StyleConfig,
}

impl StyleConfigBuilder {
    /// Use one of the named palettes.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.inner.colors = palette.colors();
        self
    }

    /// Use an explicit color list.
    pub fn colors(mut self, colors: Vec<Rgb8>) -> Self {
        self.inner.colors = colors;
        self
    }

    /// Set the line width; checked in [`Self::build`].
    pub fn line_width(mut self, width: f32) -> Self {
        self.inner.line_width = width;
        self
    }

    /// Toggle the legend.
    pub fn show_legend(mut self, show: bool) -> Self {
        self.inner.show_legend = show;
        self
    }

    /// Attach a resolved font.
    pub fn font(mut self, font: Option<ResolvedFont>) -> Self {
        self.inner.font = font;
        self
    }

    /// Replace the axis and legend captions.
    pub fn labels(mut self, labels: ChartLabels) -> Self {
        self.inner.labels = labels;
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> ReportResult<StyleConfig> {
        let (lo, hi) = LINE_WIDTH_RANGE;
        let w = self.inner.line_width;
        if !w.is_finite() || w < lo || w > hi {
            return Err(ReportError::input(format!(
                "line width {w} outside [{lo}, {hi}]"
            )));
        }
        if self.inner.colors.is_empty() {
            return Err(ReportError::input("color list must be non-empty"));
        }
        Ok(self.inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
