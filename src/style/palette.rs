use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{ReportError, ReportResult};

/// Fixed set of named line palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    /// Muted business blues.
    ProfessionalBlue,
    /// Greens.
    NatureGreen,
    /// Oranges.
    VibrantOrange,
    /// Desaturated mixed hues.
    Morandi,
    /// Soft qualitative (ColorBrewer Set2).
    Set2,
    /// High-contrast pairs (ColorBrewer Paired).
    #[default]
    Paired,
    /// Saturated qualitative.
    Bright,
    /// Ten-step diverging spectrum.
    Spectral,
    /// Deep qualitative.
    Deep,
    /// Classic ten-color cycle.
    Tab10,
}

impl Palette {
    /// Every palette, in menu order.
    pub const ALL: [Palette; 10] = [
        Palette::ProfessionalBlue,
        Palette::NatureGreen,
        Palette::VibrantOrange,
        Palette::Morandi,
        Palette::Set2,
        Palette::Paired,
        Palette::Bright,
        Palette::Spectral,
        Palette::Deep,
        Palette::Tab10,
    ];

    /// Kebab-case identifier accepted by [`FromStr`] and the config file.
    pub fn name(self) -> &'static str {
        match self {
            Palette::ProfessionalBlue => "professional-blue",
            Palette::NatureGreen => "nature-green",
            Palette::VibrantOrange => "vibrant-orange",
            Palette::Morandi => "morandi",
            Palette::Set2 => "set2",
            Palette::Paired => "paired",
            Palette::Bright => "bright",
            Palette::Spectral => "spectral",
            Palette::Deep => "deep",
            Palette::Tab10 => "tab10",
        }
    }

    fn hex(self) -> &'static [&'static str] {
        match self {
            Palette::ProfessionalBlue => &["#2C3E50", "#34495E", "#4A6FA5", "#6D8EAD", "#94B0C7"],
            Palette::NatureGreen => &["#27AE60", "#2ECC71", "#58D68D", "#82E0AA", "#ABEBC6"],
            Palette::VibrantOrange => &["#D35400", "#E67E22", "#F39C12", "#F5B041", "#F8C471"],
            Palette::Morandi => &["#778899", "#8FBC8F", "#BC8F8F", "#B0C4DE", "#D8BFD8"],
            Palette::Set2 => &[
                "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494",
                "#b3b3b3",
            ],
            Palette::Paired => &[
                "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f",
                "#ff7f00", "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
            ],
            Palette::Bright => &[
                "#023eff", "#ff7c00", "#1ac938", "#e8000b", "#8b2be2", "#9f4800", "#f14cc1",
                "#a3a3a3", "#ffc400", "#00d7ff",
            ],
            Palette::Spectral => &[
                "#9e0142", "#d8434e", "#f67a49", "#fdbf6f", "#feeda1", "#f1f9a9", "#bfe5a0",
                "#74c7a5", "#3b92b8", "#5e4fa2",
            ],
            Palette::Deep => &[
                "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3",
                "#8c8c8c", "#ccb974", "#64b5cd",
            ],
            Palette::Tab10 => &[
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ],
        }
    }

    /// Palette colors in order.
    pub fn colors(self) -> Vec<Rgb8> {
        self.hex()
            .iter()
            .filter_map(|h| Rgb8::parse_hex(h).ok())
            .collect()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = ReportError;

    fn from_str(s: &str) -> ReportResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Palette::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| {
                let known = Palette::ALL.map(Palette::name).join(", ");
                ReportError::input(format!("unknown palette \"{s}\" (known: {known})"))
            })
    }
}

/// Color for the `idx`-th series, cycling through `colors`.
pub fn cycle_color(colors: &[Rgb8], idx: usize) -> Rgb8 {
    if colors.is_empty() {
        return Rgb8::new(0x1f, 0x77, 0xb4);
    }
    colors[idx % colors.len()]
}

#[cfg(test)]
#[path = "../../tests/unit/style/palette.rs"]
mod tests;
