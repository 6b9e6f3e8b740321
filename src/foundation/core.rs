use crate::foundation::error::{ReportError, ReportResult};

pub use kurbo::{Point, Rect, Size};

/// Opaque sRGB color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn parse_hex(s: &str) -> ReportResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(ReportError::input(format!(
                "color \"{s}\" must be #RRGGBB (case-insensitive)"
            )));
        }

        fn hex_byte(pair: &str) -> ReportResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| ReportError::input(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    /// Lowercase `#rrggbb`, the form written into SVG attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
