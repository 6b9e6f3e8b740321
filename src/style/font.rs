use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A font file loaded into memory, with the family name it registers under.
#[derive(Clone)]
pub struct ResolvedFont {
    /// Primary family name read from the font's name table.
    pub family: String,
    /// Raw font bytes (TTF/OTF/TTC).
    pub data: Arc<Vec<u8>>,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl ResolvedFont {
    /// Inspect font bytes and return a handle if they contain at least one usable face.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(data.clone());
        let family = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))?;
        Some(Self {
            family,
            data: Arc::new(data),
        })
    }
}

/// One candidate location for the report font.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// Font bytes supplied directly (e.g. an uploaded file).
    Bytes(Vec<u8>),
    /// An explicit font file.
    File(PathBuf),
    /// Look for each file name, in order, inside each directory, in order.
    Search {
        /// Directories to probe.
        dirs: Vec<PathBuf>,
        /// Candidate file names, matched exactly.
        names: Vec<String>,
    },
}

/// File names probed by [`FontResolver::with_default_search`], CJK-capable faces first.
pub const DEFAULT_FONT_NAMES: &[&str] = &[
    "SimHei.ttf",
    "simhei.ttf",
    "NotoSansSC-Regular.ttf",
    "msyh.ttf",
    "MSYH.TTF",
];

/// Ordered font lookup; the first source that yields a usable face wins.
///
/// This is the only place that touches the filesystem for fonts. The composer receives the
/// resolved handle through the style configuration.
#[derive(Clone, Debug, Default)]
pub struct FontResolver {
    sources: Vec<FontSource>,
}

impl FontResolver {
    /// Empty resolver; resolves to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source, lower priority than every existing one.
    pub fn push(mut self, source: FontSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Append a search of [`DEFAULT_FONT_NAMES`] inside `dir`.
    pub fn with_default_search(self, dir: impl Into<PathBuf>) -> Self {
        self.push(FontSource::Search {
            dirs: vec![dir.into()],
            names: DEFAULT_FONT_NAMES.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Walk the sources in order.
    pub fn resolve(&self) -> Option<ResolvedFont> {
        for source in &self.sources {
            let found = match source {
                FontSource::Bytes(data) => ResolvedFont::from_bytes(data.clone()),
                FontSource::File(path) => load_file(path),
                FontSource::Search { dirs, names } => dirs
                    .iter()
                    .flat_map(|d| names.iter().map(move |n| d.join(n)))
                    .filter(|p| p.is_file())
                    .find_map(|p| load_file(&p)),
            };
            if let Some(font) = found {
                tracing::info!(family = %font.family, "resolved report font");
                return Some(font);
            }
        }
        tracing::debug!("no report font resolved; falling back to system sans-serif");
        None
    }
}

fn load_file(path: &Path) -> Option<ResolvedFont> {
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "font file not readable");
            return None;
        }
    };
    let font = ResolvedFont::from_bytes(data);
    if font.is_none() {
        tracing::warn!(path = %path.display(), "file contains no usable font face");
    }
    font
}

#[cfg(test)]
#[path = "../../tests/unit/style/font.rs"]
mod tests;
