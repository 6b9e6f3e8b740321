use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{ReportError, ReportResult};
use crate::style::config::StyleConfig;

/// Entities composed between two releases of the reusable pixmap.
pub const DEFAULT_RELEASE_INTERVAL: usize = 20;

/// Rasterization state shared by every composer call in one run: the font database and a
/// reusable pixmap.
pub struct RasterContext {
    fontdb: Arc<usvg::fontdb::Database>,
    default_family: String,
    pixmap: Option<resvg::tiny_skia::Pixmap>,
    since_release: usize,
    release_interval: usize,
}

impl std::fmt::Debug for RasterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterContext")
            .field("faces", &self.fontdb.len())
            .field("default_family", &self.default_family)
            .field("pixmap_live", &self.pixmap.is_some())
            .field("release_interval", &self.release_interval)
            .finish()
    }
}

impl RasterContext {
    /// Build the font database: system fonts plus the style's resolved font, which also
    /// becomes the sans-serif family.
    pub fn new(style: &StyleConfig) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let default_family = match style.font() {
            Some(font) => {
                db.load_font_data(font.data.to_vec());
                db.set_sans_serif_family(font.family.clone());
                font.family.clone()
            }
            None => "sans-serif".to_string(),
        };
        tracing::debug!(faces = db.len(), family = %default_family, "font database ready");
        Self {
            fontdb: Arc::new(db),
            default_family,
            pixmap: None,
            since_release: 0,
            release_interval: DEFAULT_RELEASE_INTERVAL,
        }
    }

    /// Change how many entities are composed between pixmap releases (minimum 1).
    pub fn with_release_interval(mut self, interval: usize) -> Self {
        self.release_interval = interval.max(1);
        self
    }

    /// Current release interval.
    pub fn release_interval(&self) -> usize {
        self.release_interval
    }

    /// Parse `svg` and render it onto a white canvas, returning packed RGB8 pixels.
    pub fn rasterize(&mut self, svg: &str) -> ReportResult<image::RgbImage> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_family: self.default_family.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| ReportError::render(format!("parse svg: {e}")))?;

        let size = tree.size();
        let (w, h) = (size.width().ceil() as u32, size.height().ceil() as u32);
        if w == 0 || h == 0 {
            return Err(ReportError::render("svg has zero size"));
        }

        let reusable = self
            .pixmap
            .as_ref()
            .is_some_and(|p| p.width() == w && p.height() == h);
        if !reusable {
            self.pixmap = Some(
                resvg::tiny_skia::Pixmap::new(w, h)
                    .ok_or_else(|| ReportError::render("failed to allocate pixmap"))?,
            );
        }
        let pixmap = self
            .pixmap
            .as_mut()
            .ok_or_else(|| ReportError::render("pixmap unavailable"))?;
        pixmap.fill(resvg::tiny_skia::Color::WHITE);
        resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        // Opaque canvas, so premultiplied RGBA equals straight RGBA.
        let rgb = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect::<Vec<_>>();
        image::RgbImage::from_raw(w, h, rgb)
            .ok_or_else(|| ReportError::render("pixel buffer size mismatch"))
    }

    /// Count one composed entity and drop the pixmap once the interval is reached.
    pub fn tick(&mut self) {
        self.since_release += 1;
        if self.since_release >= self.release_interval {
            self.release();
        }
    }

    /// Drop the reusable pixmap now.
    pub fn release(&mut self) {
        if self.pixmap.take().is_some() {
            tracing::debug!("released raster buffers");
        }
        self.since_release = 0;
    }

    /// Whether a pixmap is currently held.
    pub fn holds_pixmap(&self) -> bool {
        self.pixmap.is_some()
    }
}

/// Encode `img` as PNG at `path`. Filesystem failures are resource errors.
pub fn write_png(img: &image::RgbImage, path: &Path) -> ReportResult<()> {
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => {
            ReportError::resource(format!("write png '{}': {io}", path.display()))
        }
        other => ReportError::render(format!("encode png '{}': {other}", path.display())),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
