use std::path::Path;

use anyhow::Context;
use kurbo::Rect;
use pdf_writer::{Content, Filter, Name, Pdf, Ref, Str, TextStr};

use crate::foundation::error::{ReportError, ReportResult};
use crate::layout::grid::PageGeometry;
use crate::pdf::metrics::{helvetica_bold_width, winansi_byte};

/// Points per millimetre.
pub const MM_TO_PT: f64 = 72.0 / 25.4;

const TITLE_FONT: Name<'static> = Name(b"F1");
const TITLE_SIZE_PT: f32 = 14.0;
/// Title baseline, in mm from the top edge of the first page.
const TITLE_BASELINE_MM: f64 = 16.5;

struct PlacedImage {
    name: String,
    xobject: Ref,
    rect: Rect,
}

/// Incrementally built report document.
///
/// Image data is compressed into the output as soon as it is added; pages are assembled in
/// [`ReportPdf::finish`].
pub struct ReportPdf {
    pdf: Pdf,
    next_id: i32,
    geometry: PageGeometry,
    title: String,
    pages: Vec<Vec<PlacedImage>>,
    image_count: usize,
}

impl std::fmt::Debug for ReportPdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportPdf")
            .field("title", &self.title)
            .field("pages", &self.pages.len())
            .field("images", &self.image_count)
            .finish()
    }
}

impl ReportPdf {
    /// Start a document with one (title) page.
    pub fn new(geometry: PageGeometry, title: impl Into<String>) -> Self {
        Self {
            pdf: Pdf::new(),
            next_id: 1,
            geometry,
            title: title.into(),
            pages: vec![Vec::new()],
            image_count: 0,
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    /// Pages so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Decode the PNG at `path` and place it on `page` at `rect` (mm, top-left origin).
    pub fn add_png(&mut self, page: usize, rect: Rect, path: &Path) -> ReportResult<()> {
        let img = image::open(path)
            .with_context(|| format!("decode png '{}'", path.display()))
            .map_err(|e| ReportError::render(format!("{e:#}")))?
            .to_rgb8();
        self.add_rgb(page, rect, &img);
        Ok(())
    }

    /// Place packed RGB pixels on `page` at `rect` (mm, top-left origin).
    pub fn add_rgb(&mut self, page: usize, rect: Rect, img: &image::RgbImage) {
        while self.pages.len() <= page {
            self.pages.push(Vec::new());
        }

        let xobject = self.alloc();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(img.as_raw(), 6);
        {
            let mut xobj = self.pdf.image_xobject(xobject, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(img.width() as i32);
            xobj.height(img.height() as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
        }

        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.pages[page].push(PlacedImage {
            name,
            xobject,
            rect,
        });
    }

    /// Write the page tree and return the encoded document.
    pub fn finish(mut self) -> Vec<u8> {
        let catalog_id = self.alloc();
        let pages_id = self.alloc();
        let font_id = self.alloc();
        let info_id = self.alloc();

        let page_w = (self.geometry.width * MM_TO_PT) as f32;
        let page_h = (self.geometry.height * MM_TO_PT) as f32;

        let mut page_ids = Vec::with_capacity(self.pages.len());
        let pages = std::mem::take(&mut self.pages);
        for (idx, images) in pages.iter().enumerate() {
            let page_id = self.alloc();
            let content_id = self.alloc();
            page_ids.push(page_id);

            let mut content = Content::new();
            if idx == 0 {
                let width_pt = helvetica_bold_width(&self.title, f64::from(TITLE_SIZE_PT));
                let x = (f64::from(page_w) - width_pt) * 0.5;
                let y = f64::from(page_h) - TITLE_BASELINE_MM * MM_TO_PT;
                content.begin_text();
                content.set_font(TITLE_FONT, TITLE_SIZE_PT);
                content.next_line(x as f32, y as f32);
                let encoded = self
                    .title
                    .chars()
                    .map(|c| winansi_byte(c).unwrap_or(b'?'))
                    .collect::<Vec<u8>>();
                content.show(Str(&encoded));
                content.end_text();
            }
            for img in images {
                let w = img.rect.width() * MM_TO_PT;
                let h = img.rect.height() * MM_TO_PT;
                let x = img.rect.x0 * MM_TO_PT;
                let y_bottom = f64::from(page_h) - img.rect.y1 * MM_TO_PT;
                content.save_state();
                content.transform([w as f32, 0.0, 0.0, h as f32, x as f32, y_bottom as f32]);
                content.x_object(Name(img.name.as_bytes()));
                content.restore_state();
            }
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_id, &compressed)
                .filter(Filter::FlateDecode);

            let mut page = self.pdf.page(page_id);
            page.media_box(pdf_writer::Rect::new(0.0, 0.0, page_w, page_h))
                .parent(pages_id)
                .contents(content_id);
            let mut resources = page.resources();
            resources.fonts().pair(TITLE_FONT, font_id);
            if !images.is_empty() {
                let mut xobjects = resources.x_objects();
                for img in images {
                    xobjects.pair(Name(img.name.as_bytes()), img.xobject);
                }
            }
        }

        self.pdf.catalog(catalog_id).pages(pages_id);
        self.pdf
            .pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        self.pdf
            .type1_font(font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        self.pdf
            .document_info(info_id)
            .title(TextStr(&self.title))
            .producer(TextStr("trendgrid"));
        self.pdf.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pdf/writer.rs"]
mod tests;
