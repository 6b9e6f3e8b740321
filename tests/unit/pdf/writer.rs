use super::*;

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn empty_document_has_one_title_page() {
    let doc = ReportPdf::new(PageGeometry::A4, "Trend Analysis Report");
    assert_eq!(doc.page_count(), 1);
    let bytes = doc.finish();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(count(&bytes, b"/MediaBox"), 1);
    assert_eq!(count(&bytes, b"/Count 1"), 1);
    assert_eq!(count(&bytes, b"Helvetica-Bold"), 1);
}

#[test]
fn images_grow_the_page_list() {
    let mut doc = ReportPdf::new(PageGeometry::A4, "t");
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
    doc.add_rgb(0, Rect::new(10.0, 25.0, 102.5, 117.5), &img);
    doc.add_rgb(2, Rect::new(10.0, 15.0, 102.5, 107.5), &img);
    assert_eq!(doc.page_count(), 3);
    let bytes = doc.finish();
    assert_eq!(count(&bytes, b"/Count 3"), 1);
    assert_eq!(count(&bytes, b"/Subtype /Image"), 2);
}

#[test]
fn png_from_disk_is_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.png");
    image::RgbImage::from_pixel(3, 2, image::Rgb([255, 0, 0]))
        .save(&path)
        .unwrap();
    let mut doc = ReportPdf::new(PageGeometry::A4, "t");
    doc.add_png(0, Rect::new(10.0, 25.0, 50.0, 65.0), &path).unwrap();
    let bytes = doc.finish();
    assert_eq!(count(&bytes, b"/Width 3"), 1);
    assert_eq!(count(&bytes, b"/Height 2"), 1);
}

#[test]
fn missing_png_is_a_render_error() {
    let mut doc = ReportPdf::new(PageGeometry::A4, "t");
    let err = doc
        .add_png(0, Rect::new(0.0, 0.0, 1.0, 1.0), Path::new("/definitely/not/here.png"))
        .unwrap_err();
    assert!(matches!(err, ReportError::Render(_)));
}

#[test]
fn title_font_declares_winansi_encoding() {
    let bytes = ReportPdf::new(PageGeometry::A4, "R\u{e9}sum\u{e9}").finish();
    assert_eq!(count(&bytes, b"/WinAnsiEncoding"), 1);
    assert_eq!(count(&bytes, b"/Type1"), 1);
}
