use super::*;

#[test]
fn panels_split_three_to_one_point_six() {
    let (chart, table) = panels();
    assert!((chart.height() / 600.0 - 3.0 / 4.6).abs() < 1e-12);
    assert!(table.y0 > chart.y1);
    assert!(table.y1 <= 600.0);
}

#[test]
fn points_convert_at_100_dpi() {
    assert!((pt_to_px(72.0) - 100.0).abs() < 1e-9);
}

#[test]
fn control_characters_are_stripped_from_text() {
    assert_eq!(plain_text("ok\u{1}x"), "okx");
    assert!(matches!(plain_text("plain"), Cow::Borrowed("plain")));
}

#[test]
fn tile_markup_parses_as_svg() {
    let records = vec![
        Record::new("A", 1.0, 10.0, "g1"),
        Record::new("A", 2.0, 12.5, "g2"),
    ];
    let (markup, table) = entity_svg(&records, "A", &StyleConfig::default()).unwrap();
    assert!(!table.is_degraded());
    let tree = usvg::Tree::from_str(&markup, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), CANVAS_PX as f32);
}

#[test]
fn composes_a_square_png_tile() {
    let style = StyleConfig::default();
    let mut raster = RasterContext::new(&style);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("a.png");
    let records = vec![
        Record::new("A", 1.0, 10.0, "g1"),
        Record::new("A", 2.0, 12.5, "g1"),
        Record::new("A", 1.0, 3.0, "g2"),
    ];
    let tile = compose_entity(&records, "A", &style, &mut raster, &out).unwrap();
    assert_eq!((tile.width_px, tile.height_px), (600, 600));
    assert!(out.is_file());
    assert_eq!(
        tile.table.cell_text(),
        Some(vec![
            vec!["10".to_string(), "3".to_string()],
            vec!["12.50".to_string(), "0".to_string()],
        ])
    );
}

#[test]
fn degraded_table_still_produces_a_tile() {
    let style = StyleConfig::default();
    let records = vec![
        Record::new("A", 1.0, 1e308, "g"),
        Record::new("A", 1.0, 1e308, "g"),
    ];
    let (markup, table) = entity_svg(&records, "A", &style).unwrap();
    assert!(table.is_degraded());
    assert!(markup.contains(table::PLACEHOLDER));
}
