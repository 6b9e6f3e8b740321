use super::*;

#[test]
fn tile_width_matches_usable_width_formula() {
    let g = PageGeometry::A4;
    for n in 1..=4 {
        let size = g.tile_size(n).unwrap();
        let expected = (190.0 - (n as f64 - 1.0) * 5.0) / n as f64;
        assert!((size.width - expected).abs() < 1e-9);
        assert_eq!(size.width, size.height);
    }
}

#[test]
fn per_row_out_of_range_is_an_input_error() {
    for n in [0, 5] {
        let err = PageGeometry::A4.tile_size(n).unwrap_err();
        assert!(matches!(err, ReportError::Input(_)));
    }
}

#[test]
fn five_tiles_two_per_row_overflow_once() {
    let p = plan_placements(PageGeometry::A4, 2, 5).unwrap();
    let pages = p.iter().map(|p| p.page).collect::<Vec<_>>();
    assert_eq!(pages, vec![0, 0, 0, 0, 1]);
    assert_eq!(p[0].rect.origin(), Point::new(10.0, 25.0));
    assert_eq!(p[1].rect.origin(), Point::new(107.5, 25.0));
    assert_eq!(p[2].rect.origin(), Point::new(10.0, 122.5));
    assert_eq!(p[4].rect.origin(), Point::new(10.0, 15.0));
}

#[test]
fn single_column_is_one_tile_per_page() {
    let p = plan_placements(PageGeometry::A4, 1, 3).unwrap();
    assert_eq!(p.iter().map(|p| p.page).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn cursor_advances_row_after_n_tiles() {
    let mut c = LayoutCursor::new(PageGeometry::A4, 3).unwrap();
    let w = c.tile().width;
    c.place();
    c.place();
    assert!((c.origin().x - (10.0 + 2.0 * (w + 5.0))).abs() < 1e-9);
    c.place();
    assert_eq!(c.origin().x, 10.0);
    assert!((c.origin().y - (25.0 + w + 5.0)).abs() < 1e-9);
    assert_eq!(c.page_count(), 1);
}

#[test]
fn zero_tiles_is_still_one_page() {
    let c = LayoutCursor::new(PageGeometry::A4, 2).unwrap();
    assert_eq!(c.page_count(), 1);
    assert!(plan_placements(PageGeometry::A4, 2, 0).unwrap().is_empty());
}
