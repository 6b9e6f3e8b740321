use plotters::prelude::{IntoDrawingArea, SVGBackend};

use super::*;

fn render(records: &[Record]) -> (TableOutcome, String) {
    let style = StyleConfig::default();
    let mut svg = String::new();
    let outcome = {
        let root = SVGBackend::with_string(&mut svg, (580, 190)).into_drawing_area();
        let outcome = draw_table(&root, "x", records, &style).unwrap();
        root.present().unwrap();
        outcome
    };
    (outcome, svg)
}

#[test]
fn rows_keep_default_height_when_they_fit() {
    let font = pt_to_px(12.0);
    let (row_h, font_px) = fit_rows(font, 3, 190.0);
    assert!((row_h - font * 2.4).abs() < 1e-9);
    assert_eq!(font_px, font);
}

#[test]
fn tall_tables_shrink_rows_and_font() {
    let font = pt_to_px(12.0);
    let (row_h, font_px) = fit_rows(font, 40, 190.0);
    assert!((row_h * 40.0 - 190.0).abs() < 1e-9);
    assert!(font_px < font);
}

#[test]
fn rendered_table_has_header_fill_and_cells() {
    let records = vec![
        Record::new("x", 1.0, 1000.0, "B"),
        Record::new("x", 1.0, 3.14159, "A"),
    ];
    let (outcome, svg) = render(&records);
    assert!(!outcome.is_degraded());
    assert_eq!(
        outcome.cell_text(),
        Some(vec![vec!["3.14".to_string(), "1,000".to_string()]])
    );
    let svg = svg.to_lowercase();
    assert_eq!(svg.matches("#f4f6f7").count(), 2);
    assert!(svg.contains("1,000"));
    assert!(!svg.contains(&PLACEHOLDER.to_lowercase()));
}

#[test]
fn aggregation_failure_draws_placeholder() {
    let records = vec![Record::new("x", 1.0, f64::NAN, "A")];
    let (outcome, svg) = render(&records);
    assert!(outcome.is_degraded());
    assert_eq!(outcome.cell_text(), None);
    assert!(svg.contains(PLACEHOLDER));
    match outcome {
        TableOutcome::Degraded { reason } => assert!(reason.starts_with("aggregation error: ")),
        TableOutcome::Rendered(_) => unreachable!(),
    }
}
