use super::*;

#[test]
fn parses_partial_json() {
    let json = r##"{
        "per_row": 3,
        "palette": "tab10",
        "colors": ["#112233"],
        "columns": { "value": "Area" },
        "exclude": ["sum"]
    }"##;
    let cfg = ReportConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.per_row, Some(3));
    assert_eq!(cfg.palette, Some(Palette::Tab10));
    assert_eq!(cfg.colors, Some(vec![Rgb8::new(0x11, 0x22, 0x33)]));
    assert_eq!(cfg.columns.value.as_deref(), Some("Area"));
    assert_eq!(cfg.columns.entity, None);

    let job = cfg.job();
    assert_eq!(job.per_row, 3);
    assert!(job.exclusion.matches("Row SUM"));
    assert!(!job.exclusion.matches("Total"));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = ReportConfig::from_reader(r#"{"per_rows": 3}"#.as_bytes()).unwrap_err();
    assert!(err.to_string().starts_with("input error: parse report config JSON"));
}

#[test]
fn missing_file_is_an_input_error() {
    let err = ReportConfig::from_path("/no/such/config.json").unwrap_err();
    assert!(matches!(err, ReportError::Input(_)));
}

#[test]
fn later_layer_wins() {
    let file = ReportConfig {
        per_row: Some(3),
        line_width: Some(1.5),
        sheet: Some("Data".into()),
        ..Default::default()
    };
    let flags = ReportConfig {
        per_row: Some(4),
        ..Default::default()
    };
    let merged = file.merged(flags);
    assert_eq!(merged.per_row, Some(4));
    assert_eq!(merged.line_width, Some(1.5));
    assert_eq!(merged.sheet.as_deref(), Some("Data"));
}

#[test]
fn style_validation_surfaces_line_width() {
    let cfg = ReportConfig {
        line_width: Some(9.0),
        ..Default::default()
    };
    assert!(matches!(cfg.style(), Err(ReportError::Input(_))));

    let cfg = ReportConfig {
        line_width: Some(3.0),
        show_legend: Some(false),
        ..Default::default()
    };
    let style = cfg.style().unwrap();
    assert_eq!(style.line_width(), 3.0);
    assert!(!style.show_legend());
}

#[test]
fn explicit_colors_beat_palette() {
    let cfg = ReportConfig {
        palette: Some(Palette::Tab10),
        colors: Some(vec![Rgb8::new(1, 2, 3)]),
        ..Default::default()
    };
    assert_eq!(cfg.style().unwrap().colors(), &[Rgb8::new(1, 2, 3)]);
}
