use super::*;

#[test]
fn cell_formatting_policy() {
    assert_eq!(format_cell(1000.0), "1,000");
    assert_eq!(format_cell(1500.5), "1,500");
    assert_eq!(format_cell(1501.5), "1,502");
    assert_eq!(format_cell(3.14159), "3.14");
    assert_eq!(format_cell(42.0), "42");
    assert_eq!(format_cell(0.0), "0");
    assert_eq!(format_cell(-2500.25), "-2,500");
    assert_eq!(format_cell(999.999), "1000.00");
    assert_eq!(format_cell(1234567.0), "1,234,567");
}

#[test]
fn huge_whole_sums_keep_their_digits() {
    let text = format_cell(1e40);
    assert!(text.starts_with("10,000,000"), "{text}");
    assert_eq!(text.split(',').count(), 14);
    assert!(format_cell(-(2f64.powi(128))).starts_with("-340,282,366"));
    assert!(format_cell(f64::MAX).starts_with("179,769,313"));
}

#[test]
fn thousands_grouping_edges() {
    assert_eq!(group_thousands("0"), "0");
    assert_eq!(group_thousands("-0"), "0");
    assert_eq!(group_thousands("999"), "999");
    assert_eq!(group_thousands("-1000"), "-1,000");
    assert_eq!(group_thousands("100000"), "100,000");
    assert_eq!(format_cell(-0.0), "0");
}

#[test]
fn font_tiers_step_down_with_columns() {
    assert_eq!(font_tier_pt(1), 12.0);
    assert_eq!(font_tier_pt(3), 12.0);
    assert_eq!(font_tier_pt(4), 10.0);
    assert_eq!(font_tier_pt(5), 10.0);
    assert_eq!(font_tier_pt(6), 8.0);
    assert_eq!(font_tier_pt(12), 8.0);
}

#[test]
fn sums_per_time_and_group_with_zero_fill() {
    let records = vec![
        Record::new("x", 2.0, 1.5, "B"),
        Record::new("x", 1.0, 10.0, "A"),
        Record::new("x", 1.0, 5.0, "A"),
        Record::new("x", 2.0, 3.0, "A"),
    ];
    let p = PivotTable::build(&records).unwrap();
    assert_eq!(p.times, vec![1.0, 2.0]);
    assert_eq!(p.groups, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(p.cells, vec![vec![15.0, 0.0], vec![3.0, 1.5]]);
    assert_eq!(p.row_labels(), vec!["1".to_string(), "2".to_string()]);
    assert_eq!(p.cell_text()[1], vec!["3".to_string(), "1.50".to_string()]);
}

#[test]
fn single_point_gives_one_by_one_table() {
    let p = PivotTable::build(&[Record::new("x", 0.0, 42.0, "only")]).unwrap();
    assert_eq!((p.row_count(), p.col_count()), (1, 1));
    assert_eq!(p.cell_text(), vec![vec!["42".to_string()]]);
}

#[test]
fn missing_values_do_not_contribute() {
    let mut r = Record::new("x", 1.0, 0.0, "A");
    r.value = None;
    let records = vec![r, Record::new("x", 2.0, 4.0, "A")];
    let p = PivotTable::build(&records).unwrap();
    assert_eq!(p.times, vec![2.0]);
}

#[test]
fn non_finite_values_fail_aggregation() {
    let err = PivotTable::build(&[Record::new("x", 1.0, f64::INFINITY, "A")]).unwrap_err();
    assert!(matches!(err, ReportError::Aggregation(_)));

    let records = vec![
        Record::new("x", 1.0, f64::MAX, "A"),
        Record::new("x", 1.0, f64::MAX, "A"),
    ];
    assert!(matches!(
        PivotTable::build(&records),
        Err(ReportError::Aggregation(_))
    ));
}

#[test]
fn nothing_to_tabulate_is_an_aggregation_error() {
    let mut r = Record::new("x", 1.0, 0.0, "A");
    r.value = None;
    assert!(matches!(
        PivotTable::build(&[r]),
        Err(ReportError::Aggregation(_))
    ));
}
