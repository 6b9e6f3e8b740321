use plotters::prelude::{IntoDrawingArea, SVGBackend};

use super::*;

fn render(records: &[Record], title: &str, style: &StyleConfig) -> ReportResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (600, 391)).into_drawing_area();
        draw_chart(&root, title, records, style)?;
        root.present().map_err(draw_failed)?;
    }
    Ok(svg)
}

fn texts(svg: &str) -> Vec<String> {
    svg.split("<text")
        .skip(1)
        .filter_map(|chunk| {
            let (_, rest) = chunk.split_once('>')?;
            let (body, _) = rest.split_once("</text>")?;
            Some(body.trim().to_string())
        })
        .collect()
}

#[test]
fn series_follow_first_occurrence_and_average_duplicates() {
    let records = vec![
        Record::new("x", 3.0, 6.0, "B"),
        Record::new("x", 1.0, 2.0, "A"),
        Record::new("x", 1.0, 4.0, "A"),
        Record::new("x", 0.0, 1.0, "B"),
    ];
    let series = collect_series(&records);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].group, "B");
    assert_eq!(series[0].points, vec![(0.0, 1.0), (3.0, 6.0)]);
    assert_eq!(series[1].points, vec![(1.0, 3.0)]);
}

#[test]
fn null_values_are_skipped() {
    let mut blank = Record::new("x", 2.0, 0.0, "A");
    blank.value = None;
    let series = collect_series(&[blank, Record::new("x", 1.0, 5.0, "A")]);
    assert_eq!(series[0].points, vec![(1.0, 5.0)]);
}

#[test]
fn single_point_draws_one_marker_and_no_line() {
    let style = StyleConfig::builder().show_legend(false).build().unwrap();
    let svg = render(&[Record::new("solo", 5.0, 42.0, "g")], "solo", &style).unwrap();
    assert!(!svg.contains("<polyline"));
    assert_eq!(svg.matches("<circle").count(), 1);
    assert!(texts(&svg).iter().any(|t| t == "solo"));
    assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
}

#[test]
fn legend_lists_title_and_groups() {
    let style = StyleConfig::default();
    let records = vec![
        Record::new("x", 1.0, 1.0, "g-one"),
        Record::new("x", 2.0, 2.0, "g-two"),
    ];
    let svg = render(&records, "x", &style).unwrap();
    let texts = texts(&svg);
    for label in ["Group", "g-one", "g-two"] {
        assert!(texts.iter().any(|t| t == label), "missing legend entry {label}");
    }
}

#[test]
fn legend_can_be_disabled() {
    let style = StyleConfig::builder().show_legend(false).build().unwrap();
    let records = vec![
        Record::new("x", 1.0, 1.0, "only-group"),
        Record::new("x", 2.0, 2.0, "only-group"),
    ];
    let svg = render(&records, "x", &style).unwrap();
    assert!(!svg.contains("only-group"));
    assert_eq!(svg.matches("<circle").count(), 2);
    assert_eq!(svg.matches("<polyline").count(), 1);
}

#[test]
fn x_ticks_are_exactly_the_distinct_times() {
    let style = StyleConfig::builder().show_legend(false).build().unwrap();
    let records = vec![
        Record::new("x", 7.0, 1.0, "A"),
        Record::new("x", 14.0, 2.0, "A"),
        Record::new("x", 21.0, 3.0, "B"),
    ];
    let svg = render(&records, "x", &style).unwrap();
    let texts = texts(&svg);
    for label in ["7", "14", "21"] {
        assert!(texts.iter().any(|t| t == label), "missing tick {label}");
    }
    assert!(!texts.iter().any(|t| t == "10" || t == "15" || t == "20"));
}

#[test]
fn markup_characters_in_titles_stay_well_formed() {
    let style = StyleConfig::default();
    let svg = render(&[Record::new("a", 1.0, 1.0, "<g>")], "a<b & \"c\"\u{1}", &style).unwrap();
    assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
}

#[test]
fn no_plottable_points_is_a_render_error() {
    let mut r = Record::new("x", 1.0, 0.0, "A");
    r.value = None;
    let err = render(&[r], "x", &StyleConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::Render(_)));
}
