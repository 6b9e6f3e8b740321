use super::*;

fn rows() -> Dataset {
    Dataset::new(vec![
        Record::new("Glucose", 1.0, 10.0, "A"),
        Record::new("Lactate", 1.0, 5.0, "A"),
        Record {
            entity: None,
            time: Some(1.0),
            value: Some(1.0),
            group: "A".to_string(),
        },
        Record::new("Glucose", 2.0, 12.0, "B"),
        Record::new("GRAND TOTAL", 1.0, 99.0, "A"),
        Record::new("总计", 1.0, 99.0, "A"),
        Record::new("Alanine", 3.0, 7.0, "A"),
    ])
}

#[test]
fn default_pattern_is_case_insensitive_substring() {
    let p = ExclusionPattern::default();
    assert!(p.matches("Total"));
    assert!(p.matches("subtotal area"));
    assert!(p.matches("总计"));
    assert!(!p.matches("Glucose"));
}

#[test]
fn empty_pattern_never_matches() {
    assert!(!ExclusionPattern::none().matches("Total"));
    assert!(!ExclusionPattern::new([""]).matches("anything"));
}

#[test]
fn filter_drops_null_and_total_rows() {
    let kept = filter_records(&rows(), &ExclusionPattern::default());
    assert_eq!(kept.len(), 4);
    assert!(kept.records().iter().all(|r| r.entity.is_some()));
}

#[test]
fn distinct_entities_keep_first_occurrence_order() {
    let kept = filter_records(&rows(), &ExclusionPattern::default());
    assert_eq!(
        distinct_entities(&kept),
        vec!["Glucose".to_string(), "Lactate".to_string(), "Alanine".to_string()]
    );
}

#[test]
fn group_by_entity_collects_all_rows() {
    let groups = group_by_entity(&rows());
    assert_eq!(groups["Glucose"].len(), 2);
    assert_eq!(groups.get_index(0).map(|(k, _)| k.as_str()), Some("Glucose"));
    assert_eq!(groups.len(), 5);
}

#[test]
fn custom_pattern_roundtrips_as_plain_list() {
    let p: ExclusionPattern = serde_json::from_value(serde_json::json!(["Sum"])).unwrap();
    assert!(p.matches("column sum"));
    assert!(!p.matches("Total"));
}
