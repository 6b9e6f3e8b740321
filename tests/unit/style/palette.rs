use super::*;

#[test]
fn every_palette_parses_all_of_its_colors() {
    for p in Palette::ALL {
        assert_eq!(p.colors().len(), p.hex().len(), "{p}");
        assert!(!p.colors().is_empty());
    }
}

#[test]
fn names_roundtrip_through_from_str() {
    for p in Palette::ALL {
        assert_eq!(p.name().parse::<Palette>().unwrap(), p);
    }
    assert_eq!("Professional_Blue".parse::<Palette>().unwrap(), Palette::ProfessionalBlue);
    assert!("neon".parse::<Palette>().is_err());
}

#[test]
fn serde_names_match_display() {
    let v = serde_json::to_value(Palette::Tab10).unwrap();
    assert_eq!(v, serde_json::json!("tab10"));
    let p: Palette = serde_json::from_value(serde_json::json!("professional-blue")).unwrap();
    assert_eq!(p, Palette::ProfessionalBlue);
}

#[test]
fn colors_cycle_when_groups_outnumber_palette() {
    let colors = Palette::Morandi.colors();
    assert_eq!(colors.len(), 5);
    assert_eq!(cycle_color(&colors, 5), colors[0]);
    assert_eq!(cycle_color(&colors, 7), colors[2]);
}
