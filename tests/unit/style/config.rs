use super::*;

#[test]
fn defaults_match_the_interactive_tool() {
    let s = StyleConfig::default();
    assert_eq!(s.line_width(), 2.0);
    assert!(s.show_legend());
    assert_eq!(s.colors(), Palette::Paired.colors().as_slice());
    assert_eq!(s.font_family_css(), "sans-serif");
}

#[test]
fn line_width_is_bounded() {
    assert!(StyleConfig::builder().line_width(0.5).build().is_err());
    assert!(StyleConfig::builder().line_width(4.5).build().is_err());
    assert!(StyleConfig::builder().line_width(f32::NAN).build().is_err());
    assert!(StyleConfig::builder().line_width(1.0).build().is_ok());
    assert!(StyleConfig::builder().line_width(4.0).build().is_ok());
}

#[test]
fn empty_color_list_is_rejected() {
    let err = StyleConfig::builder().colors(vec![]).build().unwrap_err();
    assert!(err.to_string().contains("input error:"));
}

#[test]
fn builder_applies_palette_and_legend() {
    let s = StyleConfig::builder()
        .palette(Palette::Tab10)
        .show_legend(false)
        .build()
        .unwrap();
    assert_eq!(s.colors().len(), 10);
    assert!(!s.show_legend());
}
