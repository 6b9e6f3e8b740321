use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ReportError::input("x").to_string().contains("input error:"));
    assert!(
        ReportError::aggregation("x")
            .to_string()
            .contains("aggregation error:")
    );
    assert!(ReportError::render("x").to_string().contains("render error:"));
    assert!(
        ReportError::resource("x")
            .to_string()
            .contains("resource error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReportError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
