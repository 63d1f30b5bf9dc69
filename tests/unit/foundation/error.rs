use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GridfitError::invalid_dimension("x")
            .to_string()
            .contains("invalid dimension:")
    );
    assert!(
        GridfitError::unknown_layout("masonry")
            .to_string()
            .contains("unknown layout: masonry")
    );
    assert!(
        GridfitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GridfitError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        GridfitError::internal("x")
            .to_string()
            .contains("internal error:")
    );
}

#[test]
fn oversized_item_names_index_and_widths() {
    let err = GridfitError::OversizedItem {
        index: 3,
        width: 400.0,
        container_width: 300.0,
    };
    let msg = err.to_string();
    assert!(msg.contains("item 3"));
    assert!(msg.contains("400px"));
    assert!(msg.contains("300px"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GridfitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
