//! Layout-level diff properties
//!
//! This tests:
//! - Identity diffs
//! - Apply / revert round trips over nested components
//! - Reordering, responsive overrides and prop removal
//! - Folding several diffs with later-wins semantics

use folio_diff::{apply_diff, generate_diff, merge_diffs, revert_diff, ChangeKind};
use folio_layout::{
    Breakpoint, Component, ComponentType, Dimension, Layout, LayoutStyles, StyleOverrides,
    StyleProperties,
};

fn section(id: &str) -> Component {
    Component::new(id, ComponentType::new("section", "Section", "layout"))
        .with_styles(StyleProperties::placed(0.0, 0.0))
}

fn button(id: &str, label: &str) -> Component {
    Component::new(id, ComponentType::new("button", "Button", "basic")).with_prop("label", label)
}

fn landing_page() -> Layout {
    Layout::default()
        .with_component(
            section("hero")
                .with_prop("title", "Stop losing leads")
                .with_child(button("hero-cta", "Book a demo")),
        )
        .with_component(section("pain-points").with_prop("items", serde_json::json!(["slow", "manual"])))
        .with_component(section("faq"))
}

#[test]
fn test_identity_diff_is_empty() {
    let layout = landing_page();
    let diff = generate_diff(&layout, &layout).unwrap();

    assert!(diff.is_empty());
    assert_eq!(apply_diff(&layout, &diff).unwrap(), layout);
}

#[test]
fn test_roundtrip_with_nested_edits() {
    let before = landing_page();
    let mut after = before.clone();

    after
        .find_component_mut("hero-cta")
        .unwrap()
        .props
        .insert("label".to_string(), "Start free trial".into());
    after.remove_component("pain-points");
    after.components.push(section("pricing").with_child(button("pricing-cta", "Buy")));
    after.grid.columns = 16;

    let diff = generate_diff(&before, &after).unwrap();
    assert!(diff
        .changes
        .iter()
        .any(|c| c.path == "components.hero.children.hero-cta.props.label" && c.kind == ChangeKind::Modify));
    assert!(diff
        .changes
        .iter()
        .any(|c| c.path == "components.pain-points" && c.kind == ChangeKind::Remove));
    assert!(diff
        .changes
        .iter()
        .any(|c| c.path == "components.pricing" && c.kind == ChangeKind::Add));

    let patched = apply_diff(&before, &diff).unwrap();
    assert_eq!(patched, after);

    let restored = apply_diff(&patched, &revert_diff(&diff)).unwrap();
    assert_eq!(restored, before);
}

#[test]
fn test_roundtrip_with_reordered_components() {
    let before = landing_page();
    let mut after = before.clone();
    after.components.reverse();
    after.components[0].props.insert("title".to_string(), "Questions?".into());

    let diff = generate_diff(&before, &after).unwrap();
    assert_eq!(apply_diff(&before, &diff).unwrap(), after);
    assert_eq!(
        apply_diff(&apply_diff(&before, &diff).unwrap(), &revert_diff(&diff)).unwrap(),
        before
    );
}

#[test]
fn test_roundtrip_with_responsive_override_and_removed_prop() {
    let before = landing_page();
    let mut after = before.clone();

    let hero = after.find_component_mut("hero").unwrap();
    hero.props.remove("title");
    hero.styles.responsive.insert(
        Breakpoint::Mobile,
        StyleOverrides {
            layout: Some(LayoutStyles {
                width: Some(Dimension::from("90%")),
                ..LayoutStyles::default()
            }),
            ..StyleOverrides::default()
        },
    );

    let diff = generate_diff(&before, &after).unwrap();
    assert!(diff
        .changes
        .iter()
        .any(|c| c.path == "components.hero.props.title" && c.kind == ChangeKind::Remove));
    assert!(diff
        .changes
        .iter()
        .any(|c| c.path == "components.hero.styles.responsive.mobile.layout" && c.kind == ChangeKind::Add));

    assert_eq!(apply_diff(&before, &diff).unwrap(), after);
    assert_eq!(
        apply_diff(&after, &revert_diff(&diff)).unwrap(),
        before
    );
}

#[test]
fn test_first_component_on_empty_page() {
    let before = Layout::default();
    let after = Layout::default().with_component(section("hero"));

    let diff = generate_diff(&before, &after).unwrap();
    assert_eq!(diff.len(), 1);
    assert_eq!(diff.changes[0].path, "components.hero");
    assert_eq!(apply_diff(&before, &diff).unwrap(), after);
    assert_eq!(apply_diff(&after, &revert_diff(&diff)).unwrap(), before);
}

#[test]
fn test_merge_diffs_later_diff_wins() {
    let base = landing_page();

    let mut narrow = base.clone();
    narrow.find_component_mut("hero").unwrap().styles.layout.width = Some(Dimension::from("80%"));
    let mut narrower = base.clone();
    narrower.find_component_mut("hero").unwrap().styles.layout.width = Some(Dimension::from("50%"));

    let first = generate_diff(&base, &narrow).unwrap();
    let second = generate_diff(&base, &narrower).unwrap();

    let merged = merge_diffs(&base, &[first, second]).unwrap();
    assert_eq!(
        merged.find_component("hero").unwrap().styles.layout.width,
        Some(Dimension::from("50%"))
    );
}

#[test]
fn test_diff_json_shape() {
    let before = landing_page();
    let mut after = before.clone();
    after.spacing.base = 8.0;

    let diff = generate_diff(&before, &after).unwrap();
    let json = serde_json::to_value(&diff).unwrap();

    assert_eq!(json["versionId"], "");
    assert_eq!(json["changes"][0]["type"], "modify");
    assert_eq!(json["changes"][0]["path"], "spacing.base");
    assert_eq!(json["changes"][0]["after"], 8.0);
}
