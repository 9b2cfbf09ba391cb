//! Edit sequences through a live session
//!
//! This tests:
//! - Undo/redo symmetry across several edits
//! - New edits after undo discard the redo branch
//! - Undo depth limits
//! - Nested removal and selection bookkeeping

use anyhow::Result;
use folio_editor::{ComponentUpdate, EditorSession, Position};
use folio_layout::{Component, ComponentType, Layout, StyleProperties};

fn section() -> ComponentType {
    ComponentType::new("section", "Section", "layout")
}

fn button() -> ComponentType {
    ComponentType::new("button", "Button", "basic")
}

#[test]
fn test_undo_redo_symmetry() -> Result<()> {
    let l0 = Layout::default();
    let mut session = EditorSession::new(l0.clone());

    let hero = session.add_component(section(), Position::new(0.0, 0.0));
    let l1 = session.layout().clone();

    session.update_component(&hero, ComponentUpdate::styles(StyleProperties::placed(0.0, 120.0)))?;
    let l2 = session.layout().clone();

    let cta = session.add_component(button(), Position::new(0.0, 240.0));
    let l3 = session.layout().clone();

    assert!(session.undo());
    assert_eq!(session.layout(), &l2);
    assert!(session.undo());
    assert_eq!(session.layout(), &l1);
    assert!(session.undo());
    assert_eq!(session.layout(), &l0);
    assert!(!session.can_undo());

    assert!(session.redo());
    assert!(session.redo());
    assert!(session.redo());
    assert_eq!(session.layout(), &l3);
    assert!(session.layout().find_component(&cta).is_some());
    assert!(!session.can_redo());

    Ok(())
}

#[test]
fn test_edit_after_undo_discards_redo() -> Result<()> {
    let mut session = EditorSession::new(Layout::default());
    let first = session.add_component(section(), Position::default());
    let second = session.add_component(section(), Position::default());

    session.undo();
    assert!(session.can_redo());

    session.remove_component(&first)?;
    assert!(!session.can_redo());
    assert!(session.layout().components.is_empty());
    assert!(session.layout().find_component(&second).is_none());

    Ok(())
}

#[test]
fn test_history_limit_caps_undo_depth() {
    let mut session = EditorSession::with_history_limit(Layout::default(), 3);
    for i in 0..10 {
        session.add_component(section(), Position::new(0.0, i as f64 * 10.0));
    }

    let mut undone = 0;
    while session.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(session.layout().components.len(), 7);
}

#[test]
fn test_remove_parent_clears_selected_child() -> Result<()> {
    let layout = Layout::default().with_component(
        Component::new("pricing", section()).with_child(Component::new("pricing-cta", button())),
    );
    let mut session = EditorSession::new(layout);

    session.select(Some("pricing-cta"))?;
    assert_eq!(session.selected_component().map(|c| c.id.as_str()), Some("pricing-cta"));

    let removed = session.remove_component("pricing")?;
    assert_eq!(removed.children().len(), 1);
    assert!(session.selected_id().is_none());

    // Undo brings the component back but not the selection
    session.undo();
    assert!(session.layout().find_component("pricing-cta").is_some());
    assert!(session.selected_id().is_none());

    Ok(())
}
