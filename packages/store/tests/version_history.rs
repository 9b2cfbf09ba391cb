//! Version history through the page service
//!
//! This tests:
//! - Saving from a live editor session
//! - Reverting without losing history
//! - Concurrent saves on one page forming a linear chain
//! - Clones evolving independently

use anyhow::Result;
use folio_editor::{EditorSession, Position};
use folio_layout::{Component, ComponentType, Dimension, Layout};
use folio_store::{MemoryBackend, PageMetadata, PageService};
use std::sync::Arc;

fn hero() -> ComponentType {
    ComponentType::new("hero", "Hero", "sections")
}

#[tokio::test]
async fn test_save_from_editor_session() -> Result<()> {
    let service = PageService::new(MemoryBackend::new());
    let v1 = service
        .create_page(Layout::default(), PageMetadata::new("Home", "ana"))
        .await?;

    let mut session = EditorSession::new(v1.state.clone());
    let id = session.add_component(hero(), Position::new(0.0, 0.0));
    session.add_component(hero(), Position::new(0.0, 400.0));
    session.undo();

    let v2 = service
        .create_version(&v1.page_id, session.layout().clone(), v1.metadata.clone())
        .await?;

    assert_eq!(v2.state.component_ids(), vec![id.as_str()]);
    let diff = service.version_diff(&v2.id).await?.expect("second version has a diff");
    assert_eq!(diff.len(), 1);
    assert_eq!(diff.changes[0].path, format!("components.{}", id));
    Ok(())
}

#[tokio::test]
async fn test_revert_creates_new_version_and_keeps_history() -> Result<()> {
    let service = PageService::new(MemoryBackend::new());
    let original = Layout::default().with_component(Component::new("hero", hero()));
    let v1 = service
        .create_page(original.clone(), PageMetadata::new("Home", "ana"))
        .await?;

    let mut edited = original.clone();
    edited.find_component_mut("hero").unwrap().styles.layout.width = Some(Dimension::from("80%"));
    let v2 = service
        .create_version(&v1.page_id, edited, v1.metadata.clone())
        .await?;

    let v3 = service.revert_to_version(&v1.id).await?;

    assert_eq!(v3.state, v1.state);
    assert_eq!(v3.metadata.name, "Reverted to Home");
    assert_eq!(v3.parent_version.as_deref(), Some(v2.id.as_str()));

    let ids: Vec<_> = service
        .list_versions(&v1.page_id)
        .await?
        .into_iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(ids, vec![v1.id.clone(), v2.id.clone(), v3.id.clone()]);

    // Earlier versions are untouched
    assert_eq!(service.get_version(&v2.id).await?, v2);
    assert_eq!(service.current_version(&v1.page_id).await?.id, v3.id);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_saves_form_linear_chain() -> Result<()> {
    let service = Arc::new(PageService::new(MemoryBackend::new()));
    let v1 = service
        .create_page(Layout::default(), PageMetadata::new("Home", "ana"))
        .await?;

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        let page_id = v1.page_id.clone();
        let metadata = v1.metadata.clone();
        handles.push(tokio::spawn(async move {
            let state = Layout::default().with_component(Component::new(format!("block-{}", i), hero()));
            service.create_version(&page_id, state, metadata).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let versions = service.list_versions(&v1.page_id).await?;
    assert_eq!(versions.len(), 9);
    for pair in versions.windows(2) {
        assert_eq!(pair[1].parent_version.as_deref(), Some(pair[0].id.as_str()));
    }

    // Every stored diff leads from the parent's state to the version's state
    for pair in versions.windows(2) {
        let diff = service.version_diff(&pair[1].id).await?.expect("diff");
        assert_eq!(folio_diff::apply_diff(&pair[0].state, &diff)?, pair[1].state);
    }
    Ok(())
}

#[tokio::test]
async fn test_clone_is_independent() -> Result<()> {
    let service = PageService::new(MemoryBackend::new());
    let state = Layout::default().with_component(Component::new("hero", hero()));
    let source = service
        .create_page(state.clone(), PageMetadata::new("Home", "ana"))
        .await?;

    let clone_id = service
        .clone_page(&source.page_id, PageMetadata::new("Home (copy)", "bo"))
        .await?;
    assert_ne!(clone_id, source.page_id);

    let cloned = service.current_version(&clone_id).await?;
    assert_eq!(cloned.state, state);
    assert_eq!(cloned.metadata.created_at, cloned.metadata.modified_at);

    service
        .create_version(&clone_id, Layout::default(), cloned.metadata.clone())
        .await?;

    assert_eq!(service.current_version(&source.page_id).await?.state, state);
    assert_eq!(service.list_versions(&source.page_id).await?.len(), 1);

    let clone_history = service.list_versions(&clone_id).await?;
    service
        .create_version(
            &source.page_id,
            state.clone().with_component(Component::new("footer", hero())),
            source.metadata.clone(),
        )
        .await?;

    assert_eq!(service.list_versions(&clone_id).await?, clone_history);
    assert_eq!(service.current_version(&clone_id).await?.state, Layout::default());
    assert_eq!(service.list_versions(&source.page_id).await?.len(), 2);
    Ok(())
}
