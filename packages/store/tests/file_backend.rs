//! Page service over the on-disk backend
//!
//! This tests:
//! - History surviving a reopen of the store directory
//! - Templates persisted as files
//! - Uncommitted version files staying invisible
//! - Path-like page ids rejected before any file is written

use anyhow::Result;
use folio_layout::{Component, ComponentType, Layout};
use folio_store::{FileBackend, PageMetadata, PageService, SearchQuery, StorageBackend};

fn text(id: &str) -> Component {
    Component::new(id, ComponentType::new("text", "Text", "basic"))
}

#[tokio::test]
async fn test_history_survives_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let (page_id, v2_id) = {
        let service = PageService::new(FileBackend::open(dir.path()).await?);
        let v1 = service
            .create_page(Layout::default(), PageMetadata::new("Home", "ana"))
            .await?;
        let v2 = service
            .create_version(&v1.page_id, Layout::default().with_component(text("a")), v1.metadata.clone())
            .await?;
        (v1.page_id, v2.id)
    };

    let service = PageService::new(FileBackend::open(dir.path()).await?);
    let versions = service.list_versions(&page_id).await?;
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[1].id, v2_id);
    assert_eq!(service.current_version(&page_id).await?.state.component_ids(), vec!["a"]);

    let diff = service.version_diff(&v2_id).await?.expect("diff");
    assert_eq!(diff.summary().added, 1);
    Ok(())
}

#[tokio::test]
async fn test_templates_persist() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let template_id = {
        let service = PageService::new(FileBackend::open(dir.path()).await?);
        service
            .create_template(Layout::default().with_component(text("hero")), PageMetadata::new("Starter", "ana"))
            .await?
            .id
    };

    let service = PageService::new(FileBackend::open(dir.path()).await?);
    let listed = service.list_templates(&SearchQuery::new()).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, template_id);
    Ok(())
}

#[tokio::test]
async fn test_orphan_version_file_is_not_listed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let backend = FileBackend::open(dir.path()).await?;
    let service = PageService::new(backend.clone());
    let v1 = service
        .create_page(Layout::default(), PageMetadata::new("Home", "ana"))
        .await?;

    // A version written without its page index never became part of the page
    let mut orphan = service.backend().get_version(&v1.id).await?.expect("record");
    orphan.version.id = "orphan".to_string();
    std::fs::write(
        dir.path().join("versions").join("orphan.json"),
        serde_json::to_vec(&orphan)?,
    )?;

    let versions = backend.versions_by_page(&v1.page_id).await?;
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].id, v1.id);
    Ok(())
}

#[tokio::test]
async fn test_path_like_page_id_writes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let service = PageService::new(FileBackend::open(dir.path()).await?);

    let err = service
        .create_version("a/b", Layout::default(), PageMetadata::new("Nested", "ana"))
        .await
        .unwrap_err();
    assert!(matches!(err, folio_store::StoreError::Validation(_)));
    assert_eq!(std::fs::read_dir(dir.path().join("versions"))?.count(), 0);
    assert_eq!(std::fs::read_dir(dir.path().join("pages"))?.count(), 0);
    Ok(())
}
