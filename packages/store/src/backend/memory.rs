use super::{sort_by_modified, StorageBackend};
use crate::error::StoreResult;
use crate::model::{PageRecord, PageTemplate, PageVersion, VersionRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    versions: HashMap<String, VersionRecord>,
    page_versions: HashMap<String, Vec<String>>,
    pages: HashMap<String, PageRecord>,
    templates: Vec<PageTemplate>,
}

/// In-process backend for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn commit_version(&self, record: VersionRecord, page: PageRecord) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let version_id = record.version.id.clone();

        tables
            .page_versions
            .entry(page.id.clone())
            .or_default()
            .push(version_id.clone());
        tables.versions.insert(version_id, record);
        tables.pages.insert(page.id.clone(), page);
        Ok(())
    }

    async fn get_version(&self, version_id: &str) -> StoreResult<Option<VersionRecord>> {
        Ok(self.tables.read().await.versions.get(version_id).cloned())
    }

    async fn versions_by_page(&self, page_id: &str) -> StoreResult<Vec<PageVersion>> {
        let tables = self.tables.read().await;
        let ids = match tables.page_versions.get(page_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| tables.versions.get(id))
            .map(|record| record.version.clone())
            .collect())
    }

    async fn get_page(&self, page_id: &str) -> StoreResult<Option<PageRecord>> {
        Ok(self.tables.read().await.pages.get(page_id).cloned())
    }

    async fn pages_by_modified(&self, limit: usize) -> StoreResult<Vec<PageRecord>> {
        let mut pages: Vec<PageRecord> = self.tables.read().await.pages.values().cloned().collect();
        sort_by_modified(&mut pages, limit);
        Ok(pages)
    }

    async fn put_template(&self, template: PageTemplate) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        match tables.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => tables.templates.push(template),
        }
        Ok(())
    }

    async fn get_template(&self, template_id: &str) -> StoreResult<Option<PageTemplate>> {
        Ok(self
            .tables
            .read()
            .await
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .cloned())
    }

    async fn templates_by_category(&self, category: Option<&str>) -> StoreResult<Vec<PageTemplate>> {
        Ok(self
            .tables
            .read()
            .await
            .templates
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .cloned()
            .collect())
    }
}
