//! Persistence seam for the page service
//!
//! A backend only stores and indexes records; every rule about versions
//! lives in [`crate::PageService`].

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::StoreResult;
use crate::model::{PageRecord, PageTemplate, PageVersion, VersionRecord};
use async_trait::async_trait;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Persist a new version and move the page pointer to it in one step.
    ///
    /// Readers never observe one without the other.
    async fn commit_version(&self, record: VersionRecord, page: PageRecord) -> StoreResult<()>;

    async fn get_version(&self, version_id: &str) -> StoreResult<Option<VersionRecord>>;

    /// All versions of a page in the order they were committed
    async fn versions_by_page(&self, page_id: &str) -> StoreResult<Vec<PageVersion>>;

    async fn get_page(&self, page_id: &str) -> StoreResult<Option<PageRecord>>;

    /// Most recently modified pages first
    async fn pages_by_modified(&self, limit: usize) -> StoreResult<Vec<PageRecord>>;

    /// Insert or replace a template by id
    async fn put_template(&self, template: PageTemplate) -> StoreResult<()>;

    async fn get_template(&self, template_id: &str) -> StoreResult<Option<PageTemplate>>;

    /// Templates in creation order, optionally restricted to one category
    async fn templates_by_category(&self, category: Option<&str>) -> StoreResult<Vec<PageTemplate>>;
}

pub(crate) fn sort_by_modified(pages: &mut Vec<PageRecord>, limit: usize) {
    pages.sort_by(|a, b| {
        b.metadata
            .modified_at
            .cmp(&a.metadata.modified_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    pages.truncate(limit);
}
