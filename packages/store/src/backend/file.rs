//! Directory-of-JSON backend
//!
//! ```text
//! <root>/
//!   versions/<version-id>.json    VersionRecord, written once
//!   pages/<page-id>.json          PageIndex: page pointer + ordered version ids
//!   templates/<template-id>.json  PageTemplate
//! ```
//!
//! A version file on its own is invisible: it only becomes part of a page
//! when the page index naming it is renamed into place, so that rename is the
//! commit point. Every write goes to a temporary file first.

use super::{sort_by_modified, StorageBackend};
use crate::error::{StoreError, StoreResult};
use crate::model::{PageRecord, PageTemplate, PageVersion, VersionRecord};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const VERSIONS_DIR: &str = "versions";
const PAGES_DIR: &str = "pages";
const TEMPLATES_DIR: &str = "templates";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageIndex {
    page: PageRecord,
    versions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        for dir in [VERSIONS_DIR, PAGES_DIR, TEMPLATES_DIR] {
            fs::create_dir_all(root.join(dir)).await?;
        }
        tracing::debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ids come from callers; anything that is not a plain file stem has no record
    fn record_path(&self, dir: &str, id: &str) -> Option<PathBuf> {
        let plain = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && !id.starts_with('.');
        plain.then(|| self.root.join(dir).join(format!("{}.json", id)))
    }

    async fn read_record<T: DeserializeOwned>(&self, dir: &str, id: &str) -> StoreResult<Option<T>> {
        let Some(path) = self.record_path(dir, id) else {
            return Ok(None);
        };
        read_json(&path).await
    }

    async fn write_record<T: Serialize>(&self, dir: &str, id: &str, value: &T) -> StoreResult<()> {
        let path = self
            .record_path(dir, id)
            .ok_or_else(|| StoreError::Validation(format!("Invalid record id '{}'", id)))?;
        write_json_atomic(&path, value).await
    }

    async fn read_all<T: DeserializeOwned>(&self, dir: &str) -> StoreResult<Vec<T>> {
        let mut entries = fs::read_dir(self.root.join(dir)).await?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(record) = read_json(&path).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read record");
            Ok(Some(serde_json::from_slice(&bytes)?))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension(format!("{}.tmp", Uuid::now_v7()));

    fs::write(&tmp, &bytes).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote record");
    Ok(())
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn commit_version(&self, record: VersionRecord, page: PageRecord) -> StoreResult<()> {
        if self.record_path(PAGES_DIR, &page.id).is_none() {
            return Err(StoreError::Validation(format!(
                "Invalid record id '{}'",
                page.id
            )));
        }

        let version_id = record.version.id.clone();
        self.write_record(VERSIONS_DIR, &version_id, &record).await?;

        let mut index = self
            .read_record::<PageIndex>(PAGES_DIR, &page.id)
            .await?
            .map(|index| index.versions)
            .unwrap_or_default();
        index.push(version_id);

        let page_id = page.id.clone();
        self.write_record(
            PAGES_DIR,
            &page_id,
            &PageIndex {
                page,
                versions: index,
            },
        )
        .await
    }

    async fn get_version(&self, version_id: &str) -> StoreResult<Option<VersionRecord>> {
        self.read_record(VERSIONS_DIR, version_id).await
    }

    async fn versions_by_page(&self, page_id: &str) -> StoreResult<Vec<PageVersion>> {
        let Some(index) = self.read_record::<PageIndex>(PAGES_DIR, page_id).await? else {
            return Ok(Vec::new());
        };

        let mut versions = Vec::with_capacity(index.versions.len());
        for id in &index.versions {
            let record: VersionRecord = self
                .read_record(VERSIONS_DIR, id)
                .await?
                .ok_or_else(|| StoreError::not_found("version", id.as_str()))?;
            versions.push(record.version);
        }
        Ok(versions)
    }

    async fn get_page(&self, page_id: &str) -> StoreResult<Option<PageRecord>> {
        Ok(self
            .read_record::<PageIndex>(PAGES_DIR, page_id)
            .await?
            .map(|index| index.page))
    }

    async fn pages_by_modified(&self, limit: usize) -> StoreResult<Vec<PageRecord>> {
        let mut pages: Vec<PageRecord> = self
            .read_all::<PageIndex>(PAGES_DIR)
            .await?
            .into_iter()
            .map(|index| index.page)
            .collect();
        sort_by_modified(&mut pages, limit);
        Ok(pages)
    }

    async fn put_template(&self, template: PageTemplate) -> StoreResult<()> {
        let id = template.id.clone();
        self.write_record(TEMPLATES_DIR, &id, &template).await
    }

    async fn get_template(&self, template_id: &str) -> StoreResult<Option<PageTemplate>> {
        self.read_record(TEMPLATES_DIR, template_id).await
    }

    async fn templates_by_category(&self, category: Option<&str>) -> StoreResult<Vec<PageTemplate>> {
        let mut templates: Vec<PageTemplate> = self
            .read_all::<PageTemplate>(TEMPLATES_DIR)
            .await?
            .into_iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect();
        // Directory order is arbitrary; v7 ids sort by creation time
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("store")).await.unwrap();

        for sub in [VERSIONS_DIR, PAGES_DIR, TEMPLATES_DIR] {
            assert!(backend.root().join(sub).is_dir());
        }
    }

    #[tokio::test]
    async fn test_path_like_ids_have_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).await.unwrap();

        assert!(backend.get_version("../pages/x").await.unwrap().is_none());
        assert!(backend.get_page("..").await.unwrap().is_none());
        assert!(backend.get_template("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).await.unwrap();
        std::fs::write(dir.path().join(VERSIONS_DIR).join("broken.json"), b"{not json").unwrap();

        let err = backend.get_version("broken").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
