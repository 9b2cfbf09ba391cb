//! # Page Service
//!
//! All versioning rules on top of a [`StorageBackend`].
//!
//! Every operation that moves a page forward (save, revert, branch, merge,
//! template, import, clone) ends in the same commit path, which holds the
//! page's lock from reading the current version to the backend commit.

use crate::backend::StorageBackend;
use crate::branch::{validate_branch_name, MergeOutcome, MergeStrategy};
use crate::error::{StoreError, StoreResult};
use crate::export::PageExport;
use crate::model::{
    now_millis, PageMetadata, PageRecord, PageTemplate, PageVersion, VersionRecord,
    DEFAULT_TEMPLATE_CATEGORY,
};
use crate::search::SearchQuery;
use folio_diff::{apply_diff, generate_diff, PageDiff};
use folio_layout::Layout;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_SEARCH_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// How many recently modified pages a search scans
    pub search_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Where a new version hangs in the version graph
enum Lineage {
    /// Parent is the page's current version; its branch name carries over
    FollowCurrent,
    Explicit {
        parent: String,
        branch_name: Option<String>,
    },
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub struct PageService<B> {
    backend: B,
    config: ServiceConfig,
    page_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<B: StorageBackend> PageService<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ServiceConfig::default())
    }

    pub fn with_config(backend: B, config: ServiceConfig) -> Self {
        Self {
            backend,
            config,
            page_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn page_lock(&self, page_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.page_locks.lock().await;
        locks
            .entry(page_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forget a page's lock once no other commit holds or waits on it
    async fn release_page_lock(&self, page_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.page_locks.lock().await;
        // One reference in the map, one in `lock`
        if Arc::strong_count(&lock) == 2 {
            locks.remove(page_id);
        }
    }

    // ---------------------------------------------------------------------
    // Versions
    // ---------------------------------------------------------------------

    /// Save `state` as the page's new current version.
    ///
    /// A page without a record is created by its first version. The stored
    /// diff is computed against the previous current version.
    ///
    /// The new version inherits the current version's `branch_name`, so once
    /// [`create_branch`](Self::create_branch) has run on a page every later
    /// save is labelled with that branch until another branch is created.
    pub async fn create_version(
        &self,
        page_id: &str,
        state: Layout,
        metadata: PageMetadata,
    ) -> StoreResult<PageVersion> {
        self.commit(page_id, state, metadata, Lineage::FollowCurrent)
            .await
    }

    async fn commit(
        &self,
        page_id: &str,
        state: Layout,
        metadata: PageMetadata,
        lineage: Lineage,
    ) -> StoreResult<PageVersion> {
        state.validate()?;
        metadata.validate()?;

        let lock = self.page_lock(page_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.commit_locked(page_id, state, metadata, lineage).await
        };
        self.release_page_lock(page_id, lock).await;
        result
    }

    /// Runs with the page's lock held
    async fn commit_locked(
        &self,
        page_id: &str,
        state: Layout,
        mut metadata: PageMetadata,
        lineage: Lineage,
    ) -> StoreResult<PageVersion> {
        let current = match self.backend.get_page(page_id).await? {
            Some(page) => Some(self.get_version(&page.current_version_id).await?),
            None => None,
        };

        let id = new_id();
        let diff = match &current {
            Some(current) => Some(generate_diff(&current.state, &state)?.with_version_id(&id)),
            None => None,
        };

        let (parent_version, branch_name) = match lineage {
            Lineage::FollowCurrent => (
                current.as_ref().map(|v| v.id.clone()),
                current.as_ref().and_then(|v| v.branch_name.clone()),
            ),
            Lineage::Explicit {
                parent,
                branch_name,
            } => (Some(parent), branch_name),
        };

        let now = now_millis();
        metadata.modified_at = now;

        let version = PageVersion {
            id,
            page_id: page_id.to_string(),
            timestamp: now,
            state,
            metadata,
            parent_version,
            branch_name,
        };

        let summary = diff.as_ref().map(|d| d.summary().to_string());
        self.backend
            .commit_version(
                VersionRecord {
                    version: version.clone(),
                    diff,
                },
                PageRecord::for_version(&version),
            )
            .await?;

        info!(
            page_id = %version.page_id,
            version_id = %version.id,
            parent = ?version.parent_version,
            changes = summary.as_deref().unwrap_or("initial"),
            "Created version"
        );
        Ok(version)
    }

    /// Create a fresh page whose first version is `state`
    pub async fn create_page(&self, state: Layout, metadata: PageMetadata) -> StoreResult<PageVersion> {
        let page_id = new_id();
        self.create_version(&page_id, state, metadata).await
    }

    pub async fn get_version(&self, version_id: &str) -> StoreResult<PageVersion> {
        self.backend
            .get_version(version_id)
            .await?
            .map(|record| record.version)
            .ok_or_else(|| StoreError::not_found("version", version_id))
    }

    /// The diff stored with a version; `None` for a page's first version
    pub async fn version_diff(&self, version_id: &str) -> StoreResult<Option<PageDiff>> {
        self.backend
            .get_version(version_id)
            .await?
            .map(|record| record.diff)
            .ok_or_else(|| StoreError::not_found("version", version_id))
    }

    pub async fn get_page(&self, page_id: &str) -> StoreResult<PageRecord> {
        self.backend
            .get_page(page_id)
            .await?
            .ok_or_else(|| StoreError::not_found("page", page_id))
    }

    pub async fn current_version(&self, page_id: &str) -> StoreResult<PageVersion> {
        let page = self.get_page(page_id).await?;
        self.get_version(&page.current_version_id).await
    }

    /// All versions of a page, oldest first
    pub async fn list_versions(&self, page_id: &str) -> StoreResult<Vec<PageVersion>> {
        self.get_page(page_id).await?;
        self.backend.versions_by_page(page_id).await
    }

    /// Make an older state current again as a new version
    pub async fn revert_to_version(&self, version_id: &str) -> StoreResult<PageVersion> {
        let target = self.get_version(version_id).await?;
        let metadata = target
            .metadata
            .renamed(format!("Reverted to {}", target.metadata.name));

        let version = self
            .create_version(&target.page_id, target.state, metadata)
            .await?;
        info!(page_id = %version.page_id, target = %version_id, version_id = %version.id, "Reverted page");
        Ok(version)
    }

    // ---------------------------------------------------------------------
    // Branch & merge
    // ---------------------------------------------------------------------

    pub async fn create_branch(&self, version_id: &str, branch_name: &str) -> StoreResult<PageVersion> {
        validate_branch_name(branch_name)?;
        let source = self.get_version(version_id).await?;
        let metadata = source.metadata.renamed(format!("Branch: {}", branch_name));

        let version = self
            .commit(
                &source.page_id,
                source.state,
                metadata,
                Lineage::Explicit {
                    parent: source.id,
                    branch_name: Some(branch_name.to_string()),
                },
            )
            .await?;
        info!(page_id = %version.page_id, branch = branch_name, version_id = %version.id, "Created branch");
        Ok(version)
    }

    /// Bring the source's state onto the target's page.
    ///
    /// Two-way and last-writer-wins: wherever the two states differ the
    /// source's value is kept. Nothing is detected or reported as a conflict;
    /// [`MergeOutcome::overwritten_paths`] lists what the target lost.
    pub async fn merge_branch(
        &self,
        source_version_id: &str,
        target_version_id: &str,
    ) -> StoreResult<MergeOutcome> {
        let source = self.get_version(source_version_id).await?;
        let target = self.get_version(target_version_id).await?;

        let diff = generate_diff(&target.state, &source.state)?;
        let merged = apply_diff(&target.state, &diff)?;
        let metadata = target
            .metadata
            .renamed(format!("Merged from {}", source.metadata.name));

        let version = self
            .commit(
                &target.page_id,
                merged,
                metadata,
                Lineage::Explicit {
                    parent: target.id,
                    branch_name: target.branch_name,
                },
            )
            .await?;

        let outcome = MergeOutcome {
            diff: diff.with_version_id(&version.id),
            version,
            strategy: MergeStrategy::LastWriterWins,
        };

        let overwritten = outcome.overwritten_paths().len();
        if overwritten > 0 {
            warn!(
                source = source_version_id,
                target = target_version_id,
                overwritten,
                "Merge replaced target values (last-writer-wins)"
            );
        }
        info!(
            page_id = %outcome.version.page_id,
            version_id = %outcome.version.id,
            changes = %outcome.diff.summary(),
            "Merged branch"
        );
        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Templates
    // ---------------------------------------------------------------------

    pub async fn create_template(&self, state: Layout, metadata: PageMetadata) -> StoreResult<PageTemplate> {
        self.create_template_in(state, metadata, DEFAULT_TEMPLATE_CATEGORY, None)
            .await
    }

    pub async fn create_template_in(
        &self,
        state: Layout,
        metadata: PageMetadata,
        category: &str,
        thumbnail: Option<String>,
    ) -> StoreResult<PageTemplate> {
        state.validate()?;
        metadata.validate()?;
        if category.trim().is_empty() {
            return Err(StoreError::Validation(
                "Template category must not be empty".to_string(),
            ));
        }

        let template = PageTemplate {
            id: new_id(),
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            category: category.to_string(),
            thumbnail,
            state,
            metadata,
        };
        self.backend.put_template(template.clone()).await?;

        info!(template_id = %template.id, category, "Created template");
        Ok(template)
    }

    pub async fn get_template(&self, template_id: &str) -> StoreResult<PageTemplate> {
        self.backend
            .get_template(template_id)
            .await?
            .ok_or_else(|| StoreError::not_found("template", template_id))
    }

    pub async fn list_templates(&self, query: &SearchQuery) -> StoreResult<Vec<PageTemplate>> {
        Ok(self
            .backend
            .templates_by_category(query.category.as_deref())
            .await?
            .into_iter()
            .filter(|t| query.matches_template(t))
            .collect())
    }

    pub async fn apply_template(&self, template_id: &str, page_id: &str) -> StoreResult<PageVersion> {
        let template = self.get_template(template_id).await?;

        let mut metadata = template
            .metadata
            .renamed(format!("Applied template: {}", template.name));
        metadata.template_id = Some(template.id.clone());

        self.create_version(page_id, template.state, metadata).await
    }

    // ---------------------------------------------------------------------
    // Export / import / clone
    // ---------------------------------------------------------------------

    pub async fn export_page(&self, page_id: &str, include_history: bool) -> StoreResult<PageExport> {
        let version = self.current_version(page_id).await?;

        let template = match &version.metadata.template_id {
            Some(template_id) => self.backend.get_template(template_id).await?,
            None => None,
        };

        let (history, diffs) = if include_history {
            let history = self.list_versions(page_id).await?;
            let diffs = history
                .windows(2)
                .map(|pair| {
                    generate_diff(&pair[0].state, &pair[1].state)
                        .map(|diff| diff.with_version_id(&pair[1].id))
                })
                .collect::<Result<Vec<_>, _>>()?;
            (Some(history), Some(diffs))
        } else {
            (None, None)
        };

        debug!(page_id, include_history, "Exported page");
        Ok(PageExport {
            version,
            template,
            history,
            diffs,
        })
    }

    /// Recreate an exported page under a new id and return that id
    pub async fn import_page(&self, export: PageExport) -> StoreResult<String> {
        export.validate()?;

        let page_id = new_id();
        let replay = export.replay_versions();
        for version in &replay {
            self.create_version(&page_id, version.state.clone(), version.metadata.clone())
                .await?;
        }

        if let Some(template) = &export.template {
            self.import_template(template).await?;
        }

        info!(page_id = %page_id, versions = replay.len(), "Imported page");
        Ok(page_id)
    }

    async fn import_template(&self, template: &PageTemplate) -> StoreResult<()> {
        if self.backend.get_template(&template.id).await?.is_some() {
            debug!(template_id = %template.id, "Bundled template already present");
            return Ok(());
        }
        self.backend.put_template(template.clone()).await
    }

    /// Copy the page's current state into a new, independent page
    pub async fn clone_page(&self, page_id: &str, mut metadata: PageMetadata) -> StoreResult<String> {
        let source = self.current_version(page_id).await?;

        let now = now_millis();
        metadata.created_at = now;
        metadata.modified_at = now;

        let clone_id = new_id();
        self.create_version(&clone_id, source.state, metadata).await?;

        info!(source = page_id, page_id = %clone_id, "Cloned page");
        Ok(clone_id)
    }

    // ---------------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------------

    /// Current versions of recently modified pages matching `query`, newest first
    pub async fn search_pages(&self, query: &SearchQuery) -> StoreResult<Vec<PageVersion>> {
        let pages = self
            .backend
            .pages_by_modified(self.config.search_limit)
            .await?;

        let mut results = Vec::new();
        for page in pages.iter().filter(|p| query.matches_page(&p.metadata)) {
            results.push(self.get_version(&page.current_version_id).await?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use folio_layout::{Component, ComponentType};

    fn service() -> PageService<MemoryBackend> {
        PageService::new(MemoryBackend::new())
    }

    fn text(id: &str) -> Component {
        Component::new(id, ComponentType::new("text", "Text", "basic"))
    }

    fn metadata(name: &str) -> PageMetadata {
        PageMetadata::new(name, "ana")
    }

    #[tokio::test]
    async fn test_first_version_creates_page() {
        let service = service();
        let version = service
            .create_version("home", Layout::default(), metadata("Home"))
            .await
            .unwrap();

        assert_eq!(version.parent_version, None);
        assert_eq!(service.get_page("home").await.unwrap().current_version_id, version.id);
        assert!(service.version_diff(&version.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_version_stores_diff_and_parent() {
        let service = service();
        let v1 = service
            .create_version("home", Layout::default(), metadata("Home"))
            .await
            .unwrap();
        let v2 = service
            .create_version("home", Layout::default().with_component(text("intro")), metadata("Home"))
            .await
            .unwrap();

        assert_eq!(v2.parent_version.as_deref(), Some(v1.id.as_str()));
        let diff = service.version_diff(&v2.id).await.unwrap().unwrap();
        assert_eq!(diff.version_id, v2.id);
        assert_eq!(diff.summary().added, 1);
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected_before_write() {
        let service = service();
        let state = Layout::default()
            .with_component(text("a"))
            .with_component(text("a"));

        let err = service
            .create_version("home", state, metadata("Home"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(service.get_page("home").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let err = service()
            .create_page(Layout::default(), metadata("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let service = service();
        assert!(service.get_version("nope").await.unwrap_err().is_not_found());
        assert!(service.revert_to_version("nope").await.unwrap_err().is_not_found());
        assert!(service.list_versions("nope").await.unwrap_err().is_not_found());
        assert!(service.get_template("nope").await.unwrap_err().is_not_found());
        assert!(service.apply_template("nope", "home").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_saves_on_a_branch_stay_on_it() {
        let service = service();
        let v1 = service.create_page(Layout::default(), metadata("Home")).await.unwrap();
        let branch = service.create_branch(&v1.id, "redesign").await.unwrap();
        let next = service
            .create_version(&v1.page_id, Layout::default().with_component(text("x")), metadata("Home"))
            .await
            .unwrap();

        assert_eq!(branch.metadata.name, "Branch: redesign");
        assert_eq!(next.branch_name.as_deref(), Some("redesign"));
        assert_eq!(next.parent_version.as_deref(), Some(branch.id.as_str()));
    }

    #[tokio::test]
    async fn test_apply_template_sets_template_id() {
        let service = service();
        let template = service
            .create_template(Layout::default().with_component(text("hero")), metadata("Starter"))
            .await
            .unwrap();
        assert_eq!(template.category, "custom");

        let version = service.apply_template(&template.id, "home").await.unwrap();
        assert_eq!(version.metadata.name, "Applied template: Starter");
        assert_eq!(version.metadata.template_id.as_deref(), Some(template.id.as_str()));
        assert_eq!(version.state, template.state);
    }

    #[tokio::test]
    async fn test_page_locks_are_released_after_commit() {
        let service = service();
        service.create_page(Layout::default(), metadata("Home")).await.unwrap();
        service
            .create_version("about", Layout::default(), metadata("About"))
            .await
            .unwrap();
        let _ = service
            .create_version("broken", Layout::default(), metadata(""))
            .await;

        assert!(service.page_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_saves_release_their_lock() {
        let service = Arc::new(service());
        let saves = (0..8).map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create_version("home", Layout::default(), metadata(&format!("Home {}", i)))
                    .await
            })
        });
        for save in saves.collect::<Vec<_>>() {
            save.await.unwrap().unwrap();
        }

        assert_eq!(service.list_versions("home").await.unwrap().len(), 8);
        assert!(service.page_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_limit_caps_scanned_pages() {
        let service = PageService::with_config(MemoryBackend::new(), ServiceConfig { search_limit: 1 });
        service.create_page(Layout::default(), metadata("Older")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service.create_page(Layout::default(), metadata("Newer")).await.unwrap();

        let results = service.search_pages(&SearchQuery::new()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].metadata.name, "Newer");
    }
}
