//! # Folio Store
//!
//! Durable page history: immutable versions, branches, merges, templates
//! and portable exports.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ PageService                                  │
//! │  - create/revert/branch/merge versions       │
//! │  - templates, export/import, clone, search   │
//! │  - per-page lock around every commit         │
//! └──────────────────────────────────────────────┘
//!                      ↓ StorageBackend
//! ┌───────────────────────┐  ┌───────────────────┐
//! │ MemoryBackend         │  │ FileBackend       │
//! │ RwLock'd maps         │  │ JSON files        │
//! └───────────────────────┘  └───────────────────┘
//! ```
//!
//! A `PageVersion` is never changed after it is committed. The page record
//! (which version is current) is the only thing that moves, and it moves in
//! the same backend commit that writes the new version.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_store::{MemoryBackend, PageMetadata, PageService};
//!
//! let service = PageService::new(MemoryBackend::new());
//! let v1 = service.create_page(layout, PageMetadata::new("Home", "ana")).await?;
//! let v2 = service.create_version(&v1.page_id, edited, v1.metadata.clone()).await?;
//!
//! service.revert_to_version(&v1.id).await?;
//! assert_eq!(service.list_versions(&v1.page_id).await?.len(), 3);
//! ```

pub mod backend;
mod branch;
mod error;
mod export;
mod model;
mod search;
mod service;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use branch::{validate_branch_name, MergeOutcome, MergeStrategy, MAX_BRANCH_NAME_LENGTH};
pub use error::{StoreError, StoreResult};
pub use export::PageExport;
pub use model::{
    PageMetadata, PageRecord, PageTemplate, PageVersion, VersionRecord, DEFAULT_TEMPLATE_CATEGORY,
};
pub use search::{SearchQuery, TimeRange};
pub use service::{PageService, ServiceConfig, DEFAULT_SEARCH_LIMIT};
