//! Persisted records
//!
//! Everything here serializes with camelCase keys; it is the format of the
//! file backend and of export artifacts.

use crate::error::{StoreError, StoreResult};
use chrono::Utc;
use folio_diff::PageDiff;
use folio_layout::Layout;
use serde::{Deserialize, Serialize};

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    pub created_at: i64,
    pub modified_at: i64,
    pub author: String,
}

impl PageMetadata {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            name: name.into(),
            description: None,
            tags: Vec::new(),
            template_id: None,
            created_at: now,
            modified_at: now,
            author: author.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// A page needs a display name to be stored
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation(
                "Page name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy with a different display name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// An immutable snapshot of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    pub id: String,
    pub page_id: String,
    pub timestamp: i64,
    pub state: Layout,
    pub metadata: PageMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

/// A version together with the diff from the page's previous current version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version: PageVersion,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<PageDiff>,
}

/// Mutable pointer from a page to its current version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: String,
    pub current_version_id: String,
    pub name: String,
    pub metadata: PageMetadata,
}

impl PageRecord {
    pub fn for_version(version: &PageVersion) -> Self {
        Self {
            id: version.page_id.clone(),
            current_version_id: version.id.clone(),
            name: version.metadata.name.clone(),
            metadata: version.metadata.clone(),
        }
    }
}

pub const DEFAULT_TEMPLATE_CATEGORY: &str = "custom";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    pub state: Layout,
    pub metadata: PageMetadata,
}
