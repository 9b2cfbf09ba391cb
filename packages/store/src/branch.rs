//! Branch naming rules and merge results

use crate::error::{StoreError, StoreResult};
use crate::model::PageVersion;
use folio_diff::{ChangeKind, PageDiff};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_BRANCH_NAME_LENGTH: usize = 100;

/// Branch names must be non-empty, trimmed and at most [`MAX_BRANCH_NAME_LENGTH`] characters
pub fn validate_branch_name(name: &str) -> StoreResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(
            "Branch name must not be empty".to_string(),
        ));
    }
    if trimmed.len() != name.len() {
        return Err(StoreError::Validation(
            "Branch name must not have leading or trailing whitespace".to_string(),
        ));
    }
    if name.chars().count() > MAX_BRANCH_NAME_LENGTH {
        return Err(StoreError::Validation(format!(
            "Branch name must not exceed {MAX_BRANCH_NAME_LENGTH} characters, got {}",
            name.chars().count()
        )));
    }
    Ok(())
}

/// How a merge resolved differences between source and target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// The source's value replaces the target's wherever they differ
    LastWriterWins,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::LastWriterWins => f.write_str("last-writer-wins"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The version created on the target page
    pub version: PageVersion,

    /// Target state → source state, as applied
    pub diff: PageDiff,

    pub strategy: MergeStrategy,
}

impl MergeOutcome {
    /// Paths where a target value was replaced or dropped by the source
    pub fn overwritten_paths(&self) -> Vec<&str> {
        self.diff
            .changes
            .iter()
            .filter(|c| matches!(c.kind, ChangeKind::Modify | ChangeKind::Remove))
            .map(|c| c.path.as_str())
            .collect()
    }

    pub fn has_overwrites(&self) -> bool {
        self.diff
            .changes
            .iter()
            .any(|c| c.kind != ChangeKind::Add)
    }
}
