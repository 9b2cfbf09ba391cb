//! Portable page bundles

use crate::error::{StoreError, StoreResult};
use crate::model::{PageTemplate, PageVersion};
use folio_diff::PageDiff;
use serde::{Deserialize, Serialize};

/// A page's current version, optionally with its full history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageExport {
    pub version: PageVersion,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PageTemplate>,

    /// Every version in creation order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<PageVersion>>,

    /// `diffs[i]` leads from `history[i]` to `history[i + 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffs: Option<Vec<PageDiff>>,
}

impl PageExport {
    /// Parse an export, rejecting bundles without a layout up front
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        if raw.pointer("/version/state").is_none() {
            return Err(StoreError::Validation(
                "Export is missing version.state".to_string(),
            ));
        }
        Ok(serde_json::from_value(raw)?)
    }

    pub fn to_json_pretty(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Versions an import replays, oldest first
    pub fn replay_versions(&self) -> Vec<&PageVersion> {
        match &self.history {
            Some(history) if !history.is_empty() => history.iter().collect(),
            _ => vec![&self.version],
        }
    }

    /// Check everything an import would write before anything is written
    pub fn validate(&self) -> StoreResult<()> {
        for version in self.replay_versions() {
            version.state.validate()?;
            version.metadata.validate()?;
        }
        if let Some(template) = &self.template {
            template.state.validate()?;
            template.metadata.validate()?;
            if template.category.trim().is_empty() {
                return Err(StoreError::Validation(
                    "Template category must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_state_is_validation_error() {
        let json = r#"{"version": {"id": "v1", "pageId": "p1"}}"#;
        assert!(matches!(
            PageExport::from_json(json),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        assert!(matches!(
            PageExport::from_json("{\"version\":"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_serialization_error() {
        let json = r#"{"version": {"id": "v1", "state": {}}}"#;
        assert!(matches!(
            PageExport::from_json(json),
            Err(StoreError::Serialization(_))
        ));
    }
}
