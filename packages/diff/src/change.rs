use crate::path;
use folio_layout::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Remove,
    Modify,
}

impl ChangeKind {
    pub fn inverse(self) -> Self {
        match self {
            ChangeKind::Add => ChangeKind::Remove,
            ChangeKind::Remove => ChangeKind::Add,
            ChangeKind::Modify => ChangeKind::Modify,
        }
    }
}

/// One path-addressed edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,

    /// Dot-joined keys / item ids, see [`crate::path`]
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Position of a keyed-list item: in the old list for removals, in the
    /// new list for additions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Change {
    pub fn add<S: AsRef<str>>(segments: &[S], after: Value, index: Option<usize>) -> Self {
        Self {
            kind: ChangeKind::Add,
            path: path::join(segments),
            before: None,
            after: Some(after),
            index,
        }
    }

    pub fn remove<S: AsRef<str>>(segments: &[S], before: Value, index: Option<usize>) -> Self {
        Self {
            kind: ChangeKind::Remove,
            path: path::join(segments),
            before: Some(before),
            after: None,
            index,
        }
    }

    pub fn modify<S: AsRef<str>>(segments: &[S], before: Value, after: Value) -> Self {
        Self {
            kind: ChangeKind::Modify,
            path: path::join(segments),
            before: Some(before),
            after: Some(after),
            index: None,
        }
    }

    pub fn segments(&self) -> Vec<String> {
        path::split(&self.path)
    }

    /// The value this change writes; an absent `after` means JSON null
    pub fn after_value(&self) -> Value {
        self.after.clone().unwrap_or_else(Value::null)
    }

    /// The change that undoes this one
    pub fn inverted(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            path: self.path.clone(),
            before: self.after.clone(),
            after: self.before.clone(),
            index: self.index,
        }
    }
}

/// Ordered changes turning one layout into another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDiff {
    /// Version this diff produced; empty until a store assigns it
    pub version_id: String,
    pub changes: Vec<Change>,
    pub timestamp: i64,
}

impl PageDiff {
    pub fn new(changes: Vec<Change>) -> Self {
        Self {
            version_id: String::new(),
            changes,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = version_id.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for change in &self.changes {
            match change.kind {
                ChangeKind::Add => summary.added += 1,
                ChangeKind::Remove => summary.removed += 1,
                ChangeKind::Modify => summary.modified += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{} ~{}", self.added, self.removed, self.modified)
    }
}
