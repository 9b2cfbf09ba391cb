//! Page and template search filters

use crate::model::{PageMetadata, PageTemplate};
use serde::{Deserialize, Serialize};

/// Inclusive range of epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn contains(&self, millis: i64) -> bool {
        self.start <= millis && millis <= self.end
    }
}

/// Every set field must match; an empty query matches everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Matches when any of these tags is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Only consulted for templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn time_range(mut self, start: i64, end: i64) -> Self {
        self.time_range = Some(TimeRange { start, end });
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches_page(&self, metadata: &PageMetadata) -> bool {
        self.matches_term(&[Some(&metadata.name), metadata.description.as_ref()])
            && self.matches_common(metadata)
    }

    /// Templates also match the term against their tags
    pub fn matches_template(&self, template: &PageTemplate) -> bool {
        let mut haystack = vec![Some(&template.name), template.description.as_ref()];
        haystack.extend(template.metadata.tags.iter().map(Some));

        self.matches_term(&haystack) && self.matches_common(&template.metadata)
    }

    fn matches_term(&self, haystack: &[Option<&String>]) -> bool {
        let Some(term) = self.term.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let needle = term.to_lowercase();
        haystack
            .iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&needle))
    }

    fn matches_common(&self, metadata: &PageMetadata) -> bool {
        let tags_ok = match &self.tags {
            Some(tags) if !tags.is_empty() => tags.iter().any(|t| metadata.tags.contains(t)),
            _ => true,
        };
        let time_ok = self
            .time_range
            .map_or(true, |range| range.contains(metadata.modified_at));
        let author_ok = self
            .author
            .as_ref()
            .map_or(true, |author| &metadata.author == author);

        tags_ok && time_ok && author_ok
    }
}
