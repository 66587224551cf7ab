//! Post metadata model

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Listing metadata of a single post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMetadata {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Short summary shown in listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Post tags
    pub tags: BTreeSet<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Site path of the rendered post, unique within the site
    pub url: String,

    /// Source file path, relative to the source directory
    pub source: String,

    /// Front-matter fields not covered above
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostMetadata {
    /// Create a post with only the required fields set
    pub fn new(title: impl Into<String>, date: DateTime<Utc>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date,
            excerpt: None,
            tags: BTreeSet::new(),
            category: None,
            url: url.into(),
            source: String::new(),
            extra: IndexMap::new(),
        }
    }

    /// Listing order: newest first, then by url
    pub fn recency_cmp(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| self.url.cmp(&other.url))
    }

    /// Get the newer neighbour of this post in a listing
    pub fn prev<'a>(&self, posts: &'a [PostMetadata]) -> Option<&'a PostMetadata> {
        let pos = posts.iter().position(|p| p.url == self.url)?;
        pos.checked_sub(1).map(|i| &posts[i])
    }

    /// Get the older neighbour of this post in a listing
    pub fn next<'a>(&self, posts: &'a [PostMetadata]) -> Option<&'a PostMetadata> {
        let pos = posts.iter().position(|p| p.url == self.url)?;
        posts.get(pos + 1)
    }
}
