//! Content items and the repository they come from.
//!
//! The grid never owns content. It asks a [`ContentRepository`] for the
//! items matching a [`QuerySpec`] and only reads what comes back.
//! [`MemoryRepository`] is a complete in-memory implementation, loadable
//! from YAML or JSON.

mod memory;

pub use memory::MemoryRepository;

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;
use crate::query::QuerySpec;

/// Publication state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
    Pending,
    Private,
    Future,
}

/// One rendition of a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A featured image with its named size variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub alt: String,
    /// Variants keyed by size name (`thumbnail`, `medium_large`, `full`...).
    #[serde(default)]
    pub sizes: BTreeMap<String, ImageSource>,
}

impl Thumbnail {
    /// Name of the original-size variant.
    pub const FULL: &'static str = "full";

    /// Picks the `size` variant, falling back to `full` and then to any
    /// variant at all.
    pub fn source(&self, size: &str) -> Option<&ImageSource> {
        self.sizes
            .get(size)
            .or_else(|| self.sizes.get(Self::FULL))
            .or_else(|| self.sizes.values().next())
    }
}

/// A post as supplied by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u64,
    pub title: String,
    pub permalink: String,
    /// Hand-written summary; may be empty.
    #[serde(default)]
    pub excerpt: String,
    /// Full body, used for the summary when there is no excerpt.
    #[serde(default)]
    pub content: String,
    pub date: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default)]
    pub categories: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
}

fn default_post_type() -> String {
    "post".to_string()
}

impl ContentItem {
    /// The text an excerpt is cut from: the excerpt when present, else the
    /// body.
    pub fn summary_source(&self) -> &str {
        if self.excerpt.trim().is_empty() {
            &self.content
        } else {
            &self.excerpt
        }
    }

    /// Last modification time, the publish date if never modified.
    pub fn modified_or_published(&self) -> DateTime<FixedOffset> {
        self.modified.unwrap_or(self.date)
    }
}

/// Source of content items.
///
/// Implementations execute the query as specified: filters, ordering,
/// offset and limit. Errors are returned to the caller unchanged.
pub trait ContentRepository {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<ContentItem>, RepositoryError>;
}

impl<R: ContentRepository + ?Sized> ContentRepository for &R {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<ContentItem>, RepositoryError> {
        (**self).query(spec)
    }
}

impl<R: ContentRepository + ?Sized> ContentRepository for Box<R> {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<ContentItem>, RepositoryError> {
        (**self).query(spec)
    }
}
