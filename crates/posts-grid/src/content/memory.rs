//! In-memory content repository.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ContentItem, ContentRepository};
use crate::error::{RepositoryError, Result};
use crate::files;
use crate::query::{OrderBy, QuerySpec};

/// An in-memory content repository.
///
/// Items are kept in storage order, which is also the result order for
/// the `none` ordering key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRepository {
    items: Vec<ContentItem>,
}

impl MemoryRepository {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: ContentItem) {
        self.items.push(item);
    }

    /// Parses a YAML list of items. An empty document is an empty
    /// repository.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a JSON array of items.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads items from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = files::read(path)?;
        match files::Format::of(path)? {
            files::Format::Yaml => Self::from_yaml(&content),
            files::Format::Json => Self::from_json(&content),
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Runs `spec` against the stored items.
    pub fn execute(&self, spec: &QuerySpec) -> Vec<ContentItem> {
        let mut matched: Vec<&ContentItem> =
            self.items.iter().filter(|item| matches(spec, item)).collect();

        match &spec.order_by {
            OrderBy::AsListed => matched.sort_by_key(|item| {
                spec.ids_in
                    .iter()
                    .position(|id| *id == item.id)
                    .unwrap_or(usize::MAX)
            }),
            OrderBy::Key(key) if key == "none" => {}
            OrderBy::Key(key) => {
                let compare = comparator(key);
                matched.sort_by(|a, b| spec.order.apply(compare(a, b)));
            }
        }

        matched
            .into_iter()
            .skip(spec.offset.unwrap_or(0) as usize)
            .take(spec.limit as usize)
            .cloned()
            .collect()
    }
}

impl ContentRepository for MemoryRepository {
    fn query(&self, spec: &QuerySpec) -> std::result::Result<Vec<ContentItem>, RepositoryError> {
        Ok(self.execute(spec))
    }
}

impl FromIterator<ContentItem> for MemoryRepository {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn matches(spec: &QuerySpec, item: &ContentItem) -> bool {
    let in_any = |ids: &[u64]| item.categories.iter().any(|c| ids.contains(c));

    item.post_type == spec.post_type
        && item.status == spec.status
        && (spec.category_in.is_empty() || in_any(&spec.category_in))
        && !in_any(&spec.category_not_in)
        && (spec.ids_in.is_empty() || spec.ids_in.contains(&item.id))
        && !spec.ids_not_in.contains(&item.id)
}

type Comparator = fn(&ContentItem, &ContentItem) -> Ordering;

/// Ascending comparison for an ordering key. Unknown keys order by date.
fn comparator(key: &str) -> Comparator {
    match key {
        "title" => |a: &ContentItem, b: &ContentItem| a.title.cmp(&b.title),
        "id" => |a: &ContentItem, b: &ContentItem| a.id.cmp(&b.id),
        "modified" => |a: &ContentItem, b: &ContentItem| {
            a.modified_or_published().cmp(&b.modified_or_published())
        },
        _ => |a: &ContentItem, b: &ContentItem| a.date.cmp(&b.date),
    }
}
