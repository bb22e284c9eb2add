//! Content query specifications.
//!
//! A [`QuerySpec`] describes which items a grid wants: post type and
//! status, page size and offset, ordering, and category/ID include and
//! exclude filters. It is built fluently and handed to a
//! [`ContentRepository`](crate::content::ContentRepository); this module
//! never executes anything itself.
//!
//! [`build_query`] turns a [`GridRequest`] plus the ids already shown on the
//! page into the spec for that grid.

use std::fmt;

use serde::Serialize;

use crate::content::PostStatus;
use crate::request::GridRequest;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dir {
    Asc,
    /// Newest first; the default for post listings.
    #[default]
    Desc,
}

impl Dir {
    /// `ASC` (any case, surrounding whitespace ignored) is ascending;
    /// everything else is descending.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            Dir::Asc
        } else {
            Dir::Desc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }

    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What results are ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum OrderBy {
    /// A named ordering key such as `date` or `title`.
    Key(String),
    /// The order of the pinned id list.
    AsListed,
}

impl OrderBy {
    /// Name used for pinned-list ordering.
    pub const AS_LISTED: &'static str = "post__in";

    pub fn key(name: impl Into<String>) -> Self {
        OrderBy::Key(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderBy::Key(key) => key,
            OrderBy::AsListed => Self::AS_LISTED,
        }
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        OrderBy::key("date")
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderBy> for String {
    fn from(value: OrderBy) -> Self {
        value.as_str().to_string()
    }
}

/// A content query.
///
/// Total-count computation is never requested: grids only need the page
/// of items itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    pub post_type: String,
    pub status: PostStatus,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    pub order_by: OrderBy,
    pub order: Dir,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_in: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_not_in: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids_in: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids_not_in: Vec<u64>,
}

impl QuerySpec {
    /// Published posts, newest first, at most `limit` of them.
    pub fn new(limit: u32) -> Self {
        Self {
            post_type: "post".to_string(),
            status: PostStatus::Publish,
            limit,
            offset: None,
            order_by: OrderBy::default(),
            order: Dir::default(),
            category_in: Vec::new(),
            category_not_in: Vec::new(),
            ids_in: Vec::new(),
            ids_not_in: Vec::new(),
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn post_type(mut self, post_type: impl Into<String>) -> Self {
        self.post_type = post_type.into();
        self
    }

    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the number of results to skip.
    pub fn offset(mut self, n: u32) -> Self {
        self.offset = Some(n);
        self
    }

    /// Removes any offset.
    pub fn without_offset(mut self) -> Self {
        self.offset = None;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy, dir: Dir) -> Self {
        self.order_by = order_by;
        self.order = dir;
        self
    }

    /// Restricts results to items in any of these categories.
    pub fn category_in(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.category_in.extend(ids);
        self
    }

    /// Excludes items in any of these categories.
    pub fn category_not_in(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.category_not_in.extend(ids);
        self
    }

    /// Restricts results to exactly these ids.
    pub fn ids_in(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.ids_in.extend(ids);
        self
    }

    /// Excludes these ids, in addition to any already excluded.
    pub fn ids_not_in(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.ids_not_in.extend(ids);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns `true` when results follow the pinned id list.
    pub fn is_pinned(&self) -> bool {
        self.order_by == OrderBy::AsListed
    }
}

/// Builds the query for `request`.
///
/// `excluded` holds the ids already shown on this page; they are added to
/// the id exclusions when the request asks for duplicate suppression.
/// A pinned id list overrides ordering and drops the offset.
pub fn build_query(request: &GridRequest, excluded: &[u64]) -> QuerySpec {
    let mut spec = QuerySpec::new(request.count)
        .offset(request.offset)
        .order_by(OrderBy::key(request.order_by.as_str()), request.order);

    if !request.exclude_categories.is_empty() {
        spec = spec.category_not_in(request.exclude_categories.iter().copied());
    }
    if !request.include_categories.is_empty() {
        spec = spec.category_in(request.include_categories.iter().copied());
    }
    if !request.specific_posts.is_empty() {
        spec = spec
            .ids_in(request.specific_posts.iter().copied())
            .order_by(OrderBy::AsListed, request.order)
            .without_offset();
    }
    if request.exclude_displayed && !excluded.is_empty() {
        spec = spec.ids_not_in(excluded.iter().copied());
    }

    tracing::debug!(
        limit = spec.limit,
        offset = ?spec.offset,
        order_by = %spec.order_by,
        order = %spec.order,
        excluded = spec.ids_not_in.len(),
        pinned = spec.ids_in.len(),
        "built grid query"
    );
    spec
}
