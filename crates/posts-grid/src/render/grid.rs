//! One grid, end to end: query, duplicate tracking, view model, markup.

use std::borrow::Cow;

use serde::Serialize;

use posts_grid_shortcode::Attributes;

use super::engine::{Templates, GRID_TEMPLATE};
use crate::content::{ContentItem, ContentRepository};
use crate::error::{GridError, Result};
use crate::query::build_query;
use crate::request::{GridRequest, Layout};
use crate::settings::{resolve, Settings, SettingsStore};
use crate::style::compile_inline_overrides;
use crate::text::{self, ELLIPSIS};
use crate::tracker::DuplicateTracker;

/// Output for a grid whose query matched nothing.
pub const EMPTY_MARKER: &str = "<!-- posts_grid: no posts found -->";

/// Visible date format, e.g. `March 5, 2024`.
const DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Serialize)]
struct GridView<'a> {
    id: String,
    classes: String,
    style: String,
    items: Vec<ItemView<'a>>,
}

#[derive(Debug, Serialize)]
struct ItemView<'a> {
    permalink: &'a str,
    title: Cow<'a, str>,
    image: Option<ImageView<'a>>,
    date: Option<DateView>,
    excerpt: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageView<'a> {
    src: &'a str,
    alt: &'a str,
    width: Option<u32>,
    height: Option<u32>,
    eager: bool,
}

#[derive(Debug, Serialize)]
struct DateView {
    iso: String,
    text: String,
}

/// Renders grids from a settings store and a content repository.
///
/// The renderer is stateless between calls; everything scoped to a page
/// render lives in the [`DuplicateTracker`] passed to each call.
pub struct GridRenderer<'a> {
    store: &'a dyn SettingsStore,
    repository: &'a dyn ContentRepository,
    templates: Templates,
}

impl<'a> GridRenderer<'a> {
    pub fn new(store: &'a dyn SettingsStore, repository: &'a dyn ContentRepository) -> Result<Self> {
        Ok(Self {
            store,
            repository,
            templates: Templates::new()?,
        })
    }

    /// Resolves the current settings from the store.
    pub fn settings(&self) -> Settings {
        resolve(self.store)
    }

    /// Renders one directive invocation.
    pub fn render(&self, attrs: &Attributes, tracker: &mut DuplicateTracker) -> Result<String> {
        let request = GridRequest::from_attributes(attrs, &self.settings());
        self.render_request(&request, tracker)
    }

    /// Renders a resolved request.
    ///
    /// Every emitted item is recorded in `tracker`. An empty result renders
    /// [`EMPTY_MARKER`] and leaves the instance counter untouched.
    /// Repository failures are returned as [`GridError::Repository`].
    pub fn render_request(
        &self,
        request: &GridRequest,
        tracker: &mut DuplicateTracker,
    ) -> Result<String> {
        let spec = build_query(request, tracker.all());
        let items = self.repository.query(&spec).map_err(|err| {
            tracing::warn!(error = %err, "content query failed");
            GridError::Repository(err)
        })?;

        if items.is_empty() {
            tracing::debug!("no posts matched grid query");
            return Ok(EMPTY_MARKER.to_string());
        }

        let unapplied = request.styles.unapplied();
        if !unapplied.is_empty() {
            tracing::debug!(overrides = ?unapplied, "style overrides accepted but not applied");
        }

        let instance = tracker.next_instance_id();
        let mut priority_pending = instance == 1;

        let mut views = Vec::with_capacity(items.len());
        for item in &items {
            tracker.add(item.id);
            let view = item_view(item, request, &mut priority_pending);
            tracing::trace!(id = item.id, image = view.image.is_some(), "grid item");
            views.push(view);
        }

        let grid = GridView {
            id: request
                .id
                .clone()
                .unwrap_or_else(|| format!("posts-grid-{}", instance)),
            classes: wrapper_classes(request),
            style: compile_inline_overrides(&request.styles),
            items: views,
        };
        tracing::debug!(instance, id = %grid.id, items = grid.items.len(), "rendering grid");
        self.templates.render(GRID_TEMPLATE, &grid)
    }
}

fn wrapper_classes(request: &GridRequest) -> String {
    let mut classes = vec![
        "posts-grid-wrap".to_string(),
        format!("posts-grid-cols-{}", request.columns),
    ];
    if request.layout == Layout::List {
        classes.push("posts-grid-list".to_string());
    }
    if let Some(class) = &request.class {
        classes.push(class.clone());
    }
    classes.join(" ")
}

/// Builds the view of one item.
///
/// `priority_pending` is consumed by the first image actually emitted.
fn item_view<'a>(
    item: &'a ContentItem,
    request: &GridRequest,
    priority_pending: &mut bool,
) -> ItemView<'a> {
    let image = if request.show_image {
        item.thumbnail.as_ref().and_then(|thumb| {
            let source = thumb
                .source(&request.image_size)
                .filter(|source| !text::esc_url(&source.url).is_empty())?;
            Some(ImageView {
                src: &source.url,
                alt: &thumb.alt,
                width: source.width,
                height: source.height,
                eager: std::mem::take(priority_pending),
            })
        })
    } else {
        None
    };

    let date = request.show_date.then(|| DateView {
        iso: item.date.to_rfc3339(),
        text: item.date.format(DATE_FORMAT).to_string(),
    });

    let excerpt = request.show_excerpt.then(|| {
        text::trim_words(
            item.summary_source(),
            request.excerpt_length as usize,
            ELLIPSIS,
        )
    });

    ItemView {
        permalink: &item.permalink,
        title: text::decode_entities(&item.title),
        image,
        date,
        excerpt,
    }
}
