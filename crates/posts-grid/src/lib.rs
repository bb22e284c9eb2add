//! # Posts Grid - Configurable Blog Post Grids
//!
//! `posts-grid` renders grids of post summaries from a content repository,
//! styled by site-wide settings and tunable per invocation, with duplicate
//! suppression across every grid on a page.
//!
//! ## Core Concepts
//!
//! - [`Settings`]: typed site-wide defaults, resolved from a flat
//!   [`SettingsStore`] by [`resolve`]
//! - [`GridRequest`]: the clamped, typed parameters of one grid invocation
//! - [`QuerySpec`]: what a grid asks the [`ContentRepository`] for, built by
//!   [`build_query`]
//! - [`DuplicateTracker`]: ids already shown during the current page render
//! - [`GridRenderer`]: runs one grid end to end and emits its markup
//! - [`PageRenderer`]: expands `[posts_grid]` directives in page content
//! - [`compile_global_css`] / [`compile_inline_overrides`]: stylesheet output
//!
//! ## Quick Start
//!
//! ```rust
//! use posts_grid::{MemoryRepository, MemoryStore, PageRenderer};
//!
//! let store = MemoryStore::new().with("posts_grid_default_columns", "3");
//! let repository = MemoryRepository::from_yaml(r#"
//! - id: 1
//!   title: Hello
//!   permalink: "https://example.com/hello"
//!   date: "2024-03-05T10:00:00+00:00"
//!   excerpt: "A first post"
//! "#).unwrap();
//!
//! let mut page = PageRenderer::new(&store, &repository).unwrap();
//! page.begin();
//! let html = page.expand("[posts_grid count=\"6\"]").unwrap();
//! assert!(html.contains("posts-grid-cols-3"));
//! assert!(html.contains(">Hello</a>"));
//! ```
//!
//! ## Error Handling
//!
//! Invalid input is never an error: attributes and stored settings are
//! clamped or defaulted, and an empty result renders [`EMPTY_MARKER`].
//! Failures of the content repository are returned unchanged inside
//! [`GridError::Repository`].

pub mod content;
pub mod error;
pub mod page;
pub mod query;
pub mod render;
pub mod request;
pub mod settings;
pub mod style;
pub mod text;
pub mod tracker;

mod coerce;
mod files;

pub use content::{
    ContentItem, ContentRepository, ImageSource, MemoryRepository, PostStatus, Thumbnail,
};
pub use error::{GridError, RepositoryError, Result};
pub use page::{PageRenderer, DIRECTIVES};
pub use query::{build_query, Dir, OrderBy, QuerySpec};
pub use render::{GridRenderer, EMPTY_MARKER};
pub use request::{GridRequest, Layout, StyleOverrides};
pub use settings::{
    install_defaults, resolve, uninstall, uninstall_all, write_setting, Columns, Field,
    FieldValue, FontWeight, HexColor, ImageRatio, MemoryStore, OptionValue, Settings,
    SettingsStore,
};
pub use style::{compile_global_css, compile_inline_overrides, head_style_block, preview_script};
pub use tracker::DuplicateTracker;

pub use posts_grid_shortcode::Attributes;
