//! Page-level integration: directive expansion and render lifecycle.

use posts_grid_shortcode::ShortcodeParser;

use crate::content::ContentRepository;
use crate::error::Result;
use crate::render::GridRenderer;
use crate::request::GridRequest;
use crate::settings::{resolve, SettingsStore};
use crate::style::head_style_block;
use crate::tracker::DuplicateTracker;

/// Directive names that render a grid. `inc_posts` is the legacy alias.
pub const DIRECTIVES: [&str; 2] = ["posts_grid", "inc_posts"];

/// Renders grids embedded in page content.
///
/// Owns the page's [`DuplicateTracker`]; every grid expanded between two
/// calls to [`begin`](Self::begin) shares it, so later grids skip what
/// earlier ones showed.
pub struct PageRenderer<'a> {
    store: &'a dyn SettingsStore,
    grids: GridRenderer<'a>,
    parser: ShortcodeParser,
    tracker: DuplicateTracker,
}

impl<'a> PageRenderer<'a> {
    pub fn new(store: &'a dyn SettingsStore, repository: &'a dyn ContentRepository) -> Result<Self> {
        Ok(Self {
            store,
            grids: GridRenderer::new(store, repository)?,
            parser: ShortcodeParser::new(DIRECTIVES),
            tracker: DuplicateTracker::new(),
        })
    }

    /// Starts a new page render.
    pub fn begin(&mut self) {
        self.tracker.reset();
    }

    /// The `<style>` block for the page head.
    pub fn head_styles(&self) -> String {
        head_style_block(&resolve(self.store))
    }

    /// Replaces every grid directive in `content` with its markup, in
    /// document order. Other text, including unknown directives, is kept
    /// as is.
    pub fn expand(&mut self, content: &str) -> Result<String> {
        let settings = resolve(self.store);
        let grids = &self.grids;
        let tracker = &mut self.tracker;
        self.parser.try_expand(content, |code| {
            tracing::debug!(directive = code.name, "expanding grid directive");
            let request = GridRequest::from_attributes(&code.attrs, &settings);
            grids.render_request(&request, tracker)
        })
    }

    pub fn tracker(&self) -> &DuplicateTracker {
        &self.tracker
    }
}
