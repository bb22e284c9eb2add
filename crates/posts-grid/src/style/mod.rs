//! CSS generation.
//!
//! - [`compile_global_css`]: the site-wide stylesheet derived from
//!   [`Settings`](crate::settings::Settings), and [`head_style_block`] which
//!   wraps it for the page head.
//! - [`compile_inline_overrides`]: the per-grid `style` attribute.
//! - [`preview_script`]: live bindings for the settings preview.

mod global;
mod inline;
mod preview;
mod sheet;

pub use global::{compile_global_css, head_style_block, VERSION};
pub use inline::compile_inline_overrides;
pub use preview::preview_script;
