//! Grid markup.
//!
//! [`GridRenderer`] runs one grid end to end: resolve settings, parse the
//! request, build and execute the query, record emitted items, and render
//! the markup through an auto-escaping HTML template.

mod engine;
mod grid;

pub use grid::{GridRenderer, EMPTY_MARKER};
