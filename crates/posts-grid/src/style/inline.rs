//! Per-grid inline style overrides.

use crate::coerce::format_number;
use crate::request::StyleOverrides;

/// Inline declarations for a grid wrapper's `style` attribute.
///
/// Only the gap override is emitted; the empty string means no `style`
/// attribute at all.
pub fn compile_inline_overrides(overrides: &StyleOverrides) -> String {
    let mut declarations = Vec::new();
    if let Some(gap) = overrides.grid_gap {
        declarations.push(format!("gap: {}rem", format_number(gap)));
    }
    declarations.join("; ")
}
