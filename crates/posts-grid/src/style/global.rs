//! The site-wide stylesheet and its page-head wrapper.

use super::sheet::{Rule, Stylesheet};
use crate::coerce::format_number;
use crate::settings::Settings;

/// Crate version, stamped into the head style block.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compiles the site-wide stylesheet for `settings`.
///
/// The output depends only on `settings`: identical settings always give
/// byte-identical CSS. Color properties are omitted entirely when the
/// corresponding setting is empty.
pub fn compile_global_css(settings: &Settings) -> String {
    stylesheet(settings).to_string()
}

/// The global stylesheet wrapped for embedding in the page head.
pub fn head_style_block(settings: &Settings) -> String {
    format!(
        "<style id=\"posts-grid-styles\">\n/* Posts Grid - Dynamic Styles (v{}) */\n{}</style>\n",
        VERSION,
        compile_global_css(settings)
    )
}

fn stylesheet(s: &Settings) -> Stylesheet {
    let px = |v: u32| format!("{}px", v);
    let rem = |v: f64| format!("{}rem", format_number(v));

    let mut sheet = Stylesheet::new().rule(
        Rule::new(".posts-grid-wrap")
            .decl("display", "grid")
            .decl("gap", rem(s.grid_gap))
            .decl("margin", "1.5rem 0"),
    );

    for n in 1..=4 {
        let template = if n == 1 {
            "1fr".to_string()
        } else {
            format!("repeat({}, 1fr)", n)
        };
        sheet = sheet.rule(
            Rule::new(format!(".posts-grid-cols-{}", n)).decl("grid-template-columns", template),
        );
    }

    sheet
        .rule(Rule::new(".posts-grid-list").decl("grid-template-columns", "1fr !important"))
        .rule(
            Rule::new(".posts-grid-list .posts-grid-item")
                .decl("flex-direction", "row")
                .decl("gap", "1rem"),
        )
        .rule(Rule::new(".posts-grid-list .posts-grid-image").decl("flex", "0 0 200px"))
        .media(
            "(max-width: 768px)",
            vec![
                Rule::new(".posts-grid-cols-2")
                    .or(".posts-grid-cols-3")
                    .or(".posts-grid-cols-4")
                    .decl("grid-template-columns", "1fr"),
                Rule::new(".posts-grid-list .posts-grid-item").decl("flex-direction", "column"),
                Rule::new(".posts-grid-list .posts-grid-image").decl("flex", "none"),
            ],
        )
        .media(
            "(min-width: 769px) and (max-width: 1024px)",
            vec![Rule::new(".posts-grid-cols-3")
                .or(".posts-grid-cols-4")
                .decl("grid-template-columns", "repeat(2, 1fr)")],
        )
        .rule(
            Rule::new(".posts-grid-item")
                .decl("display", "flex")
                .decl("flex-direction", "column"),
        )
        .rule(
            Rule::new(".posts-grid-image")
                .decl("display", "block")
                .decl("overflow", "hidden")
                .decl("border-radius", px(s.border_radius)),
        )
        .rule(
            Rule::new(".posts-grid-image img")
                .decl("width", "100%")
                .decl("height", "auto")
                .decl("aspect-ratio", s.image_ratio.css_value())
                .decl("object-fit", s.image_ratio.object_fit())
                .decl("transition", "transform 0.3s ease"),
        )
        .rule(Rule::new(".posts-grid-image:hover img").decl("transform", "scale(1.03)"))
        .rule(Rule::new(".posts-grid-content").decl("padding", format!("{} 0", rem(s.content_padding))))
        .rule(
            Rule::new(".posts-grid-title")
                .decl("margin", "0 0 0.5rem 0")
                .decl("font-size", px(s.title_size))
                .decl("font-weight", s.title_weight)
                .decl("line-height", format_number(s.title_line_height)),
        )
        .rule(
            Rule::new(".posts-grid-title a")
                .decl("text-decoration", "none")
                .decl_opt("color", s.title_color.as_ref()),
        )
        .rule(
            Rule::new(".posts-grid-title a:hover")
                .decl("text-decoration", "underline")
                .decl_opt("color", s.title_hover_color.as_ref()),
        )
        .rule(
            Rule::new(".posts-grid-date")
                .decl("display", "block")
                .decl("font-size", px(s.date_size))
                .decl_opt("color", s.date_color.as_ref())
                .decl("margin-bottom", "0.5rem"),
        )
        .rule(
            Rule::new(".posts-grid-excerpt")
                .decl("font-size", px(s.excerpt_size))
                .decl("line-height", format_number(s.excerpt_line_height))
                .decl_opt("color", s.excerpt_color.as_ref())
                .decl("margin", "0"),
        )
}
