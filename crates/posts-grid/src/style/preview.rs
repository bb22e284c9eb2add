//! Live-preview bindings for the settings screen.

use crate::settings::{Field, ImageRatio};

/// How a setting is reflected on the page while it is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Sets `property` to the new value followed by `suffix`.
    Css {
        selector: &'static str,
        property: &'static str,
        suffix: &'static str,
    },
    /// Sets `color`, clearing it when the value is empty.
    Color { selector: &'static str },
    /// Sets aspect ratio and image fitting from a ratio token.
    Ratio,
    /// Hover colors cannot be set inline; the value is stashed on the
    /// title links for the stylesheet refresh.
    HoverColor,
}

fn binding(field: Field) -> Option<Binding> {
    let css = |selector: &'static str, property: &'static str, suffix: &'static str| Binding::Css {
        selector,
        property,
        suffix,
    };
    Some(match field {
        Field::TitleSize => css(".posts-grid-title", "font-size", "px"),
        Field::TitleWeight => css(".posts-grid-title", "font-weight", ""),
        Field::TitleLineHeight => css(".posts-grid-title", "line-height", ""),
        Field::ExcerptSize => css(".posts-grid-excerpt", "font-size", "px"),
        Field::ExcerptLineHeight => css(".posts-grid-excerpt", "line-height", ""),
        Field::DateSize => css(".posts-grid-date", "font-size", "px"),
        Field::GridGap => css(".posts-grid-wrap", "gap", "rem"),
        Field::BorderRadius => css(".posts-grid-image", "border-radius", "px"),
        Field::ContentPadding => css(".posts-grid-content", "padding", "rem 0"),
        Field::ImageRatio => Binding::Ratio,
        Field::TitleColor => Binding::Color {
            selector: ".posts-grid-title a",
        },
        Field::TitleHoverColor => Binding::HoverColor,
        Field::ExcerptColor => Binding::Color {
            selector: ".posts-grid-excerpt",
        },
        Field::DateColor => Binding::Color {
            selector: ".posts-grid-date",
        },
        Field::DefaultColumns
        | Field::DefaultShowExcerpt
        | Field::DefaultShowDate
        | Field::DefaultShowImage
        | Field::DefaultExcerptLength => return None,
    })
}

/// The live-preview script for the settings preview.
///
/// Binds every live field so edits restyle the page without a reload.
/// The ratio binding uses the same token mapping as the stylesheet.
pub fn preview_script() -> String {
    let mut js = String::from(
        "<script>\n(function($) {\n  if (typeof wp === 'undefined' || typeof wp.customize === 'undefined') return;\n",
    );
    for field in Field::ALL {
        if let Some(binding) = binding(field) {
            push_binding(&mut js, field, binding);
        }
    }
    js.push_str("})(jQuery);\n</script>\n");
    js
}

fn push_binding(js: &mut String, field: Field, binding: Binding) {
    js.push_str(&format!(
        "  wp.customize('{}', function(value) {{\n",
        field.option_name()
    ));
    js.push_str("    value.bind(function(newval) {\n");
    match binding {
        Binding::Css {
            selector,
            property,
            suffix,
        } => {
            let value = if suffix.is_empty() {
                "newval".to_string()
            } else {
                format!("newval + '{}'", suffix)
            };
            js.push_str(&format!(
                "      $('{}').css('{}', {});\n",
                selector, property, value
            ));
        }
        Binding::Color { selector } => {
            js.push_str(&format!(
                "      $('{}').css('color', newval || '');\n",
                selector
            ));
        }
        Binding::Ratio => {
            let map = ImageRatio::ALL
                .iter()
                .map(|r| format!("'{}': '{}'", r.token(), r.css_value()))
                .collect::<Vec<_>>()
                .join(", ");
            js.push_str(&format!("      var ratioMap = {{{}}};\n", map));
            js.push_str(&format!(
                "      var ratio = ratioMap[newval] || '{}';\n",
                ImageRatio::default().css_value()
            ));
            js.push_str(&format!(
                "      var fit = newval === '{}' ? '{}' : '{}';\n",
                ImageRatio::Auto.token(),
                ImageRatio::Auto.object_fit(),
                ImageRatio::default().object_fit()
            ));
            js.push_str(
                "      $('.posts-grid-image img').css({'aspect-ratio': ratio, 'object-fit': fit});\n",
            );
        }
        Binding::HoverColor => {
            js.push_str("      $('.posts-grid-title a').data('hover-color', newval);\n");
        }
    }
    js.push_str("    });\n  });\n");
}
