//! Typed parameters for one grid invocation.
//!
//! Directive attributes arrive as text. [`GridRequest::from_attributes`]
//! parses them once, at the boundary: numbers are clamped into range,
//! enumerations fall back to safe defaults and flags become real booleans.
//! Nothing downstream ever sees an out-of-range or stringly-typed value.

use serde::Serialize;

use posts_grid_shortcode::Attributes;

use crate::coerce;
use crate::query::Dir;
use crate::settings::{Columns, FontWeight, HexColor, ImageRatio, Settings};
use crate::text::{sanitize_html_class, sanitize_key};

/// Item count bounds.
pub const COUNT_RANGE: (u32, u32) = (1, 50);
/// Excerpt length bounds, in words.
pub const EXCERPT_LENGTH_RANGE: (u32, u32) = (1, 100);

const DEFAULT_COUNT: u32 = 4;
const DEFAULT_IMAGE_SIZE: &str = "medium_large";
const DEFAULT_ORDER_BY: &str = "date";

/// How items are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    /// One item per row, image beside the text.
    List,
}

impl Layout {
    /// `list` selects [`Layout::List`]; anything else is a grid.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("list") {
            Layout::List
        } else {
            Layout::Grid
        }
    }
}

/// Per-invocation style overrides.
///
/// Only `grid_gap` currently reaches the output (as an inline declaration
/// on the wrapper). The remaining fields are accepted and typed but not
/// applied; [`unapplied`](Self::unapplied) reports which were supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleOverrides {
    pub title_size: Option<u32>,
    pub title_weight: Option<FontWeight>,
    pub title_color: Option<HexColor>,
    pub excerpt_size: Option<u32>,
    pub excerpt_color: Option<HexColor>,
    pub date_color: Option<HexColor>,
    /// Gap in rem.
    pub grid_gap: Option<f64>,
    pub image_ratio: Option<ImageRatio>,
}

impl StyleOverrides {
    /// Reads the override attributes. Values that do not parse are ignored.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let get = |name: &str| present(attrs.get(name));
        Self {
            title_size: get("title_size").and_then(parse_size),
            title_weight: get("title_weight").and_then(FontWeight::parse),
            title_color: get("title_color").and_then(HexColor::parse),
            excerpt_size: get("excerpt_size").and_then(parse_size),
            excerpt_color: get("excerpt_color").and_then(HexColor::parse),
            date_color: get("date_color").and_then(HexColor::parse),
            grid_gap: get("grid_gap")
                .and_then(coerce::leading_float)
                .filter(|gap| *gap > 0.0),
            image_ratio: get("image_ratio").and_then(ImageRatio::parse),
        }
    }

    /// Names of supplied overrides that have no effect on the output.
    pub fn unapplied(&self) -> Vec<&'static str> {
        let supplied = [
            ("title_size", self.title_size.is_some()),
            ("title_weight", self.title_weight.is_some()),
            ("title_color", self.title_color.is_some()),
            ("excerpt_size", self.excerpt_size.is_some()),
            ("excerpt_color", self.excerpt_color.is_some()),
            ("date_color", self.date_color.is_some()),
            ("image_ratio", self.image_ratio.is_some()),
        ];
        supplied
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The resolved parameters of one grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRequest {
    /// Number of items, within [`COUNT_RANGE`].
    pub count: u32,
    pub columns: Columns,
    pub offset: u32,
    pub exclude_categories: Vec<u64>,
    pub include_categories: Vec<u64>,
    /// Pinned ids, shown in this order.
    pub specific_posts: Vec<u64>,
    /// Skip items already shown by earlier grids on the page.
    pub exclude_displayed: bool,
    pub show_excerpt: bool,
    pub show_date: bool,
    pub show_image: bool,
    /// Words per excerpt, within [`EXCERPT_LENGTH_RANGE`].
    pub excerpt_length: u32,
    /// Named thumbnail size.
    pub image_size: String,
    pub layout: Layout,
    /// Wrapper id, already reduced to class characters.
    pub id: Option<String>,
    /// Extra wrapper class, already reduced to class characters.
    pub class: Option<String>,
    pub order_by: String,
    pub order: Dir,
    pub styles: StyleOverrides,
}

impl GridRequest {
    /// A request with no attributes: site defaults throughout.
    pub fn new(settings: &Settings) -> Self {
        Self {
            count: DEFAULT_COUNT,
            columns: settings.default_columns,
            offset: 0,
            exclude_categories: Vec::new(),
            include_categories: Vec::new(),
            specific_posts: Vec::new(),
            exclude_displayed: true,
            show_excerpt: settings.default_show_excerpt,
            show_date: settings.default_show_date,
            show_image: settings.default_show_image,
            excerpt_length: clamp_u32(
                settings.default_excerpt_length.into(),
                EXCERPT_LENGTH_RANGE,
            ),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            layout: Layout::Grid,
            id: None,
            class: None,
            order_by: DEFAULT_ORDER_BY.to_string(),
            order: Dir::Desc,
            styles: StyleOverrides::default(),
        }
    }

    /// Parses directive attributes on top of the site defaults.
    pub fn from_attributes(attrs: &Attributes, settings: &Settings) -> Self {
        let mut request = Self::new(settings);

        if let Some(v) = attrs.get("count") {
            request.count = clamp_u32(coerce::int_value(v), COUNT_RANGE);
        }
        if let Some(v) = attrs.get("columns") {
            request.columns = Columns::clamped(coerce::int_value(v));
        }
        if let Some(v) = attrs.get("offset") {
            request.offset = clamp_u32(coerce::int_value(v), (0, u32::MAX));
        }
        if let Some(v) = attrs.get("excerpt_length") {
            request.excerpt_length = clamp_u32(coerce::int_value(v), EXCERPT_LENGTH_RANGE);
        }

        request.exclude_categories = id_list(attrs.get("exclude_cats"));
        request.include_categories = id_list(attrs.get("include_cats"));
        request.specific_posts = id_list(attrs.get("specific_posts"));

        if let Some(v) = attrs.get("exclude_displayed") {
            request.exclude_displayed = flag(v);
        }
        if let Some(v) = attrs.get("show_excerpt") {
            request.show_excerpt = flag(v);
        }
        if let Some(v) = attrs.get("show_date") {
            request.show_date = flag(v);
        }
        if let Some(v) = attrs.get("show_image") {
            request.show_image = flag(v);
        }

        if let Some(size) = present(attrs.get("image_size")) {
            request.image_size = size.to_string();
        }
        if let Some(v) = attrs.get("layout") {
            request.layout = Layout::parse(v);
        }
        request.id = present(attrs.get("id"))
            .map(sanitize_html_class)
            .filter(|id| !id.is_empty());
        request.class = present(attrs.get("class"))
            .map(sanitize_html_class)
            .filter(|class| !class.is_empty());

        if let Some(v) = attrs.get("orderby") {
            let key = sanitize_key(v);
            if !key.is_empty() {
                request.order_by = key;
            }
        }
        if let Some(v) = attrs.get("order") {
            request.order = Dir::parse(v);
        }

        request.styles = StyleOverrides::from_attributes(attrs);
        request
    }
}

/// A directive flag: `true`, `1`, `yes` or `on` (any case) is true,
/// anything else false.
fn flag(value: &str) -> bool {
    coerce::parse_flag(value).unwrap_or(false)
}

/// Treats blank and `"0"` values as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "0")
}

fn parse_size(value: &str) -> Option<u32> {
    coerce::leading_int(value).and_then(|n| u32::try_from(n).ok())
}

fn clamp_u32(value: i64, (min, max): (u32, u32)) -> u32 {
    value.clamp(min.into(), max.into()) as u32
}

/// Splits a comma-separated id list, keeping positive integers only.
fn id_list(value: Option<&str>) -> Vec<u64> {
    value
        .unwrap_or_default()
        .split(',')
        .filter_map(coerce::leading_int)
        .filter_map(|n| u64::try_from(n).ok())
        .filter(|n| *n > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(attrs: &[(&str, &str)]) -> GridRequest {
        let attrs: Attributes = attrs.iter().copied().collect();
        GridRequest::from_attributes(&attrs, &Settings::default())
    }

    #[test]
    fn defaults_without_attributes() {
        let request = parse(&[]);
        assert_eq!(request, GridRequest::new(&Settings::default()));
        assert_eq!(request.count, 4);
        assert_eq!(request.columns.get(), 2);
        assert!(request.exclude_displayed);
        assert!(request.show_image && request.show_date && request.show_excerpt);
        assert_eq!(request.excerpt_length, 25);
        assert_eq!(request.image_size, "medium_large");
        assert_eq!(request.layout, Layout::Grid);
        assert_eq!(request.order_by, "date");
        assert_eq!(request.order, Dir::Desc);
        assert!(request.styles.is_empty());
    }

    #[test]
    fn columns_default_comes_from_settings() {
        let settings = Settings {
            default_columns: Columns::clamped(3),
            default_show_date: false,
            ..Settings::default()
        };
        let request = GridRequest::from_attributes(&Attributes::new(), &settings);
        assert_eq!(request.columns.get(), 3);
        assert!(!request.show_date);
    }

    #[test]
    fn documented_clamps() {
        assert_eq!(parse(&[("count", "0")]).count, 1);
        assert_eq!(parse(&[("count", "999")]).count, 50);
        assert_eq!(parse(&[("columns", "0")]).columns.get(), 1);
        assert_eq!(parse(&[("columns", "9")]).columns.get(), 4);
        assert_eq!(parse(&[("offset", "-3")]).offset, 0);
        assert_eq!(parse(&[("excerpt_length", "0")]).excerpt_length, 1);
        assert_eq!(parse(&[("excerpt_length", "500")]).excerpt_length, 100);
        assert_eq!(parse(&[("count", "six")]).count, 1);
        assert_eq!(parse(&[("count", "6 posts")]).count, 6);
    }

    #[test]
    fn flags_parse_at_the_boundary() {
        let request = parse(&[
            ("exclude_displayed", "false"),
            ("show_image", "0"),
            ("show_date", "TRUE"),
            ("show_excerpt", "maybe"),
        ]);
        assert!(!request.exclude_displayed);
        assert!(!request.show_image);
        assert!(request.show_date);
        assert!(!request.show_excerpt);
    }

    #[test]
    fn id_lists_keep_positive_integers() {
        let request = parse(&[
            ("specific_posts", "10, 20,,abc,-4,0,30"),
            ("exclude_cats", ""),
        ]);
        assert_eq!(request.specific_posts, vec![10, 20, 30]);
        assert!(request.exclude_categories.is_empty());
    }

    #[test]
    fn wrapper_id_and_class_are_sanitized() {
        let request = parse(&[("id", "featured posts"), ("class", "\"><script>")]);
        assert_eq!(request.id.as_deref(), Some("featuredposts"));
        assert_eq!(request.class.as_deref(), Some("script"));

        let request = parse(&[("id", "<>"), ("class", "")]);
        assert_eq!(request.id, None);
        assert_eq!(request.class, None);
    }

    #[test]
    fn enumerations_fall_back() {
        assert_eq!(parse(&[("layout", "list")]).layout, Layout::List);
        assert_eq!(parse(&[("layout", "masonry")]).layout, Layout::Grid);
        assert_eq!(parse(&[("order", "asc")]).order, Dir::Asc);
        assert_eq!(parse(&[("order", "sideways")]).order, Dir::Desc);
        assert_eq!(parse(&[("orderby", "")]).order_by, "date");
        assert_eq!(parse(&[("orderby", "menu_order")]).order_by, "menu_order");
    }

    #[test]
    fn style_overrides() {
        let request = parse(&[
            ("grid_gap", "2.5"),
            ("title_color", "#333"),
            ("title_size", "30"),
            ("excerpt_color", "not-a-color"),
            ("image_ratio", "1-1"),
        ]);
        let styles = &request.styles;
        assert_eq!(styles.grid_gap, Some(2.5));
        assert_eq!(styles.title_color, HexColor::parse("#333"));
        assert_eq!(styles.excerpt_color, None);
        assert_eq!(styles.unapplied(), vec!["title_size", "title_color", "image_ratio"]);
    }

    #[test]
    fn blank_or_zero_gap_is_absent() {
        assert_eq!(parse(&[("grid_gap", "")]).styles.grid_gap, None);
        assert_eq!(parse(&[("grid_gap", "0")]).styles.grid_gap, None);
        assert_eq!(parse(&[("grid_gap", "wide")]).styles.grid_gap, None);
        assert_eq!(parse(&[("grid_gap", "-1")]).styles.grid_gap, None);
        assert_eq!(parse(&[("grid_gap", "1rem")]).styles.grid_gap, Some(1.0));
    }

    proptest! {
        #[test]
        fn count_always_in_range(n in any::<i64>()) {
            let request = parse(&[("count", n.to_string().as_str())]);
            prop_assert!((1..=50).contains(&request.count));
            if (1..=50).contains(&n) {
                prop_assert_eq!(i64::from(request.count), n);
            }
        }

        #[test]
        fn columns_always_in_range(n in any::<i64>()) {
            let request = parse(&[("columns", n.to_string().as_str())]);
            prop_assert!((1..=4).contains(&request.columns.get()));
        }

        #[test]
        fn excerpt_length_always_in_range(raw in ".{0,12}") {
            let request = parse(&[("excerpt_length", raw.as_str())]);
            prop_assert!((1..=100).contains(&request.excerpt_length));
        }
    }
}
