//! Declarative descriptor table for the stored settings.
//!
//! Every setting is a [`Field`]. A field knows its option name, its kind,
//! its default, how to read a stored value (strictly: malformed values are
//! rejected so the caller falls back to the default) and how to sanitize a
//! value on its way into the store (leniently, the way the settings screen
//! normalizes input).

use serde::Serialize;

use super::store::OptionValue;
use super::types::{Columns, FontWeight, HexColor, ImageRatio};
use super::Settings;
use crate::coerce;

/// Prefix shared by every option name.
pub const OPTION_PREFIX: &str = "posts_grid_";

/// Value shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-negative integer (pixels, word counts).
    Int,
    /// Non-negative decimal (line heights, rem lengths).
    Float,
    Bool,
    /// Hex color; empty means "inherit from the theme".
    Color,
    Weight,
    Ratio,
    Columns,
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(u32),
    Float(f64),
    Bool(bool),
    Color(Option<HexColor>),
    Weight(FontWeight),
    Ratio(ImageRatio),
    Columns(Columns),
}

impl FieldValue {
    /// The representation written to the option store.
    pub fn to_option(&self) -> OptionValue {
        match self {
            FieldValue::Int(v) => OptionValue::Int((*v).into()),
            FieldValue::Float(v) => OptionValue::Float(*v),
            FieldValue::Bool(v) => OptionValue::Bool(*v),
            FieldValue::Color(None) => OptionValue::Str(String::new()),
            FieldValue::Color(Some(c)) => OptionValue::Str(c.to_string()),
            FieldValue::Weight(w) => OptionValue::Str(w.as_str().to_string()),
            FieldValue::Ratio(r) => OptionValue::Str(r.token().to_string()),
            FieldValue::Columns(c) => OptionValue::Str(c.to_string()),
        }
    }
}

/// One stored setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TitleSize,
    TitleWeight,
    TitleLineHeight,
    ExcerptSize,
    ExcerptLineHeight,
    DateSize,
    GridGap,
    ImageRatio,
    BorderRadius,
    ContentPadding,
    TitleColor,
    TitleHoverColor,
    ExcerptColor,
    DateColor,
    DefaultColumns,
    DefaultShowExcerpt,
    DefaultShowDate,
    DefaultShowImage,
    DefaultExcerptLength,
}

impl Field {
    /// Every field, in settings-screen order.
    pub const ALL: [Field; 19] = [
        Field::TitleSize,
        Field::TitleWeight,
        Field::TitleLineHeight,
        Field::ExcerptSize,
        Field::ExcerptLineHeight,
        Field::DateSize,
        Field::GridGap,
        Field::ImageRatio,
        Field::BorderRadius,
        Field::ContentPadding,
        Field::TitleColor,
        Field::TitleHoverColor,
        Field::ExcerptColor,
        Field::DateColor,
        Field::DefaultColumns,
        Field::DefaultShowExcerpt,
        Field::DefaultShowDate,
        Field::DefaultShowImage,
        Field::DefaultExcerptLength,
    ];

    /// Short field name, e.g. `title_size`.
    pub fn name(self) -> &'static str {
        match self {
            Field::TitleSize => "title_size",
            Field::TitleWeight => "title_weight",
            Field::TitleLineHeight => "title_line_height",
            Field::ExcerptSize => "excerpt_size",
            Field::ExcerptLineHeight => "excerpt_line_height",
            Field::DateSize => "date_size",
            Field::GridGap => "grid_gap",
            Field::ImageRatio => "image_ratio",
            Field::BorderRadius => "border_radius",
            Field::ContentPadding => "content_padding",
            Field::TitleColor => "title_color",
            Field::TitleHoverColor => "title_hover_color",
            Field::ExcerptColor => "excerpt_color",
            Field::DateColor => "date_color",
            Field::DefaultColumns => "default_columns",
            Field::DefaultShowExcerpt => "default_show_excerpt",
            Field::DefaultShowDate => "default_show_date",
            Field::DefaultShowImage => "default_show_image",
            Field::DefaultExcerptLength => "default_excerpt_length",
        }
    }

    /// Option name in the store, e.g. `posts_grid_title_size`.
    pub fn option_name(self) -> &'static str {
        match self {
            Field::TitleSize => "posts_grid_title_size",
            Field::TitleWeight => "posts_grid_title_weight",
            Field::TitleLineHeight => "posts_grid_title_line_height",
            Field::ExcerptSize => "posts_grid_excerpt_size",
            Field::ExcerptLineHeight => "posts_grid_excerpt_line_height",
            Field::DateSize => "posts_grid_date_size",
            Field::GridGap => "posts_grid_grid_gap",
            Field::ImageRatio => "posts_grid_image_ratio",
            Field::BorderRadius => "posts_grid_border_radius",
            Field::ContentPadding => "posts_grid_content_padding",
            Field::TitleColor => "posts_grid_title_color",
            Field::TitleHoverColor => "posts_grid_title_hover_color",
            Field::ExcerptColor => "posts_grid_excerpt_color",
            Field::DateColor => "posts_grid_date_color",
            Field::DefaultColumns => "posts_grid_default_columns",
            Field::DefaultShowExcerpt => "posts_grid_default_show_excerpt",
            Field::DefaultShowDate => "posts_grid_default_show_date",
            Field::DefaultShowImage => "posts_grid_default_show_image",
            Field::DefaultExcerptLength => "posts_grid_default_excerpt_length",
        }
    }

    /// Looks a field up by short name or option name.
    pub fn from_name(name: &str) -> Option<Field> {
        let short = name.strip_prefix(OPTION_PREFIX).unwrap_or(name);
        Field::ALL.into_iter().find(|f| f.name() == short)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::TitleSize
            | Field::ExcerptSize
            | Field::DateSize
            | Field::BorderRadius
            | Field::DefaultExcerptLength => FieldKind::Int,
            Field::TitleLineHeight
            | Field::ExcerptLineHeight
            | Field::GridGap
            | Field::ContentPadding => FieldKind::Float,
            Field::TitleColor | Field::TitleHoverColor | Field::ExcerptColor | Field::DateColor => {
                FieldKind::Color
            }
            Field::DefaultShowExcerpt | Field::DefaultShowDate | Field::DefaultShowImage => {
                FieldKind::Bool
            }
            Field::TitleWeight => FieldKind::Weight,
            Field::ImageRatio => FieldKind::Ratio,
            Field::DefaultColumns => FieldKind::Columns,
        }
    }

    /// The hard-coded default.
    pub fn default_value(self) -> FieldValue {
        Settings::default().get(self)
    }

    /// Input bounds offered by the settings screen for numeric fields.
    ///
    /// Informational: stored values outside these bounds are still honored.
    pub fn input_range(self) -> Option<(f64, f64)> {
        match self {
            Field::TitleSize => Some((12.0, 72.0)),
            Field::TitleLineHeight => Some((0.8, 2.5)),
            Field::ExcerptSize => Some((10.0, 36.0)),
            Field::ExcerptLineHeight => Some((1.0, 2.5)),
            Field::DateSize => Some((10.0, 24.0)),
            Field::GridGap => Some((0.5, 4.0)),
            Field::BorderRadius => Some((0.0, 30.0)),
            Field::ContentPadding => Some((0.0, 3.0)),
            Field::DefaultExcerptLength => Some((5.0, 100.0)),
            _ => None,
        }
    }

    /// Whether the live preview can restyle this field without a reload.
    pub fn live_preview(self) -> bool {
        !matches!(
            self,
            Field::DefaultColumns
                | Field::DefaultShowExcerpt
                | Field::DefaultShowDate
                | Field::DefaultShowImage
                | Field::DefaultExcerptLength
        )
    }

    /// Reads a stored value.
    ///
    /// Returns `None` when the value is malformed for this field, in which
    /// case the resolver keeps the default.
    pub fn read(self, raw: &OptionValue) -> Option<FieldValue> {
        match self.kind() {
            FieldKind::Int => read_uint(raw).map(FieldValue::Int),
            FieldKind::Float => read_float(raw).map(FieldValue::Float),
            FieldKind::Bool => read_bool(raw).map(FieldValue::Bool),
            FieldKind::Color => match raw {
                OptionValue::Str(s) if s.trim().is_empty() => Some(FieldValue::Color(None)),
                OptionValue::Str(s) => HexColor::parse(s).map(|c| FieldValue::Color(Some(c))),
                _ => None,
            },
            FieldKind::Weight => FontWeight::parse(&raw.to_string()).map(FieldValue::Weight),
            FieldKind::Ratio => match raw {
                OptionValue::Str(s) => ImageRatio::parse(s).map(FieldValue::Ratio),
                _ => None,
            },
            FieldKind::Columns => match raw {
                OptionValue::Int(n) => u8::try_from(*n)
                    .ok()
                    .and_then(Columns::new)
                    .map(FieldValue::Columns),
                OptionValue::Str(s) => Columns::parse(s).map(FieldValue::Columns),
                _ => None,
            },
        }
    }

    /// Normalizes a value submitted from the settings screen.
    ///
    /// Enumerated fields fall back to their default, numbers are parsed
    /// permissively (garbage becomes zero), booleans follow truthiness.
    /// Returns `None` when the value must be rejected outright (a color
    /// that is neither empty nor a hex color).
    pub fn sanitize(self, raw: &OptionValue) -> Option<OptionValue> {
        let value = match self.kind() {
            FieldKind::Int => {
                let n = match raw {
                    OptionValue::Int(i) => *i,
                    OptionValue::Float(f) => f.trunc() as i64,
                    OptionValue::Bool(b) => i64::from(*b),
                    OptionValue::Str(s) => coerce::int_value(s),
                };
                OptionValue::Int(n.saturating_abs())
            }
            FieldKind::Float => OptionValue::Float(match raw {
                OptionValue::Int(i) => *i as f64,
                OptionValue::Float(f) if f.is_finite() => *f,
                OptionValue::Float(_) => 0.0,
                OptionValue::Bool(b) => f64::from(u8::from(*b)),
                OptionValue::Str(s) => coerce::float_value(s),
            }),
            FieldKind::Bool => OptionValue::Bool(truthy(raw)),
            FieldKind::Color => match raw {
                OptionValue::Str(s) if s.trim().is_empty() => OptionValue::Str(String::new()),
                OptionValue::Str(s) => OptionValue::Str(HexColor::parse(s)?.to_string()),
                _ => return None,
            },
            FieldKind::Weight | FieldKind::Ratio | FieldKind::Columns => self
                .read(raw)
                .unwrap_or_else(|| self.default_value())
                .to_option(),
        };
        Some(value)
    }
}

fn read_uint(raw: &OptionValue) -> Option<u32> {
    let n = match raw {
        OptionValue::Int(i) => *i,
        OptionValue::Float(f) if f.is_finite() => f.trunc() as i64,
        OptionValue::Str(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => s.parse::<f64>().ok().filter(|f| f.is_finite())?.trunc() as i64,
            }
        }
        _ => return None,
    };
    u32::try_from(n).ok()
}

fn read_float(raw: &OptionValue) -> Option<f64> {
    let f = match raw {
        OptionValue::Int(i) => *i as f64,
        OptionValue::Float(f) => *f,
        OptionValue::Str(s) => s.trim().parse::<f64>().ok()?,
        OptionValue::Bool(_) => return None,
    };
    (f.is_finite() && f >= 0.0).then_some(f)
}

fn read_bool(raw: &OptionValue) -> Option<bool> {
    match raw {
        OptionValue::Bool(b) => Some(*b),
        OptionValue::Int(i) => Some(*i != 0),
        OptionValue::Float(f) => Some(*f != 0.0),
        OptionValue::Str(s) => coerce::parse_flag(s),
    }
}

/// Loose truthiness: false, zero, `""` and `"0"` are false.
fn truthy(raw: &OptionValue) -> bool {
    match raw {
        OptionValue::Bool(b) => *b,
        OptionValue::Int(i) => *i != 0,
        OptionValue::Float(f) => *f != 0.0,
        OptionValue::Str(s) => !(s.is_empty() || s == "0"),
    }
}
