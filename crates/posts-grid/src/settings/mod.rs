//! Site-wide settings: storage, field table and resolution.
//!
//! Settings are kept in an external flat option store, one option per
//! field. [`resolve`] reads every field and produces a fully populated
//! [`Settings`]; missing or malformed values fall back to the field's
//! default so rendering never sees an invalid value.
//!
//! The administrative side writes through [`write_setting`], which applies
//! the same normalization as the settings screen, and manages the option
//! lifecycle with [`install_defaults`], [`uninstall`] and [`uninstall_all`].

mod field;
mod store;
mod types;

pub use field::{Field, FieldKind, FieldValue, OPTION_PREFIX};
pub use store::{MemoryStore, OptionValue, SettingsStore};
pub use types::{Columns, FontWeight, HexColor, ImageRatio};

use serde::Serialize;

/// Resolved, typed settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Title font size in px.
    pub title_size: u32,
    pub title_weight: FontWeight,
    pub title_line_height: f64,
    /// Excerpt font size in px.
    pub excerpt_size: u32,
    pub excerpt_line_height: f64,
    /// Date font size in px.
    pub date_size: u32,
    /// Gap between items in rem.
    pub grid_gap: f64,
    pub image_ratio: ImageRatio,
    /// Image corner radius in px.
    pub border_radius: u32,
    /// Padding around item text in rem.
    pub content_padding: f64,
    /// `None` inherits the theme color.
    pub title_color: Option<HexColor>,
    pub title_hover_color: Option<HexColor>,
    pub excerpt_color: Option<HexColor>,
    pub date_color: Option<HexColor>,
    pub default_columns: Columns,
    pub default_show_excerpt: bool,
    pub default_show_date: bool,
    pub default_show_image: bool,
    /// Excerpt length in words.
    pub default_excerpt_length: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title_size: 28,
            title_weight: FontWeight::Bold,
            title_line_height: 1.2,
            excerpt_size: 18,
            excerpt_line_height: 1.6,
            date_size: 14,
            grid_gap: 1.5,
            image_ratio: ImageRatio::Widescreen,
            border_radius: 4,
            content_padding: 0.75,
            title_color: None,
            title_hover_color: None,
            excerpt_color: HexColor::parse("#444444"),
            date_color: HexColor::parse("#666666"),
            default_columns: Columns::default(),
            default_show_excerpt: true,
            default_show_date: true,
            default_show_image: true,
            default_excerpt_length: 25,
        }
    }
}

impl Settings {
    /// The current value of `field`.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::TitleSize => FieldValue::Int(self.title_size),
            Field::TitleWeight => FieldValue::Weight(self.title_weight),
            Field::TitleLineHeight => FieldValue::Float(self.title_line_height),
            Field::ExcerptSize => FieldValue::Int(self.excerpt_size),
            Field::ExcerptLineHeight => FieldValue::Float(self.excerpt_line_height),
            Field::DateSize => FieldValue::Int(self.date_size),
            Field::GridGap => FieldValue::Float(self.grid_gap),
            Field::ImageRatio => FieldValue::Ratio(self.image_ratio),
            Field::BorderRadius => FieldValue::Int(self.border_radius),
            Field::ContentPadding => FieldValue::Float(self.content_padding),
            Field::TitleColor => FieldValue::Color(self.title_color.clone()),
            Field::TitleHoverColor => FieldValue::Color(self.title_hover_color.clone()),
            Field::ExcerptColor => FieldValue::Color(self.excerpt_color.clone()),
            Field::DateColor => FieldValue::Color(self.date_color.clone()),
            Field::DefaultColumns => FieldValue::Columns(self.default_columns),
            Field::DefaultShowExcerpt => FieldValue::Bool(self.default_show_excerpt),
            Field::DefaultShowDate => FieldValue::Bool(self.default_show_date),
            Field::DefaultShowImage => FieldValue::Bool(self.default_show_image),
            Field::DefaultExcerptLength => FieldValue::Int(self.default_excerpt_length),
        }
    }

    /// Sets `field` to `value`.
    ///
    /// Returns `false`, leaving the settings untouched, when the value's
    /// shape does not match the field.
    pub fn apply(&mut self, field: Field, value: FieldValue) -> bool {
        match (field, value) {
            (Field::TitleSize, FieldValue::Int(v)) => self.title_size = v,
            (Field::TitleWeight, FieldValue::Weight(v)) => self.title_weight = v,
            (Field::TitleLineHeight, FieldValue::Float(v)) => self.title_line_height = v,
            (Field::ExcerptSize, FieldValue::Int(v)) => self.excerpt_size = v,
            (Field::ExcerptLineHeight, FieldValue::Float(v)) => self.excerpt_line_height = v,
            (Field::DateSize, FieldValue::Int(v)) => self.date_size = v,
            (Field::GridGap, FieldValue::Float(v)) => self.grid_gap = v,
            (Field::ImageRatio, FieldValue::Ratio(v)) => self.image_ratio = v,
            (Field::BorderRadius, FieldValue::Int(v)) => self.border_radius = v,
            (Field::ContentPadding, FieldValue::Float(v)) => self.content_padding = v,
            (Field::TitleColor, FieldValue::Color(v)) => self.title_color = v,
            (Field::TitleHoverColor, FieldValue::Color(v)) => self.title_hover_color = v,
            (Field::ExcerptColor, FieldValue::Color(v)) => self.excerpt_color = v,
            (Field::DateColor, FieldValue::Color(v)) => self.date_color = v,
            (Field::DefaultColumns, FieldValue::Columns(v)) => self.default_columns = v,
            (Field::DefaultShowExcerpt, FieldValue::Bool(v)) => self.default_show_excerpt = v,
            (Field::DefaultShowDate, FieldValue::Bool(v)) => self.default_show_date = v,
            (Field::DefaultShowImage, FieldValue::Bool(v)) => self.default_show_image = v,
            (Field::DefaultExcerptLength, FieldValue::Int(v)) => self.default_excerpt_length = v,
            _ => return false,
        }
        true
    }
}

/// Reads every field from `store`.
///
/// Never fails: absent options keep their default, and so do stored values
/// that cannot be read as the field's type.
pub fn resolve(store: &dyn SettingsStore) -> Settings {
    let mut settings = Settings::default();
    for field in Field::ALL {
        let Some(raw) = store.get(field.option_name()) else {
            continue;
        };
        match field.read(&raw) {
            Some(value) => {
                settings.apply(field, value);
            }
            None => tracing::debug!(
                option = field.option_name(),
                value = %raw,
                "malformed stored setting, using default"
            ),
        }
    }
    settings
}

/// Normalizes `raw` for `field` and stores it.
///
/// Returns `false` when the value was rejected (an invalid color); the
/// previously stored value is kept in that case.
pub fn write_setting(store: &mut dyn SettingsStore, field: Field, raw: &OptionValue) -> bool {
    match field.sanitize(raw) {
        Some(value) => {
            store.set(field.option_name(), value);
            true
        }
        None => {
            tracing::debug!(option = field.option_name(), value = %raw, "rejected setting");
            false
        }
    }
}

/// Stores the default for every option that is not already present.
///
/// Existing values are never overwritten. Returns the number of options
/// added.
pub fn install_defaults(store: &mut dyn SettingsStore) -> usize {
    let mut added = 0;
    for field in Field::ALL {
        if !store.contains(field.option_name()) {
            store.set(field.option_name(), field.default_value().to_option());
            added += 1;
        }
    }
    added
}

/// Removes every option owned by the grid. Returns the number removed.
pub fn uninstall(store: &mut dyn SettingsStore) -> usize {
    Field::ALL
        .iter()
        .filter_map(|field| store.remove(field.option_name()))
        .count()
}

/// Runs [`uninstall`] against each store of a multi-site collection.
pub fn uninstall_all<'a, S>(stores: impl IntoIterator<Item = &'a mut S>) -> usize
where
    S: SettingsStore + 'a,
{
    stores.into_iter().map(|store| uninstall(store)).sum()
}
