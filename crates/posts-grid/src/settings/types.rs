//! Enumerated and validated setting values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coerce;

/// Title font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FontWeight {
    Normal,
    Medium,
    SemiBold,
    #[default]
    Bold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 4] = [
        FontWeight::Normal,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
    ];

    /// Parses `"400"`, `"500"`, `"600"` or `"700"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "400" => Some(FontWeight::Normal),
            "500" => Some(FontWeight::Medium),
            "600" => Some(FontWeight::SemiBold),
            "700" => Some(FontWeight::Bold),
            _ => None,
        }
    }

    /// The CSS `font-weight` value.
    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::Normal => "400",
            FontWeight::Medium => "500",
            FontWeight::SemiBold => "600",
            FontWeight::Bold => "700",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FontWeight> for String {
    fn from(value: FontWeight) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for FontWeight {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FontWeight::parse(&value).ok_or_else(|| format!("invalid font weight: {}", value))
    }
}

/// Thumbnail aspect ratio token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ImageRatio {
    /// `16-9`
    #[default]
    Widescreen,
    /// `4-3`
    Standard,
    /// `1-1`
    Square,
    /// `auto`: natural image proportions.
    Auto,
}

impl ImageRatio {
    pub const ALL: [ImageRatio; 4] = [
        ImageRatio::Widescreen,
        ImageRatio::Standard,
        ImageRatio::Square,
        ImageRatio::Auto,
    ];

    /// Parses `"16-9"`, `"4-3"`, `"1-1"` or `"auto"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "16-9" => Some(ImageRatio::Widescreen),
            "4-3" => Some(ImageRatio::Standard),
            "1-1" => Some(ImageRatio::Square),
            "auto" => Some(ImageRatio::Auto),
            _ => None,
        }
    }

    /// The stored token.
    pub fn token(self) -> &'static str {
        match self {
            ImageRatio::Widescreen => "16-9",
            ImageRatio::Standard => "4-3",
            ImageRatio::Square => "1-1",
            ImageRatio::Auto => "auto",
        }
    }

    /// The CSS `aspect-ratio` value.
    pub fn css_value(self) -> &'static str {
        match self {
            ImageRatio::Widescreen => "16/9",
            ImageRatio::Standard => "4/3",
            ImageRatio::Square => "1/1",
            ImageRatio::Auto => "auto",
        }
    }

    /// The CSS `object-fit` value: natural-ratio images are contained,
    /// fixed ratios are cropped to cover.
    pub fn object_fit(self) -> &'static str {
        match self {
            ImageRatio::Auto => "contain",
            _ => "cover",
        }
    }
}

impl fmt::Display for ImageRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<ImageRatio> for String {
    fn from(value: ImageRatio) -> Self {
        value.token().to_string()
    }
}

impl TryFrom<String> for ImageRatio {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ImageRatio::parse(&value).ok_or_else(|| format!("invalid image ratio: {}", value))
    }
}

/// Number of grid columns, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Columns(u8);

impl Columns {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Returns `Some` only for counts within `1..=4`.
    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Columns(n))
    }

    /// Clamps any integer into `1..=4`.
    pub fn clamped(n: i64) -> Self {
        Columns(n.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Parses an exact column count (`"1"` through `"4"`).
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Columns {
    fn default() -> Self {
        Columns(2)
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Columns> for u8 {
    fn from(value: Columns) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Columns {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Columns::new(value).ok_or_else(|| format!("columns must be 1-4, got {}", value))
    }
}

/// A `#rgb` or `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Accepts `#rgb` and `#rrggbb` (surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        coerce::is_hex_color(s).then(|| HexColor(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("invalid hex color: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_weight_tokens() {
        for weight in FontWeight::ALL {
            assert_eq!(FontWeight::parse(weight.as_str()), Some(weight));
        }
        assert_eq!(FontWeight::parse("800"), None);
        assert_eq!(FontWeight::parse("bold"), None);
        assert_eq!(FontWeight::default(), FontWeight::Bold);
    }

    #[test]
    fn ratio_maps_to_css() {
        assert_eq!(ImageRatio::Widescreen.css_value(), "16/9");
        assert_eq!(ImageRatio::Standard.css_value(), "4/3");
        assert_eq!(ImageRatio::Square.css_value(), "1/1");
        assert_eq!(ImageRatio::Auto.css_value(), "auto");
    }

    #[test]
    fn only_auto_ratio_is_contained() {
        for ratio in ImageRatio::ALL {
            let expected = if ratio == ImageRatio::Auto { "contain" } else { "cover" };
            assert_eq!(ratio.object_fit(), expected, "ratio {}", ratio);
        }
    }

    #[test]
    fn ratio_parse_round_trip() {
        for ratio in ImageRatio::ALL {
            assert_eq!(ImageRatio::parse(ratio.token()), Some(ratio));
        }
        assert_eq!(ImageRatio::parse("21-9"), None);
    }

    #[test]
    fn columns_bounds() {
        assert_eq!(Columns::new(0), None);
        assert_eq!(Columns::new(5), None);
        assert_eq!(Columns::new(3).map(Columns::get), Some(3));
        assert_eq!(Columns::clamped(0).get(), 1);
        assert_eq!(Columns::clamped(9).get(), 4);
        assert_eq!(Columns::clamped(-20).get(), 1);
        assert_eq!(Columns::parse(" 4 ").map(Columns::get), Some(4));
        assert_eq!(Columns::parse("two"), None);
        assert_eq!(Columns::default().get(), 2);
    }

    #[test]
    fn hex_color_validation() {
        assert_eq!(HexColor::parse("#333").unwrap().as_str(), "#333");
        assert_eq!(HexColor::parse(" #A0B0C0 ").unwrap().as_str(), "#A0B0C0");
        assert!(HexColor::parse("333333").is_none());
        assert!(HexColor::parse("").is_none());
        assert!(HexColor::parse("#33;x").is_none());
    }

    #[test]
    fn serde_uses_tokens() {
        assert_eq!(serde_json::to_string(&ImageRatio::Square).unwrap(), "\"1-1\"");
        assert_eq!(serde_json::to_string(&FontWeight::Medium).unwrap(), "\"500\"");
        assert_eq!(serde_json::to_string(&Columns::clamped(3)).unwrap(), "3");
        let ratio: ImageRatio = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(ratio, ImageRatio::Auto);
        assert!(serde_json::from_str::<Columns>("7").is_err());
    }
}
