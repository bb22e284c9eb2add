//! WordPress-style shortcode parser.
//!
//! This crate finds `[name attr="value"]` directives embedded in page content
//! and hands each one to a caller-supplied renderer. Only registered names are
//! recognized; anything else is passed through untouched, so prose that happens
//! to contain square brackets survives expansion.
//!
//! # Example
//!
//! ```rust
//! use posts_grid_shortcode::ShortcodeParser;
//!
//! let parser = ShortcodeParser::new(["posts_grid"]);
//! let output = parser.expand(r#"Intro [posts_grid count="3"] outro"#, |code| {
//!     format!("<grid {}>", code.attrs.get("count").unwrap_or("?"))
//! });
//! assert_eq!(output, "Intro <grid 3> outro");
//! ```
//!
//! # Syntax
//!
//! - `[name]` and `[name /]`: a directive without content
//! - `[name]content[/name]`: an enclosing directive
//! - `[[name]]`: an escaped directive, rendered as the literal `[name]`
//!
//! Attributes follow the WordPress rules: `key="value"`, `key='value'` and
//! `key=value` are named (keys are lower-cased), while bare or quoted values
//! without a key are positional.
//!
//! Directive names use `[A-Za-z0-9_-]+` and are matched case-sensitively.

use std::collections::{BTreeMap, HashSet};
use std::convert::Infallible;

/// Attributes attached to a directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    named: BTreeMap<String, String>,
    positional: Vec<String>,
}

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the attribute text found between the directive name and `]`.
    pub fn parse(text: &str) -> Self {
        let mut attrs = Self::new();
        let mut rest = text.trim_start();

        while !rest.is_empty() {
            if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
                let (value, after) = take_quoted(rest, quote);
                attrs.positional.push(value.to_string());
                rest = after.trim_start();
                continue;
            }

            let end = rest
                .find(|c: char| c.is_whitespace() || c == '=')
                .unwrap_or(rest.len());
            if end == 0 {
                // Stray `=` with no key: keep it as a positional token.
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                attrs.positional.push(rest[..end].to_string());
                rest = rest[end..].trim_start();
                continue;
            }

            let key = &rest[..end];
            let after_key = rest[end..].trim_start();
            match after_key.strip_prefix('=') {
                Some(value_text) if is_attribute_name(key) => {
                    let value_text = value_text.trim_start();
                    let (value, after) = match value_text.chars().next() {
                        Some(quote @ ('"' | '\'')) => take_quoted(value_text, quote),
                        _ => {
                            let end = value_text
                                .find(char::is_whitespace)
                                .unwrap_or(value_text.len());
                            (&value_text[..end], &value_text[end..])
                        }
                    };
                    attrs.insert(key, value);
                    rest = after.trim_start();
                }
                _ => {
                    attrs.positional.push(key.to_string());
                    rest = rest[end..].trim_start();
                }
            }
        }

        attrs
    }

    /// Returns the value of a named attribute (keys are case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns `true` if the named attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(&name.to_ascii_lowercase())
    }

    /// Sets a named attribute, replacing any earlier value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.named
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Values given without a key, in source order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Iterates named attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of named attributes.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// Returns `true` if there are no named or positional attributes.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

fn is_attribute_name(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Splits `s` (which starts with `quote`) into the quoted value and the rest.
///
/// An unterminated quote swallows the remainder of the text.
fn take_quoted(s: &str, quote: char) -> (&str, &str) {
    let body = &s[1..];
    match body.find(quote) {
        Some(idx) => (&body[..idx], &body[idx + 1..]),
        None => (body, ""),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A directive found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode<'a> {
    /// Directive name as written.
    pub name: &'a str,
    /// Parsed attributes.
    pub attrs: Attributes,
    /// Enclosed content for `[name]...[/name]` directives.
    pub content: Option<&'a str>,
    /// The full source text of the directive, including any closing tag.
    pub raw: &'a str,
}

/// A piece of parsed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, emitted unchanged.
    Text(&'a str),
    /// A registered directive.
    Shortcode(Shortcode<'a>),
}

/// Parser for a fixed set of registered directive names.
#[derive(Debug, Clone, Default)]
pub struct ShortcodeParser {
    names: HashSet<String>,
}

impl ShortcodeParser {
    /// Creates a parser recognizing the given directive names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Registers another directive name.
    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Returns `true` if `name` is a registered directive.
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Splits the input into literal text and directives.
    pub fn parse<'a>(&self, input: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;

        while let Some(offset) = input[pos..].find('[') {
            let open = pos + offset;

            if input[open + 1..].starts_with('[') {
                // `[[name]]` renders the inner directive literally.
                if let Some((_, end)) = self.scan(input, open + 1) {
                    if input[end..].starts_with(']') {
                        push_text(&mut segments, &input[text_start..open]);
                        push_text(&mut segments, &input[open + 1..end]);
                        pos = end + 1;
                        text_start = pos;
                        continue;
                    }
                }
                pos = open + 1;
                continue;
            }

            match self.scan(input, open) {
                Some((shortcode, end)) => {
                    push_text(&mut segments, &input[text_start..open]);
                    segments.push(Segment::Shortcode(shortcode));
                    pos = end;
                    text_start = end;
                }
                None => pos = open + 1,
            }
        }

        push_text(&mut segments, &input[text_start..]);
        segments
    }

    /// Replaces every directive with the renderer's output.
    pub fn expand<F>(&self, input: &str, mut render: F) -> String
    where
        F: FnMut(&Shortcode<'_>) -> String,
    {
        match self.try_expand(input, |code| Ok::<_, Infallible>(render(code))) {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// Like [`expand`](Self::expand), stopping at the first renderer error.
    pub fn try_expand<F, E>(&self, input: &str, mut render: F) -> Result<String, E>
    where
        F: FnMut(&Shortcode<'_>) -> Result<String, E>,
    {
        let mut output = String::with_capacity(input.len());
        for segment in self.parse(input) {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Shortcode(code) => output.push_str(&render(&code)?),
            }
        }
        Ok(output)
    }

    /// Tries to read a directive whose `[` is at byte `open`.
    ///
    /// Returns the directive and the byte offset just past it.
    fn scan<'a>(&self, input: &'a str, open: usize) -> Option<(Shortcode<'a>, usize)> {
        let rest = &input[open + 1..];
        let name_len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if name_len == 0 {
            return None;
        }

        let name = &rest[..name_len];
        if !self.names.contains(name) {
            return None;
        }

        let after_name = &rest[name_len..];
        match after_name.chars().next() {
            Some(c) if c.is_whitespace() || c == '/' || c == ']' => {}
            _ => return None,
        }

        let close = after_name.find(']')?;
        let tag_end = open + 1 + name_len + close + 1;
        let attr_text = after_name[..close].trim_end();
        let (attr_text, self_closing) = match attr_text.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (attr_text, false),
        };
        let attrs = Attributes::parse(attr_text);

        let (content, end) = if self_closing {
            (None, tag_end)
        } else {
            let closing = format!("[/{}]", name);
            match input[tag_end..].find(&closing) {
                Some(idx) => (
                    Some(&input[tag_end..tag_end + idx]),
                    tag_end + idx + closing.len(),
                ),
                None => (None, tag_end),
            }
        };

        Some((
            Shortcode {
                name,
                attrs,
                content,
                raw: &input[open..end],
            },
            end,
        ))
    }
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ShortcodeParser {
        ShortcodeParser::new(["posts_grid", "inc_posts"])
    }

    mod attributes {
        use super::*;

        #[test]
        fn double_quoted_values() {
            let attrs = Attributes::parse(r#"count="6" columns="3""#);
            assert_eq!(attrs.get("count"), Some("6"));
            assert_eq!(attrs.get("columns"), Some("3"));
            assert_eq!(attrs.len(), 2);
        }

        #[test]
        fn single_quoted_and_bare_values() {
            let attrs = Attributes::parse("layout='list' order=asc");
            assert_eq!(attrs.get("layout"), Some("list"));
            assert_eq!(attrs.get("order"), Some("asc"));
        }

        #[test]
        fn keys_are_lowercased() {
            let attrs = Attributes::parse(r#"Count="2""#);
            assert_eq!(attrs.get("count"), Some("2"));
            assert_eq!(attrs.get("COUNT"), Some("2"));
        }

        #[test]
        fn whitespace_around_equals() {
            let attrs = Attributes::parse(r#"count = "5""#);
            assert_eq!(attrs.get("count"), Some("5"));
        }

        #[test]
        fn values_keep_inner_spaces_and_commas() {
            let attrs = Attributes::parse(r#"specific_posts="10, 20,30" class="a b""#);
            assert_eq!(attrs.get("specific_posts"), Some("10, 20,30"));
            assert_eq!(attrs.get("class"), Some("a b"));
        }

        #[test]
        fn positional_values() {
            let attrs = Attributes::parse(r#"featured "big one" count=2"#);
            assert_eq!(attrs.positional(), &["featured", "big one"]);
            assert_eq!(attrs.get("count"), Some("2"));
        }

        #[test]
        fn empty_value() {
            let attrs = Attributes::parse(r#"title_color="""#);
            assert_eq!(attrs.get("title_color"), Some(""));
        }

        #[test]
        fn unterminated_quote_takes_rest() {
            let attrs = Attributes::parse(r#"class="open ended"#);
            assert_eq!(attrs.get("class"), Some("open ended"));
        }

        #[test]
        fn stray_equals_is_positional() {
            let attrs = Attributes::parse("=oops count=1");
            assert_eq!(attrs.positional(), &["=oops"]);
            assert_eq!(attrs.get("count"), Some("1"));
        }

        #[test]
        fn later_duplicate_wins() {
            let attrs = Attributes::parse("count=1 count=9");
            assert_eq!(attrs.get("count"), Some("9"));
        }

        #[test]
        fn from_iterator() {
            let attrs: Attributes = [("Count", "3"), ("layout", "list")].into_iter().collect();
            assert_eq!(attrs.get("count"), Some("3"));
            assert_eq!(
                attrs.iter().collect::<Vec<_>>(),
                vec![("count", "3"), ("layout", "list")]
            );
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn plain_text_is_single_segment() {
            assert_eq!(parser().parse("hello"), vec![Segment::Text("hello")]);
        }

        #[test]
        fn empty_input_has_no_segments() {
            assert!(parser().parse("").is_empty());
        }

        #[test]
        fn bare_directive() {
            let segments = parser().parse("[posts_grid]");
            match &segments[..] {
                [Segment::Shortcode(code)] => {
                    assert_eq!(code.name, "posts_grid");
                    assert!(code.attrs.is_empty());
                    assert_eq!(code.content, None);
                    assert_eq!(code.raw, "[posts_grid]");
                }
                other => panic!("unexpected segments: {:?}", other),
            }
        }

        #[test]
        fn self_closing_directive() {
            let segments = parser().parse(r#"a [posts_grid count="2" /] b"#);
            assert_eq!(segments.len(), 3);
            match &segments[1] {
                Segment::Shortcode(code) => {
                    assert_eq!(code.attrs.get("count"), Some("2"));
                    assert_eq!(code.content, None);
                }
                other => panic!("expected shortcode, got {:?}", other),
            }
        }

        #[test]
        fn enclosing_directive() {
            let segments = parser().parse("[posts_grid]inner[/posts_grid] tail");
            match &segments[0] {
                Segment::Shortcode(code) => {
                    assert_eq!(code.content, Some("inner"));
                    assert_eq!(code.raw, "[posts_grid]inner[/posts_grid]");
                }
                other => panic!("expected shortcode, got {:?}", other),
            }
            assert_eq!(segments[1], Segment::Text(" tail"));
        }

        #[test]
        fn unregistered_names_pass_through() {
            assert_eq!(
                parser().parse("[gallery ids=1] [link]"),
                vec![Segment::Text("[gallery ids=1] [link]")]
            );
        }

        #[test]
        fn name_prefix_is_not_a_match() {
            assert_eq!(
                parser().parse("[posts_grids]"),
                vec![Segment::Text("[posts_grids]")]
            );
        }

        #[test]
        fn unclosed_bracket_is_text() {
            assert_eq!(
                parser().parse("[posts_grid count=2"),
                vec![Segment::Text("[posts_grid count=2")]
            );
        }

        #[test]
        fn orphan_closing_tag_is_text() {
            assert_eq!(
                parser().parse("[/posts_grid]"),
                vec![Segment::Text("[/posts_grid]")]
            );
        }

        #[test]
        fn alias_is_recognized() {
            let segments = parser().parse("[inc_posts count=1]");
            assert!(matches!(&segments[0], Segment::Shortcode(c) if c.name == "inc_posts"));
        }

        #[test]
        fn attribute_values_may_contain_slashes() {
            let segments = parser().parse(r#"[posts_grid class="a/b"]"#);
            match &segments[0] {
                Segment::Shortcode(code) => assert_eq!(code.attrs.get("class"), Some("a/b")),
                other => panic!("expected shortcode, got {:?}", other),
            }
        }
    }

    mod escapes {
        use super::*;

        #[test]
        fn double_brackets_render_literal() {
            let output = parser().expand("see [[posts_grid count=2]] here", |_| "X".into());
            assert_eq!(output, "see [posts_grid count=2] here");
        }

        #[test]
        fn double_bracket_without_directive_is_text() {
            let output = parser().expand("[[note]] [posts_grid]", |_| "X".into());
            assert_eq!(output, "[[note]] X");
        }
    }

    mod expansion {
        use super::*;

        #[test]
        fn renders_in_document_order() {
            let mut seen = Vec::new();
            let output = parser().expand("[posts_grid id=a] and [inc_posts id=b]", |code| {
                seen.push(code.attrs.get("id").unwrap_or_default().to_string());
                format!("<{}>", code.name)
            });
            assert_eq!(output, "<posts_grid> and <inc_posts>");
            assert_eq!(seen, vec!["a", "b"]);
        }

        #[test]
        fn try_expand_stops_on_error() {
            let result: Result<String, &str> =
                parser().try_expand("[posts_grid] [posts_grid]", |_| Err("boom"));
            assert_eq!(result, Err("boom"));
        }

        #[test]
        fn register_adds_names() {
            let mut parser = ShortcodeParser::default();
            assert!(!parser.is_registered("posts_grid"));
            parser.register("posts_grid");
            assert!(parser.is_registered("posts_grid"));
            assert_eq!(parser.expand("[posts_grid]", |_| "ok".into()), "ok");
        }
    }
}
