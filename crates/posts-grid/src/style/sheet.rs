//! A small CSS writer.
//!
//! Output is fully determined by insertion order: two-space indentation,
//! one declaration per line, selector lists split one per line.

use std::fmt::{self, Display, Write};

/// A selector list with its declarations.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rule {
    selectors: Vec<String>,
    declarations: Vec<(String, String)>,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selectors: vec![selector.into()],
            declarations: Vec::new(),
        }
    }

    /// Adds another selector to the list.
    pub fn or(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }

    pub fn decl(mut self, property: &str, value: impl Display) -> Self {
        self.declarations
            .push((property.to_string(), value.to_string()));
        self
    }

    /// Adds the declaration only when `value` is present.
    pub fn decl_opt(self, property: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.decl(property, value),
            None => self,
        }
    }

    fn write_to(&self, out: &mut impl Write, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                out.write_str(",\n")?;
            }
            write!(out, "{}{}", pad, selector)?;
        }
        out.write_str(" {\n")?;
        for (property, value) in &self.declarations {
            writeln!(out, "{}  {}: {};", pad, property, value)?;
        }
        writeln!(out, "{}}}", pad)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Rule(Rule),
    Media { query: String, rules: Vec<Rule> },
}

/// An ordered list of rules and media blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Stylesheet {
    blocks: Vec<Block>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.blocks.push(Block::Rule(rule));
        self
    }

    pub fn media(mut self, query: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.blocks.push(Block::Media {
            query: query.into(),
            rules,
        });
        self
    }
}

impl Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            match block {
                Block::Rule(rule) => rule.write_to(f, 0)?,
                Block::Media { query, rules } => {
                    writeln!(f, "@media {} {{", query)?;
                    for rule in rules {
                        rule.write_to(f, 2)?;
                    }
                    f.write_str("}\n")?;
                }
            }
        }
        Ok(())
    }
}
