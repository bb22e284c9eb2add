//! Template environment for grid markup.

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::Result;
use crate::text;

/// Name of the grid template. The `.html` suffix turns on HTML
/// auto-escaping.
pub(crate) const GRID_TEMPLATE: &str = "grid.html";

const GRID_SOURCE: &str = include_str!("../../templates/grid.html");

/// Compiled markup templates.
#[derive(Debug)]
pub(crate) struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template(GRID_TEMPLATE, GRID_SOURCE)?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

/// Registers the markup filters.
///
/// `esc_url` returns already-safe text so auto-escaping leaves the
/// encoded `&amp;` alone.
pub(crate) fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("esc_url", |value: String| -> Value {
        Value::from_safe_string(text::esc_url(&value))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn esc_url_filter_is_not_double_escaped() {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template("link.html", r#"<a href="{{ url|esc_url }}">{{ label }}</a>"#)
            .unwrap();
        let out = env
            .get_template("link.html")
            .unwrap()
            .render(context! { url => "https://e.test/?a=1&b=2", label => "A & B" })
            .unwrap();
        assert_eq!(out, r#"<a href="https://e.test/?a=1&amp;b=2">A &amp; B</a>"#);
    }

    #[test]
    fn esc_url_filter_drops_unsafe_links() {
        let mut env = Environment::new();
        register_filters(&mut env);
        let out = env
            .render_str(r#"{{ "javascript:alert(1)"|esc_url }}"#, context! {})
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn grid_template_compiles() {
        assert!(Templates::new().is_ok());
    }
}
