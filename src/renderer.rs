//! MiniJinja rendering for generated components.
//! Project scaffolding uses plain placeholder substitution; components such as
//! handlers need loops and conditionals, so they are rendered through MiniJinja.

use crate::error::{Error, Result};
use crate::naming::{to_kebab_case, to_plural, to_snake_case};
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `template` with `context`.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Environment with block trimming suitable for source code and the
    /// naming helpers exposed as filters (`snake`, `kebab`, `plural`).
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("snake", |value: String| to_snake_case(&value));
        env.add_filter("kebab", |value: String| to_kebab_case(&value));
        env.add_filter("plural", |value: String| to_plural(&value));
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::MinijinjaError` if the template does not parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_filters() {
        let renderer = MiniJinjaRenderer::new();
        let context = serde_json::json!({ "name": "BlogPost" });
        let result = renderer.render("{{ name | snake }} {{ name | kebab }} {{ name | plural }}", &context);
        assert_eq!(result.unwrap(), "blog_post blog-post blogposts");
    }
}
