use std::fs;
use std::path::Path;

use log::debug;
use minijinja::{AutoEscape, Environment, Value};

use crate::error::GenerateError;
use crate::profile::TargetProfile;
use crate::transform::name_normalizer::normalize_name;

/// A template environment loaded with one profile's templates.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Load the profile's templates. A file in `template_dir` with the same
    /// name as a built-in template replaces it.
    pub fn new(profile: &dyn TargetProfile, template_dir: Option<&Path>) -> Result<Self, GenerateError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html.j2") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env.add_filter("pascal_case", |s: String| normalize_name(&s).pascal_case);
        env.add_filter("camel_case", |s: String| normalize_name(&s).camel_case);
        env.add_filter("snake_case", |s: String| normalize_name(&s).snake_case);
        env.add_filter("json_string", |s: String| serde_json::Value::String(s).to_string());
        profile.configure_environment(&mut env);

        for (name, source) in profile.templates() {
            let replacement = template_dir.map(|dir| dir.join(name)).filter(|p| p.is_file());
            let added = match replacement {
                Some(path) => {
                    debug!("Template {} overridden by {}", name, path.display());
                    let source = fs::read_to_string(&path).map_err(|e| GenerateError::io(&path, e))?;
                    env.add_template_owned(name, source)
                }
                None => env.add_template(name, source),
            };
            added.map_err(|source| GenerateError::Render {
                path: name.to_string(),
                source,
            })?;
        }

        Ok(Self { env })
    }

    /// Make a value visible to every template under `name`.
    pub fn add_global(&mut self, name: impl Into<String>, value: Value) {
        self.env.add_global(name.into(), value);
    }

    /// Render an output path pattern.
    pub fn render_path(&self, pattern: &str, ctx: &Value) -> Result<String, GenerateError> {
        self.env
            .render_str(pattern, ctx)
            .map_err(|source| GenerateError::Render {
                path: pattern.to_string(),
                source,
            })
    }

    /// Render a named template. `target` only labels errors.
    pub fn render(&self, template: &str, target: &str, ctx: &Value) -> Result<String, GenerateError> {
        let render_err = |source: minijinja::Error| GenerateError::Render {
            path: target.to_string(),
            source,
        };
        let tmpl = self.env.get_template(template).map_err(render_err)?;
        tmpl.render(ctx).map_err(render_err)
    }
}
