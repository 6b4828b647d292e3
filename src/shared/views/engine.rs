//! Template engine for the HTML pages using Jinja2 syntax.
//!
//! Templates live under `templates/views/` and are loaded once, on first render.

use minijinja::{AutoEscape, Environment, Value};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the working directory
const TEMPLATE_DIR: &str = "templates/views";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Resolve the template directory, falling back to the crate root when the
/// process was started elsewhere.
fn template_dir() -> PathBuf {
    let relative = PathBuf::from(TEMPLATE_DIR);
    if relative.exists() {
        relative
    } else {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATE_DIR)
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Every page is HTML, regardless of the .jinja suffix
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    let template_path = template_dir();

    if template_path.exists() {
        load_templates_recursive(&mut env, &template_path, &template_path);
    } else {
        tracing::warn!("Template directory {} not found", template_path.display());
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "jinja") {
                if let Ok(relative) = path.strip_prefix(base_path) {
                    let template_name = relative.to_string_lossy().replace('\\', "/");
                    match std::fs::read_to_string(&path) {
                        Ok(content) => {
                            // Templates live as long as the process
                            let static_name: &'static str =
                                Box::leak(template_name.clone().into_boxed_str());
                            let static_content: &'static str = Box::leak(content.into_boxed_str());
                            if let Err(e) = env.add_template(static_name, static_content) {
                                tracing::warn!("Failed to load template {}: {}", template_name, e);
                            } else {
                                tracing::debug!("Loaded template: {}", template_name);
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Failed to read template {}: {}", template_name, e)
                        }
                    }
                }
            }
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a view with the given context.
///
/// # Example
/// ```ignore
/// let html = render_view("status.html.jinja", minijinja::context! { reports => reports })?;
/// ```
pub fn render_view(template_name: &str, ctx: Value) -> Result<String, ViewError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| ViewError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| ViewError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_missing_view() {
        let result = render_view("definitely_not_a_real_view.html.jinja", context! {});
        assert!(matches!(result, Err(ViewError::NotFound(_))));
    }

    #[test]
    fn test_index_view_renders_form() {
        let html = render_view("index.html.jinja", context! {}).unwrap();
        assert!(html.contains("action=\"/submit\""));
        assert!(html.contains("name=\"waste_type\""));
    }

    #[test]
    fn test_views_escape_user_input() {
        let html = render_view(
            "status.html.jinja",
            context! {
                user => "<script>alert(1)</script>",
                reports => Vec::<Value>::new(),
            },
        )
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
