//! HTML views rendered with Jinja2 templates.

mod engine;

pub use engine::{render_view, ViewError};
