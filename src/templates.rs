//! Template loading and rendering using Tera.
//!
//! Screen layouts live in template files embedded in the binary. A directory
//! of `.tera` files (the config's `templates_dir`) can be loaded on top of
//! them to restyle the output; any template it does not define falls back to
//! the embedded one.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tera::{Context, Tera};

/// Template for one day's list.
pub const DAY_VIEW: &str = "views/day.tera";

/// Template for the overview of days that have tasks.
pub const DAYS_VIEW: &str = "views/days.tera";

/// Template for the interactive shell's help text.
pub const SHELL_HELP: &str = "messages/shell_help.tera";

/// Embedded default templates.
static EMBEDDED_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(DAY_VIEW, include_str!("../templates/views/day.tera"));
    m.insert(DAYS_VIEW, include_str!("../templates/views/days.tera"));
    m.insert(SHELL_HELP, include_str!("../templates/messages/shell_help.tera"));
    m
});

/// Global template engine with caching.
static TERA: Lazy<RwLock<Option<Tera>>> = Lazy::new(|| RwLock::new(None));

/// Initialize the template engine, optionally loading overrides from a directory.
///
/// # Errors
///
/// Returns an error if the directory exists but contains invalid templates,
/// or if an embedded template fails to parse.
pub fn init_templates(templates_dir: Option<&Path>) -> Result<()> {
    let mut tera = Tera::default();

    if let Some(dir) = templates_dir.filter(|d| d.exists()) {
        let glob_pattern = format!("{}/**/*.tera", dir.display());
        tera = Tera::new(&glob_pattern).map_err(|e| {
            Error::Template(format!("Failed to load templates from {}: {e}", dir.display()))
        })?;
    }

    for (name, content) in EMBEDDED_TEMPLATES.iter() {
        if tera.get_template(name).is_err() {
            tera.add_raw_template(name, content)
                .map_err(|e| Error::Template(format!("Embedded template {name}: {e}")))?;
        }
    }

    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = Some(tera);

    Ok(())
}

/// Render a template with the given context.
///
/// Templates are initialized from the embedded defaults on first use.
/// Trailing whitespace is trimmed from the result.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let needs_init = TERA.read().map_err(|e| Error::Template(e.to_string()))?.is_none();

    if needs_init {
        init_templates(None)?;
    }

    let guard = TERA.read().map_err(|e| Error::Template(e.to_string()))?;
    let tera = guard.as_ref().ok_or_else(|| Error::Template("Templates not initialized".into()))?;
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    drop(guard);

    Ok(rendered.trim_end().to_string())
}

/// Reset the template cache, forcing re-initialization on next use.
///
/// # Errors
///
/// Returns an error if the write lock cannot be acquired.
pub fn reset_cache() -> Result<()> {
    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = None;
    Ok(())
}

/// Get the list of all embedded template names.
#[must_use]
pub fn embedded_template_names() -> Vec<&'static str> {
    EMBEDDED_TEMPLATES.keys().copied().collect()
}

/// Sample context that satisfies every variable a template uses.
fn sample_context_for(name: &str) -> Context {
    let mut ctx = Context::new();
    match name {
        DAY_VIEW => {
            ctx.insert("label", "Today");
            ctx.insert("is_empty", &false);
            ctx.insert("placeholder", "No tasks for Today.");
            ctx.insert(
                "rows",
                &serde_json::json!([{"number": 1, "text": "Sample", "completed": true}]),
            );
            ctx.insert("done", &1);
            ctx.insert("total", &1);
        }
        DAYS_VIEW => {
            ctx.insert("is_empty", &false);
            ctx.insert(
                "days",
                &serde_json::json!([{"key": "2026-10-19", "label": "Today", "done": 0, "total": 2}]),
            );
        }
        _ => {
            ctx.insert("label", "Today");
        }
    }
    ctx
}

/// Verify all embedded templates render with sample data.
///
/// # Errors
///
/// Returns an error if any template fails to render.
pub fn verify_all_templates() -> Result<()> {
    reset_cache()?;
    init_templates(None)?;

    for name in embedded_template_names() {
        let ctx = sample_context_for(name);
        render(name, &ctx)
            .map_err(|e| Error::Template(format!("Template {name} failed to render: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_all_embedded_templates_render() {
        verify_all_templates().unwrap();
    }

    #[test]
    #[serial]
    fn test_embedded_names() {
        let mut names = embedded_template_names();
        names.sort_unstable();
        assert_eq!(names, vec![SHELL_HELP, DAY_VIEW, DAYS_VIEW]);
    }

    #[test]
    #[serial]
    fn test_render_unknown_template_fails() {
        reset_cache().unwrap();
        let err = render("views/nope.tera", &Context::new()).unwrap_err();
        assert!(err.to_string().contains("views/nope.tera"));
    }

    #[test]
    #[serial]
    fn test_render_trims_trailing_newlines() {
        reset_cache().unwrap();
        let out = render(SHELL_HELP, &sample_context_for(SHELL_HELP)).unwrap();
        assert!(out.starts_with("Commands:"));
        assert!(out.ends_with("Leave the shell"));
    }

    #[test]
    #[serial]
    fn test_directory_override_replaces_one_template() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("views")).unwrap();
        std::fs::write(dir.path().join("views/days.tera"), "custom {{ is_empty }}\n").unwrap();

        init_templates(Some(dir.path())).unwrap();
        let mut ctx = Context::new();
        ctx.insert("is_empty", &true);
        assert_eq!(render(DAYS_VIEW, &ctx).unwrap(), "custom true");

        // Templates the directory does not define still come from the embedded set
        let help = render(SHELL_HELP, &sample_context_for(SHELL_HELP)).unwrap();
        assert!(help.starts_with("Commands:"));

        reset_cache().unwrap();
    }

    #[test]
    #[serial]
    fn test_missing_override_directory_uses_embedded() {
        init_templates(Some(Path::new("/nonexistent/daybook/templates"))).unwrap();
        let out = render(SHELL_HELP, &sample_context_for(SHELL_HELP)).unwrap();
        assert!(out.contains("toggle <n>"));
        reset_cache().unwrap();
    }
}
