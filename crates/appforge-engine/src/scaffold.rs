//! Project scaffolding
//!
//! Materializes the base project tree from the templates root: `.hbs` files
//! are rendered with the app name and theme, marker-prefixed and written
//! through the ownership guard (with the `.hbs` suffix stripped); everything
//! else is copied byte-for-byte, unconditionally — copies carry no variable
//! content and are not regenerated, so they are not subject to protection.
//!
//! The walk runs over the [`FileTree`] abstraction so it can be exercised
//! against an in-memory templates tree.

use std::path::{Path, PathBuf};

use appforge_template::{TemplateEngine, Theme};
use serde::Serialize;

use crate::compiler::CompileReport;
use crate::error::CompileError;
use crate::guard::{with_marker, Guard};
use crate::tree::{EntryKind, FileTree};

/// Subdirectory of the templates root holding the base project tree
pub const BASE_DIR: &str = "base";

/// Subdirectory of the templates root holding per-theme overrides
pub const OVERRIDES_DIR: &str = "overrides";

#[derive(Serialize)]
struct ScaffoldContext<'a> {
    app_name: &'a str,
    theme: &'a Theme,
}

/// Materialize the base project tree into the destination
///
/// `source` is rooted at the templates root; `guard` wraps the destination
/// tree. Template files prefer their theme-override twin under
/// `overrides/<theme>/` when one exists.
///
/// # Errors
/// Propagates filesystem and render errors. Missing theme data is not an
/// error — theme fallback happened before this call.
pub fn scaffold(
    app_name: &str,
    theme: &Theme,
    engine: &TemplateEngine,
    source: &dyn FileTree,
    guard: &Guard<'_>,
    report: &mut CompileReport,
) -> Result<(), CompileError> {
    tracing::info!(app = app_name, theme = %theme.id, "scaffolding base project");
    let ctx = ScaffoldContext { app_name, theme };
    walk(Path::new(BASE_DIR), theme, engine, source, guard, &ctx, report)
}

fn walk(
    dir: &Path,
    theme: &Theme,
    engine: &TemplateEngine,
    source: &dyn FileTree,
    guard: &Guard<'_>,
    ctx: &ScaffoldContext<'_>,
    report: &mut CompileReport,
) -> Result<(), CompileError> {
    for entry in source.list(dir)? {
        match entry.kind {
            EntryKind::Dir => {
                walk(&entry.path, theme, engine, source, guard, ctx, report)?;
            }
            EntryKind::File => {
                let rel = entry
                    .path
                    .strip_prefix(BASE_DIR)
                    .unwrap_or(&entry.path)
                    .to_path_buf();
                if entry.path.extension().is_some_and(|e| e == "hbs") {
                    render_template(&entry.path, &rel, theme, engine, source, guard, ctx, report)?;
                } else {
                    // Byte-for-byte copy, not guard-protected
                    let bytes = source.read(&entry.path)?;
                    guard.tree().write(&rel, &bytes)?;
                    tracing::debug!(path = %rel.display(), "copied scaffold file");
                }
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_template(
    base_path: &Path,
    rel: &Path,
    theme: &Theme,
    engine: &TemplateEngine,
    source: &dyn FileTree,
    guard: &Guard<'_>,
    ctx: &ScaffoldContext<'_>,
    report: &mut CompileReport,
) -> Result<(), CompileError> {
    // Theme override wins over the base copy of the same template
    let override_path = PathBuf::from(OVERRIDES_DIR).join(&theme.id).join(rel);
    let template_path = if source.exists(&override_path) {
        tracing::debug!(path = %override_path.display(), "using theme override");
        override_path
    } else {
        base_path.to_path_buf()
    };

    let raw = source.read_to_string(&template_path)?;
    let rendered = engine.render_str(&raw, ctx)?;

    let dest = rel.with_extension(""); // strip the trailing .hbs
    let content = with_marker(&dest, &rendered);
    report.record(guard.write(&dest, &content)?);
    Ok(())
}
