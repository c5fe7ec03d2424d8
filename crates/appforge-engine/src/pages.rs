//! Page assembly
//!
//! Fans block generation out per page, then merges the results: fragments
//! concatenated in original block order (layout-significant), import lines
//! deduplicated by exact text in first-seen order, and the page template
//! rendered and written through the ownership guard.
//!
//! Block generation within a page is pure and runs in parallel; the merge
//! is an ordered fan-in after every block has finished, so a failing block
//! aborts the page before its file is written.

use std::path::PathBuf;

use appforge_spec::{AppSpec, ModelSpec, PageSpec};
use appforge_template::TemplateEngine;
use indexmap::IndexSet;
use rayon::prelude::*;
use serde::Serialize;

use crate::blocks::{generate_block, GeneratedBlock};
use crate::compiler::CompileReport;
use crate::error::CompileError;
use crate::guard::{with_marker, Guard};

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    imports: String,
    blocks: String,
}

/// Output path for a page, relative to the project root
///
/// Routes mirror the path tree; `/` maps to the tree root.
#[must_use]
pub fn page_path(route: &str) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("app/page.tsx")
    } else {
        PathBuf::from("app").join(trimmed).join("page.tsx")
    }
}

/// Assemble every page of the spec
///
/// # Errors
/// Fails fast on the first page that fails to assemble; files written by
/// prior pages stay in place (rerun after fixing the spec is the recovery
/// path).
pub fn assemble_pages(
    spec: &AppSpec,
    engine: &TemplateEngine,
    guard: &Guard<'_>,
    report: &mut CompileReport,
) -> Result<(), CompileError> {
    for page in &spec.pages {
        assemble_page(page, &spec.models, engine, guard, report)?;
        report.pages += 1;
    }
    Ok(())
}

fn assemble_page(
    page: &PageSpec,
    models: &[ModelSpec],
    engine: &TemplateEngine,
    guard: &Guard<'_>,
    report: &mut CompileReport,
) -> Result<(), CompileError> {
    tracing::info!(route = %page.route, blocks = page.blocks.len(), "assembling page");

    // Parallel fan-out over pure generators; collect preserves block order
    // and the first error aborts the page with nothing written.
    let generated: Vec<GeneratedBlock> = page
        .blocks
        .par_iter()
        .map(|block| generate_block(block, models, engine))
        .collect::<Result<_, _>>()?;

    for block in &generated {
        for file in &block.files {
            report.record(guard.write(&file.path, &file.content)?);
        }
    }

    let (imports, code) = merge_blocks(&generated);
    let body = engine.render(
        "page.tsx.hbs",
        &PageContext {
            title: &page.title,
            imports,
            blocks: code,
        },
    )?;

    let path = page_path(&page.route);
    let content = with_marker(&path, &body);
    report.record(guard.write(&path, &content)?);
    Ok(())
}

/// Merge generated blocks into (import lines, page body)
///
/// Imports are deduplicated by exact text while preserving first-seen
/// order, so repeated symbols collapse to one line and ordering is
/// reproducible run-to-run. Fragments keep original block order.
fn merge_blocks(blocks: &[GeneratedBlock]) -> (String, String) {
    let mut imports: IndexSet<&str> = IndexSet::new();
    for block in blocks {
        for import in &block.imports {
            imports.insert(import.as_str());
        }
    }
    let code: Vec<&str> = blocks.iter().map(|b| b.code.as_str()).collect();
    (
        imports.into_iter().collect::<Vec<_>>().join("\n"),
        code.join("\n"),
    )
}
