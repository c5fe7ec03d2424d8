//! Block generators
//!
//! One generator per variant of the closed [`BlockSpec`] union, dispatched
//! by exhaustive match — adding a variant is a compile-time-checked registry
//! entry. Generation is pure: a generator computes a [`GeneratedBlock`]
//! (inline fragment, import lines, planned auxiliary files) and the page
//! assembler applies the planned files through the ownership guard.
//!
//! Id allocation happens in a separate pass ([`allocate_ids`]) before any
//! generator runs, so every derived file path sees a stable id.

mod custom;
mod section;
mod table_crud;

use std::collections::HashSet;
use std::path::PathBuf;

use appforge_spec::{AppSpec, BlockSpec, ModelSpec};
use appforge_template::TemplateEngine;

use crate::error::CompileError;
use crate::ids::IdSource;

/// Directory for generated UI components, relative to the project root
pub const COMPONENTS_DIR: &str = "components/generated";

/// Directory for generated data-access modules, relative to the project root
pub const ACTIONS_DIR: &str = "app/actions";

/// A file a generator wants written, path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Target path relative to the project root
    pub path: PathBuf,
    /// Full file content, marker line included where applicable
    pub content: String,
}

/// Pure output of one block generator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedBlock {
    /// Inline page fragment, in layout position
    pub code: String,
    /// Import lines the page must carry for the fragment
    pub imports: Vec<String>,
    /// Auxiliary files to apply through the ownership guard
    pub files: Vec<PlannedFile>,
}

/// Fill in missing stable ids across the whole spec
///
/// Runs before any generation so every file path derives from a persisted
/// id. Blocks that already carry an id keep it untouched — changing one
/// would orphan previously generated files. Freshly drawn ids are checked
/// against every id already in the spec, so allocation upholds the
/// spec-wide uniqueness that output path disjointness rests on.
pub fn allocate_ids(spec: &mut AppSpec, ids: &dyn IdSource) {
    let mut used: HashSet<String> = spec
        .pages
        .iter()
        .flat_map(|page| page.blocks.iter().filter_map(|b| b.id().map(str::to_string)))
        .collect();

    for page in &mut spec.pages {
        for block in &mut page.blocks {
            if block.needs_id() && block.id().is_none() {
                let mut id = ids.next_id();
                while !used.insert(id.clone()) {
                    id = ids.next_id();
                }
                tracing::debug!(block = block.tag(), id, "allocated block id");
                block.set_id(id);
            }
        }
    }
}

/// Generate one block
///
/// # Errors
/// Returns [`CompileError::ModelNotFound`] for a dangling table reference,
/// a template error when a block template is missing or fails to render,
/// or [`CompileError::MissingBlockId`] when the id-allocation pass was
/// skipped.
pub fn generate_block(
    block: &BlockSpec,
    models: &[ModelSpec],
    engine: &TemplateEngine,
) -> Result<GeneratedBlock, CompileError> {
    match block {
        BlockSpec::TableCrud(b) => table_crud::generate(b, models, engine),
        BlockSpec::Hero(b) => section::generate("Hero", b.id.as_deref(), b, engine),
        BlockSpec::Features(b) => section::generate("Features", b.id.as_deref(), b, engine),
        BlockSpec::Navbar(b) => section::generate("Navbar", b.id.as_deref(), b, engine),
        BlockSpec::Footer(b) => section::generate("Footer", b.id.as_deref(), b, engine),
        BlockSpec::Pricing(b) => section::generate("Pricing", b.id.as_deref(), b, engine),
        BlockSpec::Custom(b) => custom::generate(b),
    }
}

/// Sanitize free text into a valid component identifier
///
/// Keeps ASCII alphanumerics and underscores, strips anything else, forces
/// a leading letter and capitalizes it (JSX components must start
/// uppercase). Empty input degrades to `Custom`.
#[must_use]
pub(crate) fn sanitize_identifier(name: &str) -> String {
    let mut cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    while cleaned.starts_with(|c: char| c.is_ascii_digit() || c == '_') {
        cleaned.remove(0);
    }
    if cleaned.is_empty() {
        return "Custom".to_string();
    }
    let mut chars = cleaned.chars();
    let first = chars.next().map(|c| c.to_ascii_uppercase());
    first.into_iter().chain(chars).collect()
}
