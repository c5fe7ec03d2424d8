//! Structural spec validation
//!
//! Fail-fast checks run before any generation starts. There is no partial
//! result: the first violation aborts the compile.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::spec::{AppSpec, BlockSpec};

/// Validate a spec before compilation
///
/// Checks, in order: non-empty name, at least one page, unique model names,
/// normal unique routes, every table block's model resolves, at most one
/// table block per model per page, and unique stable ids across the spec.
/// Output path disjointness rests on the id and per-page model-name
/// uniqueness established here.
///
/// # Errors
/// Returns the first [`ValidationError`] encountered.
pub fn validate(spec: &AppSpec) -> Result<(), ValidationError> {
    if spec.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if spec.pages.is_empty() {
        return Err(ValidationError::NoPages);
    }

    let mut models = HashSet::new();
    for model in &spec.models {
        if !models.insert(model.name.as_str()) {
            return Err(ValidationError::DuplicateModel(model.name.clone()));
        }
    }

    let mut routes = HashSet::new();
    let mut ids = HashSet::new();
    for page in &spec.pages {
        if !route_is_normal(&page.route) {
            return Err(ValidationError::InvalidRoute(page.route.clone()));
        }
        if !routes.insert(page.route.as_str()) {
            return Err(ValidationError::DuplicateRoute(page.route.clone()));
        }

        let mut tables = HashSet::new();
        for block in &page.blocks {
            if let BlockSpec::TableCrud(table) = block {
                if !models.contains(table.model.as_str()) {
                    return Err(ValidationError::UnknownModel {
                        route: page.route.clone(),
                        model: table.model.clone(),
                    });
                }
                if !tables.insert(table.model.as_str()) {
                    return Err(ValidationError::DuplicateTable {
                        route: page.route.clone(),
                        model: table.model.clone(),
                    });
                }
            }
            // Ids are unique across the whole spec, not per page: every
            // id-keyed block writes under one shared components directory.
            if let Some(id) = block.id() {
                if !ids.insert(id) {
                    return Err(ValidationError::DuplicateBlockId {
                        route: page.route.clone(),
                        id: id.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// A route is normal when it is slash-rooted and free of `.`/`..` segments
fn route_is_normal(route: &str) -> bool {
    route.starts_with('/') && route.split('/').all(|seg| !matches!(seg, "." | ".."))
}
