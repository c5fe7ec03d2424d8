//! Compiler orchestration
//!
//! Sequences the pipeline: validate → allocate ids → scaffold → schema →
//! assemble pages → persist the sidecar spec. "create" (fresh directory)
//! and "edit" (directory holding prior output plus a sidecar) share this
//! identical pipeline; edit correctness rests on the ownership guard plus
//! id stability, not on a separate incremental path.
//!
//! The pipeline is linear: a failure aborts the remaining stages, files
//! already written stay in place, and rerunning after a fix is always safe.

use std::path::{Path, PathBuf};

use appforge_spec::{validate, AppSpec, SIDECAR_FILE};
use appforge_template::{TemplateEngine, ThemeRegistry};

use crate::blocks::allocate_ids;
use crate::error::CompileError;
use crate::guard::{Guard, WriteOutcome};
use crate::ids::{IdSource, RandomIds};
use crate::pages::assemble_pages;
use crate::scaffold::scaffold;
use crate::schema::generate_schema;
use crate::tree::{DiskTree, FileTree};

/// Compiler configuration
///
/// The templates root is an external input threaded in at construction;
/// there is no ambient global location.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Root of the template search path
    pub templates_root: PathBuf,
}

impl CompilerConfig {
    /// Configuration over a templates root
    #[inline]
    #[must_use]
    pub fn new(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            templates_root: templates_root.into(),
        }
    }
}

/// Summary of one compile, for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Files written through the ownership guard
    pub files_written: usize,
    /// Files skipped by the guard because the user claimed them
    pub files_skipped: usize,
    /// Pages assembled
    pub pages: usize,
}

impl CompileReport {
    pub(crate) fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.files_written += 1,
            WriteOutcome::Skipped => self.files_skipped += 1,
        }
    }
}

/// The spec-to-filesystem compiler
pub struct Compiler {
    config: CompilerConfig,
    themes: ThemeRegistry,
    ids: Box<dyn IdSource>,
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Compiler {
    /// Create a compiler; loads the theme registry from the templates root
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        let themes = ThemeRegistry::load(&config.templates_root);
        Self {
            config,
            themes,
            ids: Box::new(RandomIds),
        }
    }

    /// Replace the id source; tests inject a deterministic one
    #[must_use]
    pub fn with_id_source(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Compile a spec into a destination tree
    ///
    /// Mutates the spec in-process only to fill in missing block ids; the
    /// mutated spec is persisted as the sidecar state file and is the
    /// source of truth for the next edit cycle.
    ///
    /// # Errors
    /// Returns the first violation encountered; files written by completed
    /// stages are left in place and rerunning is safe.
    pub fn compile(
        &self,
        spec: &mut AppSpec,
        tree: &dyn FileTree,
    ) -> Result<CompileReport, CompileError> {
        tracing::info!(app = %spec.name, pages = spec.pages.len(), "compile started");
        validate(spec)?;
        allocate_ids(spec, self.ids.as_ref());

        let theme = self.themes.select(spec.theme.as_deref());
        let engine = TemplateEngine::new(&self.config.templates_root, Some(&theme.id));
        let guard = Guard::new(tree);
        let source = DiskTree::new(&self.config.templates_root);
        let mut report = CompileReport::default();

        scaffold(&spec.name, &theme, &engine, &source, &guard, &mut report)?;
        generate_schema(&spec.models, tree)?;
        assemble_pages(spec, &engine, &guard, &mut report)?;

        // The sidecar is the machine's own state file: always overwritten
        let sidecar = spec.to_json_pretty()?;
        tree.write(Path::new(SIDECAR_FILE), sidecar.as_bytes())?;

        tracing::info!(
            written = report.files_written,
            skipped = report.files_skipped,
            pages = report.pages,
            "compile finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::tree::MemoryTree;
    use appforge_spec::{BlockSpec, HeroBlock, PageSpec, Stack, ValidationError};
    use pretty_assertions::assert_eq;

    fn templates_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
    }

    fn hero_spec() -> AppSpec {
        AppSpec {
            name: "demo".into(),
            stack: Stack::NextJs,
            theme: None,
            models: vec![],
            pages: vec![PageSpec {
                route: "/".into(),
                title: "Demo".into(),
                blocks: vec![BlockSpec::Hero(HeroBlock {
                    id: None,
                    heading: None,
                    tagline: None,
                })],
            }],
        }
    }

    #[test]
    fn compile_persists_the_id_mutated_spec() {
        let compiler = Compiler::new(CompilerConfig::new(templates_root()))
            .with_id_source(Box::new(SequentialIds::new()));
        let tree = MemoryTree::new();
        let mut spec = hero_spec();

        compiler.compile(&mut spec, &tree).unwrap();

        assert_eq!(spec.pages[0].blocks[0].id(), Some("b1"));
        let sidecar = tree.read_to_string(Path::new(SIDECAR_FILE)).unwrap();
        let persisted = AppSpec::from_json(&sidecar).unwrap();
        assert_eq!(persisted, spec);
    }

    #[test]
    fn validation_failure_aborts_before_any_write() {
        let compiler = Compiler::new(CompilerConfig::new(templates_root()));
        let tree = MemoryTree::new();
        let mut spec = hero_spec();
        spec.pages.clear();

        let err = compiler.compile(&mut spec, &tree).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Validation(ValidationError::NoPages)
        ));
        assert!(tree.paths().is_empty());
    }
}
