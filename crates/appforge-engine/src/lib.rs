//! appforge Engine
//!
//! Turns a validated application spec into a generated source tree, and
//! re-runs the same transformation over an already-generated, possibly
//! hand-edited tree without destroying user work.
//!
//! # Pipeline
//!
//! [`Compiler::compile`] sequences: validate → allocate block ids →
//! scaffold the base project → write the schema artifact → assemble pages
//! (block generators fanned out per page) → persist the sidecar spec.
//!
//! # The load-bearing invariant
//!
//! Every regenerated file goes through the [`Guard`]: a file is overwritten
//! only while its first line carries the generated-file marker. Removing
//! the marker permanently opts a file out of regeneration, which lets
//! "create" and "edit" share one code path — regeneration is always safe to
//! attempt.
//!
//! # Example
//!
//! ```rust,ignore
//! use appforge_engine::{Compiler, CompilerConfig, DiskTree};
//! use appforge_spec::AppSpec;
//!
//! let compiler = Compiler::new(CompilerConfig::new("templates"));
//! let mut spec = AppSpec::from_json(&std::fs::read_to_string("app.spec.json")?)?;
//! let out = DiskTree::new("generated/bean-there");
//! let report = compiler.compile(&mut spec, &out)?;
//! println!("{} files written, {} skipped", report.files_written, report.files_skipped);
//! ```

#![warn(unreachable_pub)]

pub mod blocks;
mod compiler;
mod error;
mod guard;
mod ids;
mod pages;
mod scaffold;
mod schema;
mod tree;

pub use compiler::{Compiler, CompilerConfig, CompileReport};
pub use error::CompileError;
pub use guard::{marker_line, with_marker, Guard, WriteOutcome, MARKER};
pub use ids::{IdSource, RandomIds, SequentialIds, ID_LEN};
pub use pages::{assemble_pages, page_path};
pub use scaffold::{scaffold, BASE_DIR, OVERRIDES_DIR};
pub use schema::{generate_schema, SCHEMA_PATH};
pub use tree::{DiskTree, EntryKind, FileTree, MemoryTree, TreeEntry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
