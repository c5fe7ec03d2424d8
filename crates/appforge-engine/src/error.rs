//! Compile error taxonomy
//!
//! Every fatal condition aborts the current compile call entirely; there is
//! no partial-success value. Skipped guard writes are logged outcomes, not
//! errors.

use appforge_spec::{SpecError, ValidationError};
use appforge_template::TemplateError;

/// Top-level compiler error
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Spec failed structural validation; aborts before any I/O
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// JSON boundary error, including unknown block type tags
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A table block's model did not resolve at generation time
    ///
    /// Same class as a validation failure, surfaced here when validation
    /// was skipped.
    #[error("model `{model}` is not defined by the spec")]
    ModelNotFound {
        /// The dangling model name
        model: String,
    },

    /// Template resolution or rendering failed; configuration error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A block reached generation without an allocated id
    ///
    /// Violation of the id-allocation invariant: ids are filled in for
    /// every id-keyed block before any path is derived.
    #[error("block `{0}` reached generation without an allocated id")]
    MissingBlockId(&'static str),

    /// Filesystem failure; propagated, never retried
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
