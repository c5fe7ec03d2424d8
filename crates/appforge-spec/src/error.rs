//! Error types for the spec model
//!
//! Two classes: boundary errors raised while reading a JSON document into
//! the typed model, and validation errors raised by the structural checks
//! in [`crate::validate`].

/// Errors raised at the JSON boundary
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Block carries a type tag outside the closed variant set.
    ///
    /// Surfaced before typed deserialization so spec/version skew is
    /// reported as the offending tag, not a serde parse failure.
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),

    /// Document failed to parse into the typed model
    #[error("spec parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by spec validation
///
/// Validation is fail-fast: the first violation aborts the compile before
/// any file is written.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Application name is empty
    #[error("application name is empty")]
    EmptyName,

    /// Spec defines no pages
    #[error("spec defines no pages")]
    NoPages,

    /// Two models share a name
    #[error("duplicate model name `{0}`")]
    DuplicateModel(String),

    /// A page route contains `.` or `..` segments or lacks a leading slash
    ///
    /// Routes mirror the output path tree, so a non-normal route could
    /// write a page file outside the project root.
    #[error("route `{0}` is not a normal route")]
    InvalidRoute(String),

    /// Two pages share a route
    #[error("duplicate page route `{0}`")]
    DuplicateRoute(String),

    /// Two blocks share a stable id
    ///
    /// Ids key generated file paths and in-page component identifiers, so
    /// a repeated id would make two blocks collide on one artifact.
    #[error("page `{route}` reuses block id `{id}`")]
    DuplicateBlockId {
        /// Route of the page holding the second occurrence
        route: String,
        /// The doubly-assigned id
        id: String,
    },

    /// A table block references a model the spec does not define
    #[error("page `{route}` references unknown model `{model}`")]
    UnknownModel {
        /// Route of the offending page
        route: String,
        /// The dangling model name
        model: String,
    },

    /// A page carries two table blocks for the same model
    ///
    /// The model name is a table block's stable identity, so a second
    /// occurrence on one page would collide on generated file paths.
    #[error("page `{route}` has more than one table block for model `{model}`")]
    DuplicateTable {
        /// Route of the offending page
        route: String,
        /// The doubly-referenced model name
        model: String,
    },
}
