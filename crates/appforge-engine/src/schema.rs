//! Schema generation
//!
//! Mechanical translation of the spec's data models into one SQL schema
//! artifact. The artifact is wholly derived and not meant for hand editing,
//! so it is fully overwritten on every compile instead of going through the
//! ownership guard.

use std::fmt::Write as _;
use std::path::Path;

use appforge_spec::{FieldType, ModelSpec};
use convert_case::{Case, Casing};

use crate::error::CompileError;
use crate::guard::MARKER;
use crate::tree::FileTree;

/// Path of the schema artifact, relative to the project root
pub const SCHEMA_PATH: &str = "db/schema.sql";

/// Fixed mapping from semantic field types to column types
const fn column_type(ty: FieldType) -> &'static str {
    match ty {
        FieldType::String => "text",
        FieldType::Number => "numeric",
        FieldType::Boolean => "boolean",
    }
}

/// Write the schema artifact for the spec's models
///
/// One `create table` block per model, columns in field order plus a
/// synthetic primary key.
///
/// # Errors
/// Propagates filesystem errors.
pub fn generate_schema(models: &[ModelSpec], tree: &dyn FileTree) -> Result<(), CompileError> {
    let mut out = format!("-- {MARKER}\n");
    for model in models {
        let table = model.name.to_case(Case::Snake);
        let _ = write!(out, "\ncreate table if not exists {table} (\n");
        let _ = write!(out, "  id text primary key");
        for field in &model.fields {
            let column = field.name.to_case(Case::Snake);
            let _ = write!(out, ",\n  {column} {}", column_type(field.ty));
        }
        out.push_str("\n);\n");
    }

    tracing::info!(models = models.len(), path = SCHEMA_PATH, "wrote schema artifact");
    tree.write(Path::new(SCHEMA_PATH), out.as_bytes())?;
    Ok(())
}
