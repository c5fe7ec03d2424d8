//! Custom block generator
//!
//! Accepts a free-form component body produced upstream and retargets its
//! exported symbol to a collision-free name derived from the sanitized
//! user-supplied name plus the allocated id. A body without the expected
//! export pattern is emitted unrenamed — the compile degrades rather than
//! fails, since the body came from outside and may still be useful as-is.

use std::path::PathBuf;

use appforge_spec::CustomBlock;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::{sanitize_identifier, GeneratedBlock, PlannedFile, COMPONENTS_DIR};
use crate::error::CompileError;
use crate::guard::with_marker;

static EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(default\s+)?function\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("export pattern is a valid regex")
});

pub(crate) fn generate(block: &CustomBlock) -> Result<GeneratedBlock, CompileError> {
    let id = block
        .id
        .as_deref()
        .ok_or(CompileError::MissingBlockId("Custom"))?;
    let component = format!("{}_{id}", sanitize_identifier(&block.name));

    let (body, default_export) = match EXPORT_RE.captures(&block.code) {
        Some(caps) => {
            let is_default = caps.get(1).is_some();
            let original = caps.get(2).map_or("", |m| m.as_str()).to_string();
            // Rename every occurrence of the exported symbol so internal
            // references (recursion, display names) stay consistent.
            let symbol = Regex::new(&format!(r"\b{}\b", regex::escape(&original)))
                .expect("escaped symbol is a valid regex");
            (
                symbol.replace_all(&block.code, component.as_str()).into_owned(),
                is_default,
            )
        }
        None => {
            // Known permissive degrade: leave the body untouched and emit
            // it anyway.
            tracing::warn!(
                block = %block.name,
                "custom block has no recognizable export, emitting body unrenamed"
            );
            (block.code.clone(), false)
        }
    };

    let path = PathBuf::from(COMPONENTS_DIR).join(format!("{component}.tsx"));
    let content = with_marker(&path, &body);
    let import = if default_export {
        format!("import {component} from \"@/components/generated/{component}\";")
    } else {
        format!("import {{ {component} }} from \"@/components/generated/{component}\";")
    };

    Ok(GeneratedBlock {
        code: format!("      <{component} />"),
        imports: vec![import],
        files: vec![PlannedFile { path, content }],
    })
}
