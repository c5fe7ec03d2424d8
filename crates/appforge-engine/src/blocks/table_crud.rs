//! Table block generator
//!
//! Emits one data-access artifact and one UI artifact per referenced model,
//! both named deterministically from the model name — the model name is the
//! block's stable identity, so no id is involved. The returned fragment
//! wires the table component to the data-access functions.

use std::path::PathBuf;

use appforge_spec::{FieldSpec, ModelSpec, TableCrudBlock};
use appforge_template::TemplateEngine;
use convert_case::{Case, Casing};
use serde::Serialize;

use crate::blocks::{GeneratedBlock, PlannedFile, ACTIONS_DIR, COMPONENTS_DIR};
use crate::error::CompileError;
use crate::guard::with_marker;

#[derive(Serialize)]
struct TableContext<'a> {
    component: &'a str,
    model: &'a str,
    snake: &'a str,
    fields: &'a [FieldSpec],
}

pub(crate) fn generate(
    block: &TableCrudBlock,
    models: &[ModelSpec],
    engine: &TemplateEngine,
) -> Result<GeneratedBlock, CompileError> {
    let model = models
        .iter()
        .find(|m| m.name == block.model)
        .ok_or_else(|| CompileError::ModelNotFound {
            model: block.model.clone(),
        })?;

    let pascal = model.name.to_case(Case::Pascal);
    let snake = model.name.to_case(Case::Snake);
    let component = format!("{pascal}Table");
    let ctx = TableContext {
        component: &component,
        model: &pascal,
        snake: &snake,
        fields: &model.fields,
    };

    let actions_body = engine.render("blocks/actions.ts.hbs", &ctx)?;
    let actions_path = PathBuf::from(ACTIONS_DIR).join(format!("{snake}.ts"));
    let actions = PlannedFile {
        content: with_marker(&actions_path, &actions_body),
        path: actions_path,
    };

    let table_body = engine.render("blocks/table.tsx.hbs", &ctx)?;
    let table_path = PathBuf::from(COMPONENTS_DIR).join(format!("{component}.tsx"));
    let table = PlannedFile {
        content: with_marker(&table_path, &table_body),
        path: table_path,
    };

    Ok(GeneratedBlock {
        code: format!(
            "      <{component} fetchRows={{list{pascal}}} createRow={{create{pascal}}} removeRow={{remove{pascal}}} />"
        ),
        imports: vec![
            format!("import {{ {component} }} from \"@/components/generated/{component}\";"),
            format!(
                "import {{ list{pascal}, create{pascal}, remove{pascal} }} from \"@/app/actions/{snake}\";"
            ),
        ],
        files: vec![actions, table],
    })
}
