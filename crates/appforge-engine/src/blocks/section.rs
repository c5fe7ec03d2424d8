//! Section block generator
//!
//! Hero, Features, Navbar, Footer and Pricing all follow one shape: render
//! the variant's block template into a single UI artifact named
//! `<Tag>_<id>`, return a self-closing usage tag plus one import line.

use std::path::PathBuf;

use appforge_template::TemplateEngine;
use serde::Serialize;

use crate::blocks::{GeneratedBlock, PlannedFile, COMPONENTS_DIR};
use crate::error::CompileError;
use crate::guard::with_marker;

#[derive(Serialize)]
struct SectionContext<'a, T: Serialize> {
    component: &'a str,
    #[serde(flatten)]
    props: &'a T,
}

pub(crate) fn generate<T: Serialize>(
    tag: &'static str,
    id: Option<&str>,
    props: &T,
    engine: &TemplateEngine,
) -> Result<GeneratedBlock, CompileError> {
    let id = id.ok_or(CompileError::MissingBlockId(tag))?;
    let component = format!("{tag}_{id}");
    let template = format!("blocks/{}.tsx.hbs", tag.to_lowercase());

    let body = engine.render(
        &template,
        &SectionContext {
            component: &component,
            props,
        },
    )?;

    let path = PathBuf::from(COMPONENTS_DIR).join(format!("{component}.tsx"));
    let content = with_marker(&path, &body);
    Ok(GeneratedBlock {
        code: format!("      <{component} />"),
        imports: vec![format!(
            "import {{ {component} }} from \"@/components/generated/{component}\";"
        )],
        files: vec![PlannedFile { path, content }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_spec::{FooterBlock, HeroBlock};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn engine() -> TemplateEngine {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        TemplateEngine::new(root, None)
    }

    #[test]
    fn hero_emits_one_artifact_named_from_tag_and_id() {
        let block = HeroBlock {
            id: Some("a1b2".into()),
            heading: Some("Coffee, done right".into()),
            tagline: None,
        };
        let out = generate("Hero", block.id.as_deref(), &block, &engine()).unwrap();

        assert_eq!(out.code.trim(), "<Hero_a1b2 />");
        assert_eq!(out.imports.len(), 1);
        assert!(out.imports[0].contains("components/generated/Hero_a1b2"));
        assert_eq!(out.files.len(), 1);
        assert_eq!(
            out.files[0].path,
            PathBuf::from("components/generated/Hero_a1b2.tsx")
        );
        assert!(out.files[0].content.starts_with("// GENERATED FILE"));
        assert!(out.files[0].content.contains("Coffee, done right"));
        assert!(out.files[0].content.contains("function Hero_a1b2"));
    }

    #[test]
    fn missing_id_is_an_invariant_violation() {
        let block = FooterBlock {
            id: None,
            text: None,
        };
        let err = generate("Footer", None, &block, &engine()).unwrap_err();
        assert!(matches!(err, CompileError::MissingBlockId("Footer")));
    }

    #[test]
    fn same_id_yields_identical_output() {
        let block = HeroBlock {
            id: Some("zz99".into()),
            heading: None,
            tagline: Some("tag".into()),
        };
        let a = generate("Hero", block.id.as_deref(), &block, &engine()).unwrap();
        let b = generate("Hero", block.id.as_deref(), &block, &engine()).unwrap();
        assert_eq!(a, b);
    }
}
