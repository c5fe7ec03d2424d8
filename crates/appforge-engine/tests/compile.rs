//! End-to-end compile pipeline tests
//!
//! Exercises the properties the compiler is built around: idempotence,
//! ownership protection, referential integrity, id stability across the
//! sidecar round-trip, and theme fallback.

use std::path::{Path, PathBuf};

use appforge_engine::{
    CompileError, Compiler, CompilerConfig, FileTree, MemoryTree, SequentialIds, MARKER,
};
use appforge_spec::{AppSpec, ValidationError, SIDECAR_FILE};
use pretty_assertions::assert_eq;

fn templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn compiler() -> Compiler {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("appforge_engine=debug")
        .with_test_writer()
        .try_init();
    Compiler::new(CompilerConfig::new(templates_root()))
        .with_id_source(Box::new(SequentialIds::new()))
}

const BEAN_THERE: &str = r#"{
    "name": "bean-there",
    "stack": "nextjs",
    "models": [],
    "pages": [{
        "route": "/",
        "title": "BeanThere Coffee",
        "blocks": [
            { "type": "Navbar", "brand": "BeanThere",
              "links": [{ "label": "Menu", "href": "/menu" }] },
            { "type": "Hero", "heading": "Coffee, done right" },
            { "type": "Footer", "text": "est. 2026" }
        ]
    }]
}"#;

const WITH_MODEL: &str = r#"{
    "name": "orders",
    "stack": "nextjs",
    "models": [{
        "name": "CoffeeOrder",
        "fields": [
            { "name": "customer", "type": "string" },
            { "name": "shots", "type": "number" },
            { "name": "decaf", "type": "boolean" }
        ]
    }],
    "pages": [{
        "route": "/",
        "title": "Orders",
        "blocks": [{ "type": "TableCRUD", "model": "CoffeeOrder" }]
    }]
}"#;

#[test]
fn bean_there_scenario_produces_the_documented_tree() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    let tree = MemoryTree::new();
    let report = compiler().compile(&mut spec, &tree).unwrap();

    // Three generated component files
    let components: Vec<_> = tree
        .paths()
        .into_iter()
        .filter(|p| p.starts_with("components/generated"))
        .collect();
    assert_eq!(
        components,
        vec![
            PathBuf::from("components/generated/Footer_b3.tsx"),
            PathBuf::from("components/generated/Hero_b2.tsx"),
            PathBuf::from("components/generated/Navbar_b1.tsx"),
        ]
    );

    // One page at the tree root with usage tags in layout order
    let page = tree.read_to_string(Path::new("app/page.tsx")).unwrap();
    let navbar = page.find("<Navbar_b1 />").unwrap();
    let hero = page.find("<Hero_b2 />").unwrap();
    let footer = page.find("<Footer_b3 />").unwrap();
    assert!(navbar < hero && hero < footer);
    assert_eq!(page.matches("import ").count(), 3);
    assert!(page.contains("BeanThere Coffee"));

    // Sidecar carries the three allocated ids
    let sidecar = AppSpec::from_json(&tree.read_to_string(Path::new(SIDECAR_FILE)).unwrap()).unwrap();
    let ids: Vec<_> = sidecar.pages[0]
        .blocks
        .iter()
        .map(|b| b.id().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["b1", "b2", "b3"]);

    assert_eq!(report.pages, 1);
    assert_eq!(report.files_skipped, 0);
}

#[test]
fn compiling_twice_is_byte_identical() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    let compiler = compiler();

    let first = MemoryTree::new();
    compiler.compile(&mut spec, &first).unwrap();
    let before = first.snapshot();

    // Same tree again: every guarded file is still machine-owned
    compiler.compile(&mut spec, &first).unwrap();
    assert_eq!(first.snapshot(), before);

    // Fresh tree: ids are already pinned in the spec, output is identical
    let second = MemoryTree::new();
    compiler.compile(&mut spec, &second).unwrap();
    assert_eq!(second.snapshot(), before);
}

#[test]
fn removing_the_marker_opts_a_file_out_of_regeneration() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    let tree = MemoryTree::new();
    let compiler = compiler();
    compiler.compile(&mut spec, &tree).unwrap();

    let hero = Path::new("components/generated/Hero_b2.tsx");
    let generated = tree.read_to_string(hero).unwrap();
    assert!(generated.lines().next().unwrap().contains(MARKER));

    // User deletes the marker line and edits the body
    let claimed = format!("// mine\n{}", &generated);
    tree.seed(hero, &claimed);

    let report = compiler.compile(&mut spec, &tree).unwrap();
    assert_eq!(tree.read_to_string(hero).unwrap(), claimed);
    assert!(report.files_skipped >= 1);
}

#[test]
fn dangling_model_reference_fails_before_any_write() {
    let mut spec = AppSpec::from_json(WITH_MODEL).unwrap();
    spec.models.clear();
    let tree = MemoryTree::new();

    let err = compiler().compile(&mut spec, &tree).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Validation(ValidationError::UnknownModel { ref model, .. })
            if model == "CoffeeOrder"
    ));
    assert!(!tree.exists(Path::new("app/page.tsx")));
    assert!(tree.paths().is_empty());
}

#[test]
fn repeated_block_id_fails_before_one_artifact_can_shadow_the_other() {
    // Two same-variant blocks carrying one id would derive the same
    // components/generated path, so the compile must refuse up front.
    let mut spec = AppSpec::from_json(
        r#"{
            "name": "dup",
            "stack": "nextjs",
            "models": [],
            "pages": [{
                "route": "/",
                "title": "Dup",
                "blocks": [
                    { "type": "Hero", "id": "h1", "heading": "first" },
                    { "type": "Hero", "id": "h1", "heading": "second" }
                ]
            }]
        }"#,
    )
    .unwrap();
    let tree = MemoryTree::new();

    let err = compiler().compile(&mut spec, &tree).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Validation(ValidationError::DuplicateBlockId { ref id, .. })
            if id == "h1"
    ));
    assert!(tree.paths().is_empty());
}

#[test]
fn escaping_route_is_rejected_before_any_write() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    spec.pages[0].route = "/../escape".into();
    let tree = MemoryTree::new();

    let err = compiler().compile(&mut spec, &tree).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Validation(ValidationError::InvalidRoute(ref route))
            if route == "/../escape"
    ));
    assert!(tree.paths().is_empty());
}

#[test]
fn table_crud_emits_data_access_schema_and_ui() {
    let mut spec = AppSpec::from_json(WITH_MODEL).unwrap();
    let tree = MemoryTree::new();
    compiler().compile(&mut spec, &tree).unwrap();

    assert!(tree.exists(Path::new("app/actions/coffee_order.ts")));
    assert!(tree.exists(Path::new("components/generated/CoffeeOrderTable.tsx")));

    let schema = tree.read_to_string(Path::new("db/schema.sql")).unwrap();
    assert!(schema.contains("create table if not exists coffee_order"));
    assert!(schema.contains("shots numeric"));

    let page = tree.read_to_string(Path::new("app/page.tsx")).unwrap();
    assert!(page.contains("fetchRows={listCoffeeOrder}"));
    assert_eq!(page.matches("import ").count(), 2);
}

#[test]
fn sidecar_round_trip_keeps_generated_paths_stable() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    let first = MemoryTree::new();
    compiler().compile(&mut spec, &first).unwrap();

    // Next edit cycle: reload the sidecar and compile with the production
    // (random) id source — persisted ids must win over fresh allocation.
    let mut reloaded =
        AppSpec::from_json(&first.read_to_string(Path::new(SIDECAR_FILE)).unwrap()).unwrap();
    let second = MemoryTree::new();
    Compiler::new(CompilerConfig::new(templates_root()))
        .compile(&mut reloaded, &second)
        .unwrap();

    let components = |tree: &MemoryTree| -> Vec<PathBuf> {
        tree.paths()
            .into_iter()
            .filter(|p| p.starts_with("components/generated"))
            .collect()
    };
    assert_eq!(components(&first), components(&second));
}

#[test]
fn unknown_theme_falls_back_and_scaffolding_succeeds() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    spec.theme = Some("neon".into());
    let tree = MemoryTree::new();
    compiler().compile(&mut spec, &tree).unwrap();

    // First registry entry (aurora) backs the palette
    let css = tree.read_to_string(Path::new("app/globals.css")).unwrap();
    assert!(css.contains("#6d28d9"));
}

#[test]
fn theme_override_subtree_wins_during_scaffolding() {
    let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
    spec.theme = Some("midnight".into());
    let tree = MemoryTree::new();
    compiler().compile(&mut spec, &tree).unwrap();

    let css = tree.read_to_string(Path::new("app/globals.css")).unwrap();
    assert!(css.contains("color-scheme: dark"));
    assert!(css.contains("#818cf8"));
}
