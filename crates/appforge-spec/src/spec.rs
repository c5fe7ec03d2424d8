//! Typed application spec
//!
//! [`AppSpec`] owns every child spec and is the unit of persistence: the
//! exact value that produced the current output tree, including allocated
//! block ids, is written to the sidecar file after each compile.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// File name of the persisted sidecar spec at the project root
pub const SIDECAR_FILE: &str = "app.spec.json";

/// The closed set of block type tags accepted at the JSON boundary
pub const BLOCK_TAGS: [&str; 7] = [
    "TableCRUD",
    "Hero",
    "Features",
    "Navbar",
    "Footer",
    "Pricing",
    "Custom",
];

/// Complete declarative description of one generated application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSpec {
    /// Application name, used for the scaffolded project metadata
    pub name: String,
    /// Target stack tag
    pub stack: Stack,
    /// Requested theme id; missing themes fall back at scaffold time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Data models, in declaration order
    #[serde(default)]
    pub models: Vec<ModelSpec>,
    /// Pages, in declaration order
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

impl AppSpec {
    /// Read a spec from a JSON document
    ///
    /// Block type tags are checked against [`BLOCK_TAGS`] before typed
    /// deserialization, so an unknown variant reports the tag itself.
    ///
    /// # Errors
    /// Returns [`SpecError::UnknownBlockType`] for tag skew, or
    /// [`SpecError::Parse`] for any other malformed document.
    pub fn from_json(input: &str) -> Result<Self, SpecError> {
        let raw: serde_json::Value = serde_json::from_str(input)?;
        if let Some(pages) = raw.get("pages").and_then(serde_json::Value::as_array) {
            for page in pages {
                let blocks = page
                    .get("blocks")
                    .and_then(serde_json::Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for block in blocks {
                    let tag = block
                        .get("type")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default();
                    if !BLOCK_TAGS.contains(&tag) {
                        return Err(SpecError::UnknownBlockType(tag.to_string()));
                    }
                }
            }
        }
        Ok(serde_json::from_value(raw)?)
    }

    /// Serialize the spec for sidecar persistence
    ///
    /// # Errors
    /// Returns [`SpecError::Parse`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Target stack tag
///
/// Closed enum; a new stack is a schema version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stack {
    /// Next.js app-router project layout
    #[serde(rename = "nextjs")]
    NextJs,
}

/// One persisted data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model name, unique within the spec
    pub name: String,
    /// Fields, in declaration order
    pub fields: Vec<FieldSpec>,
}

/// One field of a data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub name: String,
    /// Semantic field type
    #[serde(rename = "type")]
    pub ty: FieldType,
}

/// Closed set of semantic field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text
    String,
    /// Numeric value
    Number,
    /// True/false flag
    Boolean,
}

/// One page of the generated application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Route, `/` for the tree root; unique within the spec
    pub route: String,
    /// Page title
    pub title: String,
    /// Blocks in vertical layout order
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

/// One content unit on a page
///
/// Tagged union over the closed variant set. Every variant except
/// `TableCRUD` carries an optional stable id; a table block's identity is
/// its model name. Once assigned, an id must never change across
/// recompilations — it keys the generated file paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockSpec {
    /// Table with create/list/remove data access for one model
    #[serde(rename = "TableCRUD")]
    TableCrud(TableCrudBlock),
    /// Hero banner
    Hero(HeroBlock),
    /// Feature grid
    Features(FeaturesBlock),
    /// Navigation bar
    Navbar(NavbarBlock),
    /// Page footer
    Footer(FooterBlock),
    /// Pricing tiers
    Pricing(PricingBlock),
    /// Free-form component body supplied upstream
    Custom(CustomBlock),
}

impl BlockSpec {
    /// Variant tag as it appears in the JSON document
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TableCrud(_) => "TableCRUD",
            Self::Hero(_) => "Hero",
            Self::Features(_) => "Features",
            Self::Navbar(_) => "Navbar",
            Self::Footer(_) => "Footer",
            Self::Pricing(_) => "Pricing",
            Self::Custom(_) => "Custom",
        }
    }

    /// Stable id, when the variant carries one
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::TableCrud(_) => None,
            Self::Hero(b) => b.id.as_deref(),
            Self::Features(b) => b.id.as_deref(),
            Self::Navbar(b) => b.id.as_deref(),
            Self::Footer(b) => b.id.as_deref(),
            Self::Pricing(b) => b.id.as_deref(),
            Self::Custom(b) => b.id.as_deref(),
        }
    }

    /// Whether this variant derives its identity from an allocated id
    ///
    /// Table blocks are keyed by model name instead.
    #[inline]
    #[must_use]
    pub fn needs_id(&self) -> bool {
        !matches!(self, Self::TableCrud(_))
    }

    /// Assign a stable id; no-op for variants keyed by model name
    pub fn set_id(&mut self, id: String) {
        match self {
            Self::TableCrud(_) => {}
            Self::Hero(b) => b.id = Some(id),
            Self::Features(b) => b.id = Some(id),
            Self::Navbar(b) => b.id = Some(id),
            Self::Footer(b) => b.id = Some(id),
            Self::Pricing(b) => b.id = Some(id),
            Self::Custom(b) => b.id = Some(id),
        }
    }
}

/// Table block referencing one model by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCrudBlock {
    /// Referenced model; must name an entry in [`AppSpec::models`]
    pub model: String,
}

/// Hero banner content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroBlock {
    /// Stable identity; allocated on first compile when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Headline text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Supporting tagline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

/// Feature grid content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesBlock {
    /// Stable identity; allocated on first compile when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Feature entries in display order
    #[serde(default)]
    pub items: Vec<FeatureItem>,
}

/// One entry of a feature grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureItem {
    /// Short feature title
    pub title: String,
    /// Supporting detail text
    #[serde(default)]
    pub detail: String,
}

/// Navigation bar content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarBlock {
    /// Stable identity; allocated on first compile when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Brand label shown at the start of the bar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Navigation links in display order
    #[serde(default)]
    pub links: Vec<NavLink>,
}

/// One navigation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link label
    pub label: String,
    /// Link target
    pub href: String,
}

/// Footer content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterBlock {
    /// Stable identity; allocated on first compile when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Footer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Pricing section content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBlock {
    /// Stable identity; allocated on first compile when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Pricing tiers in display order
    #[serde(default)]
    pub tiers: Vec<PricingTier>,
}

/// One pricing tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Tier name
    pub name: String,
    /// Displayed price
    pub price: String,
    /// Included perks in display order
    #[serde(default)]
    pub perks: Vec<String>,
}

/// Free-form component supplied upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomBlock {
    /// Stable identity; allocated on first compile when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User-supplied name; sanitized into the component identifier
    pub name: String,
    /// Component body; expected to carry an exported function
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BEAN_THERE: &str = r#"{
        "name": "bean-there",
        "stack": "nextjs",
        "models": [],
        "pages": [{
            "route": "/",
            "title": "BeanThere Coffee",
            "blocks": [
                { "type": "Navbar", "brand": "BeanThere" },
                { "type": "Hero", "heading": "Coffee, done right" },
                { "type": "Footer", "text": "est. 2026" }
            ]
        }]
    }"#;

    #[test]
    fn parses_tagged_block_union() {
        let spec = AppSpec::from_json(BEAN_THERE).unwrap();
        assert_eq!(spec.name, "bean-there");
        assert_eq!(spec.pages[0].blocks.len(), 3);
        assert!(matches!(spec.pages[0].blocks[0], BlockSpec::Navbar(_)));
        assert!(matches!(spec.pages[0].blocks[1], BlockSpec::Hero(_)));
        // No ids until the compiler allocates them
        assert!(spec.pages[0].blocks.iter().all(|b| b.id().is_none()));
    }

    #[test]
    fn rejects_unknown_block_tag() {
        let doc = r#"{
            "name": "x", "stack": "nextjs", "models": [],
            "pages": [{ "route": "/", "title": "X",
                        "blocks": [{ "type": "Carousel" }] }]
        }"#;
        let err = AppSpec::from_json(doc).unwrap_err();
        assert!(
            matches!(err, SpecError::UnknownBlockType(ref tag) if tag == "Carousel"),
            "expected UnknownBlockType, got {err}"
        );
    }

    #[test]
    fn rejects_unknown_field_type() {
        let doc = r#"{
            "name": "x", "stack": "nextjs",
            "models": [{ "name": "User",
                         "fields": [{ "name": "age", "type": "date" }] }],
            "pages": [{ "route": "/", "title": "X", "blocks": [] }]
        }"#;
        let err = AppSpec::from_json(doc).unwrap_err();
        assert!(matches!(err, SpecError::Parse(_)), "got {err}");
    }

    #[test]
    fn sidecar_round_trip_preserves_ids() {
        let mut spec = AppSpec::from_json(BEAN_THERE).unwrap();
        for (i, block) in spec.pages[0].blocks.iter_mut().enumerate() {
            block.set_id(format!("blk{i}"));
        }
        let json = spec.to_json_pretty().unwrap();
        let reloaded = AppSpec::from_json(&json).unwrap();
        assert_eq!(reloaded, spec);
        assert_eq!(reloaded.pages[0].blocks[1].id(), Some("blk1"));
    }

    #[test]
    fn table_block_identity_is_its_model() {
        let mut block = BlockSpec::TableCrud(TableCrudBlock {
            model: "User".into(),
        });
        assert!(!block.needs_id());
        block.set_id("ignored".into());
        assert_eq!(block.id(), None);
    }
}
