//! appforge Spec Model
//!
//! The declarative description of one generated application, plus the
//! validator that gates compilation.
//!
//! # Overview
//!
//! - [`AppSpec`]: complete application description (models + pages)
//! - [`BlockSpec`]: closed tagged union over page content variants
//! - [`validate`]: fail-fast structural checks run before any generation
//!
//! The spec is JSON-shaped at the boundary: [`AppSpec::from_json`] checks
//! block type tags before typed deserialization so version skew surfaces as
//! [`SpecError::UnknownBlockType`] instead of an opaque parse error. The
//! same document, with allocated block ids filled in, is persisted as the
//! sidecar state file ([`SIDECAR_FILE`]) after every successful compile and
//! drives the next edit cycle.

#![warn(unreachable_pub)]

mod error;
mod spec;
mod validate;

pub use error::{SpecError, ValidationError};
pub use spec::{
    AppSpec, BlockSpec, CustomBlock, FeatureItem, FeaturesBlock, FieldSpec, FieldType,
    FooterBlock, HeroBlock, ModelSpec, NavLink, NavbarBlock, PageSpec, PricingBlock, PricingTier,
    Stack, TableCrudBlock, BLOCK_TAGS, SIDECAR_FILE,
};
pub use validate::validate;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
