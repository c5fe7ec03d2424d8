//! appforge Template Engine
//!
//! Locates and renders named templates against a layered search path, and
//! resolves theme palettes for scaffolding.
//!
//! # Overview
//!
//! - [`TemplateEngine`]: threaded configuration (no global templates root),
//!   layered resolution, pure rendering
//! - [`ThemeRegistry`]: JSON-backed theme lookup with first-entry and
//!   hardcoded fallbacks — scaffolding never fails for missing theme data
//!
//! Search order for [`TemplateEngine::resolve`], first match wins:
//! theme-override subtree (when a theme is active), the `base` root, the
//! conventional `base/app` layer, then the top-level templates root for
//! cross-cutting partials such as block templates.

#![warn(unreachable_pub)]

mod engine;
mod error;
mod theme;

pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use theme::{Palette, Theme, ThemeRegistry, THEMES_FILE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
