//! Layered template resolution and rendering

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::error::TemplateError;

// Explicit registration, mirroring the equality helper templates rely on
// for conditional text.
handlebars_helper!(eq: |a: Json, b: Json| a == b);

/// Template resolution and rendering engine
///
/// Owns its templates root and active theme; there is no ambient global
/// state. Rendering is a pure function of (template content, context), so
/// one engine is safe to share across concurrent block generation.
#[derive(Debug)]
pub struct TemplateEngine {
    root: PathBuf,
    theme: Option<String>,
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create an engine over a templates root
    ///
    /// `theme` activates the `overrides/<theme>` subtree as the
    /// highest-priority search layer.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, theme: Option<&str>) -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("eq", Box::new(eq));
        Self {
            root: root.into(),
            theme: theme.map(str::to_string),
            registry,
        }
    }

    /// The configured templates root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate a named template on the layered search path
    ///
    /// First match wins: theme override, `base`, `base/app`, top-level root.
    ///
    /// # Errors
    /// Returns [`TemplateError::NotFound`] enumerating every path searched.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, TemplateError> {
        let mut searched = Vec::with_capacity(4);
        if let Some(theme) = &self.theme {
            searched.push(self.root.join("overrides").join(theme).join(name));
        }
        searched.push(self.root.join("base").join(name));
        searched.push(self.root.join("base").join("app").join(name));
        searched.push(self.root.join(name));

        for candidate in &searched {
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
        }
        Err(TemplateError::NotFound {
            name: name.to_string(),
            searched,
        })
    }

    /// Resolve and render a named template
    ///
    /// # Errors
    /// Returns [`TemplateError::NotFound`] when no search layer holds the
    /// template, or a render/io error otherwise.
    pub fn render<C: Serialize>(&self, name: &str, context: &C) -> Result<String, TemplateError> {
        let path = self.resolve(name)?;
        tracing::debug!(template = name, path = %path.display(), "rendering template");
        let source = fs::read_to_string(&path)?;
        self.render_str(&source, context)
    }

    /// Render template source held in memory
    ///
    /// Used by the scaffolder, which reads template content through its own
    /// file tree abstraction.
    ///
    /// # Errors
    /// Returns [`TemplateError::Render`] when the source fails to render.
    pub fn render_str<C: Serialize>(
        &self,
        source: &str,
        context: &C,
    ) -> Result<String, TemplateError> {
        Ok(self.registry.render_template(source, context)?)
    }
}
