//! Theme registry and fallback resolution
//!
//! Themes are named palettes injected into scaffolded templates. Missing
//! theme data must never fail a compile: an unknown id falls back to the
//! registry's first entry, and a missing registry falls back to a hardcoded
//! default palette.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the theme registry under the templates root
pub const THEMES_FILE: &str = "themes.json";

/// One named theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Registry id, referenced by the spec's optional theme field
    pub id: String,
    /// Display name
    pub name: String,
    /// Palette injected into scaffold templates
    pub colors: Palette,
}

/// Color palette of a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Primary brand color
    pub primary: String,
    /// Secondary brand color
    pub secondary: String,
    /// Accent color
    pub accent: String,
    /// Page background
    pub background: String,
    /// Foreground/text color
    pub foreground: String,
}

/// Theme lookup over the registry shipped with the templates root
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    /// Load the registry from `<root>/themes.json`
    ///
    /// A missing or malformed registry yields an empty one; selection then
    /// falls back to the hardcoded default palette.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let path = root.join(THEMES_FILE);
        let themes = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_else(|| {
                tracing::warn!(path = %path.display(), "no readable theme registry");
                Vec::new()
            });
        Self { themes }
    }

    /// Build a registry from themes already in memory
    #[inline]
    #[must_use]
    pub fn from_themes(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    /// Registered themes, in registry order
    #[inline]
    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Select a theme for a compile
    ///
    /// Requested id when registered; otherwise the registry's first entry;
    /// otherwise the hardcoded default. Never fails.
    #[must_use]
    pub fn select(&self, requested: Option<&str>) -> Theme {
        if let Some(id) = requested {
            if let Some(theme) = self.themes.iter().find(|t| t.id == id) {
                return theme.clone();
            }
            tracing::warn!(theme = id, "requested theme not registered, falling back");
        }
        self.themes.first().cloned().unwrap_or_else(default_theme)
    }
}

fn default_theme() -> Theme {
    Theme {
        id: "default".into(),
        name: "Default".into(),
        colors: Palette {
            primary: "#2563eb".into(),
            secondary: "#0ea5e9".into(),
            accent: "#f59e0b".into(),
            background: "#ffffff".into(),
            foreground: "#0f172a".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn theme(id: &str) -> Theme {
        Theme {
            id: id.into(),
            name: id.to_uppercase(),
            colors: default_theme().colors,
        }
    }

    #[test]
    fn selects_requested_theme() {
        let registry = ThemeRegistry::from_themes(vec![theme("aurora"), theme("midnight")]);
        assert_eq!(registry.select(Some("midnight")).id, "midnight");
    }

    #[test]
    fn unknown_theme_falls_back_to_first_entry() {
        let registry = ThemeRegistry::from_themes(vec![theme("aurora"), theme("midnight")]);
        assert_eq!(registry.select(Some("neon")).id, "aurora");
    }

    #[test]
    fn no_request_selects_first_entry() {
        let registry = ThemeRegistry::from_themes(vec![theme("aurora")]);
        assert_eq!(registry.select(None).id, "aurora");
    }

    #[test]
    fn empty_registry_yields_hardcoded_default() {
        let registry = ThemeRegistry::default();
        let selected = registry.select(Some("anything"));
        assert_eq!(selected.id, "default");
        assert!(!selected.colors.primary.is_empty());
    }

    #[test]
    fn missing_registry_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ThemeRegistry::load(dir.path());
        assert!(registry.themes().is_empty());
    }
}
