//! Ownership guard
//!
//! Gates every write to a regenerated file. A file whose first line carries
//! the generated-file marker is machine-owned and safe to overwrite; a file
//! without it has been claimed by the user and is left untouched. The guard
//! never deletes and never merges — it is all-or-nothing per file.
//!
//! This is what lets "create" and "edit" share one code path: regeneration
//! is always safe to attempt.

use std::io;
use std::path::Path;

use crate::tree::FileTree;

/// Sentinel text marking a file as machine-generated
pub const MARKER: &str = "GENERATED FILE - DO NOT EDIT";

/// Outcome of a guarded write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content was written
    Written,
    /// Target exists without the marker; nothing was touched
    Skipped,
}

/// Marker line for a target path's comment-syntax family
///
/// Returns `None` for files with no comment syntax (e.g. JSON); those are
/// written once and become user-owned, since the guard can never prove
/// ownership of them again.
#[must_use]
pub fn marker_line(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    match ext {
        "ts" | "tsx" | "js" | "jsx" | "mjs" => Some(format!("// {MARKER}\n")),
        "css" => Some(format!("/* {MARKER} */\n")),
        "sql" => Some(format!("-- {MARKER}\n")),
        "sh" | "yml" | "yaml" | "toml" | "env" => Some(format!("# {MARKER}\n")),
        _ => None,
    }
}

/// Prefix content with the marker line appropriate to the target path
#[must_use]
pub fn with_marker(path: &Path, body: &str) -> String {
    match marker_line(path) {
        Some(line) => format!("{line}{body}"),
        None => body.to_string(),
    }
}

/// Write gate over a file tree
#[derive(Clone, Copy)]
pub struct Guard<'a> {
    tree: &'a dyn FileTree,
}

impl std::fmt::Debug for Guard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

impl<'a> Guard<'a> {
    /// Create a guard over a tree
    #[inline]
    #[must_use]
    pub fn new(tree: &'a dyn FileTree) -> Self {
        Self { tree }
    }

    /// The underlying tree, for writes that bypass protection by design
    /// (raw scaffold copies, the schema artifact, the sidecar spec)
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &'a dyn FileTree {
        self.tree
    }

    /// Write content unless the target has been claimed by the user
    ///
    /// Missing target: write, report [`WriteOutcome::Written`]. Existing
    /// target: inspect the first line only; marker present means overwrite,
    /// anything else means [`WriteOutcome::Skipped`] with nothing written.
    ///
    /// # Errors
    /// Propagates filesystem errors; a skip is a normal outcome, not an
    /// error.
    pub fn write(&self, path: &Path, content: &str) -> io::Result<WriteOutcome> {
        if self.tree.exists(path) {
            let existing = self.tree.read_to_string(path)?;
            let first_line = existing.lines().next().unwrap_or("");
            if !first_line.contains(MARKER) {
                tracing::info!(path = %path.display(), "skipping user-owned file");
                return Ok(WriteOutcome::Skipped);
            }
        }
        self.tree.write(path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "wrote generated file");
        Ok(WriteOutcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_missing_target_unconditionally() {
        let tree = MemoryTree::new();
        let guard = Guard::new(&tree);
        let outcome = guard
            .write(Path::new("a.tsx"), "// GENERATED FILE - DO NOT EDIT\nbody")
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert!(tree.exists(Path::new("a.tsx")));
    }

    #[test]
    fn overwrites_marked_file() {
        let tree = MemoryTree::new();
        tree.seed("a.tsx", "// GENERATED FILE - DO NOT EDIT\nold");
        let guard = Guard::new(&tree);
        let outcome = guard
            .write(Path::new("a.tsx"), "// GENERATED FILE - DO NOT EDIT\nnew")
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Written);
        assert!(tree
            .read_to_string(Path::new("a.tsx"))
            .unwrap()
            .ends_with("new"));
    }

    #[test]
    fn skips_file_whose_marker_was_removed() {
        let tree = MemoryTree::new();
        tree.seed("a.tsx", "// my file now\nhand edited");
        let guard = Guard::new(&tree);
        let outcome = guard
            .write(Path::new("a.tsx"), "// GENERATED FILE - DO NOT EDIT\nregen")
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(
            tree.read_to_string(Path::new("a.tsx")).unwrap(),
            "// my file now\nhand edited"
        );
    }

    #[test]
    fn only_the_first_line_is_inspected() {
        let tree = MemoryTree::new();
        // Marker buried later in the file does not grant ownership
        tree.seed("a.tsx", "hand edited\n// GENERATED FILE - DO NOT EDIT\n");
        let guard = Guard::new(&tree);
        let outcome = guard.write(Path::new("a.tsx"), "regen").unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
    }

    #[test]
    fn marker_line_follows_comment_syntax_family() {
        assert_eq!(
            marker_line(Path::new("x.tsx")).unwrap(),
            "// GENERATED FILE - DO NOT EDIT\n"
        );
        assert_eq!(
            marker_line(Path::new("x.css")).unwrap(),
            "/* GENERATED FILE - DO NOT EDIT */\n"
        );
        assert_eq!(
            marker_line(Path::new("x.sql")).unwrap(),
            "-- GENERATED FILE - DO NOT EDIT\n"
        );
        assert_eq!(marker_line(Path::new("x.json")), None);
    }

    #[test]
    fn with_marker_leaves_unmarkable_files_alone() {
        assert_eq!(with_marker(Path::new("x.json"), "{}"), "{}");
        assert!(with_marker(Path::new("x.ts"), "body").starts_with("// GENERATED"));
    }
}
