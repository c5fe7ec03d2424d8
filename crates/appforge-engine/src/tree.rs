//! Virtual file tree
//!
//! The compiler reads templates and writes output through [`FileTree`]
//! instead of touching the filesystem directly, so the scaffolder and guard
//! can be exercised against an in-memory tree. Paths are relative to the
//! tree root.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use parking_lot::RwLock;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the tree root
    pub path: PathBuf,
    /// File or directory
    pub kind: EntryKind,
}

/// Rooted file tree abstraction
///
/// Implementations must create parent directories on write and list entries
/// in a stable (sorted) order so walks are deterministic run-to-run.
pub trait FileTree: Send + Sync {
    /// Read a file's bytes
    ///
    /// # Errors
    /// Returns an io error when the file is missing or unreadable.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read a file as UTF-8 text
    ///
    /// # Errors
    /// Returns an io error when the file is missing or not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write a file, creating parent directories as needed
    ///
    /// # Errors
    /// Returns an io error when the write fails.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Whether a file exists at the path
    fn exists(&self, path: &Path) -> bool;

    /// List the immediate entries of a directory, sorted by path
    ///
    /// # Errors
    /// Returns an io error when the directory cannot be read.
    fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>>;
}

/// File tree over a real directory on disk
#[derive(Debug, Clone)]
pub struct DiskTree {
    root: PathBuf,
}

impl DiskTree {
    /// Create a tree rooted at a directory
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The tree root on disk
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileTree for DiskTree {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.full(path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let full = self.full(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        self.full(path).is_file()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.full(dir))? {
            let entry = entry?;
            let kind = if entry.file_type()?.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(TreeEntry {
                path: dir.join(entry.file_name()),
                kind,
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// In-memory file tree for tests
///
/// Directories are implied by the files under them.
#[derive(Debug, Default)]
pub struct MemoryTree {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryTree {
    /// Create an empty tree
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file before handing the tree to the code under test
    pub fn seed(&self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) {
        self.files
            .write()
            .insert(normalize(&path.into()), contents.as_ref().to_vec());
    }

    /// Paths of every file currently in the tree
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }

    /// Snapshot of every file for byte-level comparisons
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files.read().clone()
    }
}

impl FileTree for MemoryTree {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .read()
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.files
            .write()
            .insert(normalize(path), contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(&normalize(path))
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        let dir = normalize(dir);
        let files = self.files.read();
        let mut entries = Vec::new();
        for path in files.keys() {
            let Ok(rest) = path.strip_prefix(&dir) else {
                continue;
            };
            let Some(first) = rest.components().next() else {
                continue;
            };
            let child = dir.join(first.as_os_str());
            let kind = if child == *path {
                EntryKind::File
            } else {
                EntryKind::Dir
            };
            let entry = TreeEntry { path: child, kind };
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Strip `.` components so seeded and queried paths compare equal
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
