//! Source provider abstraction for spec documents and header files.
//!
//! The loader and the symbol validator never touch `std::fs` directly; they
//! go through a [`SourceProvider`] so whole spec trees can be exercised from
//! memory in tests.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// File access used by the spec loader and the availability scan.
pub trait SourceProvider {
    /// Read the text of the document at `path`. Text that is not valid UTF-8
    /// is an `InvalidData` error.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;

    /// Read a header. Headers are not guaranteed to be UTF-8, so invalid
    /// sequences may be replaced instead of failing the read.
    fn read_header(&self, path: &Path) -> Result<String, std::io::Error> {
        self.read_source(path)
    }

    /// Resolve an import name against the directory imports are relative to.
    fn resolve_import(&self, base: &Path, import: &str) -> Result<PathBuf, std::io::Error>;

    /// Canonicalize a path; this is the identity used for the visited set.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, std::io::Error>;
}

/// Filesystem-backed provider.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn read_header(&self, path: &Path) -> Result<String, std::io::Error> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn resolve_import(&self, base: &Path, import: &str) -> Result<PathBuf, std::io::Error> {
        Ok(base.join(import))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, std::io::Error> {
        path.canonicalize()
    }
}

/// In-memory provider mapping normalized paths to file contents.
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        Self { files }
    }

    /// Build a provider from `(path, contents)` pairs.
    pub fn from_pairs<P, S>(pairs: impl IntoIterator<Item = (P, S)>) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let files = pairs
            .into_iter()
            .map(|(p, s)| (Self::normalize_path(&p.into()), s.into()))
            .collect();
        Self { files }
    }

    /// Resolve `.` and `..` components without touching the filesystem.
    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }

    fn not_found(path: &Path) -> std::io::Error {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file not found in memory: {}", path.display()),
        )
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = Self::normalize_path(path);
        self.files
            .get(&normalized)
            .cloned()
            .ok_or_else(|| Self::not_found(&normalized))
    }

    fn resolve_import(&self, base: &Path, import: &str) -> Result<PathBuf, std::io::Error> {
        Ok(Self::normalize_path(&base.join(import)))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, std::io::Error> {
        let normalized = Self::normalize_path(path);
        if self.files.contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(Self::not_found(&normalized))
        }
    }
}
