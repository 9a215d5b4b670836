//! Spec loading: parse documents, resolve imports depth-first, merge.
//!
//! One [`Loader`] is used for a whole run. Its visited set is shared by
//! every root it loads, so a document reached through several import
//! chains (or several roots) contributes its declarations exactly once.
//!
//! Import names are always relative to the specs directory, whichever
//! document declares them.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::SpecError;
use crate::format::parse_document;
use crate::model::{ConstantSpec, Declaration, FunctionSpec};
use crate::source::SourceProvider;

/// Declarations merged from a document and its transitive imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecSet {
    pub declarations: Vec<Declaration>,
}

impl SpecSet {
    pub fn functions(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Function(f) => Some(f),
            Declaration::Constant(_) => None,
        })
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstantSpec> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Constant(c) => Some(c),
            Declaration::Function(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Result of loading one root document.
#[derive(Debug)]
pub enum RootOutcome {
    Loaded(SpecSet),
    /// The root file itself does not exist. Not an error for the run.
    Missing(PathBuf),
}

pub struct Loader<'p> {
    provider: &'p dyn SourceProvider,
    /// Directory every import is resolved against.
    specs_dir: PathBuf,
    visited: HashSet<PathBuf>,
    /// Documents currently being loaded, for cycle reporting.
    stack: Vec<PathBuf>,
}

impl<'p> Loader<'p> {
    pub fn new(provider: &'p dyn SourceProvider, specs_dir: impl Into<PathBuf>) -> Self {
        Loader {
            provider,
            specs_dir: specs_dir.into(),
            visited: HashSet::new(),
            stack: Vec::new(),
        }
    }

    /// Load `path` and everything it imports.
    ///
    /// Any missing or unparsable document, the root included, is an error.
    pub fn load(&mut self, path: &Path) -> Result<SpecSet, SpecError> {
        let mut set = SpecSet::default();
        self.load_file(path, &mut set.declarations)?;
        Ok(set)
    }

    /// Load a root document, reporting a missing root as an outcome rather
    /// than an error. Missing imports below the root are still fatal.
    pub fn load_root(&mut self, path: &Path) -> Result<RootOutcome, SpecError> {
        match self.provider.canonicalize(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Ok(RootOutcome::Missing(path.to_path_buf()))
            }
            _ => self.load(path).map(RootOutcome::Loaded),
        }
    }

    /// Number of distinct documents loaded so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn load_file(&mut self, path: &Path, out: &mut Vec<Declaration>) -> Result<(), SpecError> {
        let canon = self
            .provider
            .canonicalize(path)
            .map_err(|e| io_error(path, e))?;

        if self.visited.contains(&canon) {
            if self.stack.contains(&canon) {
                let chain: Vec<String> = self
                    .stack
                    .iter()
                    .map(|p| display_name(p))
                    .chain(std::iter::once(display_name(&canon)))
                    .collect();
                debug!("import cycle skipped: {}", chain.join(" \u{2192} "));
            } else {
                debug!("{} already loaded, skipping", path.display());
            }
            return Ok(());
        }
        self.visited.insert(canon.clone());

        info!("processing {}", display_name(path));
        let text = self
            .provider
            .read_source(path)
            .map_err(|e| io_error(path, e))?;
        let doc = parse_document(&text, path)?;

        self.stack.push(canon.clone());
        let imported = doc.imports.iter().try_for_each(|import| {
            let resolved = self
                .provider
                .resolve_import(&self.specs_dir, import)
                .map_err(|e| io_error(Path::new(import), e))?;
            self.load_file(&resolved, out)
        });
        self.stack.pop();
        imported?;

        out.extend(doc.into_declarations());
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> SpecError {
    if e.kind() == ErrorKind::NotFound {
        SpecError::Missing {
            path: path.to_path_buf(),
        }
    } else {
        SpecError::Read {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}
