use std::path::PathBuf;

/// All errors raised while loading and validating a spec tree.
///
/// The `Missing`, `Read` and `Parse` variants form the load-error family:
/// any of them aborts the run before the output file is touched.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A spec document referenced by an import does not exist.
    #[error("spec document not found: {}", path.display())]
    Missing { path: PathBuf },

    /// A spec document exists but could not be read.
    #[error("cannot read spec document '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A spec document could not be parsed in its format.
    #[error("cannot parse spec document '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A function declares neither a native target nor a custom body.
    #[error("function '{function}' in {file} has no target and no custom body")]
    MissingTarget { function: String, file: String },

    /// A declared type tag has no entry in the type mapping table.
    #[error("function '{function}' uses unknown type tag '{tag}'")]
    UnknownType { function: String, tag: String },

    /// `void` was declared as a parameter type.
    #[error("function '{function}' declares parameter {position} as void")]
    VoidParameter { function: String, position: usize },

    /// Two declarations register the same name under the `error` policy.
    #[error("duplicate registration '{name}': first declared in {first}, again in {second}")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    /// No usable export marker was configured.
    #[error("header export markers must be non-empty")]
    NoExportMarkers,

    /// An export marker could not be compiled into a header pattern.
    #[error("invalid header export pattern: {0}")]
    HeaderPattern(#[from] regex::Error),
}

impl SpecError {
    /// Whether this error reports a document that does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, SpecError::Missing { .. })
    }
}
