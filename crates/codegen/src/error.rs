use std::path::PathBuf;

use bindspec_core::SpecError;

/// Error type for code generation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A declaration failed validation against the type table.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// A custom body failed the structural check before splicing.
    #[error("custom body of '{function}' is malformed: {reason}")]
    MalformedBody { function: String, reason: String },

    /// The output file or its directory could not be written.
    #[error("cannot write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
