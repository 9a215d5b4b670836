//! bindspec-core: spec model and front end of the bindspec binding compiler.
//!
//! Turns a tree of declarative spec documents into an ordered, validated
//! list of function and constant declarations:
//!
//! - [`Loader`] -- parse documents and resolve imports depth-first
//! - [`TypeTag`] -- the closed set of semantic type tags
//! - [`AvailabilitySet`] -- symbols exported by the external headers
//! - [`resolve_duplicates`] -- explicit policy for names declared twice
//!
//! All file access goes through a [`SourceProvider`].

pub mod availability;
pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod model;
pub mod source;
pub mod types;

// ── Convenience re-exports ───────────────────────────────────────────

pub use availability::{build_availability, AvailabilitySet, HeaderScanner};
pub use error::SpecError;
pub use format::{parse_document, DocumentFormat};
pub use loader::{Loader, RootOutcome, SpecSet};
pub use merge::{resolve_duplicates, DuplicatePolicy};
pub use model::{
    ConstantSpec, ConstantValue, Declaration, Dispatch, FunctionSpec, Provenance, SpecDocument,
};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
pub use types::{Aggregate, Signature, TypeTag};
