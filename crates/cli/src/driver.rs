//! One generation run: load, validate, emit, write.
//!
//! Every fatal error surfaces before the output file is touched, so a run
//! either writes a complete module or leaves the previous one in place.

use std::path::PathBuf;

use bindspec_codegen::{generate, CodegenError};
use bindspec_core::{
    build_availability, resolve_duplicates, AvailabilitySet, Declaration, FileSystemProvider,
    HeaderScanner, Loader, RootOutcome, SourceProvider, SpecError,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::GeneratorConfig;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Registrations written to the output module.
    pub emitted: usize,
    /// Functions dropped because their target is not exported.
    pub skipped: usize,
    pub output: PathBuf,
}

pub fn run(config: &GeneratorConfig) -> Result<Summary, DriverError> {
    run_with(&FileSystemProvider, config)
}

pub fn run_with(
    provider: &dyn SourceProvider,
    config: &GeneratorConfig,
) -> Result<Summary, DriverError> {
    let scanner = HeaderScanner::new(config.export_markers.as_slice())?;
    let available = build_availability(provider, &config.headers, &scanner)
        .with_allowed_prefixes(config.allowed_prefixes.iter().cloned());
    info!("{} exported symbols available", available.len());

    let mut loader = Loader::new(provider, &config.specs_dir);
    let mut declarations = Vec::new();
    for root in &config.roots {
        let path = config.specs_dir.join(root);
        match loader.load_root(&path)? {
            RootOutcome::Loaded(set) => declarations.extend(set.declarations),
            RootOutcome::Missing(path) => warn!("spec file not found: {}", path.display()),
        }
    }

    let (accepted, skipped) = filter_available(declarations, &available);
    let accepted = resolve_duplicates(accepted, config.on_duplicate)?;
    let module = generate(&accepted)?;
    module.write_to(&config.output)?;

    Ok(Summary {
        emitted: module.len(),
        skipped,
        output: config.output.clone(),
    })
}

/// Drop native functions whose target the headers do not export. Custom
/// bodies and constants always pass.
fn filter_available(
    declarations: Vec<Declaration>,
    available: &AvailabilitySet,
) -> (Vec<Declaration>, usize) {
    let mut skipped = 0;
    let accepted = declarations
        .into_iter()
        .filter(|decl| {
            let Declaration::Function(f) = decl else {
                return true;
            };
            match f.target() {
                Some(target) if !available.is_available(target) => {
                    warn!("skipping unsupported function {} -> {}", f.name, target);
                    skipped += 1;
                    false
                }
                _ => true,
            }
        })
        .collect();
    (accepted, skipped)
}
