//! Resolution of declarations that register the same name.
//!
//! The function registry upper-cases names before keying them, so
//! `DrawText` and `drawtext` collide. Functions and constants share the
//! namespace.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::error::SpecError;
use crate::model::Declaration;

/// What to do when two declarations register the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep only the last declaration, at its own position.
    #[default]
    LastWins,
    /// Keep only the first declaration.
    FirstWins,
    /// Abort the run.
    Error,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DuplicatePolicy::LastWins => "last-wins",
            DuplicatePolicy::FirstWins => "first-wins",
            DuplicatePolicy::Error => "error",
        })
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-wins" => Ok(DuplicatePolicy::LastWins),
            "first-wins" => Ok(DuplicatePolicy::FirstWins),
            "error" => Ok(DuplicatePolicy::Error),
            other => Err(format!(
                "unknown duplicate policy '{}': expected last-wins, first-wins or error",
                other
            )),
        }
    }
}

fn registry_key(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Apply `policy` to `declarations`, preserving encounter order of the
/// survivors.
pub fn resolve_duplicates(
    declarations: Vec<Declaration>,
    policy: DuplicatePolicy,
) -> Result<Vec<Declaration>, SpecError> {
    // Index of the surviving declaration for each registry key.
    let mut keep: HashMap<String, usize> = HashMap::new();
    for (i, decl) in declarations.iter().enumerate() {
        let key = registry_key(decl.name());
        let Some(&previous) = keep.get(&key) else {
            keep.insert(key, i);
            continue;
        };
        let first = &declarations[previous];
        match policy {
            DuplicatePolicy::Error => {
                return Err(SpecError::DuplicateName {
                    name: decl.name().to_owned(),
                    first: first.prov().file.clone(),
                    second: decl.prov().file.clone(),
                });
            }
            DuplicatePolicy::LastWins => {
                warn!(
                    "'{}' from {} replaced by later declaration in {}",
                    first.name(),
                    first.prov().file,
                    decl.prov().file
                );
                keep.insert(key, i);
            }
            DuplicatePolicy::FirstWins => {
                warn!(
                    "'{}' from {} ignored; already declared in {}",
                    decl.name(),
                    decl.prov().file,
                    first.prov().file
                );
            }
        }
    }

    Ok(declarations
        .into_iter()
        .enumerate()
        .filter(|(i, decl)| keep.get(&registry_key(decl.name())) == Some(i))
        .map(|(_, decl)| decl)
        .collect())
}
