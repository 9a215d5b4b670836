//! Assembly of the generated source file.

use std::fs;
use std::path::Path;

use crate::emit::Fragment;
use crate::error::CodegenError;
use crate::resources::{render_service, ResourceKind};

const INCLUDES: &str = r#"#include "raylib.h"
#pragma GCC diagnostic push
#pragma GCC diagnostic ignored "-Wmissing-field-initializers"
#include "raymath.h"
#pragma GCC diagnostic pop
#include "bas/runtime.hpp"
#include "bas/value.hpp"
#include <cstddef>
#include <cstdint>
#include <stdexcept>
#include <string>
#include <unordered_map>
#include <vector>

using bas::Value;
using Fn = bas::NativeFn;
"#;

const POSTAMBLE: &str = "}\n} // namespace bas\n";

/// The generated registration unit: fixed preamble, fragments in
/// encounter order, fixed postamble.
#[derive(Debug, Clone, Default)]
pub struct GeneratedModule {
    fragments: Vec<Fragment>,
}

impl GeneratedModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Full source text. Depends only on the fragments, so identical input
    /// renders byte-identical output.
    pub fn render(&self) -> String {
        let mut out = preamble();
        for fragment in &self.fragments {
            out.push_str(&fragment.text());
            out.push_str("\n\n");
        }
        out.push_str(POSTAMBLE);
        out
    }

    /// Render and write the module to `path` in one write, creating parent
    /// directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<(), CodegenError> {
        let text = self.render();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CodegenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| CodegenError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn preamble() -> String {
    let mut out = String::from("// Auto-generated by bindspec. Do not edit.\n");
    out.push_str(INCLUDES);
    out.push_str("\nnamespace bas {\nnamespace rlreg {\n");
    out.push_str(&render_service(&ResourceKind::ALL));
    out.push_str("} // namespace rlreg\n\n");
    out.push_str("void register_raylib_bindings(FunctionRegistry& R) {\n");
    out.push_str("    rlreg::resources();\n\n");
    out
}
