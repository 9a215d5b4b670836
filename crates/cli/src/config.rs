//! Generator configuration for `bindspec`.
//!
//! Every key is optional. Without a config file the generator runs over the
//! reference deployment's fixed layout.
//!
//! # Example
//!
//! ```toml
//! specs_dir = "specs"
//! roots = ["raylib_api.yaml", "01_core_window.yaml"]
//! headers = ["_deps/raylib-src/src/raylib.h", "_deps/raylib-src/src/raymath.h"]
//! output = "src/bindings/rt_raylib.gen.cpp"
//! on_duplicate = "last-wins"
//! export_markers = ["RLAPI", "RMAPI"]
//! allowed_prefixes = ["std::"]
//! ```

use std::path::{Path, PathBuf};

use bindspec_core::availability::{DEFAULT_ALLOWED_PREFIXES, DEFAULT_EXPORT_MARKERS};
use bindspec_core::DuplicatePolicy;
use serde::Deserialize;
use thiserror::Error;

/// File picked up from the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "bindspec.toml";

const DEFAULT_ROOTS: [&str; 11] = [
    "raylib_api.yaml",
    "01_core_window.yaml",
    "24_simple_game_apis.yaml",
    "25_core_missing_functions.yaml",
    "26_input_missing_functions.yaml",
    "27_shapes_missing_functions.yaml",
    "28_textures_images_functions.yaml",
    "29_text_fonts_functions.yaml",
    "30_models_3d_functions.yaml",
    "31_audio_functions.yaml",
    "32_raymath_functions.yaml",
];

const DEFAULT_HEADERS: [&str; 2] = [
    "_deps/raylib-src/src/raylib.h",
    "_deps/raylib-src/src/raymath.h",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ── Types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory the root documents are resolved against.
    pub specs_dir: PathBuf,
    /// Root documents, processed in order.
    pub roots: Vec<PathBuf>,
    /// Headers scanned for exported symbols.
    pub headers: Vec<PathBuf>,
    pub output: PathBuf,
    pub on_duplicate: DuplicatePolicy,
    pub export_markers: Vec<String>,
    /// Targets with one of these prefixes are always available.
    pub allowed_prefixes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            specs_dir: PathBuf::from("specs"),
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
            headers: DEFAULT_HEADERS.iter().map(PathBuf::from).collect(),
            output: PathBuf::from("src/bindings/rt_raylib.gen.cpp"),
            on_duplicate: DuplicatePolicy::default(),
            export_markers: DEFAULT_EXPORT_MARKERS.iter().map(|s| s.to_string()).collect(),
            allowed_prefixes: DEFAULT_ALLOWED_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Values given on the command line. Each one that is set replaces the
/// corresponding config value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub specs_dir: Option<PathBuf>,
    pub roots: Vec<PathBuf>,
    pub headers: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub on_duplicate: Option<DuplicatePolicy>,
}

// ── Functions ─────────────────────────────────────────────────────────

/// Read and parse a config file from `path`.
pub fn read_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the effective configuration.
///
/// An explicit `--config` path must exist. Otherwise `bindspec.toml` in the
/// working directory is used when present, and the defaults when not.
pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<GeneratorConfig, ConfigError> {
    let mut config = match explicit {
        Some(path) => read_config(path)?,
        None if Path::new(CONFIG_FILE).is_file() => read_config(Path::new(CONFIG_FILE))?,
        None => GeneratorConfig::default(),
    };
    config.apply(overrides);
    Ok(config)
}

impl GeneratorConfig {
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(dir) = overrides.specs_dir {
            self.specs_dir = dir;
        }
        if !overrides.roots.is_empty() {
            self.roots = overrides.roots;
        }
        if !overrides.headers.is_empty() {
            self.headers = overrides.headers;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(policy) = overrides.on_duplicate {
            self.on_duplicate = policy;
        }
    }
}
