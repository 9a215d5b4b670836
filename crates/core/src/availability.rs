//! Symbol availability: which native targets the external headers export.

use std::collections::BTreeSet;
use std::path::PathBuf;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::SpecError;
use crate::source::SourceProvider;

/// Export markers recognized when none are configured.
pub const DEFAULT_EXPORT_MARKERS: &[&str] = &["RLAPI", "RMAPI"];

/// Qualifiers that are always callable regardless of the headers.
pub const DEFAULT_ALLOWED_PREFIXES: &[&str] = &["std::"];

/// Symbol names exported by the scanned headers.
///
/// An empty set means no header data was found and nothing is filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySet {
    symbols: BTreeSet<String>,
    allowed_prefixes: Vec<String>,
}

impl AvailabilitySet {
    /// A set that allows every target.
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AvailabilitySet {
            symbols: symbols.into_iter().map(Into::into).collect(),
            allowed_prefixes: DEFAULT_ALLOWED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    pub fn with_allowed_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Whether a binding calling `target` may be emitted.
    pub fn is_available(&self, target: &str) -> bool {
        if self.symbols.is_empty() {
            return true;
        }
        let normalized = target.trim_start_matches(':');
        self.symbols.contains(normalized)
            || self
                .allowed_prefixes
                .iter()
                .any(|prefix| normalized.starts_with(prefix.as_str()))
    }
}

/// Scans header text for exported function declarations.
#[derive(Debug, Clone)]
pub struct HeaderScanner {
    pattern: Regex,
}

impl HeaderScanner {
    /// Build a scanner for declarations of the form
    /// `MARKER <return type> name(`, where the return type may end in `*`
    /// written against the name.
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Result<Self, SpecError> {
        if markers.is_empty() || markers.iter().any(|m| m.as_ref().trim().is_empty()) {
            return Err(SpecError::NoExportMarkers);
        }
        let alternation = markers
            .iter()
            .map(|m| regex::escape(m.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"\b(?:{})\s+[\w\s\*]*?[\s\*](\w+)\s*\(",
            alternation
        ))?;
        Ok(HeaderScanner { pattern })
    }

    /// Names declared in one header's text, in order of appearance.
    pub fn scan<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

impl Default for HeaderScanner {
    fn default() -> Self {
        lazy_static::lazy_static! {
            static ref DEFAULT_SCANNER: HeaderScanner =
                HeaderScanner::new(DEFAULT_EXPORT_MARKERS).unwrap();
        }
        DEFAULT_SCANNER.clone()
    }
}

/// Build the availability set from the given header files.
///
/// Headers that cannot be read are skipped. When no symbols are found at
/// all, the permissive empty set is returned and a warning is logged.
pub fn build_availability(
    provider: &dyn SourceProvider,
    headers: &[PathBuf],
    scanner: &HeaderScanner,
) -> AvailabilitySet {
    let mut symbols = BTreeSet::new();
    for header in headers {
        match provider.read_header(header) {
            Ok(text) => {
                let before = symbols.len();
                symbols.extend(scanner.scan(&text).into_iter().map(str::to_owned));
                debug!(
                    "{}: {} exported symbols",
                    header.display(),
                    symbols.len() - before
                );
            }
            Err(e) => debug!("header {} unavailable: {}", header.display(), e),
        }
    }
    if symbols.is_empty() {
        warn!("could not locate headers for validation; generating all bindings");
    }
    AvailabilitySet::from_symbols(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryProvider;

    const RAYLIB_H: &str = r#"
// Window-related functions
RLAPI void InitWindow(int width, int height, const char *title);  // Initialize window
RLAPI bool WindowShouldClose(void);
RLAPI const char *GetClipboardText(void);
RLAPI Vector2 GetMousePosition(void);
void NotExported(int x);
"#;

    const RAYMATH_H: &str = r#"
RMAPI float Clamp(float value, float min, float max)
{
    float result = (value < min)? min : value;
    return result;
}
RMAPI Matrix MatrixIdentity(void)
"#;

    #[test]
    fn scanner_collects_marked_declarations() {
        let scanner = HeaderScanner::default();
        let names = scanner.scan(RAYLIB_H);
        assert_eq!(
            names,
            vec![
                "InitWindow",
                "WindowShouldClose",
                "GetClipboardText",
                "GetMousePosition"
            ]
        );
    }

    #[test]
    fn scanner_respects_custom_markers() {
        let scanner = HeaderScanner::new(&["MYAPI"]).unwrap();
        let names = scanner.scan("MYAPI int Foo(void);\nRLAPI int Bar(void);");
        assert_eq!(names, vec!["Foo"]);
    }

    #[test]
    fn empty_or_blank_markers_are_rejected() {
        let none: [&str; 0] = [];
        assert!(matches!(
            HeaderScanner::new(&none),
            Err(SpecError::NoExportMarkers)
        ));
        assert!(matches!(
            HeaderScanner::new(&["RLAPI", "  "]),
            Err(SpecError::NoExportMarkers)
        ));
    }

    #[test]
    fn build_merges_headers_and_skips_missing() {
        let provider =
            InMemoryProvider::from_pairs([("/h/raylib.h", RAYLIB_H), ("/h/raymath.h", RAYMATH_H)]);
        let set = build_availability(
            &provider,
            &[
                PathBuf::from("/h/raylib.h"),
                PathBuf::from("/h/missing.h"),
                PathBuf::from("/h/raymath.h"),
            ],
            &HeaderScanner::default(),
        );
        assert_eq!(set.len(), 6);
        assert!(set.contains("Clamp"));
        assert!(set.contains("MatrixIdentity"));
        assert!(!set.contains("NotExported"));
    }

    #[test]
    fn no_headers_yields_permissive_set() {
        let provider = InMemoryProvider::from_pairs(Vec::<(PathBuf, String)>::new());
        let set = build_availability(
            &provider,
            &[PathBuf::from("/h/raylib.h")],
            &HeaderScanner::default(),
        );
        assert!(set.is_empty());
        assert!(set.is_available("Anything"));
    }

    #[test]
    fn availability_checks_membership_and_prefixes() {
        let set = AvailabilitySet::from_symbols(["InitWindow"]);
        assert!(set.is_available("InitWindow"));
        assert!(set.is_available("::InitWindow"));
        assert!(set.is_available("std::max"));
        assert!(!set.is_available("InitWindowEx"));
        assert!(!set.is_available("GuiButton"));
    }

    #[test]
    fn custom_prefixes_replace_defaults() {
        let set = AvailabilitySet::from_symbols(["InitWindow"]).with_allowed_prefixes(["bas::"]);
        assert!(set.is_available("bas::helper"));
        assert!(!set.is_available("std::max"));
    }
}
