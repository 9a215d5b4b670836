//! Document formats a spec file may be written in.

use std::path::Path;

use crate::error::SpecError;
use crate::model::{RawDocument, SpecDocument};

/// Format of one spec document, chosen from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Unknown or missing extensions fall back to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => DocumentFormat::Json,
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }

    fn parse_raw(self, text: &str) -> Result<RawDocument, String> {
        match self {
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Parse the text of the document at `path` into a [`SpecDocument`].
///
/// A document with no content (or only comments/whitespace) is empty rather
/// than an error.
pub fn parse_document(text: &str, path: &Path) -> Result<SpecDocument, SpecError> {
    let file = path.display().to_string();
    let format = DocumentFormat::from_path(path);
    let raw = if is_blank(text, format) {
        RawDocument::default()
    } else {
        format.parse_raw(text).map_err(|message| SpecError::Parse {
            path: path.to_path_buf(),
            message,
        })?
    };
    SpecDocument::from_raw(raw, &file)
}

fn is_blank(text: &str, format: DocumentFormat) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty()
            || line == "---"
            || (format != DocumentFormat::Json && line.starts_with('#'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dispatch;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.YML")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.toml")),
            DocumentFormat::Toml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("specs/noext")),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn yaml_document_with_legacy_field_names() {
        let text = r#"
imports: [common.yaml]
functions:
  - name: InitWindow
    raylib_name: InitWindow
    args: [int, int, string]
    ret: void
    description: Open a window
  - name: LoadTextureId
    args: [string]
    ret: int
    custom_body: |
      return Value::from_int(1);
constants:
  - name: RED
    value: 230,41,55,255
"#;
        let doc = parse_document(text, Path::new("core.yaml")).unwrap();
        assert_eq!(doc.imports, vec!["common.yaml".to_string()]);
        assert_eq!(doc.functions.len(), 2);
        assert_eq!(doc.functions[0].params, vec!["int", "int", "string"]);
        assert_eq!(doc.functions[0].target(), Some("InitWindow"));
        assert!(matches!(
            doc.functions[1].dispatch,
            Dispatch::Verbatim { ref body } if body.contains("from_int(1)")
        ));
        assert_eq!(doc.constants[0].raw_value, "230,41,55,255");
        assert_eq!(doc.constants[0].prov.file, "core.yaml");
    }

    #[test]
    fn json_document_with_spec_field_names() {
        let text = r#"{
  "functions": [
    {"name": "Clamp", "target": "Clamp", "params": ["float", "float", "float"], "returnType": "float"}
  ],
  "constants": [{"name": "PI_TEXT", "rawValue": "3.14159"}]
}"#;
        let doc = parse_document(text, Path::new("math.json")).unwrap();
        assert_eq!(doc.functions[0].return_type, "float");
        assert_eq!(doc.constants[0].raw_value, "3.14159");
        assert!(doc.imports.is_empty());
    }

    #[test]
    fn toml_document() {
        let text = r#"
imports = ["base.toml"]

[[functions]]
name = "CloseWindow"
target = "CloseWindow"

[[constants]]
name = "MAX_LIGHTS"
value = 4
"#;
        let doc = parse_document(text, Path::new("window.toml")).unwrap();
        assert_eq!(doc.imports, vec!["base.toml".to_string()]);
        assert_eq!(doc.functions[0].arity(), 0);
        assert_eq!(doc.constants[0].raw_value, "4");
    }

    #[test]
    fn blank_document_is_empty() {
        let doc = parse_document("# nothing yet\n---\n", Path::new("empty.yaml")).unwrap();
        assert_eq!(doc, SpecDocument::default());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_document("functions: [ {name: ", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn native_name_is_a_target_alias() {
        let text = "functions:\n  - {name: Beep, native_name: PlaySoundBeep}\n";
        let doc = parse_document(text, Path::new("audio.yaml")).unwrap();
        assert_eq!(doc.functions[0].target(), Some("PlaySoundBeep"));
    }

    #[test]
    fn unquoted_float_constant_is_a_parse_error() {
        let text = "constants:\n  - {name: SCALE, value: 1.0}\n";
        let err = parse_document(text, Path::new("consts.yaml")).unwrap_err();
        assert!(
            matches!(err, SpecError::Parse { ref message, .. } if message.contains("'SCALE'")),
            "{err}"
        );

        let quoted = "constants:\n  - {name: SCALE, value: \"1.50\"}\n";
        let doc = parse_document(quoted, Path::new("consts.yaml")).unwrap();
        assert_eq!(doc.constants[0].raw_value, "1.50");
    }
}
